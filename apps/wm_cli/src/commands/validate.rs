// apps/wm_cli/src/commands/validate.rs

//! 验证命令
//!
//! 只做配置加载与校验，不执行构建。

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use wm_config::CaseConfig;

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 工况配置文件 (info.json)
    #[arg(short, long, default_value = "info.json")]
    pub config: PathBuf,
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    let config = CaseConfig::from_file(&args.config)
        .with_context(|| format!("配置无效: {}", args.config.display()))?;

    info!("配置有效: {}", args.config.display());
    info!("  计算域: 边长 {} m, 高度 {} m", config.domain.lt, config.domain.h);
    info!("  融合半径: [{}, {}] m", config.mesh.tr1, config.mesh.tr2);
    info!("  风向角: {}°", config.wind.angle);
    info!("  缩放系数: {}", config.mesh.scale);
    info!("  风机/种子点: {} 个", config.seed_count());

    Ok(())
}
