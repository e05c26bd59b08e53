// apps/wm_cli/src/commands/build.rs

//! 构建命令
//!
//! 加载工况配置与高程栅格，对平底挤出网格执行贴地变换，
//! 写出 GAMBIT 中性格式文件。

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use wm_config::CaseConfig;
use wm_mesh::TerrainMeshBuilder;
use wm_terrain::asc::AscLoader;

/// 构建参数
#[derive(Args)]
pub struct BuildArgs {
    /// 工况配置文件 (info.json)
    #[arg(short, long, default_value = "info.json")]
    pub config: PathBuf,

    /// 平底挤出网格文件
    #[arg(short, long, default_value = "flat.msh")]
    pub mesh: PathBuf,

    /// 高程栅格文件 (ESRI ASCII)
    #[arg(short, long, default_value = "terrain.asc")]
    pub terrain: PathBuf,

    /// 输出文件
    #[arg(short, long, default_value = "output.neu")]
    pub output: PathBuf,
}

/// 执行构建命令
pub fn execute(args: BuildArgs) -> Result<()> {
    info!("=== WindMesh 贴地网格构建 ===");

    let config = CaseConfig::from_file(&args.config)
        .with_context(|| format!("加载配置失败: {}", args.config.display()))?;
    info!(
        "计算域: 边长 {} m, 高度 {} m, 融合半径 [{}, {}] m, 风向角 {}°",
        config.domain.lt, config.domain.h, config.mesh.tr1, config.mesh.tr2, config.wind.angle
    );

    let raster = AscLoader::load(&args.terrain)
        .with_context(|| format!("加载栅格失败: {}", args.terrain.display()))?;
    info!(
        "栅格: {} x {}, 基准高程 {:.2} m",
        raster.width(),
        raster.height(),
        raster.datum()
    );

    let start = Instant::now();
    let report = TerrainMeshBuilder::new(config, raster)
        .build(&args.mesh, &args.output)
        .context("贴地网格构建失败")?;

    info!("=== 构建完成 ===");
    info!("节点: {}", report.nodes_written);
    info!(
        "单元: {} ({} 层 × 每层 {})",
        report.elements_written, report.layers, report.elements_per_layer
    );
    if report.degraded_samples > 0 {
        info!("降质采样: {} 次", report.degraded_samples);
    }
    info!("耗时: {:.2} s", start.elapsed().as_secs_f64());
    info!("输出: {}", args.output.display());

    Ok(())
}
