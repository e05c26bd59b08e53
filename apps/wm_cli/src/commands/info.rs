// apps/wm_cli/src/commands/info.rs

//! 信息命令
//!
//! 打印高程栅格与网格文件的概要，便于构建前检查输入。

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use wm_mesh::msh::{MshReader, WEDGE_TYPE};
use wm_terrain::asc::AscLoader;

/// 信息参数
#[derive(Args)]
pub struct InfoArgs {
    /// 高程栅格文件 (ESRI ASCII)
    #[arg(short, long)]
    pub terrain: Option<PathBuf>,

    /// 平底挤出网格文件
    #[arg(short, long)]
    pub mesh: Option<PathBuf>,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    if args.terrain.is_none() && args.mesh.is_none() {
        anyhow::bail!("请至少指定 --terrain 或 --mesh 之一");
    }

    if let Some(path) = &args.terrain {
        let raster =
            AscLoader::load(path).with_context(|| format!("加载栅格失败: {}", path.display()))?;
        let b = raster.bounds();
        info!("栅格: {}", path.display());
        info!("  尺寸: {} x {}", raster.width(), raster.height());
        info!("  范围: x [{:.1}, {:.1}], y [{:.1}, {:.1}]", b.xmin, b.xmax, b.ymin, b.ymax);
        info!("  基准高程: {:.2} m", raster.datum());
    }

    if let Some(path) = &args.mesh {
        let mut reader =
            MshReader::open(path).with_context(|| format!("打开网格失败: {}", path.display()))?;

        reader.seek_section("$Nodes")?;
        let n_nodes = reader.read_count()?;
        for _ in 0..n_nodes {
            reader.skip_record()?;
        }

        reader.seek_section("$Elements")?;
        let n_elements = reader.read_count()?;
        let mut wedges = 0usize;
        for _ in 0..n_elements {
            if reader.read_element()?.etype == WEDGE_TYPE {
                wedges += 1;
            }
        }

        info!("网格: {}", path.display());
        info!("  节点: {} (含种子点)", n_nodes);
        info!("  单元: {}，其中楔形 {}", n_elements, wedges);
    }

    Ok(())
}
