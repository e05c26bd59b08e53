// crates/wm_mesh/src/builder.rs

//! 贴地网格构建流水线
//!
//! 对 `.msh` 输入做两趟前向扫描：
//! 节点趟完成贴地变换、边界节点登记并写出节点段；
//! 单元趟筛选楔形单元、重排顶点并完成外表面分类。
//! 两趟结束后回填文件头总数，再写分组段和六个边界段。
//!
//! 全程单线程：每段在下一段开始前完整消费，
//! 底层索引和边界分类器只在节点趟写入、单元趟只读。

use std::path::Path;

use tracing::{info, warn};
use wm_config::CaseConfig;
use wm_foundation::error::{WmError, WmResult};
use wm_terrain::{ElevationSampler, RadialBlender, RasterGrid};

use crate::faces::{FaceClassifier, WedgeElement, BOTTOM_FACE, TOP_FACE};
use crate::layers::LayerCounts;
use crate::msh::MshReader;
use crate::neu::NeutralWriter;
use crate::transform::MeshTransformer;

/// 构建结果摘要
#[derive(Debug, Clone, Copy)]
pub struct BuildReport {
    /// 写出的节点数
    pub nodes_written: usize,
    /// 写出的楔形单元数
    pub elements_written: usize,
    /// 垂向单元层数
    pub layers: usize,
    /// 每层单元数
    pub elements_per_layer: usize,
    /// 越界回退采样次数
    pub degraded_samples: u64,
}

/// 贴地网格构建器
pub struct TerrainMeshBuilder {
    config: CaseConfig,
    raster: RasterGrid,
}

impl TerrainMeshBuilder {
    /// 创建构建器
    pub fn new(config: CaseConfig, raster: RasterGrid) -> Self {
        Self { config, raster }
    }

    /// 执行完整构建
    pub fn build<P: AsRef<Path>, Q: AsRef<Path>>(
        self,
        msh_path: P,
        out_path: Q,
    ) -> WmResult<BuildReport> {
        let sampler = ElevationSampler::new(self.raster, self.config.wind.angle);
        let blender = RadialBlender::new(self.config.mesh.tr1, self.config.mesh.tr2)?;
        let mut transformer = MeshTransformer::new(
            sampler,
            blender,
            self.config.half_extent(),
            self.config.domain.h,
        );

        let scale = self.config.mesh.scale;
        let mut reader = MshReader::open(msh_path.as_ref())?;
        let mut writer = NeutralWriter::create(out_path.as_ref())?;

        // ---- 节点趟 ----
        reader.seek_section("$Nodes")?;
        let declared = reader.read_count()?;
        let seeds = self.config.seed_count();
        if declared <= seeds {
            return Err(WmError::invalid_mesh(format!(
                "节点段声明 {} 条记录，不足以跳过 {} 个种子点",
                declared, seeds
            )));
        }
        let n_nodes = declared - seeds;

        // 种子点不变换、不写出、不计入总数
        for _ in 0..seeds {
            reader.skip_record()?;
        }

        writer.begin_nodes()?;
        for _ in 0..n_nodes {
            let node = reader.read_node()?;
            let position = transformer.transform_node(&node)?;
            writer.write_node(node.id, position * scale)?;
        }
        writer.end_section()?;
        transformer.finalize_boundaries();

        info!("节点写出完成: {} 条 (跳过种子 {})", n_nodes, seeds);

        // ---- 单元趟 ----
        reader.seek_section("$Elements")?;
        let n_elements = reader.read_count()?;

        let mut face_classifier = FaceClassifier::new();
        let mut kept = 0usize;

        writer.begin_elements()?;
        for _ in 0..n_elements {
            let element = reader.read_element()?;
            let Some(wedge) = WedgeElement::from_msh(&element, kept + 1)? else {
                continue;
            };
            kept += 1;
            writer.write_element(wedge.out_id, wedge.nodes)?;
            face_classifier.classify(&wedge, transformer.classifier());
        }
        writer.end_section()?;

        info!("单元写出完成: {} / {} (仅保留楔形)", kept, n_elements);

        // ---- 回填文件头 ----
        writer.patch_totals(n_nodes, kept)?;

        // ---- 分组段与侧边界段 ----
        writer.write_group(kept)?;
        for side in crate::boundary::BoundarySide::ALL {
            let records = face_classifier.records(side);
            writer.write_boundary(side.tag(), records.len(), records.iter().copied())?;
        }

        // ---- 底面/顶面合成 ----
        let counts = LayerCounts::derive(n_nodes, transformer.base_node_count(), kept)?;
        writer.write_boundary(
            "bot",
            counts.per_layer,
            counts.bottom_range().map(|e| (e, BOTTOM_FACE)),
        )?;
        writer.write_boundary(
            "top",
            counts.per_layer,
            counts.top_range(kept).map(|e| (e, TOP_FACE)),
        )?;
        writer.flush()?;

        let degraded = transformer.degraded_samples();
        if degraded > 0 {
            warn!("高程采样越界回退 {} 次，边缘地带按基准高程处理", degraded);
        }
        info!(
            "层数推算: 底层节点 {}, 层数 {}, 每层单元 {}",
            transformer.base_node_count(),
            counts.layers,
            counts.per_layer
        );

        Ok(BuildReport {
            nodes_written: n_nodes,
            elements_written: kept,
            layers: counts.layers,
            elements_per_layer: counts.per_layer,
            degraded_samples: degraded,
        })
    }
}
