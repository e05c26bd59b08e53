// crates/wm_mesh/src/transform.rs

//! 节点贴地变换
//!
//! 底层节点 (oz == 0)：按域中心距离采样并融合高程，z 即高程；
//! 上层节点：按平面键复用底层高程，z 由仿射映射
//! `z = oz * (h - el) / h + el` 给出——oz = 0 时 z = el，
//! oz = h 时 z = h，顶面无论地形如何都保持精确平面。

use glam::{DVec2, DVec3};
use wm_foundation::error::WmResult;
use wm_terrain::{ElevationSampler, RadialBlender};

use crate::boundary::BoundaryNodeClassifier;
use crate::ground::{GroundElevationIndex, GroundKey};
use crate::msh::MshNode;

/// 节点贴地变换器
///
/// 消费节点流，驱动高程采样、底层索引和边界分类。
pub struct MeshTransformer {
    sampler: ElevationSampler,
    blender: RadialBlender,
    ground: GroundElevationIndex,
    classifier: BoundaryNodeClassifier,
    /// 域高度 [m]
    height: f64,
}

impl MeshTransformer {
    /// 创建变换器
    pub fn new(
        sampler: ElevationSampler,
        blender: RadialBlender,
        half_extent: f64,
        height: f64,
    ) -> Self {
        Self {
            sampler,
            blender,
            ground: GroundElevationIndex::new(),
            classifier: BoundaryNodeClassifier::new(half_extent),
            height,
        }
    }

    /// 变换单个节点，返回最终三维位置
    ///
    /// 同时完成边界节点登记。节点必须按层序流入：
    /// 上层节点的平面位置必须已在底层出现过。
    pub fn transform_node(&mut self, node: &MshNode) -> WmResult<DVec3> {
        let p = DVec2::new(node.x, node.y);
        let key = GroundKey::new(p);

        let elevation = if node.oz == 0.0 {
            let distance = p.length();
            // 外半径以外不必采样，融合结果恒为 0
            let raw = if distance < self.blender.outer() {
                self.sampler.sample(p)
            } else {
                0.0
            };
            let el = self.blender.blend(distance, raw);
            self.ground.insert(key, el);
            el
        } else {
            self.ground.resolve(key, node.id)?.elevation
        };

        self.classifier.record_if_boundary(node.id, node.x, node.y);

        let z = node.oz * (self.height - elevation) / self.height + elevation;
        Ok(DVec3::new(node.x, node.y, z))
    }

    /// 节点流结束，冻结边界分类器
    pub fn finalize_boundaries(&mut self) {
        self.classifier.finalize();
    }

    /// 边界分类器（finalize 之后供面分类使用）
    #[inline]
    pub fn classifier(&self) -> &BoundaryNodeClassifier {
        &self.classifier
    }

    /// 底层节点数量
    #[inline]
    pub fn base_node_count(&self) -> usize {
        self.ground.len()
    }

    /// 越界回退采样次数
    #[inline]
    pub fn degraded_samples(&self) -> u64 {
        self.sampler.out_of_range_count()
    }
}
