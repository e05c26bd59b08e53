// crates/wm_mesh/src/ground.rs

//! 底层高程索引
//!
//! 同一平面位置的节点在所有垂向层之间共享同一高程
//! （输入网格是单一二维三角剖分的纯垂直挤出）。
//! 高程只在底层节点处计算一次，上层节点按平面键查询复用。
//!
//! 平面键不直接使用原始浮点坐标，而是量化到固定精度后取整，
//! 避免浮点抖动造成查询失配。

use std::collections::HashMap;

use glam::DVec2;
use wm_foundation::error::{WmError, WmResult};

/// 平面键量化系数：坐标乘以 1e6（微米级）后四舍五入取整。
/// 远小于网格特征尺寸，远大于文本解析的浮点噪声。
const KEY_SCALE: f64 = 1e6;

/// 量化后的平面位置键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroundKey {
    qx: i64,
    qy: i64,
}

impl GroundKey {
    /// 从平面坐标量化生成
    #[inline]
    pub fn new(p: DVec2) -> Self {
        Self {
            qx: (p.x * KEY_SCALE).round() as i64,
            qy: (p.y * KEY_SCALE).round() as i64,
        }
    }
}

/// 底层节点的高程记录
///
/// `floors` 是多层建筑遗留字段，本流程恒为 0，
/// 仅为记录兼容保留。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundEntry {
    /// 融合后的相对高程
    pub elevation: f64,
    /// 建筑层数（恒为 0）
    pub floors: u32,
}

/// 底层高程索引
#[derive(Debug, Default)]
pub struct GroundElevationIndex {
    entries: HashMap<GroundKey, GroundEntry>,
}

impl GroundElevationIndex {
    /// 创建空索引
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记底层节点的高程
    pub fn insert(&mut self, key: GroundKey, elevation: f64) {
        self.entries.insert(
            key,
            GroundEntry {
                elevation,
                floors: 0,
            },
        );
    }

    /// 按平面键查询高程
    ///
    /// 键不存在说明上层节点引用了底层从未出现过的平面位置，
    /// 即输入网格不是纯垂直挤出，属于致命数据错误。
    pub fn resolve(&self, key: GroundKey, node_id: i64) -> WmResult<GroundEntry> {
        self.entries.get(&key).copied().ok_or_else(|| {
            WmError::invalid_mesh(format!(
                "节点 {} 的平面位置在底层未出现，输入网格不是纯垂直挤出",
                node_id
            ))
        })
    }

    /// 底层节点数量
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 索引是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
