// crates/wm_mesh/src/layers.rs

//! 垂向层数推算
//!
//! 源网格不显式标记底面和顶面，由聚合计数推算：
//! `层数 = 总节点数 / 底层节点数 - 1`，
//! `每层单元数 = 保留单元总数 / 层数`。
//! 两者都必须整除，否则说明输入不是规则挤出，属于致命错误。
//! 输出序中前 `每层单元数` 个单元构成底面组，
//! 后 `每层单元数` 个构成顶面组。

use wm_foundation::error::{WmError, WmResult};

/// 垂向层计数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerCounts {
    /// 垂向单元层数
    pub layers: usize,
    /// 每层单元数
    pub per_layer: usize,
}

impl LayerCounts {
    /// 从聚合计数推算
    pub fn derive(
        total_nodes: usize,
        base_nodes: usize,
        kept_elements: usize,
    ) -> WmResult<Self> {
        if base_nodes == 0 {
            return Err(WmError::invalid_mesh("底层节点数为 0"));
        }
        if total_nodes % base_nodes != 0 {
            return Err(WmError::invalid_mesh(format!(
                "总节点数 {} 不能被底层节点数 {} 整除",
                total_nodes, base_nodes
            )));
        }

        let layers = total_nodes / base_nodes;
        if layers < 2 {
            return Err(WmError::invalid_mesh(format!(
                "节点层数 {} 不足以构成单元层",
                layers
            )));
        }
        let layers = layers - 1;

        if kept_elements % layers != 0 {
            return Err(WmError::invalid_mesh(format!(
                "保留单元数 {} 不能被层数 {} 整除",
                kept_elements, layers
            )));
        }

        Ok(Self {
            layers,
            per_layer: kept_elements / layers,
        })
    }

    /// 底面组的输出单元编号范围（1 基，含端点）
    #[inline]
    pub fn bottom_range(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.per_layer
    }

    /// 顶面组的输出单元编号范围（1 基，含端点）
    #[inline]
    pub fn top_range(&self, kept_elements: usize) -> std::ops::RangeInclusive<usize> {
        (kept_elements - self.per_layer + 1)..=kept_elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_valid() {
        // 1000 节点 / 100 底层 -> 9 层；450 单元 -> 每层 50
        let counts = LayerCounts::derive(1000, 100, 450).unwrap();
        assert_eq!(counts.layers, 9);
        assert_eq!(counts.per_layer, 50);
        assert_eq!(counts.layers * counts.per_layer, 450);
    }

    #[test]
    fn test_ranges() {
        let counts = LayerCounts::derive(1000, 100, 450).unwrap();
        assert_eq!(counts.bottom_range(), 1..=50);
        assert_eq!(counts.top_range(450), 401..=450);
    }

    #[test]
    fn test_single_layer() {
        let counts = LayerCounts::derive(6, 3, 1).unwrap();
        assert_eq!(counts.layers, 1);
        assert_eq!(counts.per_layer, 1);
        assert_eq!(counts.bottom_range(), 1..=1);
        assert_eq!(counts.top_range(1), 1..=1);
    }

    #[test]
    fn test_non_integral_nodes() {
        let err = LayerCounts::derive(1001, 100, 450).unwrap_err();
        assert!(err.to_string().contains("1001"));
    }

    #[test]
    fn test_non_integral_elements() {
        let err = LayerCounts::derive(1000, 100, 451).unwrap_err();
        assert!(err.to_string().contains("451"));
    }

    #[test]
    fn test_zero_base_nodes() {
        assert!(LayerCounts::derive(1000, 0, 450).is_err());
    }

    #[test]
    fn test_flat_mesh_rejected() {
        // 只有一层节点无法构成单元层
        assert!(LayerCounts::derive(100, 100, 0).is_err());
    }
}
