// crates/wm_terrain/src/blend.rs

//! 径向地形融合
//!
//! 按节点到域中心的距离决定地形起伏的保留程度：
//! 内半径以内完整保留，内外半径之间线性衰减，
//! 外半径以外强制压平为 0，保证外侧竖直边界是精确平面。

use wm_foundation::error::{WmError, WmResult};

/// 径向融合器
#[derive(Debug, Clone, Copy)]
pub struct RadialBlender {
    /// 内半径 [m]
    inner: f64,
    /// 外半径 [m]
    outer: f64,
}

impl RadialBlender {
    /// 创建融合器
    ///
    /// 半径相等或倒置是配置错误，直接拒绝。
    pub fn new(inner: f64, outer: f64) -> WmResult<Self> {
        if inner < 0.0 {
            return Err(WmError::invalid_config(
                "mesh.tr1",
                inner.to_string(),
                "内半径不能为负",
            ));
        }
        if inner >= outer {
            return Err(WmError::invalid_config(
                "mesh.tr1",
                format!("{} >= {}", inner, outer),
                "内半径必须严格小于外半径",
            ));
        }
        Ok(Self { inner, outer })
    }

    /// 内半径
    #[inline]
    pub fn inner(&self) -> f64 {
        self.inner
    }

    /// 外半径
    #[inline]
    pub fn outer(&self) -> f64 {
        self.outer
    }

    /// 对原始高程施加融合策略
    ///
    /// - `distance >= outer`: 恒为 0（含边界）
    /// - `distance <= inner`: 原值不变（含边界）
    /// - 其余: `raw * (outer - distance) / (outer - inner)`
    #[inline]
    pub fn blend(&self, distance: f64, raw: f64) -> f64 {
        if distance >= self.outer {
            0.0
        } else if distance <= self.inner {
            raw
        } else {
            raw * (self.outer - distance) / (self.outer - self.inner)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_radii() {
        assert!(RadialBlender::new(400.0, 200.0).is_err());
        assert!(RadialBlender::new(300.0, 300.0).is_err());
        assert!(RadialBlender::new(-1.0, 300.0).is_err());
    }

    #[test]
    fn test_inside_inner_unchanged() {
        let b = RadialBlender::new(200.0, 400.0).unwrap();
        assert_eq!(b.blend(100.0, 12.5), 12.5);
        // 恰好落在内半径上时保留原值
        assert_eq!(b.blend(200.0, 12.5), 12.5);
    }

    #[test]
    fn test_outside_outer_flat() {
        let b = RadialBlender::new(200.0, 400.0).unwrap();
        assert_eq!(b.blend(500.0, 99.0), 0.0);
        // 恰好落在外半径上时必须精确为 0
        assert_eq!(b.blend(400.0, 99.0), 0.0);
    }

    #[test]
    fn test_linear_fade() {
        let b = RadialBlender::new(200.0, 400.0).unwrap();
        // 中点衰减一半
        assert!((b.blend(300.0, 10.0) - 5.0).abs() < 1e-12);
        // 1/4 处衰减 1/4
        assert!((b.blend(250.0, 10.0) - 7.5).abs() < 1e-12);
    }
}
