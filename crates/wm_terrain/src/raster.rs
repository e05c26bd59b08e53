// crates/wm_terrain/src/raster.rs

//! 栅格高程数据
//!
//! 提供栅格数据的存储、基准高程和地理范围到局部米制坐标的换算。
//! 加载后不可变，由 [`crate::sampler::ElevationSampler`] 持有。

use std::f64::consts::PI;

use wm_foundation::error::{WmError, WmResult};

/// 地球平均半径 [km]
const EARTH_RADIUS: f64 = 6371.0;

/// 角度转弧度系数
const RAD_PER_DEG: f64 = PI / 180.0;

/// 栅格的局部米制范围
///
/// 以栅格中心为原点的投影平面坐标，x 向东、y 向北。
#[derive(Debug, Clone, Copy)]
pub struct RasterBounds {
    /// 西边界 [m]
    pub xmin: f64,
    /// 东边界 [m]
    pub xmax: f64,
    /// 南边界 [m]
    pub ymin: f64,
    /// 北边界 [m]
    pub ymax: f64,
}

impl RasterBounds {
    /// 创建米制范围
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> WmResult<Self> {
        if xmin >= xmax || ymin >= ymax {
            return Err(WmError::invalid_input(format!(
                "栅格范围无效: x=[{}, {}], y=[{}, {}]",
                xmin, xmax, ymin, ymax
            )));
        }
        Ok(Self { xmin, xmax, ymin, ymax })
    }

    /// 从经纬度范围换算局部米制范围
    ///
    /// 以范围中心为原点，纬向每度取地球平均半径弧长，
    /// 经向按中心纬度的余弦收缩。
    pub fn from_geographic(left: f64, right: f64, bottom: f64, top: f64) -> WmResult<Self> {
        let lon = (left + right) / 2.0;
        let lat = (bottom + top) / 2.0;

        let meter_per_deg_lat = 1000.0 * EARTH_RADIUS * RAD_PER_DEG;
        let long_lat_ratio = (lat * RAD_PER_DEG).cos();

        Self::new(
            (left - lon) * meter_per_deg_lat * long_lat_ratio,
            (right - lon) * meter_per_deg_lat * long_lat_ratio,
            (bottom - lat) * meter_per_deg_lat,
            (top - lat) * meter_per_deg_lat,
        )
    }
}

/// 栅格高程数据
///
/// 行主序存储，行 0 为最北一行（与 GeoTIFF/ASC 的行序一致）。
/// 基准高程取全部像元的算术平均，采样时统一扣除，
/// 使整个流程使用相对高程。
#[derive(Debug, Clone)]
pub struct RasterGrid {
    /// 高程数据（行主序）
    data: Vec<f64>,
    /// 宽度（列数）
    width: usize,
    /// 高度（行数）
    height: usize,
    /// 局部米制范围
    bounds: RasterBounds,
    /// 基准高程（全域均值）
    datum: f64,
}

impl RasterGrid {
    /// 从数据创建
    pub fn from_data(
        data: Vec<f64>,
        width: usize,
        height: usize,
        bounds: RasterBounds,
    ) -> WmResult<Self> {
        WmError::check_size("raster data", width * height, data.len())?;
        if data.is_empty() {
            return Err(WmError::invalid_input("栅格数据为空"));
        }

        let datum = data.iter().sum::<f64>() / data.len() as f64;
        Ok(Self {
            data,
            width,
            height,
            bounds,
            datum,
        })
    }

    /// 获取像元值，越界返回 None
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> Option<f64> {
        if col < self.width && row < self.height {
            Some(self.data[row * self.width + col])
        } else {
            None
        }
    }

    /// 宽度（列数）
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// 高度（行数）
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// 局部米制范围
    #[inline]
    pub fn bounds(&self) -> &RasterBounds {
        &self.bounds
    }

    /// 基准高程（全域均值）
    #[inline]
    pub fn datum(&self) -> f64 {
        self.datum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_data_size_mismatch() {
        let bounds = RasterBounds::new(0.0, 10.0, 0.0, 10.0).unwrap();
        assert!(RasterGrid::from_data(vec![1.0; 5], 2, 3, bounds).is_err());
    }

    #[test]
    fn test_datum_is_mean() {
        let bounds = RasterBounds::new(0.0, 10.0, 0.0, 10.0).unwrap();
        let grid = RasterGrid::from_data(vec![1.0, 2.0, 3.0, 4.0], 2, 2, bounds).unwrap();
        assert!((grid.datum() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_get_bounds_check() {
        let bounds = RasterBounds::new(0.0, 10.0, 0.0, 10.0).unwrap();
        let grid = RasterGrid::from_data(vec![1.0, 2.0, 3.0, 4.0], 2, 2, bounds).unwrap();
        assert_eq!(grid.get(1, 1), Some(4.0));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(RasterBounds::new(10.0, 0.0, 0.0, 10.0).is_err());
    }

    #[test]
    fn test_from_geographic_centered() {
        // 中心对称的经纬度范围换算后应关于原点对称
        let b = RasterBounds::from_geographic(116.0, 117.0, 39.5, 40.5).unwrap();
        assert!((b.xmin + b.xmax).abs() < 1e-6);
        assert!((b.ymin + b.ymax).abs() < 1e-6);
        // 纬向一度约 111 km
        assert!((b.ymax - b.ymin - 111_194.9).abs() < 1.0);
    }
}
