// crates/wm_terrain/src/sampler.rs

//! 高程采样器
//!
//! 将域平面上的点旋转到栅格对齐坐标系，映射为分数像元坐标后
//! 做双线性插值，返回相对于基准高程的高程差。
//!
//! 任一参与插值的格点越界时以基准高程代替（不中断），
//! 同时累计降质采样计数供流水线在日志中上报。

use std::cell::Cell;
use std::f64::consts::PI;

use glam::DVec2;

use crate::interpolate::linear_interpolate;
use crate::raster::RasterGrid;

/// 高程采样器
///
/// 旋转角在构造时固定为 `(风向角 + 90°)`，与网格生成阶段
/// 使用的坐标系约定一致。
#[derive(Debug)]
pub struct ElevationSampler {
    /// 栅格数据
    raster: RasterGrid,
    /// 旋转角余弦
    cos_a: f64,
    /// 旋转角正弦
    sin_a: f64,
    /// 越界回退采样次数
    out_of_range: Cell<u64>,
}

impl ElevationSampler {
    /// 创建采样器
    ///
    /// `wind_angle_deg` 为来流风向角（度）。
    pub fn new(raster: RasterGrid, wind_angle_deg: f64) -> Self {
        let rotation = (wind_angle_deg + 90.0) * PI / 180.0;
        Self {
            raster,
            cos_a: rotation.cos(),
            sin_a: rotation.sin(),
            out_of_range: Cell::new(0),
        }
    }

    /// 采样相对高程
    pub fn sample(&self, p: DVec2) -> f64 {
        // 旋转到栅格对齐坐标系
        let px = p.x * self.cos_a + p.y * self.sin_a;
        let py = p.y * self.cos_a - p.x * self.sin_a;

        let b = self.raster.bounds();
        let w = self.raster.width();
        let h = self.raster.height();

        // 分数像元坐标，行 0 为最北一行，y 轴翻转
        let fx = (px - b.xmin) / (b.xmax - b.xmin) * (w - 1) as f64;
        let fy = (b.ymax - py) / (b.ymax - b.ymin) * (h - 1) as f64;

        let datum = self.raster.datum();
        let value = linear_interpolate(&[fx, fy], &|idx: &[i64]| {
            let (col, row) = (idx[0], idx[1]);
            if col < 0 || row < 0 {
                self.out_of_range.set(self.out_of_range.get() + 1);
                return datum;
            }
            match self.raster.get(col as usize, row as usize) {
                Some(v) => v,
                None => {
                    self.out_of_range.set(self.out_of_range.get() + 1);
                    datum
                }
            }
        });

        value - datum
    }

    /// 栅格数据
    #[inline]
    pub fn raster(&self) -> &RasterGrid {
        &self.raster
    }

    /// 越界回退采样次数
    #[inline]
    pub fn out_of_range_count(&self) -> u64 {
        self.out_of_range.get()
    }
}
