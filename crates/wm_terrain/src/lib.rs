// crates/wm_terrain/src/lib.rs

//! WindMesh 地形层
//!
//! 提供栅格高程数据的存储、插值采样和径向融合。
//!
//! # 模块
//!
//! - [`raster`]: 栅格高程数据与地理范围换算
//! - [`interpolate`]: n 维逐轴线性插值
//! - [`sampler`]: 旋转坐标系下的高程采样器
//! - [`blend`]: 基于域中心距离的地形融合策略
//! - [`asc`]: ESRI ASCII 栅格加载器

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod asc;
pub mod blend;
pub mod interpolate;
pub mod raster;
pub mod sampler;

// 重导出常用类型
pub use blend::RadialBlender;
pub use raster::{RasterBounds, RasterGrid};
pub use sampler::ElevationSampler;
