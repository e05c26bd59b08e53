// crates/wm_terrain/src/asc.rs

//! ESRI ASCII 栅格加载器
//!
//! 读取 `.asc` 网格文件（`ncols`/`nrows` 头部 + 行主序数据，
//! 首行为最北一行），作为高程栅格的具体接入格式。
//! GeoTIFF 的裁剪与重投影由上游工具完成，不在本层处理。
//!
//! 头部坐标为经纬度时，调用方应使用
//! [`RasterBounds::from_geographic`][crate::raster::RasterBounds::from_geographic]
//! 换算；此处按头部给出的数值直接建立范围。

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use wm_foundation::error::{WmError, WmResult};

use crate::raster::{RasterBounds, RasterGrid};

/// ASC 文件头
#[derive(Debug, Clone, Copy, Default)]
struct AscHeader {
    ncols: usize,
    nrows: usize,
    xllcorner: f64,
    yllcorner: f64,
    cellsize: f64,
    nodata: Option<f64>,
}

/// ESRI ASCII 栅格加载器
pub struct AscLoader;

impl AscLoader {
    /// 加载 `.asc` 文件
    pub fn load<P: AsRef<Path>>(path: P) -> WmResult<RasterGrid> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| WmError::io(format!("无法打开 {}: {}", path.display(), e)))?;
        Self::load_from_reader(BufReader::new(file), path)
    }

    /// 从 reader 加载
    pub fn load_from_reader<R: BufRead>(reader: R, path: &Path) -> WmResult<RasterGrid> {
        let mut header = AscHeader::default();
        let mut data: Vec<f64> = Vec::new();
        let mut line_no = 0usize;

        for line in reader.lines() {
            line_no += 1;
            let line = line.map_err(|e| WmError::parse(path, line_no, e.to_string()))?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let mut parts = trimmed.split_whitespace();
            let first = match parts.next() {
                Some(p) => p,
                None => continue,
            };

            // 头部键不区分大小写
            let key = first.to_ascii_lowercase();
            let header_value = |parts: &mut dyn Iterator<Item = &str>| -> WmResult<f64> {
                parts
                    .next()
                    .and_then(|s| s.parse::<f64>().ok())
                    .ok_or_else(|| {
                        WmError::parse(path, line_no, format!("头部字段 {} 缺少数值", key))
                    })
            };

            match key.as_str() {
                "ncols" => header.ncols = header_value(&mut parts)? as usize,
                "nrows" => header.nrows = header_value(&mut parts)? as usize,
                "xllcorner" => header.xllcorner = header_value(&mut parts)?,
                "yllcorner" => header.yllcorner = header_value(&mut parts)?,
                "cellsize" => header.cellsize = header_value(&mut parts)?,
                "nodata_value" => header.nodata = Some(header_value(&mut parts)?),
                _ => {
                    // 数据行
                    let v: f64 = first.parse().map_err(|_| {
                        WmError::parse(path, line_no, format!("无法解析高程值: {}", first))
                    })?;
                    data.push(v);
                    for p in parts {
                        let v: f64 = p.parse().map_err(|_| {
                            WmError::parse(path, line_no, format!("无法解析高程值: {}", p))
                        })?;
                        data.push(v);
                    }
                }
            }
        }

        if header.ncols == 0 || header.nrows == 0 {
            return Err(WmError::parse(path, line_no, "缺少 ncols/nrows 头部"));
        }
        if header.cellsize <= 0.0 {
            return Err(WmError::parse(path, line_no, "cellsize 必须为正"));
        }
        WmError::check_size("asc data", header.ncols * header.nrows, data.len())?;

        // NODATA 像元以基准值参与均值会引入偏差，直接拒绝
        if let Some(nodata) = header.nodata {
            if data.iter().any(|&v| (v - nodata).abs() < 1e-10) {
                return Err(WmError::invalid_input(format!(
                    "{} 含有 NODATA 像元，请先在上游填补",
                    path.display()
                )));
            }
        }

        let bounds = RasterBounds::new(
            header.xllcorner,
            header.xllcorner + header.cellsize * header.ncols as f64,
            header.yllcorner,
            header.yllcorner + header.cellsize * header.nrows as f64,
        )?;

        RasterGrid::from_data(data, header.ncols, header.nrows, bounds)
    }
}
