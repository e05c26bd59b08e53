// crates/wm_mesh/src/msh.rs

//! GMSH v2 流式读取
//!
//! 平底挤出网格按段顺序消费：先节点段后单元段，
//! 每段一次前向扫描，不整体载入。
//! 只处理本流水线需要的 `$Nodes` 和 `$Elements` 两段，
//! 其余段原样跳过。

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use wm_foundation::error::{WmError, WmResult};

/// 节点记录（源编号 1 基）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MshNode {
    /// 源节点编号
    pub id: i64,
    /// 平面 x 坐标
    pub x: f64,
    /// 平面 y 坐标
    pub y: f64,
    /// 挤出原始高度（变换前的平底 z）
    pub oz: f64,
}

/// 单元记录（源编号 1 基）
#[derive(Debug, Clone, PartialEq)]
pub struct MshElement {
    /// 源单元编号
    pub id: i64,
    /// GMSH 单元类型码（6 = 六节点楔形/棱柱）
    pub etype: u32,
    /// 节点编号列表（标签之后的全部字段）
    pub nodes: Vec<i64>,
}

/// 六节点楔形单元的类型码
pub const WEDGE_TYPE: u32 = 6;

/// GMSH 流式读取器
pub struct MshReader<R> {
    reader: R,
    path: PathBuf,
    line_no: usize,
    buf: String,
}

impl MshReader<BufReader<File>> {
    /// 打开文件
    pub fn open<P: AsRef<Path>>(path: P) -> WmResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(WmError::file_not_found(path));
        }
        let file = File::open(path)
            .map_err(|e| WmError::io_with_source(format!("无法打开 {}", path.display()), e))?;
        Ok(Self::from_reader(BufReader::new(file), path))
    }
}

impl<R: BufRead> MshReader<R> {
    /// 从 reader 创建
    pub fn from_reader(reader: R, path: &Path) -> Self {
        Self {
            reader,
            path: path.to_path_buf(),
            line_no: 0,
            buf: String::new(),
        }
    }

    /// 读取下一行，文件结束返回 None
    fn next_line(&mut self) -> WmResult<Option<String>> {
        self.buf.clear();
        let n = self
            .reader
            .read_line(&mut self.buf)
            .map_err(|e| WmError::parse(&self.path, self.line_no + 1, e.to_string()))?;
        if n == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        Ok(Some(self.buf.trim_end().to_string()))
    }

    fn parse_err(&self, message: impl Into<String>) -> WmError {
        WmError::parse(&self.path, self.line_no, message)
    }

    /// 前进到指定段起始标记（如 `$Nodes`）
    pub fn seek_section(&mut self, marker: &str) -> WmResult<()> {
        loop {
            match self.next_line()? {
                Some(line) if line.trim() == marker => return Ok(()),
                Some(_) => continue,
                None => {
                    return Err(WmError::invalid_mesh(format!(
                        "{} 中未找到 {} 段",
                        self.path.display(),
                        marker
                    )))
                }
            }
        }
    }

    /// 读取段记录数（段标记的下一行）
    pub fn read_count(&mut self) -> WmResult<usize> {
        match self.next_line()? {
            Some(line) => line
                .trim()
                .parse::<usize>()
                .map_err(|_| self.parse_err(format!("无法解析记录数: {}", line.trim()))),
            None => Err(self.parse_err("段记录数缺失")),
        }
    }

    /// 跳过一行（加密种子记录）
    pub fn skip_record(&mut self) -> WmResult<()> {
        match self.next_line()? {
            Some(_) => Ok(()),
            None => Err(self.parse_err("文件提前结束")),
        }
    }

    /// 读取一条节点记录
    pub fn read_node(&mut self) -> WmResult<MshNode> {
        let line = match self.next_line()? {
            Some(l) => l,
            None => return Err(self.parse_err("节点段提前结束")),
        };
        let line_no = self.line_no;
        let mut parts = line.split_whitespace();

        // 节点编号可能带小数形式，统一按 f64 解析后取整
        let mut field = |name: &str| -> WmResult<f64> {
            parts
                .next()
                .and_then(|s| s.parse::<f64>().ok())
                .ok_or_else(|| WmError::parse(&self.path, line_no, format!("缺少节点字段 {}", name)))
        };

        let id = field("id")? as i64;
        let x = field("x")?;
        let y = field("y")?;
        let oz = field("z")?;
        Ok(MshNode { id, x, y, oz })
    }

    /// 读取一条单元记录
    ///
    /// GMSH v2 格式: `id type ntags tag... node...`，
    /// 标签数量按 `ntags` 字段跳过。
    pub fn read_element(&mut self) -> WmResult<MshElement> {
        let line = match self.next_line()? {
            Some(l) => l,
            None => return Err(self.parse_err("单元段提前结束")),
        };
        let line_no = self.line_no;

        let fields: Vec<i64> = line
            .split_whitespace()
            .map(|s| {
                s.parse::<i64>().map_err(|_| {
                    WmError::parse(&self.path, line_no, format!("无法解析单元字段: {}", s))
                })
            })
            .collect::<WmResult<_>>()?;

        if fields.len() < 3 {
            return Err(self.parse_err("单元记录字段不足"));
        }

        let id = fields[0];
        let etype = fields[1] as u32;
        let ntags = fields[2] as usize;
        let node_start = 3 + ntags;
        if fields.len() <= node_start {
            return Err(self.parse_err(format!("单元 {} 缺少节点编号", id)));
        }

        Ok(MshElement {
            id,
            etype,
            nodes: fields[node_start..].to_vec(),
        })
    }
}
