// crates/wm_mesh/src/neu.rs

//! GAMBIT 中性格式写出
//!
//! 下游求解器按固定列位解析，不按分隔符，所有字段宽度都是
//! 格式的一部分。节点坐标使用 C 风格 `%20.11e`（两位符号指数），
//! Rust 的 `{:e}` 指数形式不同，由 [`c_format_exp`] 统一渲染。
//!
//! 文件头的节点/单元总数在两趟扫描完成前未知：
//! 先写占位行，单元段结束后回寻到占位位置覆写前 20 列。
//! 回填失败即整体失败，没有部分成功的输出。

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use glam::DVec3;
use wm_foundation::error::{WmError, WmResult};

/// C 风格 `%w.pe` 浮点渲染
///
/// Rust 的 `{:e}` 输出 `1.5e2`，C 输出 `1.50000000000e+02`；
/// 此处补齐符号和两位指数后按宽度右对齐。
pub fn c_format_exp(value: f64, precision: usize, width: usize) -> String {
    let formatted = format!("{:.*e}", precision, value);
    let (mantissa, exponent) = match formatted.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (formatted.as_str(), 0),
    };
    format!("{:>width$}", format!("{}e{:+03}", mantissa, exponent))
}

/// 中性格式写出器
///
/// 独占输出文件句柄，文件头回填是全流程唯一的回写操作。
pub struct NeutralWriter {
    file: BufWriter<File>,
    /// 占位总数行在文件中的字节偏移
    patch_offset: u64,
}

impl NeutralWriter {
    /// 创建输出文件并写入控制段（占位总数）
    pub fn create<P: AsRef<Path>>(path: P) -> WmResult<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| WmError::io_with_source(format!("无法创建 {}", path.display()), e))?;
        let mut writer = Self {
            file: BufWriter::new(file),
            patch_offset: 0,
        };
        writer.write_control_section()?;
        Ok(writer)
    }

    fn write_control_section(&mut self) -> WmResult<()> {
        let head = concat!(
            "        CONTROL INFO 2.4.6\n",
            "** GAMBIT NEUTRAL FILE\n",
            "example\n",
            "PROGRAM :                Gambit     VERSION :  2.4.6\n",
            "\n",
            "     NUMNP     NELEM     NGRPS    NBSETS     NDFCD     NDFVL\n",
        );
        self.file.write_all(head.as_bytes())?;
        self.patch_offset = head.len() as u64;

        // 占位行：前 20 列留待回填节点/单元总数，
        // 其余字段为 1 组、6 个边界集、3 维、3 自由度
        writeln!(self.file, "{:30}{:10}{:10}{:10}", 1, 6, 3, 3)?;
        writeln!(self.file, "ENDOFSECTION")?;
        Ok(())
    }

    /// 开始节点坐标段
    pub fn begin_nodes(&mut self) -> WmResult<()> {
        writeln!(self.file, "   NODAL COORDINATES 2.4.6")?;
        Ok(())
    }

    /// 写一条节点记录
    ///
    /// 源编号转为 0 基，坐标已含缩放。
    pub fn write_node(&mut self, id: i64, p: DVec3) -> WmResult<()> {
        writeln!(
            self.file,
            "{:10}{}{}{}",
            id - 1,
            c_format_exp(p.x, 11, 20),
            c_format_exp(p.y, 11, 20),
            c_format_exp(p.z, 11, 20),
        )?;
        Ok(())
    }

    /// 结束当前段
    pub fn end_section(&mut self) -> WmResult<()> {
        writeln!(self.file, "ENDOFSECTION")?;
        Ok(())
    }

    /// 开始单元段
    pub fn begin_elements(&mut self) -> WmResult<()> {
        writeln!(self.file, "      ELEMENTS/CELLS 2.4.6")?;
        Ok(())
    }

    /// 写一条楔形单元记录（类型 5，6 节点，编号转 0 基）
    pub fn write_element(&mut self, out_id: usize, nodes: [i64; 6]) -> WmResult<()> {
        write!(self.file, "{:8}{:3}{:3}", out_id, 5, 6)?;
        for n in nodes {
            write!(self.file, "{:8}", n - 1)?;
        }
        writeln!(self.file)?;
        Ok(())
    }

    /// 回填文件头的节点/单元总数
    ///
    /// 覆写占位行的前 20 列，之后回到文件末尾。
    /// 任何 seek/write 失败都是致命错误。
    pub fn patch_totals(&mut self, n_nodes: usize, n_elements: usize) -> WmResult<()> {
        self.file.flush()?;
        let file = self.file.get_mut();
        file.seek(SeekFrom::Start(self.patch_offset))?;
        write!(file, " {:9} {:9}", n_nodes, n_elements)?;
        file.seek(SeekFrom::End(0))?;
        Ok(())
    }

    /// 写单元分组段：全部单元归入单一分组 `all`
    pub fn write_group(&mut self, n_elements: usize) -> WmResult<()> {
        writeln!(self.file, "       ELEMENT GROUP 2.4.6")?;
        writeln!(
            self.file,
            "GROUP:          1 ELEMENTS: {:10} MATERIAL:          2 NFLAGS:          1",
            n_elements
        )?;
        writeln!(self.file, "{:>32}", "all")?;
        write!(self.file, "{:8}", 0)?;
        for i in 0..n_elements {
            if i % 10 == 0 {
                writeln!(self.file)?;
            }
            write!(self.file, "{:8}", i + 1)?;
        }
        writeln!(self.file)?;
        writeln!(self.file, "ENDOFSECTION")?;
        Ok(())
    }

    /// 写一个边界条件段
    ///
    /// 记录为 (输出单元编号, 局部面号)，中间的 5 是单元类型码。
    pub fn write_boundary<I>(&mut self, tag: &str, count: usize, records: I) -> WmResult<()>
    where
        I: IntoIterator<Item = (usize, u8)>,
    {
        writeln!(self.file, " BOUNDARY CONDITIONS 2.4.6")?;
        writeln!(self.file, "{:>32}{:8}{:8}{:8}{:8}", tag, 1, count, 0, 6)?;
        for (element, face) in records {
            writeln!(self.file, "{:10} {:4} {:4}", element, 5, face)?;
        }
        writeln!(self.file, "ENDOFSECTION")?;
        Ok(())
    }

    /// 刷新缓冲
    pub fn flush(&mut self) -> WmResult<()> {
        self.file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_format_exp_basic() {
        assert_eq!(c_format_exp(0.0, 11, 20), "   0.00000000000e+00");
        assert_eq!(c_format_exp(1.0, 11, 20), "   1.00000000000e+00");
        assert_eq!(c_format_exp(-1.0, 11, 20), "  -1.00000000000e+00");
    }

    #[test]
    fn test_c_format_exp_exponents() {
        assert_eq!(c_format_exp(1234.5, 11, 20), "   1.23450000000e+03");
        assert_eq!(c_format_exp(0.001, 11, 20), "   1.00000000000e-03");
        assert_eq!(c_format_exp(1e100, 11, 20), "  1.00000000000e+100");
    }

    #[test]
    fn test_c_format_exp_width() {
        for v in [0.0, -12345.678, 1e-9, 987654.321] {
            assert_eq!(c_format_exp(v, 11, 20).len(), 20, "{}", v);
        }
    }

    #[test]
    fn test_node_record_width() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.neu");
        let mut w = NeutralWriter::create(&path).unwrap();
        w.begin_nodes().unwrap();
        w.write_node(5, DVec3::new(1.5, -2.5, 0.0)).unwrap();
        w.end_section().unwrap();
        w.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let line = content
            .lines()
            .find(|l| l.contains("e+00"))
            .expect("node line");
        // 10 列编号 + 3 × 20 列坐标
        assert_eq!(line.len(), 70);
        assert!(line.starts_with("         4"));
    }

    #[test]
    fn test_header_patch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.neu");
        let mut w = NeutralWriter::create(&path).unwrap();
        w.patch_totals(1234, 567).unwrap();
        w.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let totals_line = content
            .lines()
            .nth(6)
            .expect("totals line");
        // 回填后前两个 10 列字段是节点数和单元数，
        // 其后保留占位行原有的 1 6 3 3
        assert_eq!(totals_line.len(), 60);
        assert_eq!(&totals_line[0..10], "      1234");
        assert_eq!(&totals_line[10..20], "       567");
        assert_eq!(&totals_line[20..30], "         1");
        assert_eq!(&totals_line[30..40], "         6");
        assert_eq!(&totals_line[40..50], "         3");
        assert_eq!(&totals_line[50..60], "         3");
    }

    #[test]
    fn test_element_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.neu");
        let mut w = NeutralWriter::create(&path).unwrap();
        w.begin_elements().unwrap();
        w.write_element(1, [4, 6, 5, 1, 3, 2]).unwrap();
        w.end_section().unwrap();
        w.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let line = content
            .lines()
            .find(|l| l.trim_start().starts_with("1  5  6"))
            .expect("element line");
        assert_eq!(
            line,
            "       1  5  6       3       5       4       0       2       1"
        );
    }

    #[test]
    fn test_group_section_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.neu");
        let mut w = NeutralWriter::create(&path).unwrap();
        w.write_group(12).unwrap();
        w.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("       ELEMENT GROUP 2.4.6\n"));
        assert!(content.contains(&format!("{:>32}\n", "all")));
        // 每行 10 个编号
        let first_row = "       1       2       3       4       5       6       7       8       9      10";
        assert!(content.contains(first_row));
        assert!(content.contains("      11      12\nENDOFSECTION"));
    }

    #[test]
    fn test_boundary_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.neu");
        let mut w = NeutralWriter::create(&path).unwrap();
        w.write_boundary("inlet", 2, vec![(3, 1), (7, 2)]).unwrap();
        w.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains(" BOUNDARY CONDITIONS 2.4.6\n"));
        let header = format!("{:>32}{:8}{:8}{:8}{:8}", "inlet", 1, 2, 0, 6);
        assert!(content.contains(&header));
        assert!(content.contains("         3    5    1\n"));
        assert!(content.contains("         7    5    2\n"));
    }
}
