// crates/wm_mesh/src/faces.rs

//! 楔形单元外表面分类
//!
//! 输入为 GMSH 六节点楔形（n1..n3 底三角，n4..n6 顶三角），
//! 输出采用 GAMBIT 楔形顶点序，写出顺序为
//! `[n4, n6, n5, n1, n3, n2]`。侧面归属由分类三角形
//! `(n4, n6, n5)` 的顶点对成员关系决定：按固定优先序检查三个
//! 无序顶点对，首个两端都落在同一侧边界集合的对子经查表给出
//! 局部面号。
//!
//! 底面和顶面在源网格中没有显式标记，由层数推算合成
//! （见 [`crate::layers`]），局部面号是常量而非逐单元计算。

use tracing::warn;
use wm_foundation::error::{WmError, WmResult};

use crate::boundary::{BoundaryNodeClassifier, BoundarySide};
use crate::msh::{MshElement, WEDGE_TYPE};

/// 楔形节点的写出顺序（源 n1..n6 的 0 基下标）
pub const WEDGE_WRITE_ORDER: [usize; 6] = [3, 5, 4, 0, 2, 1];

/// 顶点对 -> 局部面号查找表，按固定优先序排列
/// （下标指向分类三角形的三个顶点）
const PAIR_FACES: [(usize, usize, u8); 3] = [(0, 1, 1), (0, 2, 3), (1, 2, 2)];

/// 底面（贴地面）的局部面号
pub const BOTTOM_FACE: u8 = 5;

/// 顶面的局部面号
pub const TOP_FACE: u8 = 4;

/// 保留的楔形单元（写出顺序的节点编号，源 1 基）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgeElement {
    /// 输出单元编号（1 基，按保留顺序递增）
    pub out_id: usize,
    /// 写出顺序的六个源节点编号
    pub nodes: [i64; 6],
}

impl WedgeElement {
    /// 从源单元记录构造，非楔形单元返回 None
    pub fn from_msh(element: &MshElement, out_id: usize) -> WmResult<Option<Self>> {
        if element.etype != WEDGE_TYPE {
            return Ok(None);
        }
        if element.nodes.len() < 6 {
            return Err(WmError::invalid_mesh(format!(
                "楔形单元 {} 节点数不足: {}",
                element.id,
                element.nodes.len()
            )));
        }

        let mut nodes = [0i64; 6];
        for (slot, &src) in nodes.iter_mut().zip(WEDGE_WRITE_ORDER.iter()) {
            *slot = element.nodes[src];
        }
        Ok(Some(Self { out_id, nodes }))
    }

    /// 分类三角形的三个节点编号（写出顺序的前三位）
    #[inline]
    pub fn classify_triangle(&self) -> [i64; 3] {
        [self.nodes[0], self.nodes[1], self.nodes[2]]
    }
}

/// 边界面记录：(输出单元编号, 局部面号)
pub type BoundaryFaceRecord = (usize, u8);

/// 外表面分类器
///
/// 为四个侧边界组各维护一条 (单元, 面号) 记录表。
#[derive(Debug, Default)]
pub struct FaceClassifier {
    records: [Vec<BoundaryFaceRecord>; 4],
}

impl FaceClassifier {
    /// 创建分类器
    pub fn new() -> Self {
        Self::default()
    }

    /// 对单个楔形单元做四个侧面的归属判定
    pub fn classify(&mut self, wedge: &WedgeElement, classifier: &BoundaryNodeClassifier) {
        let tri = wedge.classify_triangle();

        for (s, side) in BoundarySide::ALL.iter().enumerate() {
            let member = [
                classifier.is_member(*side, tri[0]),
                classifier.is_member(*side, tri[1]),
                classifier.is_member(*side, tri[2]),
            ];

            let mut chosen: Option<u8> = None;
            let mut matches = 0usize;
            for &(a, b, face) in &PAIR_FACES {
                if member[a] && member[b] {
                    matches += 1;
                    if chosen.is_none() {
                        chosen = Some(face);
                    }
                }
            }

            // 角部拓扑可能让多个顶点对同时命中同一集合，
            // 按固定优先序取第一个，但必须显式上报
            if matches > 1 {
                warn!(
                    "单元 {} 在边界 {} 上命中 {} 个顶点对，按优先序取面 {}",
                    wedge.out_id,
                    side.tag(),
                    matches,
                    chosen.unwrap_or(0)
                );
            }

            if let Some(face) = chosen {
                self.records[s].push((wedge.out_id, face));
            }
        }
    }

    /// 某侧边界组的记录表
    #[inline]
    pub fn records(&self, side: BoundarySide) -> &[BoundaryFaceRecord] {
        let idx = BoundarySide::ALL
            .iter()
            .position(|s| *s == side)
            .unwrap_or(0);
        &self.records[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msh::MshElement;

    fn wedge(nodes: [i64; 6]) -> WedgeElement {
        let element = MshElement {
            id: 1,
            etype: WEDGE_TYPE,
            nodes: nodes.to_vec(),
        };
        WedgeElement::from_msh(&element, 1).unwrap().unwrap()
    }

    fn boundary_with(ids: &[i64], side_x: f64) -> BoundaryNodeClassifier {
        let mut c = BoundaryNodeClassifier::new(500.0);
        for &id in ids {
            c.record_if_boundary(id, side_x, 0.0);
        }
        c.finalize();
        c
    }

    #[test]
    fn test_write_order_permutation() {
        let w = wedge([1, 2, 3, 4, 5, 6]);
        assert_eq!(w.nodes, [4, 6, 5, 1, 3, 2]);
        assert_eq!(w.classify_triangle(), [4, 6, 5]);
    }

    #[test]
    fn test_non_wedge_dropped() {
        let tri = MshElement {
            id: 9,
            etype: 2,
            nodes: vec![1, 2, 3],
        };
        assert!(WedgeElement::from_msh(&tri, 1).unwrap().is_none());
    }

    #[test]
    fn test_short_wedge_is_error() {
        let bad = MshElement {
            id: 9,
            etype: WEDGE_TYPE,
            nodes: vec![1, 2, 3],
        };
        assert!(WedgeElement::from_msh(&bad, 1).is_err());
    }

    #[test]
    fn test_single_edge_on_inlet() {
        // 分类三角形为 (4, 6, 5)：让 4 和 5 落在入流面上，
        // 命中顶点对 (v0, v2)，查表面号 3
        let w = wedge([1, 2, 3, 4, 5, 6]);
        let c = boundary_with(&[4, 5], -500.0);

        let mut fc = FaceClassifier::new();
        fc.classify(&w, &c);

        assert_eq!(fc.records(BoundarySide::Inlet), &[(1, 3)]);
        assert!(fc.records(BoundarySide::Outlet).is_empty());
    }

    #[test]
    fn test_pair_priority_order() {
        // 4 和 6 在边界上 -> 对 (v0, v1) -> 面 1
        let w = wedge([1, 2, 3, 4, 5, 6]);
        let c = boundary_with(&[4, 6], -500.0);
        let mut fc = FaceClassifier::new();
        fc.classify(&w, &c);
        assert_eq!(fc.records(BoundarySide::Inlet), &[(1, 1)]);

        // 6 和 5 在边界上 -> 对 (v1, v2) -> 面 2
        let c = boundary_with(&[6, 5], -500.0);
        let mut fc = FaceClassifier::new();
        fc.classify(&w, &c);
        assert_eq!(fc.records(BoundarySide::Inlet), &[(1, 2)]);
    }

    #[test]
    fn test_corner_ambiguity_takes_first_pair() {
        // 三个顶点全部在同一集合：三个对子都命中，
        // 必须按优先序取 (v0, v1) -> 面 1，且只产生一条记录
        let w = wedge([1, 2, 3, 4, 5, 6]);
        let c = boundary_with(&[4, 5, 6], -500.0);
        let mut fc = FaceClassifier::new();
        fc.classify(&w, &c);
        assert_eq!(fc.records(BoundarySide::Inlet), &[(1, 1)]);
    }

    #[test]
    fn test_no_duplicate_records_per_side() {
        let w = wedge([1, 2, 3, 4, 5, 6]);
        let c = boundary_with(&[4, 5, 6], -500.0);
        let mut fc = FaceClassifier::new();
        fc.classify(&w, &c);
        // 每个单元对每个边界组至多一条记录
        for side in BoundarySide::ALL {
            assert!(fc.records(side).len() <= 1);
        }
    }
}
