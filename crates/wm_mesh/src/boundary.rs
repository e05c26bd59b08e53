// crates/wm_mesh/src/boundary.rs

//! 侧边界节点分类
//!
//! 节点流入时按坐标与域半边长的精确相等判定归入四个侧边界集合，
//! 角点节点可同时属于两个集合。全部节点流入完成后必须调用
//! [`BoundaryNodeClassifier::finalize`] 排序，之后 `is_member`
//! 才能用二分查找作成员判定。

/// 侧边界标识
///
/// 入流面在 x = -a，出流面在 x = +a；
/// front/back 对应 y = -a / y = +a，与输出文件的边界组命名一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundarySide {
    /// 入流面 (x = -a)
    Inlet,
    /// 出流面 (x = +a)
    Outlet,
    /// 前侧面 (y = -a)
    Front,
    /// 后侧面 (y = +a)
    Back,
}

impl BoundarySide {
    /// 四个侧面的固定顺序（与输出文件的边界组顺序一致）
    pub const ALL: [BoundarySide; 4] = [Self::Inlet, Self::Outlet, Self::Front, Self::Back];

    /// 输出文件中的边界组名
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Inlet => "inlet",
            Self::Outlet => "outlet",
            Self::Front => "front",
            Self::Back => "back",
        }
    }

    #[inline]
    fn index(&self) -> usize {
        match self {
            Self::Inlet => 0,
            Self::Outlet => 1,
            Self::Front => 2,
            Self::Back => 3,
        }
    }
}

/// 侧边界节点分类器
#[derive(Debug)]
pub struct BoundaryNodeClassifier {
    /// 域半边长（边界平面坐标绝对值）
    half_extent: f64,
    /// 每个侧面的节点编号集合，finalize 后有序
    sets: [Vec<i64>; 4],
    /// 是否已排序
    finalized: bool,
}

impl BoundaryNodeClassifier {
    /// 创建分类器
    pub fn new(half_extent: f64) -> Self {
        Self {
            half_extent,
            sets: [Vec::new(), Vec::new(), Vec::new(), Vec::new()],
            finalized: false,
        }
    }

    /// 节点流入时的边界判定
    ///
    /// 按精确相等比较：网格器在边界平面上生成的坐标是精确值，
    /// 容差比较反而会把近边界的内部节点误收进来。
    pub fn record_if_boundary(&mut self, node_id: i64, x: f64, y: f64) {
        let a = self.half_extent;
        if x == -a {
            self.sets[BoundarySide::Inlet.index()].push(node_id);
        }
        if x == a {
            self.sets[BoundarySide::Outlet.index()].push(node_id);
        }
        if y == -a {
            self.sets[BoundarySide::Front.index()].push(node_id);
        }
        if y == a {
            self.sets[BoundarySide::Back.index()].push(node_id);
        }
    }

    /// 结束节点流入，对各集合排序
    pub fn finalize(&mut self) {
        for set in &mut self.sets {
            set.sort_unstable();
        }
        self.finalized = true;
    }

    /// 成员判定（二分查找，仅在 finalize 之后有效）
    #[inline]
    pub fn is_member(&self, side: BoundarySide, node_id: i64) -> bool {
        debug_assert!(self.finalized, "is_member 必须在 finalize 之后调用");
        self.sets[side.index()].binary_search(&node_id).is_ok()
    }

    /// 某侧面的节点数量
    #[inline]
    pub fn len(&self, side: BoundarySide) -> usize {
        self.sets[side.index()].len()
    }

    /// 所有侧面是否都为空
    pub fn is_empty(&self) -> bool {
        self.sets.iter().all(|s| s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier_with_nodes() -> BoundaryNodeClassifier {
        let mut c = BoundaryNodeClassifier::new(500.0);
        // 乱序流入，检验 finalize 排序
        c.record_if_boundary(9, -500.0, 0.0);
        c.record_if_boundary(3, -500.0, 100.0);
        c.record_if_boundary(5, 500.0, 0.0);
        c.record_if_boundary(7, 0.0, 500.0);
        c.record_if_boundary(2, 0.0, -500.0);
        c.record_if_boundary(4, 100.0, 100.0); // 内部节点
        c.finalize();
        c
    }

    #[test]
    fn test_membership() {
        let c = classifier_with_nodes();
        assert!(c.is_member(BoundarySide::Inlet, 9));
        assert!(c.is_member(BoundarySide::Inlet, 3));
        assert!(c.is_member(BoundarySide::Outlet, 5));
        assert!(c.is_member(BoundarySide::Back, 7));
        assert!(c.is_member(BoundarySide::Front, 2));
        assert!(!c.is_member(BoundarySide::Inlet, 4));
        assert!(!c.is_member(BoundarySide::Outlet, 9));
    }

    #[test]
    fn test_corner_node_in_two_sets() {
        let mut c = BoundaryNodeClassifier::new(500.0);
        c.record_if_boundary(1, -500.0, -500.0);
        c.finalize();
        assert!(c.is_member(BoundarySide::Inlet, 1));
        assert!(c.is_member(BoundarySide::Front, 1));
        assert!(!c.is_member(BoundarySide::Outlet, 1));
    }

    #[test]
    fn test_near_boundary_not_member() {
        let mut c = BoundaryNodeClassifier::new(500.0);
        // 精确相等判定：差一丁点也不算边界
        c.record_if_boundary(1, -499.9999999, 0.0);
        c.finalize();
        assert!(!c.is_member(BoundarySide::Inlet, 1));
    }

    #[test]
    fn test_counts() {
        let c = classifier_with_nodes();
        assert_eq!(c.len(BoundarySide::Inlet), 2);
        assert_eq!(c.len(BoundarySide::Outlet), 1);
        assert!(!c.is_empty());
    }
}
