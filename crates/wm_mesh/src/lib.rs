// crates/wm_mesh/src/lib.rs

//! WindMesh 网格层
//!
//! 将外部网格器生成的平底挤出网格变换为贴地网格：
//! 底层节点跟随真实高程，外侧竖直边界保持精确平面，
//! 并将所有外表面归入命名边界组后写出 GAMBIT 中性格式文件。
//!
//! # 模块
//!
//! - [`msh`]: GMSH v2 流式读取（节点段、单元段）
//! - [`ground`]: 底层高程索引（量化平面键）
//! - [`boundary`]: 侧边界节点分类与成员查询
//! - [`transform`]: 节点贴地变换
//! - [`faces`]: 楔形单元外表面分类
//! - [`layers`]: 垂向层数推算
//! - [`neu`]: 中性格式写出（定宽字段、文件头回填）
//! - [`builder`]: 两趟流水线编排
//!
//! # 流程
//!
//! ```text
//! flat.msh ──节点段──> MeshTransformer ──> NeutralWriter (节点)
//!              │          │ ElevationSampler + RadialBlender
//!              │          │ GroundElevationIndex / BoundaryNodeClassifier
//!              └─单元段──> FaceClassifier + LayerCounts
//!                              └──> NeutralWriter (单元/分组/边界) ──> 回填文件头
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boundary;
pub mod builder;
pub mod faces;
pub mod ground;
pub mod layers;
pub mod msh;
pub mod neu;
pub mod transform;

// 重导出常用类型
pub use boundary::{BoundaryNodeClassifier, BoundarySide};
pub use builder::{BuildReport, TerrainMeshBuilder};
pub use faces::FaceClassifier;
pub use ground::{GroundElevationIndex, GroundKey};
pub use layers::LayerCounts;
pub use neu::NeutralWriter;
pub use transform::MeshTransformer;
