// crates/wm_foundation/src/lib.rs

//! WindMesh 基础层
//!
//! 提供整个工作空间共用的错误类型。
//!
//! # 模块
//!
//! - [`error`]: `WmError` 枚举和 `WmResult` 类型别名

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

pub use error::{WmError, WmResult};
