// crates/wm_config/src/lib.rs

//! WindMesh 配置层
//!
//! 提供风场工况配置（`info.json`）的加载、验证和保存。
//!
//! # 模块概览
//!
//! - [`case`]: `CaseConfig` 工况配置（全 f64）
//! - [`error`]: 配置错误类型
//!
//! # 设计原则
//!
//! 1. **字段兼容**: 配置键与既有 `info.json` 完全一致
//!    （`domain.lt`、`mesh.tr1` 等），旧工况无需迁移
//! 2. **全 f64 配置**: 所有数值使用 f64，便于 JSON 序列化
//! 3. **加载即验证**: `from_file` 成功返回的配置一定通过了 `validate`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod case;
pub mod error;

pub use case::{CaseConfig, DomainConfig, MeshConfig, TurbineSite, WindConfig};
pub use error::ConfigError;
