// crates/wm_config/src/case.rs

//! CaseConfig - 工况配置（全 f64）
//!
//! 与既有工况文件 `info.json` 字段一一对应：
//! `domain` 描述计算域，`mesh` 描述网格与地形融合参数，
//! `wind` 描述来流方向，`turbines` 列出风机位置
//! （同时也是网格加密种子点，逐点对应 `.msh` 文件头部需要跳过的记录）。

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// 工况配置
///
/// 所有数值使用 f64 存储以便 JSON 序列化。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseConfig {
    /// 计算域参数
    pub domain: DomainConfig,

    /// 网格参数
    pub mesh: MeshConfig,

    /// 风场参数
    #[serde(default)]
    pub wind: WindConfig,

    /// 风机位置列表（即加密种子点）
    #[serde(default)]
    pub turbines: Vec<TurbineSite>,
}

/// 计算域配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainConfig {
    /// 域边长 [m]，域中心在原点，边界位于 ±lt/2
    pub lt: f64,

    /// 域高度 [m]，顶面在变换后保持精确平面
    pub h: f64,
}

/// 网格配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshConfig {
    /// 地形融合内半径 [m]，半径以内保留完整地形起伏
    pub tr1: f64,

    /// 地形融合外半径 [m]，半径以外地形完全压平
    pub tr2: f64,

    /// 输出坐标缩放系数
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_scale() -> f64 {
    1.0
}

/// 风场配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindConfig {
    /// 来流风向角 [度]
    #[serde(default)]
    pub angle: f64,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self { angle: 0.0 }
    }
}

/// 风机位置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurbineSite {
    /// x 坐标 [m]
    pub x: f64,
    /// y 坐标 [m]
    pub y: f64,
}

impl CaseConfig {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;

        let config: CaseConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.domain.lt <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "domain.lt".to_string(),
                value: self.domain.lt.to_string(),
                reason: "域边长必须为正".to_string(),
            });
        }

        if self.domain.h <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "domain.h".to_string(),
                value: self.domain.h.to_string(),
                reason: "域高度必须为正".to_string(),
            });
        }

        if self.mesh.tr1 < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "mesh.tr1".to_string(),
                value: self.mesh.tr1.to_string(),
                reason: "内半径不能为负".to_string(),
            });
        }

        // 半径相等或倒置是配置错误，不能静默处理
        if self.mesh.tr1 >= self.mesh.tr2 {
            return Err(ConfigError::InvalidValue {
                key: "mesh.tr1".to_string(),
                value: format!("{} >= {}", self.mesh.tr1, self.mesh.tr2),
                reason: "内半径必须严格小于外半径".to_string(),
            });
        }

        if self.mesh.scale <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "mesh.scale".to_string(),
                value: self.mesh.scale.to_string(),
                reason: "缩放系数必须为正".to_string(),
            });
        }

        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(ConfigError::Io)?;
        Ok(())
    }

    /// 域半边长（边界平面的 xy 坐标绝对值）
    #[inline]
    pub fn half_extent(&self) -> f64 {
        self.domain.lt / 2.0
    }

    /// 加密种子点数量（`.msh` 节点段头部需要跳过的记录数）
    #[inline]
    pub fn seed_count(&self) -> usize {
        self.turbines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> CaseConfig {
        CaseConfig {
            domain: DomainConfig { lt: 1000.0, h: 500.0 },
            mesh: MeshConfig {
                tr1: 200.0,
                tr2: 400.0,
                scale: 1.0,
            },
            wind: WindConfig { angle: 0.0 },
            turbines: vec![TurbineSite { x: 0.0, y: 0.0 }],
        }
    }

    #[test]
    fn test_valid_config() {
        let config = sample_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.half_extent(), 500.0);
        assert_eq!(config.seed_count(), 1);
    }

    #[test]
    fn test_inverted_radii() {
        let mut config = sample_config();
        config.mesh.tr1 = 400.0;
        config.mesh.tr2 = 200.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_equal_radii() {
        let mut config = sample_config();
        config.mesh.tr1 = 300.0;
        config.mesh.tr2 = 300.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = sample_config();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: CaseConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.domain.lt, config.domain.lt);
        assert_eq!(parsed.turbines.len(), 1);
    }

    #[test]
    fn test_info_json_compat() {
        // 既有 info.json 的最小子集
        let json = r#"{
            "domain": {"lt": 2000, "h": 800},
            "mesh": {"tr1": 300, "tr2": 600},
            "wind": {"angle": 270},
            "turbines": [{"x": 10.0, "y": -20.0}]
        }"#;
        let config: CaseConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.mesh.scale, 1.0);
        assert_eq!(config.wind.angle, 270.0);
    }
}
