use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::modules::face::FaceRegion;
use crate::modules::response::Page;

pub const DEFAULT_MODEL_DIR: &str = "models/emotion-ferplus-8";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Heuristic,
    Onnx,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub model_dir: String,
}

impl BackendConfig {
    pub fn new(kind: BackendKind, model_dir: impl Into<String>) -> Self {
        Self {
            kind,
            model_dir: model_dir.into(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(BackendKind::Heuristic, DEFAULT_MODEL_DIR)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub default_page: Page,
    /// Fixed face rectangle; `None` treats the whole frame as the face.
    pub face_region: Option<FaceRegion>,
    pub record_check_ins: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            default_page: Page::Chat,
            face_region: None,
            record_check_ins: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub recent_days: u32,
}

impl HistoryConfig {
    pub fn new(recent_days: u32) -> Self {
        Self { recent_days }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { recent_days: 7 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub backend: BackendConfig,
    pub detection: DetectionConfig,
    pub history: HistoryConfig,
}

impl DetectorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: DetectorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: DetectorConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.kind == BackendKind::Onnx && self.backend.model_dir.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "backend.model_dir must be set for the onnx backend".to_string(),
            ));
        }

        if let Some(region) = &self.detection.face_region {
            if region.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "detection.face_region has zero area: {}x{}",
                    region.width, region.height
                )));
            }
        }

        if self.history.recent_days == 0 {
            return Err(ConfigError::Invalid(
                "history.recent_days must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detector_config_default() {
        let config = DetectorConfig::default();
        assert_eq!(config.backend.kind, BackendKind::Heuristic);
        assert_eq!(config.backend.model_dir, DEFAULT_MODEL_DIR);
        assert_eq!(config.detection.default_page, Page::Chat);
        assert!(config.detection.face_region.is_none());
        assert!(config.detection.record_check_ins);
        assert_eq!(config.history.recent_days, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = DetectorConfig::from_toml_str(
            r#"
            [backend]
            kind = "onnx"

            [detection]
            default_page = "exercise"
            face_region = { x = 10, y = 20, width = 100, height = 120 }
            "#,
        )
        .unwrap();

        assert_eq!(config.backend.kind, BackendKind::Onnx);
        assert_eq!(config.backend.model_dir, DEFAULT_MODEL_DIR);
        assert_eq!(config.detection.default_page, Page::Exercise);
        assert_eq!(config.detection.face_region, Some(FaceRegion::new(10, 20, 100, 120)));
        assert_eq!(config.history.recent_days, 7);
    }

    #[test]
    fn test_json_config() {
        let config = DetectorConfig::from_json_str(r#"{"history": {"recent_days": 30}}"#).unwrap();
        assert_eq!(config.history.recent_days, 30);
        assert_eq!(config.backend.kind, BackendKind::Heuristic);

        assert!(matches!(
            DetectorConfig::from_json_str("{not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_validation_errors() {
        let mut config = DetectorConfig::default();
        config.history = HistoryConfig::new(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = DetectorConfig::default();
        config.backend = BackendConfig::new(BackendKind::Onnx, "  ");
        assert!(config.validate().is_err());

        let mut config = DetectorConfig::default();
        config.detection.face_region = Some(FaceRegion::new(0, 0, 0, 10));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let result = DetectorConfig::from_toml_str("[backend]\nkind = \"fer\"\n");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }
}
