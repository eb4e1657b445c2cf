pub mod detector_config;

pub use detector_config::{
    BackendConfig, BackendKind, ConfigError, DetectionConfig, DetectorConfig, HistoryConfig,
    DEFAULT_MODEL_DIR,
};
