pub mod config;
pub mod modules;
pub mod api;
pub mod utils;

#[cfg(test)]
mod _test_mock;

pub use config::{DetectorConfig, BackendConfig, BackendKind, DetectionConfig, HistoryConfig, ConfigError};
pub use modules::emotion::{Emotion, EmotionScores, EmotionScorer, EmotionScorerError, HeuristicScorer, OnnxEmotionScorer, FaceFeatures};
pub use modules::detector::{EmotionDetector, EmotionAnalysis, DetectionResponse};
pub use modules::face::{FaceLocator, FaceRegion, FullFrameLocator, FixedRegionLocator};
pub use modules::response::{Page, Recommendations};
pub use modules::checkin::{CheckInRecord, CheckInStore};
