pub mod heuristic;
pub mod labels;
pub mod predictor;
pub mod scorer;

pub use heuristic::{FaceFeatures, HeuristicScorer, CANONICAL_SIZE, HEURISTIC_LABELS};
pub use labels::{Emotion, EmotionScores};
pub use predictor::OnnxEmotionScorer;
pub use scorer::{EmotionScorer, EmotionScorerError};
