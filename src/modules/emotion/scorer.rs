use image::GrayImage;
use thiserror::Error;

use super::labels::EmotionScores;

#[derive(Error, Debug, Clone)]
pub enum EmotionScorerError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Model loading error: {0}")]
    ModelLoading(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("ONNX Runtime error: {0}")]
    OnnxRuntime(String),

    #[error("Array shape error: {0}")]
    ArrayShape(String),

    #[error("Image error: {0}")]
    Image(String),
}

impl From<std::io::Error> for EmotionScorerError {
    fn from(error: std::io::Error) -> Self {
        EmotionScorerError::Io(error.to_string())
    }
}

impl From<ort::Error> for EmotionScorerError {
    fn from(error: ort::Error) -> Self {
        EmotionScorerError::OnnxRuntime(error.to_string())
    }
}

impl From<image::ImageError> for EmotionScorerError {
    fn from(error: image::ImageError) -> Self {
        EmotionScorerError::Image(error.to_string())
    }
}

impl From<ndarray::ShapeError> for EmotionScorerError {
    fn from(error: ndarray::ShapeError) -> Self {
        EmotionScorerError::ArrayShape(error.to_string())
    }
}

/// A backend that turns one face crop into a normalized emotion mapping.
pub trait EmotionScorer: Send {
    fn backend_name(&self) -> &'static str;

    fn score(&mut self, face: &GrayImage) -> Result<EmotionScores, EmotionScorerError>;
}
