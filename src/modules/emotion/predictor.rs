use image::imageops::{self, FilterType};
use image::GrayImage;
use ort::{
    session::{
        Session,
        builder::GraphOptimizationLevel,
    },
    value::Value,
    inputs,
};
use std::path::Path;
use tracing::info;

use super::labels::{Emotion, EmotionScores};
use super::scorer::{EmotionScorer, EmotionScorerError};

/// FER+ input side length.
pub const FERPLUS_INPUT_SIZE: u32 = 64;

/// FER+ output order. Contempt has no label of its own and folds into disgust.
const FERPLUS_LABELS: [Emotion; 8] = [
    Emotion::Neutral,
    Emotion::Happy,
    Emotion::Surprise,
    Emotion::Sad,
    Emotion::Angry,
    Emotion::Disgust,
    Emotion::Fear,
    Emotion::Disgust,
];

const MODEL_FILE: &str = "model.onnx";

pub struct OnnxEmotionScorer {
    session: Session,
    input_size: u32,
}

impl OnnxEmotionScorer {
    pub fn new(model_dir: &str) -> Result<Self, EmotionScorerError> {
        let onnx_model_path = Path::new(model_dir).join(MODEL_FILE);
        if !onnx_model_path.exists() {
            return Err(EmotionScorerError::ModelLoading(format!(
                "ONNX model file not found at {}. Run 'cargo run --bin download-models' first.",
                onnx_model_path.display()
            )));
        }

        if Self::is_placeholder_file(&onnx_model_path)? {
            return Err(EmotionScorerError::ModelLoading(
                "ONNX model is a placeholder file. Please run 'cargo run --bin download-models' to download the actual model.".to_string()
            ));
        }

        ort::init()
            .with_name("face_emotion")
            .commit()?;

        let model_data = std::fs::read(&onnx_model_path)?;
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(1)?
            .commit_from_memory(&model_data)?;

        info!("Loaded face emotion model from {}", onnx_model_path.display());

        Ok(Self {
            session,
            input_size: FERPLUS_INPUT_SIZE,
        })
    }

    /// Raw intensities in `[1, 1, size, size]` layout; FER+ expects 0..255, not 0..1.
    pub fn preprocess(face: &GrayImage, size: u32) -> Result<Vec<f32>, EmotionScorerError> {
        let (width, height) = face.dimensions();
        if width == 0 || height == 0 {
            return Err(EmotionScorerError::InvalidInput(format!(
                "Face crop must be at least 1x1, got {}x{}",
                width, height
            )));
        }

        let resized = imageops::resize(face, size, size, FilterType::Triangle);
        Ok(resized.into_raw().into_iter().map(f32::from).collect())
    }

    /// Softmax over FER+ logits, mapped onto emotion labels.
    pub fn logits_to_scores(logits: &[f32]) -> Result<EmotionScores, EmotionScorerError> {
        if logits.len() != FERPLUS_LABELS.len() {
            return Err(EmotionScorerError::ArrayShape(format!(
                "Expected {} logits, got {}",
                FERPLUS_LABELS.len(),
                logits.len()
            )));
        }

        let max_logit = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let exp: Vec<f32> = logits.iter().map(|&x| (x - max_logit).exp()).collect();
        let exp_sum: f32 = exp.iter().sum();

        if !exp_sum.is_finite() || exp_sum <= 0.0 {
            return Err(EmotionScorerError::Inference(
                "Model produced non-finite logits".to_string(),
            ));
        }

        let mut scores = EmotionScores::new();
        for (label, value) in FERPLUS_LABELS.iter().zip(exp) {
            scores.add(*label, value / exp_sum);
        }

        let mut rounded = EmotionScores::new();
        for &(label, score) in scores.iter() {
            rounded.set(label, (score * 10_000.0).round() / 10_000.0);
        }

        Ok(rounded)
    }

    pub fn is_placeholder_file(file_path: &Path) -> Result<bool, EmotionScorerError> {
        if !file_path.exists() {
            return Ok(false);
        }

        let metadata = std::fs::metadata(file_path)?;
        Ok(metadata.len() < 1000)
    }
}

impl EmotionScorer for OnnxEmotionScorer {
    fn backend_name(&self) -> &'static str {
        "onnx"
    }

    fn score(&mut self, face: &GrayImage) -> Result<EmotionScores, EmotionScorerError> {
        let side = self.input_size as usize;
        let pixels = Self::preprocess(face, self.input_size)?;

        let input_value = Value::from_array(([1, 1, side, side], pixels))?;

        let outputs = self.session.run(inputs![input_value])
            .map_err(|e| EmotionScorerError::Inference(format!("Model inference failed: {}", e)))?;

        let output = &outputs[0];

        let (_, logits) = output.try_extract_tensor::<f32>()
            .map_err(|e| EmotionScorerError::Inference(format!("Failed to extract output: {}", e)))?;

        Self::logits_to_scores(logits)
    }
}
