use image::GrayImage;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{BackendKind, DetectorConfig};
use crate::modules::emotion::{
    Emotion, EmotionScorer, EmotionScorerError, EmotionScores, HeuristicScorer, OnnxEmotionScorer,
};
use crate::modules::face::{crop_face, FaceLocator, FixedRegionLocator, FullFrameLocator};
use crate::modules::response::{chat_response, recommendations_for, Page, Recommendations};

/// Outcome of scoring one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionAnalysis {
    pub emotion: Emotion,
    pub confidence: f32,
    pub all_emotions: EmotionScores,
    pub face_found: bool,
}

impl EmotionAnalysis {
    pub fn no_face() -> Self {
        Self {
            emotion: Emotion::Neutral,
            confidence: 0.0,
            all_emotions: EmotionScores::new(),
            face_found: false,
        }
    }

    /// A face was found but could not be scored.
    pub fn scoring_fallback() -> Self {
        Self {
            emotion: Emotion::Neutral,
            confidence: 0.0,
            all_emotions: EmotionScores::neutral_fallback(),
            face_found: true,
        }
    }

    pub fn from_scores(scores: EmotionScores) -> Self {
        let (emotion, confidence) = scores.dominant();
        Self {
            emotion,
            confidence,
            all_emotions: scores,
            face_found: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectionResponse {
    pub emotion: Emotion,
    pub confidence: f32,
    pub all_emotions: EmotionScores,
    pub chat_response: String,
    pub recommendations: Recommendations,
}

impl DetectionResponse {
    pub fn from_analysis(analysis: EmotionAnalysis, page: Page) -> Self {
        Self {
            emotion: analysis.emotion,
            confidence: analysis.confidence,
            chat_response: chat_response(analysis.emotion, page).to_string(),
            recommendations: recommendations_for(analysis.emotion),
            all_emotions: analysis.all_emotions,
        }
    }
}

pub struct EmotionDetector {
    locator: Box<dyn FaceLocator>,
    scorer: Box<dyn EmotionScorer>,
}

impl EmotionDetector {
    pub fn new(locator: Box<dyn FaceLocator>, scorer: Box<dyn EmotionScorer>) -> Self {
        Self { locator, scorer }
    }

    /// Whole-frame locator with the heuristic scorer.
    pub fn heuristic() -> Self {
        Self::new(Box::new(FullFrameLocator), Box::new(HeuristicScorer::new()))
    }

    pub fn from_config(config: &DetectorConfig) -> Result<Self, EmotionScorerError> {
        let locator: Box<dyn FaceLocator> = match config.detection.face_region {
            Some(region) => Box::new(FixedRegionLocator::new(region)),
            None => Box::new(FullFrameLocator),
        };

        let scorer: Box<dyn EmotionScorer> = match config.backend.kind {
            BackendKind::Heuristic => Box::new(HeuristicScorer::new()),
            BackendKind::Onnx => Box::new(OnnxEmotionScorer::new(&config.backend.model_dir)?),
        };

        Ok(Self::new(locator, scorer))
    }

    pub fn backend_name(&self) -> &'static str {
        self.scorer.backend_name()
    }

    /// Scores the first located face. Scoring failures never escape: they
    /// degrade to `{neutral: 1.0}` with zero confidence.
    pub fn analyze(&mut self, frame: &GrayImage) -> EmotionAnalysis {
        let regions = self.locator.locate(frame);
        let face = match regions.first().and_then(|region| crop_face(frame, region)) {
            Some(face) => face,
            None => {
                debug!("No face located in {}x{} frame", frame.width(), frame.height());
                return EmotionAnalysis::no_face();
            }
        };

        match self.scorer.score(&face) {
            Ok(scores) => EmotionAnalysis::from_scores(scores),
            Err(e) => {
                warn!("{} scoring failed, falling back to neutral: {}", self.scorer.backend_name(), e);
                EmotionAnalysis::scoring_fallback()
            }
        }
    }

    pub fn detect(&mut self, frame: &GrayImage, page: Page) -> DetectionResponse {
        DetectionResponse::from_analysis(self.analyze(frame), page)
    }
}
