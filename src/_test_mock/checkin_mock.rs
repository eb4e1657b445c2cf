use crate::modules::checkin::{CheckInRecord, CheckInStore};
use crate::modules::emotion::{Emotion, EmotionScorer, EmotionScorerError, EmotionScores};
use crate::modules::response::Page;
use chrono::{DateTime, Utc};
use image::GrayImage;

pub struct CheckInTestHelpers;

impl CheckInTestHelpers {
    pub fn test_session_id() -> String {
        format!("test-session-{}", uuid::Uuid::new_v4())
    }

    pub fn open_test_session() -> String {
        let session_id = Self::test_session_id();
        CheckInStore::open_session(&session_id).unwrap();
        session_id
    }

    pub fn record_at(id: &str, emotion: Emotion, recorded_at: DateTime<Utc>) -> CheckInRecord {
        CheckInRecord {
            id: id.to_string(),
            emotion,
            confidence: 0.5,
            page: Page::Checkin,
            recorded_at,
        }
    }
}

/// Scorer that replays a fixed result.
pub struct FixedScorer {
    response: Result<EmotionScores, EmotionScorerError>,
}

impl FixedScorer {
    pub fn returning(scores: EmotionScores) -> Self {
        Self { response: Ok(scores) }
    }

    pub fn failing(error: EmotionScorerError) -> Self {
        Self { response: Err(error) }
    }
}

impl EmotionScorer for FixedScorer {
    fn backend_name(&self) -> &'static str {
        "fixed"
    }

    fn score(&mut self, _face: &GrayImage) -> Result<EmotionScores, EmotionScorerError> {
        self.response.clone()
    }
}
