use image::imageops::{self, FilterType};
use image::GrayImage;
use ndarray::{s, Array2, ArrayView2};
use serde::Serialize;
use tracing::debug;

use super::labels::{Emotion, EmotionScores};
use super::scorer::{EmotionScorer, EmotionScorerError};

/// Side length every crop is resized to before scoring.
pub const CANONICAL_SIZE: u32 = 48;

/// Labels scored by the heuristic, in tie-break order.
pub const HEURISTIC_LABELS: [Emotion; 6] = [
    Emotion::Happy,
    Emotion::Sad,
    Emotion::Angry,
    Emotion::Fear,
    Emotion::Surprise,
    Emotion::Neutral,
];

const NEUTRAL_BASELINE: f32 = 0.5;

const HAPPY_BONUS: f32 = 0.9;
const SAD_BONUS: f32 = 0.8;
const ANGRY_BONUS: f32 = 0.7;
const SURPRISE_BONUS: f32 = 0.8;
const FEAR_BONUS: f32 = 0.6;
const NEUTRAL_BONUS: f32 = 0.3;

/// Measurements taken from a canonical 48x48 crop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FaceFeatures {
    /// Mean intensity of the upper (eye) band.
    pub upper_brightness: f32,
    /// Mean Sobel gradient magnitude of the lower (mouth) band.
    pub mouth_activity: f32,
    /// Population standard deviation of every pixel in the crop.
    pub intensity_std: f32,
}

/// Brightness/edge rule scorer. Stateless; every call is independent.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    pub fn new() -> Self {
        HeuristicScorer
    }

    /// Resizes the crop to the canonical size and lifts it into a float grid
    /// indexed `[row, column]`.
    pub fn canonicalize(crop: &GrayImage) -> Result<Array2<f32>, EmotionScorerError> {
        let (width, height) = crop.dimensions();
        if width == 0 || height == 0 {
            return Err(EmotionScorerError::InvalidInput(format!(
                "Face crop must be at least 1x1, got {}x{}",
                width, height
            )));
        }

        let resized = if (width, height) == (CANONICAL_SIZE, CANONICAL_SIZE) {
            crop.clone()
        } else {
            imageops::resize(crop, CANONICAL_SIZE, CANONICAL_SIZE, FilterType::Triangle)
        };

        let side = CANONICAL_SIZE as usize;
        let pixels: Vec<f32> = resized.into_raw().into_iter().map(f32::from).collect();

        Ok(Array2::from_shape_vec((side, side), pixels)?)
    }

    pub fn extract_features(face: ArrayView2<'_, f32>) -> Result<FaceFeatures, EmotionScorerError> {
        let rows = face.nrows();
        let band = rows / 3;
        if band == 0 {
            return Err(EmotionScorerError::InvalidInput(format!(
                "Face grid needs at least 3 rows, got {}",
                rows
            )));
        }

        let upper = face.slice(s![..band, ..]);
        let lower = face.slice(s![2 * band.., ..]);

        let upper_brightness = upper
            .mean()
            .ok_or_else(|| EmotionScorerError::InvalidInput("Upper band is empty".to_string()))?;
        let mouth_activity = mean_gradient_magnitude(lower)?;
        let intensity_std = face.std(0.0);

        if !intensity_std.is_finite() {
            return Err(EmotionScorerError::Inference(
                "Intensity deviation is not finite".to_string(),
            ));
        }

        Ok(FaceFeatures {
            upper_brightness,
            mouth_activity,
            intensity_std,
        })
    }

    pub fn score_features(features: &FaceFeatures) -> EmotionScores {
        let upper = features.upper_brightness;
        let mouth = features.mouth_activity;

        let mut scores = EmotionScores::zeroed(&HEURISTIC_LABELS);
        scores.set(Emotion::Neutral, NEUTRAL_BASELINE);

        // Surprise and happy overlap; inside the surprise band only surprise scores.
        let wide_open = upper > 125.0 && mouth > 18.0;

        if upper > 110.0 && mouth > 12.0 && !wide_open {
            scores.add(Emotion::Happy, HAPPY_BONUS);
        }
        if upper < 105.0 && mouth < 8.0 {
            scores.add(Emotion::Sad, SAD_BONUS);
        }
        if features.intensity_std > 20.0 && mouth > 8.0 && mouth < 15.0 {
            scores.add(Emotion::Angry, ANGRY_BONUS);
        }
        if wide_open {
            scores.add(Emotion::Surprise, SURPRISE_BONUS);
        }
        if upper > 120.0 && mouth > 10.0 && mouth < 16.0 {
            scores.add(Emotion::Fear, FEAR_BONUS);
        }
        if upper > 100.0 && upper < 120.0 && mouth > 8.0 && mouth < 12.0 {
            scores.add(Emotion::Neutral, NEUTRAL_BONUS);
        }

        scores.normalized()
    }
}

impl EmotionScorer for HeuristicScorer {
    fn backend_name(&self) -> &'static str {
        "heuristic"
    }

    fn score(&mut self, face: &GrayImage) -> Result<EmotionScores, EmotionScorerError> {
        let grid = Self::canonicalize(face)?;
        let features = Self::extract_features(grid.view())?;

        debug!(
            upper_brightness = features.upper_brightness,
            mouth_activity = features.mouth_activity,
            intensity_std = features.intensity_std,
            "heuristic face features"
        );

        Ok(Self::score_features(&features))
    }
}

/// OpenCV's default border mode: `gfedcb|abcdefgh|gfedcba`.
fn reflect_101(index: isize, len: usize) -> usize {
    let len = len as isize;
    if len == 1 {
        return 0;
    }

    let mut index = index;
    if index < 0 {
        index = -index;
    }
    if index >= len {
        index = 2 * (len - 1) - index;
    }
    index as usize
}

/// Mean per-pixel Euclidean norm of the 3x3 Sobel x/y responses.
fn mean_gradient_magnitude(band: ArrayView2<'_, f32>) -> Result<f32, EmotionScorerError> {
    let (rows, cols) = band.dim();
    if rows == 0 || cols == 0 {
        return Err(EmotionScorerError::InvalidInput("Mouth band is empty".to_string()));
    }

    let at = |r: isize, c: isize| band[[reflect_101(r, rows), reflect_101(c, cols)]];

    let magnitudes = Array2::from_shape_fn((rows, cols), |(r, c)| {
        let (r, c) = (r as isize, c as isize);

        let gx = (at(r - 1, c + 1) - at(r - 1, c - 1))
            + 2.0 * (at(r, c + 1) - at(r, c - 1))
            + (at(r + 1, c + 1) - at(r + 1, c - 1));
        let gy = (at(r + 1, c - 1) - at(r - 1, c - 1))
            + 2.0 * (at(r + 1, c) - at(r - 1, c))
            + (at(r + 1, c + 1) - at(r - 1, c + 1));

        gx.hypot(gy)
    });

    magnitudes
        .mean()
        .filter(|mean| mean.is_finite())
        .ok_or_else(|| EmotionScorerError::Inference("Gradient magnitude is not finite".to_string()))
}
