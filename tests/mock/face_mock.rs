use eq_emotion_detector::{EmotionScorer, EmotionScorerError, EmotionScores, FaceLocator, FaceRegion};
use image::{GrayImage, Luma};

pub const SIDE: u32 = 48;

/// Synthetic 48x48 crops built from three horizontal bands. The lower band is
/// a vertical stripe pattern so its Sobel response is known in closed form:
/// stripes `w` pixels wide with contrast `d` give a mouth activity of
/// `4 * d * (active columns) / 48`.
pub struct TestFaces;

impl TestFaces {
    pub fn banded<F>(upper: u8, middle: u8, lower: F) -> GrayImage
    where
        F: Fn(u32) -> u8,
    {
        GrayImage::from_fn(SIDE, SIDE, |x, y| match y {
            y if y < SIDE / 3 => Luma([upper]),
            y if y < 2 * SIDE / 3 => Luma([middle]),
            _ => Luma([lower(x)]),
        })
    }

    pub fn stripes(a: u8, b: u8, width: u32) -> impl Fn(u32) -> u8 {
        move |x| if (x / width) % 2 == 0 { a } else { b }
    }

    pub fn uniform(value: u8) -> GrayImage {
        GrayImage::from_pixel(SIDE, SIDE, Luma([value]))
    }

    /// Bright, mouth activity ~153.
    pub fn surprised() -> GrayImage {
        Self::banded(130, 130, Self::stripes(110, 150, 2))
    }

    /// Dark, flat.
    pub fn sad() -> GrayImage {
        Self::uniform(90)
    }

    /// Brightness 112, mouth activity ~9.17.
    pub fn neutral() -> GrayImage {
        Self::banded(112, 112, Self::stripes(110, 115, 4))
    }

    /// Brightness 115, mouth activity ~19.17.
    pub fn happy() -> GrayImage {
        Self::banded(115, 115, Self::stripes(110, 115, 2))
    }

    /// High contrast between bands, mouth activity ~9.17.
    pub fn angry() -> GrayImage {
        Self::banded(60, 160, Self::stripes(108, 113, 4))
    }

    /// Brightness 122, mouth activity 11.
    pub fn fearful() -> GrayImage {
        Self::banded(122, 122, Self::stripes(110, 116, 4))
    }

    /// Deterministic pseudo-random texture of arbitrary size.
    pub fn noise(width: u32, height: u32, seed: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            let v = x
                .wrapping_mul(73_856_093)
                ^ y.wrapping_mul(19_349_663)
                ^ seed.wrapping_mul(83_492_791);
            Luma([(v % 256) as u8])
        })
    }

    pub fn all_named() -> Vec<(&'static str, GrayImage)> {
        vec![
            ("surprised", Self::surprised()),
            ("sad", Self::sad()),
            ("neutral", Self::neutral()),
            ("happy", Self::happy()),
            ("angry", Self::angry()),
            ("fearful", Self::fearful()),
        ]
    }
}

pub struct MockFaceLocator {
    regions: Vec<FaceRegion>,
}

impl MockFaceLocator {
    pub fn with_regions(regions: Vec<FaceRegion>) -> Self {
        Self { regions }
    }

    pub fn none() -> Self {
        Self::with_regions(Vec::new())
    }
}

impl FaceLocator for MockFaceLocator {
    fn locate(&self, _frame: &GrayImage) -> Vec<FaceRegion> {
        self.regions.clone()
    }
}

pub struct FailingScorer;

impl EmotionScorer for FailingScorer {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    fn score(&mut self, _face: &GrayImage) -> Result<EmotionScores, EmotionScorerError> {
        Err(EmotionScorerError::ArrayShape("Gradient computation failed".to_string()))
    }
}
