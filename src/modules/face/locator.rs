use image::{imageops, GrayImage};
use serde::{Deserialize, Serialize};

/// Pixel rectangle of a located face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FaceRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Intersection with a `frame_width` x `frame_height` frame.
    pub fn clip_to(&self, frame_width: u32, frame_height: u32) -> Option<FaceRegion> {
        if self.x >= frame_width || self.y >= frame_height {
            return None;
        }

        let width = self.width.min(frame_width - self.x);
        let height = self.height.min(frame_height - self.y);
        let clipped = FaceRegion::new(self.x, self.y, width, height);

        if clipped.is_empty() {
            None
        } else {
            Some(clipped)
        }
    }
}

/// Supplies face bounding boxes for a frame. Implementations must only return
/// non-empty regions that lie inside the frame.
pub trait FaceLocator: Send {
    fn locate(&self, frame: &GrayImage) -> Vec<FaceRegion>;
}

/// Treats the whole frame as a single face, for inputs that are already cropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullFrameLocator;

impl FaceLocator for FullFrameLocator {
    fn locate(&self, frame: &GrayImage) -> Vec<FaceRegion> {
        let (width, height) = frame.dimensions();
        let region = FaceRegion::new(0, 0, width, height);

        if region.is_empty() {
            Vec::new()
        } else {
            vec![region]
        }
    }
}

/// Always reports the same rectangle, clipped to the frame.
#[derive(Debug, Clone, Copy)]
pub struct FixedRegionLocator {
    region: FaceRegion,
}

impl FixedRegionLocator {
    pub fn new(region: FaceRegion) -> Self {
        Self { region }
    }
}

impl FaceLocator for FixedRegionLocator {
    fn locate(&self, frame: &GrayImage) -> Vec<FaceRegion> {
        let (width, height) = frame.dimensions();
        self.region.clip_to(width, height).into_iter().collect()
    }
}

/// Copies `region` out of `frame`. Returns `None` when nothing of the region
/// lies inside the frame.
pub fn crop_face(frame: &GrayImage, region: &FaceRegion) -> Option<GrayImage> {
    let (width, height) = frame.dimensions();
    let clipped = region.clip_to(width, height)?;

    Some(
        imageops::crop_imm(frame, clipped.x, clipped.y, clipped.width, clipped.height).to_image(),
    )
}
