pub mod locator;

pub use locator::{crop_face, FaceLocator, FaceRegion, FixedRegionLocator, FullFrameLocator};
