pub mod face_mock;

pub use face_mock::*;
