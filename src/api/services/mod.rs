pub mod checkin_service;
pub mod detection_service;
pub mod validation_service;

pub use checkin_service::*;
pub use detection_service::*;
pub use validation_service::*;
