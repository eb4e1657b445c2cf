pub mod checkin;
pub mod detector;
pub mod emotion;
pub mod face;
pub mod response;
