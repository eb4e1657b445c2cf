pub mod store;

pub use store::{CheckInRecord, CheckInStore};
