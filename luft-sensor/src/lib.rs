pub mod client;
pub mod error;
pub mod merge;
pub mod reading;
pub mod record;
pub mod timestamp;

pub use error::{Result, SensorError};
