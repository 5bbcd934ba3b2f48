pub mod error;
pub mod follow;
pub mod geometry;
pub mod locate;
pub mod math;
pub mod path;
pub mod steering;

pub use error::{Result, WaypathError};
