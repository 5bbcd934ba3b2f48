pub mod segment;
pub mod waypoints;

pub use segment::{PathSegment, SegmentProjection};
pub use waypoints::WaypointSet;
