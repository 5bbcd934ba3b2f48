use crate::geometry::{PathSegment, WaypointSet};
use crate::locate::{nearest_by, LocatorCache, LocatorParams};
use crate::math::Point3;

use super::ArcLengthTable;

/// A polyline path: one [`PathSegment`] per waypoint span, with an
/// arc-length table at segment granularity.
///
/// The table's samples are the segment endpoints, so entry `k + 1` is the
/// distance to the end of segment `k`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentPath {
    segments: Vec<PathSegment>,
    table: ArcLengthTable,
}

impl SegmentPath {
    /// Returns the segments in path order.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the segment-granularity arc-length table.
    #[must_use]
    pub fn table(&self) -> &ArcLengthTable {
        &self.table
    }

    /// Returns the distance from the path start to the start of segment `k`.
    #[must_use]
    pub fn distance_to_segment_start(&self, k: usize) -> f64 {
        self.table.distance_at_index(k)
    }

    /// Returns the distance from the path start to the end of segment `k`.
    #[must_use]
    pub fn distance_to_segment_end(&self, k: usize) -> f64 {
        self.table.distance_at_index(k.saturating_add(1))
    }

    /// Projects `point` onto the nearest segment and returns the resulting
    /// distance along the path.
    ///
    /// Segments within `params.window_radius` of the cached segment are tried
    /// first; if none lies within `params.threshold`, every segment is
    /// checked. `cache` is updated to the chosen segment. Returns `None` for a
    /// path without segments.
    pub fn project_point_onto_path(
        &self,
        point: &Point3,
        cache: &mut LocatorCache,
        params: &LocatorParams,
    ) -> Option<f64> {
        let (k, _) = nearest_by(self.segments.len(), cache, params, |i| {
            self.segments[i].project(point).distance
        })?;
        let along = self.segments[k].project(point).along;
        Some(self.distance_to_segment_start(k) + along)
    }
}

/// Splits a waypoint set into straight segments.
pub struct SegmentPathBuilder<'a> {
    waypoints: &'a WaypointSet,
}

impl<'a> SegmentPathBuilder<'a> {
    /// Creates a new `SegmentPathBuilder`.
    #[must_use]
    pub fn new(waypoints: &'a WaypointSet) -> Self {
        Self { waypoints }
    }

    /// Builds the segment path. Fewer than 2 waypoints produce an empty path.
    #[must_use]
    pub fn build(&self) -> SegmentPath {
        let n = self.waypoints.len();
        if n < 2 {
            tracing::warn!(waypoints = n, "segment path needs at least 2 waypoints");
            return SegmentPath::default();
        }

        let pts = &self.waypoints.points;
        let seg_count = self.waypoints.segment_count();
        let mut segments = Vec::with_capacity(seg_count);
        let mut table = ArcLengthTable::new();
        table.push(pts[0]);

        for i in 0..seg_count {
            let segment = PathSegment::new(pts[i], pts[(i + 1) % n]);
            table.push(*segment.end());
            segments.push(segment);
        }

        tracing::trace!(
            segments = segments.len(),
            length = table.total_length(),
            "built segment path"
        );
        SegmentPath { segments, table }
    }
}
