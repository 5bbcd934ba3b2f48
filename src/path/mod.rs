mod arc_length;
mod polyline;
mod spline;

pub use arc_length::{ArcLengthTable, DEGENERATE_SPAN_EPSILON};
pub use polyline::{SegmentPath, SegmentPathBuilder};
pub use spline::{catmull_rom, SplineParams, SplinePathBuilder};

use std::sync::{Arc, PoisonError, RwLock};

use crate::geometry::WaypointSet;
use crate::locate::{nearest_sample, LocatorCache, LocatorParams};
use crate::math::Point3;

/// Distance/position queries shared by every path strategy.
pub trait PathQuery {
    /// Returns the arc-length table backing this path.
    fn table(&self) -> &ArcLengthTable;

    /// Returns the distance along the path closest to `point`.
    ///
    /// `cache` is the caller's locality hint and is updated in place.
    /// Returns `None` for an empty path.
    fn distance_near(
        &self,
        point: &Point3,
        cache: &mut LocatorCache,
        params: &LocatorParams,
    ) -> Option<f64>;

    /// Returns the total path length.
    fn total_length(&self) -> f64 {
        self.table().total_length()
    }

    /// Returns the number of table samples.
    fn sample_count(&self) -> usize {
        self.table().sample_count()
    }

    /// Returns `true` if the path has nothing to follow.
    fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    /// Returns the position at `distance`, clamped to the path.
    fn position_at_distance(&self, distance: f64) -> Option<Point3> {
        self.table().position_at_distance(distance)
    }

    /// Returns a locality cache pointing at `distance` along this path.
    fn cache_at_distance(&self, distance: f64) -> LocatorCache {
        LocatorCache::new(self.table().index_at_distance(distance))
    }
}

impl PathQuery for ArcLengthTable {
    fn table(&self) -> &ArcLengthTable {
        self
    }

    fn distance_near(
        &self,
        point: &Point3,
        cache: &mut LocatorCache,
        params: &LocatorParams,
    ) -> Option<f64> {
        let index = nearest_sample(self.samples(), cache, point, params)?;
        Some(self.distance_at_index(index))
    }
}

impl PathQuery for SegmentPath {
    fn table(&self) -> &ArcLengthTable {
        SegmentPath::table(self)
    }

    fn distance_near(
        &self,
        point: &Point3,
        cache: &mut LocatorCache,
        params: &LocatorParams,
    ) -> Option<f64> {
        self.project_point_onto_path(point, cache, params)
    }

    // Table entry `k + 1` ends segment `k`.
    fn cache_at_distance(&self, distance: f64) -> LocatorCache {
        LocatorCache::new(self.table().index_at_distance(distance).saturating_sub(1))
    }
}

/// A built path, selecting one of the two construction strategies.
#[derive(Debug, Clone, PartialEq)]
pub enum Path {
    /// Densified Catmull-Rom samples; nearest queries snap to samples.
    Dense(ArcLengthTable),
    /// Straight segments; nearest queries project onto segments.
    Segments(SegmentPath),
}

impl Path {
    /// Builds a smooth path through `waypoints`.
    #[must_use]
    pub fn spline(waypoints: &WaypointSet, params: SplineParams) -> Self {
        Self::Dense(SplinePathBuilder::new(waypoints, params).build())
    }

    /// Builds a polyline path through `waypoints`.
    #[must_use]
    pub fn polyline(waypoints: &WaypointSet) -> Self {
        Self::Segments(SegmentPathBuilder::new(waypoints).build())
    }

    /// Returns locator defaults suited to this strategy.
    #[must_use]
    pub fn default_locator(&self) -> LocatorParams {
        match self {
            Self::Dense(_) => LocatorParams::dense(),
            Self::Segments(_) => LocatorParams::segments(),
        }
    }
}

impl PathQuery for Path {
    fn table(&self) -> &ArcLengthTable {
        match self {
            Self::Dense(table) => table,
            Self::Segments(path) => path.table(),
        }
    }

    fn distance_near(
        &self,
        point: &Point3,
        cache: &mut LocatorCache,
        params: &LocatorParams,
    ) -> Option<f64> {
        match self {
            Self::Dense(table) => table.distance_near(point, cache, params),
            Self::Segments(path) => path.distance_near(point, cache, params),
        }
    }

    fn cache_at_distance(&self, distance: f64) -> LocatorCache {
        match self {
            Self::Dense(table) => table.cache_at_distance(distance),
            Self::Segments(path) => path.cache_at_distance(distance),
        }
    }
}

/// Shared, swappable reference to the current path.
///
/// Readers take an [`Arc`] snapshot and query it without holding the lock,
/// so a rebuild never exposes a partially updated path: in-flight queries
/// finish against the snapshot they started with.
#[derive(Debug)]
pub struct PathHandle {
    current: RwLock<Arc<Path>>,
}

impl PathHandle {
    /// Creates a handle owning `path`.
    #[must_use]
    pub fn new(path: Path) -> Self {
        Self {
            current: RwLock::new(Arc::new(path)),
        }
    }

    /// Returns the current path snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Path> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replaces the current path, returning the previous one.
    pub fn replace(&self, path: Path) -> Arc<Path> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(path))
    }
}
