use crate::math::Point3;

/// An ordered set of designer-placed control points.
///
/// For closed sets, the last waypoint connects back to the first and control
/// point indices wrap around. For open sets, indices outside `[0, n)` clamp to
/// the first or last waypoint, which flattens curvature at the two ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaypointSet {
    pub points: Vec<Point3>,
    pub closed: bool,
}

impl WaypointSet {
    /// Creates a waypoint set from an ordered list of points.
    #[must_use]
    pub fn new(points: Vec<Point3>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Creates an open waypoint set.
    #[must_use]
    pub fn open(points: Vec<Point3>) -> Self {
        Self::new(points, false)
    }

    /// Creates a closed waypoint set.
    #[must_use]
    pub fn closed(points: Vec<Point3>) -> Self {
        Self::new(points, true)
    }

    /// Returns the number of waypoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the set has no waypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the number of spans between consecutive waypoints.
    ///
    /// A closed set of `n` points has `n` spans (including the wrap-around),
    /// an open one `n - 1`. Fewer than two points yield no spans at all.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        let n = self.points.len();
        if n < 2 {
            return 0;
        }
        if self.closed {
            n
        } else {
            n - 1
        }
    }

    /// Resolves a possibly out-of-range control point index.
    ///
    /// Returns `None` only when the set is empty.
    #[must_use]
    pub fn control_point(&self, index: isize) -> Option<&Point3> {
        let n = self.points.len();
        if n == 0 {
            return None;
        }
        #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
        let resolved = if self.closed {
            index.rem_euclid(n as isize) as usize
        } else {
            index.clamp(0, n as isize - 1) as usize
        };
        self.points.get(resolved)
    }

    /// Returns the four Catmull-Rom control points for the span starting at
    /// waypoint `span`: its predecessor, the span endpoints, and the successor.
    #[must_use]
    pub fn span_controls(&self, span: usize) -> Option<[Point3; 4]> {
        let i = isize::try_from(span).ok()?;
        Some([
            *self.control_point(i - 1)?,
            *self.control_point(i)?,
            *self.control_point(i + 1)?,
            *self.control_point(i + 2)?,
        ])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn segment_count_open_and_closed() {
        assert_eq!(WaypointSet::open(square()).segment_count(), 3);
        assert_eq!(WaypointSet::closed(square()).segment_count(), 4);
    }

    #[test]
    fn segment_count_degenerate() {
        assert_eq!(WaypointSet::open(vec![]).segment_count(), 0);
        assert_eq!(
            WaypointSet::closed(vec![Point3::new(1.0, 2.0, 3.0)]).segment_count(),
            0
        );
    }

    #[test]
    fn closed_control_point_wraps() {
        let set = WaypointSet::closed(square());
        let n = isize::try_from(set.len()).unwrap();
        assert_eq!(set.control_point(n), set.control_point(0));
        assert_eq!(set.control_point(-1), set.control_point(n - 1));
        assert_eq!(set.control_point(n + 2), set.control_point(2));
    }

    #[test]
    fn open_control_point_clamps() {
        let set = WaypointSet::open(square());
        assert_eq!(set.control_point(-1).unwrap(), &set.points[0]);
        assert_eq!(set.control_point(4).unwrap(), &set.points[3]);
        assert_eq!(set.control_point(100).unwrap(), &set.points[3]);
    }

    #[test]
    fn empty_set_has_no_control_points() {
        assert!(WaypointSet::default().control_point(0).is_none());
        assert!(WaypointSet::default().span_controls(0).is_none());
    }

    #[test]
    fn span_controls_open_start_duplicates_first_point() {
        let set = WaypointSet::open(square());
        let [p0, p1, p2, p3] = set.span_controls(0).unwrap();
        assert_eq!(p0, set.points[0]);
        assert_eq!(p1, set.points[0]);
        assert_eq!(p2, set.points[1]);
        assert_eq!(p3, set.points[2]);
    }
}
