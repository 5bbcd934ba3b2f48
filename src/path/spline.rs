use crate::error::{check_range, ConfigError};
use crate::geometry::WaypointSet;
use crate::math::Point3;

use super::ArcLengthTable;

/// Parameters controlling spline densification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplineParams {
    /// Number of samples emitted per waypoint-to-waypoint span.
    ///
    /// Higher values trade memory for a smoother path and a more accurate
    /// arc length. Zero is treated as one.
    pub samples_per_segment: u32,
}

impl SplineParams {
    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `samples_per_segment` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "samples_per_segment",
            f64::from(self.samples_per_segment),
            1.0,
            f64::from(u32::MAX),
        )
    }
}

impl Default for SplineParams {
    fn default() -> Self {
        Self {
            samples_per_segment: 10,
        }
    }
}

/// Evaluates the uniform Catmull-Rom cubic through `p1` and `p2` at `t` in `[0, 1]`.
///
/// `p0` and `p3` only shape the tangents at `p1` and `p2`.
#[must_use]
pub fn catmull_rom(p0: &Point3, p1: &Point3, p2: &Point3, p3: &Point3, t: f64) -> Point3 {
    let (a, b, c, d) = (p0.coords, p1.coords, p2.coords, p3.coords);
    let t2 = t * t;
    let t3 = t2 * t;
    let v = (b * 2.0
        + (c - a) * t
        + (a * 2.0 - b * 5.0 + c * 4.0 - d) * t2
        + (-a + b * 3.0 - c * 3.0 + d) * t3)
        * 0.5;
    Point3::from(v)
}

/// Densifies a waypoint set into a smooth Catmull-Rom sample sequence.
pub struct SplinePathBuilder<'a> {
    waypoints: &'a WaypointSet,
    params: SplineParams,
}

impl<'a> SplinePathBuilder<'a> {
    /// Creates a new `SplinePathBuilder`.
    #[must_use]
    pub fn new(waypoints: &'a WaypointSet, params: SplineParams) -> Self {
        Self { waypoints, params }
    }

    /// Builds the arc-length table.
    ///
    /// - Fewer than 2 waypoints produce an empty table.
    /// - 2 or 3 waypoints cannot support a Catmull-Rom span, so the raw
    ///   waypoints become the samples (closing the loop if the set is closed).
    /// - Otherwise each span contributes `samples_per_segment` evaluated
    ///   points after the first waypoint.
    #[must_use]
    pub fn build(&self) -> ArcLengthTable {
        let n = self.waypoints.len();
        if n < 2 {
            tracing::warn!(waypoints = n, "spline path needs at least 2 waypoints");
            return ArcLengthTable::new();
        }

        if n < 4 {
            tracing::debug!(
                waypoints = n,
                "too few waypoints for Catmull-Rom, using raw waypoints"
            );
            return raw_table(self.waypoints);
        }

        let steps = self.params.samples_per_segment.max(1);
        let spans = self.waypoints.segment_count();
        let mut table = ArcLengthTable::new();
        table.push(self.waypoints.points[0]);

        for span in 0..spans {
            let Some([p0, p1, p2, p3]) = self.waypoints.span_controls(span) else {
                continue;
            };
            for j in 1..=steps {
                let t = f64::from(j) / f64::from(steps);
                table.push(catmull_rom(&p0, &p1, &p2, &p3, t));
            }
        }

        tracing::trace!(
            waypoints = n,
            samples = table.sample_count(),
            length = table.total_length(),
            "built spline path"
        );
        table
    }
}

/// Table over the waypoints themselves, closing the loop for closed sets.
fn raw_table(waypoints: &WaypointSet) -> ArcLengthTable {
    let mut table = ArcLengthTable::from_points(&waypoints.points);
    if waypoints.closed {
        if let Some(first) = waypoints.points.first() {
            table.push(*first);
        }
    }
    table
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn zigzag() -> WaypointSet {
        WaypointSet::open(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(4.0, 4.0, 0.0),
            Point3::new(8.0, 4.0, 1.0),
            Point3::new(8.0, 8.0, 2.0),
        ])
    }

    #[test]
    fn catmull_rom_passes_through_span_endpoints() {
        let p0 = Point3::new(-1.0, 2.0, 0.0);
        let p1 = Point3::new(0.0, 0.0, 0.0);
        let p2 = Point3::new(3.0, 1.0, 2.0);
        let p3 = Point3::new(5.0, -1.0, 0.0);
        assert_relative_eq!(catmull_rom(&p0, &p1, &p2, &p3, 0.0), p1, epsilon = 1e-12);
        assert_relative_eq!(catmull_rom(&p0, &p1, &p2, &p3, 1.0), p2, epsilon = 1e-12);
    }

    #[test]
    fn catmull_rom_on_collinear_evenly_spaced_points_is_linear() {
        let pts: Vec<Point3> = (0..4).map(|i| Point3::new(f64::from(i), 0.0, 0.0)).collect();
        let mid = catmull_rom(&pts[0], &pts[1], &pts[2], &pts[3], 0.5);
        assert_relative_eq!(mid, Point3::new(1.5, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn too_few_waypoints_yield_empty_table() {
        let set = WaypointSet::open(vec![Point3::new(1.0, 1.0, 1.0)]);
        let table = SplinePathBuilder::new(&set, SplineParams::default()).build();
        assert!(table.is_empty());
        assert_relative_eq!(table.total_length(), 0.0);
    }

    #[test]
    fn two_waypoints_fall_back_to_raw_samples() {
        let set = WaypointSet::open(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0)]);
        let table = SplinePathBuilder::new(&set, SplineParams::default()).build();
        assert_eq!(table.sample_count(), 2);
        assert_relative_eq!(table.total_length(), 10.0);
    }

    #[test]
    fn three_closed_waypoints_close_the_loop() {
        let set = WaypointSet::closed(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(3.0, 4.0, 0.0),
        ]);
        let table = SplinePathBuilder::new(&set, SplineParams::default()).build();
        assert_eq!(table.sample_count(), 4);
        assert_relative_eq!(table.total_length(), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn open_spline_sample_count_and_endpoints() {
        let set = zigzag();
        let params = SplineParams {
            samples_per_segment: 8,
        };
        let table = SplinePathBuilder::new(&set, params).build();
        assert_eq!(table.sample_count(), 1 + 4 * 8);
        assert_eq!(table.samples()[0], set.points[0]);
        assert_relative_eq!(
            *table.samples().last().unwrap(),
            set.points[4],
            epsilon = 1e-12
        );
        assert!(table.cumulative()[0].abs() < f64::EPSILON);
        assert!(table.cumulative().windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn closed_spline_returns_to_start() {
        let set = WaypointSet::closed(zigzag().points);
        let params = SplineParams {
            samples_per_segment: 6,
        };
        let table = SplinePathBuilder::new(&set, params).build();
        assert_eq!(table.sample_count(), 1 + 5 * 6);
        assert_relative_eq!(
            *table.samples().last().unwrap(),
            set.points[0],
            epsilon = 1e-12
        );
    }

    #[test]
    fn spline_length_at_least_chord_length() {
        let set = zigzag();
        let table = SplinePathBuilder::new(&set, SplineParams::default()).build();
        let chords = ArcLengthTable::from_points(&set.points).total_length();
        assert!(table.total_length() >= chords - 1e-9);
    }

    #[test]
    fn build_is_deterministic() {
        let set = zigzag();
        let builder = SplinePathBuilder::new(&set, SplineParams::default());
        assert_eq!(builder.build(), builder.build());
    }

    #[test]
    fn zero_samples_per_segment_is_treated_as_one() {
        let set = zigzag();
        let params = SplineParams {
            samples_per_segment: 0,
        };
        assert!(params.validate().is_err());
        let table = SplinePathBuilder::new(&set, params).build();
        assert_eq!(table.sample_count(), set.len());
    }
}
