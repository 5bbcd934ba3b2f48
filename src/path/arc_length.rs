use crate::math::{lerp, Point3};

/// Interpolation spans shorter than this return their end sample directly.
pub const DEGENERATE_SPAN_EPSILON: f64 = 0.001;

/// Positions along a path paired with their cumulative arc length.
///
/// `samples` and `cumulative` always have the same length. When non-empty,
/// `cumulative[0] == 0`, the values never decrease, and the last entry is the
/// total path length. Tables are built once and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArcLengthTable {
    samples: Vec<Point3>,
    cumulative: Vec<f64>,
}

impl ArcLengthTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from an ordered point sequence, accumulating the
    /// Euclidean distance between consecutive points.
    #[must_use]
    pub fn from_points(points: &[Point3]) -> Self {
        let mut table = Self {
            samples: Vec::with_capacity(points.len()),
            cumulative: Vec::with_capacity(points.len()),
        };
        for p in points {
            table.push(*p);
        }
        table
    }

    /// Appends a sample, extending the cumulative distance by its separation
    /// from the previous sample.
    pub(crate) fn push(&mut self, point: Point3) {
        let distance = match self.samples.last() {
            Some(prev) => self.total_length() + (point - prev).norm(),
            None => 0.0,
        };
        self.samples.push(point);
        self.cumulative.push(distance);
    }

    /// Returns the sampled positions.
    #[must_use]
    pub fn samples(&self) -> &[Point3] {
        &self.samples
    }

    /// Returns the cumulative distances, parallel to [`Self::samples`].
    #[must_use]
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if the table has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the total path length, or 0 for an empty table.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Returns the cumulative distance at `index`, saturating at the last
    /// sample. An empty table reports 0.
    #[must_use]
    pub fn distance_at_index(&self, index: usize) -> f64 {
        let Some(last) = self.cumulative.len().checked_sub(1) else {
            return 0.0;
        };
        self.cumulative[index.min(last)]
    }

    /// Returns the first index whose cumulative distance is not less than
    /// `distance`, after clamping `distance` to `[0, total_length]`.
    ///
    /// Equal cumulative distances resolve to the lowest index.
    #[must_use]
    pub fn index_at_distance(&self, distance: f64) -> usize {
        let Some(last) = self.cumulative.len().checked_sub(1) else {
            return 0;
        };
        let d = self.clamp_distance(distance);
        self.cumulative.partition_point(|&c| c < d).min(last)
    }

    /// Returns the position at `distance` along the path.
    ///
    /// The distance is clamped to `[0, total_length]`; positions between
    /// samples are interpolated linearly. Returns `None` for an empty table.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn position_at_distance(&self, distance: f64) -> Option<Point3> {
        if self.is_empty() {
            return None;
        }
        let d = self.clamp_distance(distance);
        let idx = self.index_at_distance(d);

        if idx == 0 || self.cumulative[idx] == d {
            return Some(self.samples[idx]);
        }

        let d0 = self.cumulative[idx - 1];
        let d1 = self.cumulative[idx];
        let span = d1 - d0;
        if span < DEGENERATE_SPAN_EPSILON {
            return Some(self.samples[idx]);
        }

        let t = (d - d0) / span;
        Some(lerp(&self.samples[idx - 1], &self.samples[idx], t))
    }

    fn clamp_distance(&self, distance: f64) -> f64 {
        if distance.is_nan() {
            return 0.0;
        }
        distance.clamp(0.0, self.total_length())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn l_shape() -> ArcLengthTable {
        ArcLengthTable::from_points(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(3.0, 4.0, 0.0),
        ])
    }

    #[test]
    fn cumulative_starts_at_zero_and_accumulates() {
        let table = l_shape();
        assert_eq!(table.cumulative(), &[0.0, 3.0, 7.0]);
        assert_relative_eq!(table.total_length(), 7.0);
        assert_eq!(table.sample_count(), 3);
    }

    #[test]
    fn empty_table_queries() {
        let table = ArcLengthTable::new();
        assert!(table.is_empty());
        assert_relative_eq!(table.total_length(), 0.0);
        assert_relative_eq!(table.distance_at_index(5), 0.0);
        assert_eq!(table.index_at_distance(1.0), 0);
        assert!(table.position_at_distance(1.0).is_none());
    }

    #[test]
    fn distance_at_index_saturates() {
        let table = l_shape();
        assert_relative_eq!(table.distance_at_index(0), 0.0);
        assert_relative_eq!(table.distance_at_index(1), 3.0);
        assert_relative_eq!(table.distance_at_index(99), 7.0);
    }

    #[test]
    fn index_at_distance_finds_first_not_less() {
        let table = l_shape();
        assert_eq!(table.index_at_distance(-1.0), 0);
        assert_eq!(table.index_at_distance(0.0), 0);
        assert_eq!(table.index_at_distance(0.5), 1);
        assert_eq!(table.index_at_distance(3.0), 1);
        assert_eq!(table.index_at_distance(3.1), 2);
        assert_eq!(table.index_at_distance(100.0), 2);
    }

    #[test]
    fn index_distance_round_trip() {
        let table = l_shape();
        for i in 0..table.sample_count() {
            assert_eq!(table.index_at_distance(table.distance_at_index(i)), i);
        }
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        let p = Point3::new(1.0, 0.0, 0.0);
        let table = ArcLengthTable::from_points(&[Point3::origin(), p, p, p]);
        assert_eq!(table.index_at_distance(1.0), 1);
    }

    #[test]
    fn position_interpolates_within_span() {
        let p = l_shape().position_at_distance(5.5).unwrap();
        assert_relative_eq!(p, Point3::new(3.0, 2.5, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn position_clamps_out_of_range() {
        let table = l_shape();
        assert_eq!(
            table.position_at_distance(-5.0),
            table.position_at_distance(0.0)
        );
        assert_eq!(table.position_at_distance(0.0).unwrap(), table.samples()[0]);
        assert_eq!(
            table.position_at_distance(table.total_length() + 100.0).unwrap(),
            table.samples()[2]
        );
        assert_eq!(
            table.position_at_distance(table.total_length()).unwrap(),
            table.samples()[2]
        );
    }

    #[test]
    fn degenerate_span_returns_end_sample() {
        let table = ArcLengthTable::from_points(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0005, 0.0, 0.0),
        ]);
        let p = table.position_at_distance(1.0002).unwrap();
        assert_eq!(p, table.samples()[2]);
    }

    #[test]
    fn nan_distance_resolves_to_start() {
        let table = l_shape();
        assert_eq!(table.position_at_distance(f64::NAN).unwrap(), table.samples()[0]);
    }
}
