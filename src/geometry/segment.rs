use crate::math::{Point3, Vector3, TOLERANCE};

/// Result of projecting a point onto a [`PathSegment`].
#[derive(Debug, Clone, Copy)]
pub struct SegmentProjection {
    /// Distance from the segment start to the projected point, in `[0, length]`.
    pub along: f64,
    /// The projected point on the segment.
    pub point: Point3,
    /// The distance from the query point to the projected point.
    pub distance: f64,
}

/// A straight, bounded piece of a polyline path.
///
/// The parametric form is `P(s) = start + s * direction` for `s` in
/// `[0, length]`, so the parameter is arc length.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    start: Point3,
    end: Point3,
    direction: Vector3,
    length: f64,
}

impl PathSegment {
    /// Creates a segment between two points.
    ///
    /// Coincident endpoints produce a zero-length segment with a zero
    /// direction; projecting onto it always yields the start point.
    #[must_use]
    pub fn new(start: Point3, end: Point3) -> Self {
        let delta = end - start;
        let length = delta.norm();
        let direction = if length < TOLERANCE {
            Vector3::zeros()
        } else {
            delta / length
        };
        Self {
            start,
            end,
            direction,
            length,
        }
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Returns the unit direction vector (zero for degenerate segments).
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }

    /// Returns the segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Evaluates the point at distance `s` from the start, clamped to the segment.
    #[must_use]
    pub fn point_at(&self, s: f64) -> Point3 {
        self.start + self.direction * s.clamp(0.0, self.length)
    }

    /// Projects `point` onto the segment, clamping to its endpoints.
    #[must_use]
    pub fn project(&self, point: &Point3) -> SegmentProjection {
        let along = (point - self.start)
            .dot(&self.direction)
            .clamp(0.0, self.length);
        let closest = self.start + self.direction * along;
        SegmentProjection {
            along,
            point: closest,
            distance: (point - closest).norm(),
        }
    }
}
