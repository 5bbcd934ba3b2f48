use crate::error::{check_range, ConfigError};
use crate::math::Point3;

/// Last index found by a locator. Owned by one agent, never by a shared path.
///
/// The cache only affects how much work a query does, never whether its
/// answer is acceptable: a stale value triggers the exhaustive fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocatorCache {
    index: usize,
}

impl LocatorCache {
    /// Creates a cache seeded with `index`.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Returns the cached index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Resets the cache to the start of the path.
    pub fn reset(&mut self) {
        self.index = 0;
    }
}

/// Parameters for the windowed nearest search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocatorParams {
    /// Number of indices searched on each side of the cached index.
    pub window_radius: usize,
    /// Best local distance above which the whole path is scanned.
    pub threshold: f64,
}

impl LocatorParams {
    /// Defaults for dense spline samples: ±10 samples, 2.0 units.
    #[must_use]
    pub fn dense() -> Self {
        Self {
            window_radius: 10,
            threshold: 2.0,
        }
    }

    /// Defaults for polyline segments: ±1 segment, 1.0 unit.
    #[must_use]
    pub fn segments() -> Self {
        Self {
            window_radius: 1,
            threshold: 1.0,
        }
    }

    /// Raises the threshold to at least `max_step`, the largest displacement
    /// an agent is expected to make between two queries (for example
    /// `max_speed * dt`).
    #[must_use]
    pub fn with_max_step(mut self, max_step: f64) -> Self {
        if max_step.is_finite() {
            self.threshold = self.threshold.max(max_step);
        }
        self
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the threshold is negative or not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("threshold", self.threshold, 0.0, f64::MAX)
    }
}

impl Default for LocatorParams {
    fn default() -> Self {
        Self::dense()
    }
}

/// Finds the sample nearest to `position`, updating `cache` to the result.
///
/// Samples within `params.window_radius` of the cached index are searched
/// first. If the best of them is farther than `params.threshold`, every
/// sample is checked instead. The windowed answer is only locally nearest,
/// so it matches the global nearest as long as the agent moves less than the
/// threshold between queries.
///
/// Returns `None` when `samples` is empty.
pub fn nearest_sample(
    samples: &[Point3],
    cache: &mut LocatorCache,
    position: &Point3,
    params: &LocatorParams,
) -> Option<usize> {
    let (index, _) = nearest_by(samples.len(), cache, params, |i| {
        (position - samples[i]).norm()
    })?;
    Some(index)
}

/// Windowed-then-exhaustive minimum search over `0..len`.
///
/// `distance(i)` is evaluated for candidate indices only. The first minimum
/// wins ties. Returns the chosen index and its distance.
pub(crate) fn nearest_by<F>(
    len: usize,
    cache: &mut LocatorCache,
    params: &LocatorParams,
    mut distance: F,
) -> Option<(usize, f64)>
where
    F: FnMut(usize) -> f64,
{
    if len == 0 {
        return None;
    }

    let center = cache.index.min(len - 1);
    let lo = center.saturating_sub(params.window_radius);
    let hi = center.saturating_add(params.window_radius).min(len - 1);

    let mut best = scan(lo, hi, &mut distance);

    if best.1 > params.threshold {
        tracing::debug!(
            cached = cache.index,
            local_distance = best.1,
            threshold = params.threshold,
            "locality cache stale, scanning full path"
        );
        best = scan(0, len - 1, &mut distance);
    }

    cache.index = best.0;
    Some(best)
}

fn scan<F>(lo: usize, hi: usize, distance: &mut F) -> (usize, f64)
where
    F: FnMut(usize) -> f64,
{
    let mut best_index = lo;
    let mut best_dist = f64::INFINITY;
    for i in lo..=hi {
        let d = distance(i);
        if d < best_dist {
            best_dist = d;
            best_index = i;
        }
    }
    (best_index, best_dist)
}
