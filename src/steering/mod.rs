use crate::error::{check_range, ConfigError};
use crate::math::{Point3, Vector3, TOLERANCE};

/// Distance below which an agent counts as having reached its target.
pub const ARRIVAL_RADIUS: f64 = 0.1;

/// Limits applied by [`seek`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringParams {
    /// Magnitude of the desired velocity.
    pub max_speed: f64,
    /// Upper bound on the magnitude of the steering force.
    pub max_acceleration: f64,
    /// Targets closer than this produce no steering.
    pub arrival_radius: f64,
}

impl SteeringParams {
    /// Creates parameters with the default arrival radius.
    #[must_use]
    pub fn new(max_speed: f64, max_acceleration: f64) -> Self {
        Self {
            max_speed,
            max_acceleration,
            arrival_radius: ARRIVAL_RADIUS,
        }
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if any limit is negative or not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("max_speed", self.max_speed, 0.0, f64::MAX)?;
        check_range("max_acceleration", self.max_acceleration, 0.0, f64::MAX)?;
        check_range("arrival_radius", self.arrival_radius, 0.0, f64::MAX)
    }
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self::new(5.0, 10.0)
    }
}

/// Computes the "seek" steering force toward `target`.
///
/// The desired velocity points at the target with magnitude `max_speed`;
/// the returned force is the difference from the current velocity, capped
/// at `max_acceleration`. Inside the arrival radius the force is zero.
#[must_use]
pub fn seek(
    position: &Point3,
    velocity: &Vector3,
    target: &Point3,
    params: &SteeringParams,
) -> Vector3 {
    let to_target = target - position;
    let dist = to_target.norm();
    if dist < params.arrival_radius || dist < TOLERANCE {
        return Vector3::zeros();
    }
    let desired = to_target / dist * params.max_speed;
    (desired - velocity).cap_magnitude(params.max_acceleration)
}
