/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Linearly interpolates between `a` and `b`; `t = 0` yields `a`, `t = 1` yields `b`.
#[must_use]
pub fn lerp(a: &Point3, b: &Point3, t: f64) -> Point3 {
    a + (b - a) * t
}

/// Moves `current` toward `target` by at most `max_step`, never overshooting.
#[must_use]
pub fn move_towards(current: &Point3, target: &Point3, max_step: f64) -> Point3 {
    let delta = target - current;
    let dist = delta.norm();
    if dist <= max_step || dist < TOLERANCE {
        return *target;
    }
    current + delta * (max_step / dist)
}
