use thiserror::Error;

/// Top-level error type for the waypath crate.
///
/// Path construction and queries never fail: degenerate input is handled by
/// fallback or clamping. Errors are reserved for rejected configuration and
/// for lookups into the follower arena.
#[derive(Debug, Error)]
pub enum WaypathError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors related to parameter validation.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("parameter {0} is not finite")]
    NotFinite(&'static str),
}

/// Errors related to the follower arena.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),
}

/// Convenience type alias for results using [`WaypathError`].
pub type Result<T> = std::result::Result<T, WaypathError>;

/// Checks that `value` is finite and lies in `[min, max]`.
pub(crate) fn check_range(
    parameter: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> std::result::Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite(parameter));
    }
    if value < min || value > max {
        return Err(ConfigError::ParameterOutOfRange {
            parameter,
            value,
            min,
            max,
        });
    }
    Ok(())
}
