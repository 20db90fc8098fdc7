//! Error Types
//!
//! Per-call failures of the aim core and configuration loading.
//! Nothing in this crate raises a process-level error; every failure is
//! returned to the caller, which decides whether to drop the action.

use thiserror::Error;

/// Errors returned by target resolution, deprojection and collision queries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AimError {
    /// Degenerate or non-finite input (zero-length direction, non-positive range, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The collision world could not answer the query (e.g. not loaded yet).
    #[error("trace unavailable: {0}")]
    Unavailable(String),
}

impl AimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        AimError::InvalidArgument(msg.into())
    }
}

/// Errors that can occur while loading or validating a [`crate::config::ShooterConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A value is outside its allowed range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Fail with [`AimError::InvalidArgument`] unless every component is finite.
pub(crate) fn ensure_finite(name: &str, v: glam::Vec3) -> Result<(), AimError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(AimError::invalid(format!("{name} is not finite: {v}")))
    }
}
