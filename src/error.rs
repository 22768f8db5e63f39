//! Error types for wobblaz_motion.
//!
//! Gesture recognition and frame recording never fail: they run on hot input
//! paths and normalise degenerate input instead. [`MotionError`] covers the
//! cold paths only (configuration validation, registry lookups, budget
//! assertions and config loading), and [`Result<T>`] is a type alias for
//! convenience.
//!
//! # Examples
//!
//! ```rust
//! use wobblaz_motion::{BudgetRegistry, MotionError, Result};
//!
//! fn lookup(registry: &BudgetRegistry, name: &str) -> Result<f64> {
//!     registry
//!         .get(name)
//!         .map(|budget| budget.max_frame_time)
//!         .ok_or_else(|| MotionError::UnknownBudget(name.to_string()))
//! }
//!
//! let registry = BudgetRegistry::default();
//! match lookup(&registry, "wobble") {
//!     Ok(_) => println!("found"),
//!     Err(MotionError::UnknownBudget(name)) => eprintln!("no budget named {}", name),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use thiserror::Error;

/// Result type alias for wobblaz_motion operations.
///
/// This is a convenience alias for `std::result::Result<T, MotionError>`.
pub type Result<T> = std::result::Result<T, MotionError>;

/// Errors that can occur on the cold paths of the motion toolkit.
///
/// # Variants
///
/// - [`MotionError::InvalidConfig`]: A configuration value is non-positive or non-finite
/// - [`MotionError::UnknownBudget`]: No performance budget is registered under a name
/// - [`MotionError::UnknownPattern`]: No haptic pattern is registered under a name
/// - [`MotionError::InvalidPattern`]: A haptic pattern cannot be registered
/// - [`MotionError::BudgetExceeded`]: A performance report failed its budget
/// - [`MotionError::Io`]: Reading a configuration file failed
/// - `Config`: A JSON configuration could not be parsed (requires `serde` feature)
#[derive(Debug, Error)]
pub enum MotionError {
    /// A configuration value is out of range.
    ///
    /// Returned by the `validate` methods on configuration structs. The
    /// recognizer and profiler themselves never validate; they clamp.
    #[error("Invalid configuration: {field} must be positive and finite, got {value}")]
    InvalidConfig {
        /// Name of the offending field.
        field: String,
        /// The rejected value.
        value: f64,
    },

    /// No performance budget is registered under the requested name.
    #[error("Unknown performance budget: {0}")]
    UnknownBudget(String),

    /// No haptic pattern is registered under the requested name.
    #[error("Unknown haptic pattern: {0}")]
    UnknownPattern(String),

    /// A haptic pattern was rejected at registration.
    #[error("Invalid haptic pattern: {0}")]
    InvalidPattern(String),

    /// A performance report did not meet its budget.
    ///
    /// The error carries the animation type and the joined recommendations
    /// so test failures explain themselves.
    #[error("Performance budget exceeded for '{animation_type}': {details}")]
    BudgetExceeded {
        /// Budget profile the report was graded against.
        animation_type: String,
        /// Human-readable description of the failed thresholds.
        details: String,
    },

    /// Standard I/O error.
    ///
    /// Occurs when reading a configuration file. Automatically converted via `From`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration JSON could not be parsed.
    ///
    /// Requires the `serde` feature flag.
    #[cfg(feature = "serde")]
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing config");
        let err: MotionError = io_err.into();

        assert!(matches!(err, MotionError::Io(_)));
        assert!(err.to_string().contains("missing config"));
    }

    #[test]
    fn test_invalid_config_message() {
        let err = MotionError::InvalidConfig {
            field: "min_distance".to_string(),
            value: -1.0,
        };
        let msg = err.to_string();

        assert!(msg.contains("min_distance"));
        assert!(msg.contains("-1"));
    }

    #[test]
    fn test_unknown_budget_message() {
        let err = MotionError::UnknownBudget("wobble".to_string());
        assert!(err.to_string().contains("wobble"));
    }

    #[test]
    fn test_budget_exceeded_message() {
        let err = MotionError::BudgetExceeded {
            animation_type: "micro".to_string(),
            details: "FPS too low".to_string(),
        };
        let msg = err.to_string();

        assert!(msg.contains("micro"));
        assert!(msg.contains("FPS too low"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: MotionError = json_err.into();

        assert!(matches!(err, MotionError::Config(_)));
    }
}
