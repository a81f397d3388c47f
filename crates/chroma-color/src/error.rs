//! Error types for color conversions.
//!
//! Conversions are total over their documented input ranges. Anything else
//! (non-finite components, a degenerate white point, a chromaticity with no
//! luminance axis) is reported as a [`ColorError::Domain`] carrying the
//! operation, the offending value and the reason.

use thiserror::Error;

/// Color conversion error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    /// Conversion input lies outside the mathematical domain of the operation.
    #[error("{operation}: {value} is outside the valid domain ({reason})")]
    Domain {
        /// Conversion that rejected the input.
        operation: &'static str,
        /// Offending value, formatted.
        value: String,
        /// Why the value is invalid.
        reason: &'static str,
    },

    /// Unknown chromatic adaptation transform name.
    #[error("unknown chromatic adaptation transform: {0}")]
    UnknownCat(String),
}

impl ColorError {
    /// Shorthand for a [`ColorError::Domain`] error.
    pub fn domain(operation: &'static str, value: impl std::fmt::Debug, reason: &'static str) -> Self {
        Self::Domain {
            operation,
            value: format!("{value:?}"),
            reason,
        }
    }
}

/// Result type for color conversions.
pub type ColorResult<T> = Result<T, ColorError>;
