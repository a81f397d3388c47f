//! Error types for spectral operations.

use chroma_color::ColorError;
use thiserror::Error;

/// Spectral operation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpectralError {
    /// Distribution parameter or sample outside its valid range.
    #[error("spectral {field} = {value} is out of range (expected {expected})")]
    SpectralRange {
        /// Offending field (`start`, `stop`, `interval`, `values[i]`, ...).
        field: String,
        /// Supplied value.
        value: f64,
        /// Valid range, human readable.
        expected: String,
    },

    /// Requested interpolation interval outside [1, 5] nm.
    #[error("interpolation interval {interval} nm is outside [1, 5] nm")]
    InterpolationRange {
        /// Requested interval.
        interval: f64,
    },

    /// Distribution too coarse for the requested computation.
    #[error("interval {interval} nm is too coarse, at most {required} nm is required")]
    InsufficientResolution {
        /// Actual interval.
        interval: f64,
        /// Coarsest accepted interval.
        required: f64,
    },

    /// Illuminant is defined by chromaticity only.
    #[error("illuminant '{0}' has no spectral power distribution")]
    MissingSpd(String),

    /// Colorimetric conversion failed.
    #[error(transparent)]
    Color(#[from] ColorError),
}

impl SpectralError {
    pub(crate) fn range(field: impl Into<String>, value: f64, expected: impl Into<String>) -> Self {
        Self::SpectralRange {
            field: field.into(),
            value,
            expected: expected.into(),
        }
    }
}

/// Result type for spectral operations.
pub type SpectralResult<T> = Result<T, SpectralError>;
