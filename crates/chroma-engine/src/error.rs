//! Error types for the conversion engine.
//!
//! Every failure carries enough context (offending field, supplied value,
//! valid range) to build an actionable message. [`EngineError::kind`] maps
//! each variant onto one of the engine's error kinds so callers can branch
//! without matching nested errors.
//!
//! # Categories
//!
//! | Kind | Variants |
//! |------|----------|
//! | `RangeError` | [`EngineError::Range`] |
//! | `AmbiguousInputError` | [`EngineError::AmbiguousInput`] |
//! | `IncompleteInputError` | [`EngineError::IncompleteInput`], [`EngineError::MissingInput`], [`EngineError::NoSpectrum`] |
//! | `UnknownReferenceError` | [`EngineError::UnknownReference`], unknown CAT, missing SPD |
//! | `DomainError` | conversion domain errors |
//! | `SpectralRangeError` | spectral parameter or sample out of range |
//! | `InterpolationRangeError` | interpolation interval outside 1..5 nm |
//! | `InsufficientResolutionError` | TM-30 on data coarser than 5 nm |
//! | `Cancelled` | [`EngineError::Cancelled`] |
//!
//! # Usage
//!
//! ```rust
//! use chroma_engine::{EngineError, ErrorKind};
//!
//! let err = EngineError::unknown("observer", "CIE 2006");
//! assert_eq!(err.kind(), ErrorKind::UnknownReference);
//! assert!(err.to_string().contains("CIE 2006"));
//! ```

use std::fmt;

use chroma_color::ColorError;
use chroma_spectral::SpectralError;
use serde::Serialize;
use thiserror::Error;

use crate::input::ColorModel;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Coarse classification of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Value outside the domain implied by its bit depth.
    Range,
    /// More than one input model populated.
    AmbiguousInput,
    /// An input model partially populated, or none at all.
    IncompleteInput,
    /// Unrecognized observer, illuminant, CAT or working space.
    UnknownReference,
    /// Conversion input outside the mathematical domain.
    Domain,
    /// Spectral parameter or sample out of range.
    SpectralRange,
    /// Interpolation interval outside 1..5 nm.
    InterpolationRange,
    /// Spectral data too coarse for TM-30.
    InsufficientResolution,
    /// Run cancelled before completion.
    Cancelled,
}

impl ErrorKind {
    /// Stable name, e.g. `RangeError`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Range => "RangeError",
            Self::AmbiguousInput => "AmbiguousInputError",
            Self::IncompleteInput => "IncompleteInputError",
            Self::UnknownReference => "UnknownReferenceError",
            Self::Domain => "DomainError",
            Self::SpectralRange => "SpectralRangeError",
            Self::InterpolationRange => "InterpolationRangeError",
            Self::InsufficientResolution => "InsufficientResolutionError",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Conversion engine error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Component outside the domain of its bit depth.
    #[error("{field} = {value} is out of range for bit depth {depth} (expected {min}..={max})")]
    Range {
        /// Offending component, e.g. `CIELAB L*`.
        field: String,
        /// Supplied value.
        value: f64,
        /// Declared bit depth.
        depth: String,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Several input models are fully populated.
    #[error("ambiguous input: values given for {}", join(.models))]
    AmbiguousInput {
        /// Every populated model.
        models: Vec<ColorModel>,
    },

    /// A model is only partially populated.
    #[error("incomplete {model} input: missing {}", .missing.join(", "))]
    IncompleteInput {
        /// Partially populated model.
        model: ColorModel,
        /// Missing components.
        missing: Vec<&'static str>,
    },

    /// No input model populated.
    #[error("no color input given")]
    MissingInput,

    /// Unrecognized reference name.
    #[error("unknown {kind}: '{name}'")]
    UnknownReference {
        /// What was looked up (`observer`, `illuminant`, ...).
        kind: &'static str,
        /// Supplied name.
        name: String,
    },

    /// Colorimetric conversion failed.
    #[error(transparent)]
    Color(#[from] ColorError),

    /// Spectral operation failed.
    #[error(transparent)]
    Spectral(#[from] SpectralError),

    /// An operation needs spectral data and none was given or recovered.
    #[error("{operation} needs spectral input or reflectance recovery")]
    NoSpectrum {
        /// Operation that needed the data.
        operation: &'static str,
    },

    /// Run cancelled through its token.
    #[error("conversion cancelled")]
    Cancelled,
}

fn join(models: &[ColorModel]) -> String {
    models.iter().map(|m| m.name()).collect::<Vec<_>>().join(", ")
}

impl EngineError {
    /// Shorthand for [`EngineError::UnknownReference`].
    pub fn unknown(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownReference {
            kind,
            name: name.into(),
        }
    }

    /// Error kind of this error, looking through nested errors.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Range { .. } => ErrorKind::Range,
            Self::AmbiguousInput { .. } => ErrorKind::AmbiguousInput,
            Self::IncompleteInput { .. } | Self::MissingInput | Self::NoSpectrum { .. } => {
                ErrorKind::IncompleteInput
            }
            Self::UnknownReference { .. } => ErrorKind::UnknownReference,
            Self::Color(e) => color_kind(e),
            Self::Spectral(e) => match e {
                SpectralError::SpectralRange { .. } => ErrorKind::SpectralRange,
                SpectralError::InterpolationRange { .. } => ErrorKind::InterpolationRange,
                SpectralError::InsufficientResolution { .. } => ErrorKind::InsufficientResolution,
                SpectralError::MissingSpd(_) => ErrorKind::UnknownReference,
                SpectralError::Color(c) => color_kind(c),
            },
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }
}

fn color_kind(e: &ColorError) -> ErrorKind {
    match e {
        ColorError::Domain { .. } => ErrorKind::Domain,
        ColorError::UnknownCat(_) => ErrorKind::UnknownReference,
    }
}
