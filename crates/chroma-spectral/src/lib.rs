//! # chroma-spectral
//!
//! Spectral colorimetry.
//!
//! - [`SpectralDistribution`] - validated, immutable sampled spectra with
//!   Sprague interpolation to 1..5 nm
//! - [`Observer`] - CIE 1931 2° and CIE 1964 10° color matching functions
//! - [`illuminant`] - the standard illuminant catalog, D-series and
//!   Planckian SPD synthesis
//! - [`colorimetry`] - spectrum to XYZ, CCT/Duv, luminous efficacy,
//!   efficiency and flux
//! - [`purity`] - dominant and complementary wavelength, excitation and
//!   colorimetric purity
//! - [`ssi`] - AMPAS Spectral Similarity Index
//! - [`recovery`] - reflectance recovery from tristimulus values
//! - [`tm30`] - IES TM-30 fidelity and gamut indices
//!
//! # Quick Start
//!
//! ```rust
//! use chroma_spectral::{colorimetry, illuminant, Observer, SpectralDistribution, SpectrumType};
//!
//! let sd = SpectralDistribution::build(vec![0.5; 48], 360.0, 830.0, 10.0, SpectrumType::Reflective).unwrap();
//! let d65 = illuminant::find("D65").unwrap();
//! let xyz = colorimetry::spectral_to_xyz(&sd, Observer::Cie1931, d65).unwrap();
//! assert!((xyz.y - 0.5).abs() < 1e-9);
//! ```
//!
//! # Grids
//!
//! | Data | Range | Step |
//! |------|-------|------|
//! | Color matching functions | 360..=830 nm | 1 nm |
//! | Synthesized illuminant SPDs | 360..=830 nm | 5 nm |
//! | Recovered reflectances | 360..=830 nm | 5 nm |
//! | TM-30 evaluation | 380..=780 nm | 5 nm |
//!
//! # Dependencies
//!
//! - [`chroma-math`] - Vec3, Mat3, Sprague kernel
//! - [`chroma-color`] - Lab, uv, CAM02-UCS
//!
//! # Used By
//!
//! - `chroma-engine` - spectral input, recovery and TM-30 reports

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod colorimetry;
pub mod distribution;
pub mod error;
pub mod illuminant;
pub mod observer;
pub mod purity;
pub mod recovery;
pub mod ssi;
pub mod tm30;

pub use colorimetry::{SpectralSummary, spectral_to_xyz, summarize, wavelength_to_xyz};
pub use distribution::{SpectralDistribution, SpectrumType};
pub use error::{SpectralError, SpectralResult};
pub use illuminant::Illuminant;
pub use observer::Observer;
pub use purity::{DominantWavelength, dominant_wavelength};
pub use recovery::{Recovery, RecoveryConfig, RecoveryMethod, recover};
pub use tm30::{Tm30Format, Tm30Output, Tm30Report};
