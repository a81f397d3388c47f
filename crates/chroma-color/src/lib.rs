//! # chroma-color
//!
//! Color space conversion graph and chromatic adaptation engine.
//!
//! This crate ties the math, transfer and primaries layers together into
//! pure conversion functions:
//!
//! - **Conversion graph** - XYZ, xyY, u'v', Lab, LCHab, Luv, LCHuv ([`convert`])
//! - **RGB working spaces** - XYZ <-> encoded RGB with gamut tagging, plus
//!   hex/HSL/HSV/CMY/CMYK derivatives ([`rgb`])
//! - **Chromatic adaptation** - twelve Von Kries family transforms and the
//!   identity ([`Cat`])
//! - **CAM02-UCS** - CIECAM02 correlates and the uniform color space used by
//!   TM-30 ([`cam02`])
//! - **Indices** - CIE, ASTM, Berger and Stensby whiteness, ASTM yellowness
//!   ([`indices`])
//!
//! # Architecture
//!
//! ```text
//!                 chroma-color
//!                      |
//!        +-------------+-------------+
//!        |             |             |
//! chroma-transfer chroma-primaries   |
//!        |             |             |
//!        +------+------+             |
//!               |                    |
//!          chroma-math --------------+
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use chroma_color::{Cat, convert, rgb};
//! use chroma_primaries::working_space;
//! use chroma_math::Vec3;
//!
//! let srgb = working_space("sRGB").unwrap();
//! let d50 = Vec3::new(0.96422, 1.0, 0.82521);
//!
//! // Encoded sRGB -> XYZ (D65) -> adapted to D50 -> Lab (D50)
//! let xyz = rgb::rgb_to_xyz(Vec3::new(0.5, 0.3, 0.2), srgb).unwrap();
//! let xyz_d50 = Cat::Bradford.adapt(xyz, srgb.white_xyz(), d50).unwrap();
//! let lab = convert::xyz_to_lab(xyz_d50, d50).unwrap();
//! assert!(lab.x > 30.0 && lab.x < 50.0);
//! ```
//!
//! # Errors
//!
//! Every conversion returns [`ColorResult`]. Non-finite input and degenerate
//! white points are [`ColorError::Domain`]; out-of-gamut RGB is tagged on the
//! result, never an error.
//!
//! # Dependencies
//!
//! - [`chroma-math`] - Vec3, Mat3, cone matrices
//! - [`chroma-transfer`] - encoding curves
//! - [`chroma-primaries`] - working space table
//!
//! # Used By
//!
//! - `chroma-spectral` - colorimetry and TM-30
//! - `chroma-engine` - result aggregation

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod adapt;
pub mod cam02;
pub mod convert;
pub mod error;
pub mod indices;
pub mod rgb;

pub use adapt::Cat;
pub use error::{ColorError, ColorResult};
pub use rgb::RgbEncoding;

// Re-export dependencies for convenience
pub use chroma_math as math;
pub use chroma_primaries as primaries;
pub use chroma_transfer as transfer;
