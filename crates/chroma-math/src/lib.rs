//! # chroma-math
//!
//! Math primitives for colorimetric computation.
//!
//! This crate provides the numeric building blocks used by every other
//! crate in the workspace:
//!
//! - [`Mat3`] - 3x3 matrices for RGB/XYZ and cone-response transforms
//! - [`Vec3`] - 3D vectors for XYZ/RGB/Lab triplets
//! - Chromatic adaptation matrices ([`BRADFORD`], [`CAT02`], [`CAT16`], ...)
//!   and the Von Kries matrix construction [`adapt_matrix`]
//! - Interpolation utilities ([`lerp`], [`sprague`], [`linear_sample`])
//!
//! # Design
//!
//! Everything is `f64`. Round trips such as `XYZ -> RGB -> XYZ` are expected
//! to hold to 1e-6, which single precision cannot guarantee once a transfer
//! function and two matrix products are chained.
//!
//! All matrix operations assume **row-major** storage and **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! # Usage
//!
//! ```rust
//! use chroma_math::{Mat3, Vec3};
//!
//! let rgb_to_xyz = Mat3::from_rows([
//!     [0.4124564, 0.3575761, 0.1804375],
//!     [0.2126729, 0.7151522, 0.0721750],
//!     [0.0193339, 0.1191920, 0.9503041],
//! ]);
//!
//! let rgb = Vec3::new(1.0, 0.5, 0.25);
//! let xyz = rgb_to_xyz * rgb;
//! assert!(xyz.y > 0.0);
//! ```
//!
//! # Used By
//!
//! - `chroma-primaries` - RGB/XYZ matrix generation
//! - `chroma-color` - conversion graph and adaptation engine
//! - `chroma-spectral` - spectral interpolation and recovery

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod adapt;
mod interp;
mod mat3;
mod vec3;

pub use adapt::*;
pub use interp::*;
pub use mat3::*;
pub use vec3::*;
