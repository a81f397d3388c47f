//! Chromatic adaptation engine.
//!
//! [`Cat`] names a chromatic adaptation transform. Every transform except
//! [`Cat::None`] is a Von Kries style scaling in its own cone space:
//!
//! ```text
//! XYZ_dst = M^-1 * diag(M * W_dst / M * W_src) * M * XYZ_src
//! ```
//!
//! [`Cat::None`] returns its input unchanged for every pair of whites.
//!
//! # Usage
//!
//! ```rust
//! use chroma_color::Cat;
//! use chroma_math::Vec3;
//!
//! let d65 = Vec3::new(0.95047, 1.0, 1.08883);
//! let d50 = Vec3::new(0.96422, 1.0, 0.82521);
//!
//! let adapted = Cat::Bradford.adapt(d65, d65, d50).unwrap();
//! assert!((adapted.z - d50.z).abs() < 1e-9);
//!
//! // "All" never picks a default: one value per transform
//! assert_eq!(Cat::adapt_all(d65, d65, d50).unwrap().len(), Cat::ALL.len());
//! ```

use std::fmt;
use std::str::FromStr;

use chroma_math::{self as math, Mat3, Vec3, adapt_matrix};
use serde::{Deserialize, Serialize};

use crate::{ColorError, ColorResult};

/// Chromatic adaptation transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Cat {
    /// Identity, no adaptation.
    None,
    /// Bradford (Lam 1985).
    Bradford,
    /// CIECAM02 CAT02.
    Cat02,
    /// CAT02 with the Brill & Süsstrunk correction.
    Cat02Brill2008,
    /// CAM16 CAT16.
    Cat16,
    /// Von Kries (Hunt-Pointer-Estevez).
    VonKries,
    /// Scaling of XYZ directly.
    XyzScaling,
    /// Sharp (Süsstrunk et al.).
    Sharp,
    /// Fairchild (2001).
    Fairchild,
    /// CMCCAT97.
    Cmccat97,
    /// CMCCAT2000.
    Cmccat2000,
    /// Bianco & Schettini (2010).
    Bianco2010,
    /// Bianco & Schettini (2010), positivity constrained.
    BiancoPc2010,
}

impl Cat {
    /// Every adapting transform, in presentation order. Excludes [`Cat::None`].
    pub const ALL: [Cat; 12] = [
        Cat::Bradford,
        Cat::Cat02,
        Cat::Cat02Brill2008,
        Cat::Cat16,
        Cat::VonKries,
        Cat::XyzScaling,
        Cat::Sharp,
        Cat::Fairchild,
        Cat::Cmccat97,
        Cat::Cmccat2000,
        Cat::Bianco2010,
        Cat::BiancoPc2010,
    ];

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Cat::None => "None",
            Cat::Bradford => "Bradford",
            Cat::Cat02 => "CAT02",
            Cat::Cat02Brill2008 => "CAT02 Brill 2008",
            Cat::Cat16 => "CAT16",
            Cat::VonKries => "Von Kries",
            Cat::XyzScaling => "XYZ Scaling",
            Cat::Sharp => "Sharp",
            Cat::Fairchild => "Fairchild",
            Cat::Cmccat97 => "CMCCAT97",
            Cat::Cmccat2000 => "CMCCAT2000",
            Cat::Bianco2010 => "Bianco 2010",
            Cat::BiancoPc2010 => "Bianco PC 2010",
        }
    }

    /// Looks a transform up by display name (case and separator insensitive).
    pub fn from_name(name: &str) -> Option<Cat> {
        let key = normalize(name);
        std::iter::once(Cat::None)
            .chain(Cat::ALL)
            .find(|c| normalize(c.name()) == key)
    }

    /// Cone response matrix. Identity for [`Cat::None`] and [`Cat::XyzScaling`].
    pub const fn matrix(self) -> Mat3 {
        match self {
            Cat::None | Cat::XyzScaling => math::XYZ_SCALING,
            Cat::Bradford => math::BRADFORD,
            Cat::Cat02 => math::CAT02,
            Cat::Cat02Brill2008 => math::CAT02_BRILL_2008,
            Cat::Cat16 => math::CAT16,
            Cat::VonKries => math::VON_KRIES,
            Cat::Sharp => math::SHARP,
            Cat::Fairchild => math::FAIRCHILD,
            Cat::Cmccat97 => math::CMCCAT97,
            Cat::Cmccat2000 => math::CMCCAT2000,
            Cat::Bianco2010 => math::BIANCO_2010,
            Cat::BiancoPc2010 => math::BIANCO_PC_2010,
        }
    }

    /// Full adaptation matrix from `src_white` to `dst_white`.
    pub fn adaptation_matrix(self, src_white: Vec3, dst_white: Vec3) -> ColorResult<Mat3> {
        if self == Cat::None {
            return Ok(Mat3::IDENTITY);
        }
        for white in [src_white, dst_white] {
            if !white.is_finite() || white.y <= 0.0 {
                return Err(ColorError::domain(
                    "chromatic adaptation",
                    white,
                    "white point must be finite with positive luminance",
                ));
            }
        }
        let src_cone = self.matrix() * src_white;
        if src_cone.to_array().iter().any(|c| c.abs() < 1e-12) {
            return Err(ColorError::domain(
                "chromatic adaptation",
                src_white,
                "source white has a zero cone response",
            ));
        }
        Ok(adapt_matrix(self.matrix(), src_white, dst_white))
    }

    /// Adapts `xyz` seen under `src_white` to `dst_white`.
    pub fn adapt(self, xyz: Vec3, src_white: Vec3, dst_white: Vec3) -> ColorResult<Vec3> {
        if !xyz.is_finite() {
            return Err(ColorError::domain("chromatic adaptation", xyz, "components must be finite"));
        }
        if self == Cat::None {
            return Ok(xyz);
        }
        Ok(self.adaptation_matrix(src_white, dst_white)? * xyz)
    }

    /// Adapts with every transform in [`Cat::ALL`].
    pub fn adapt_all(xyz: Vec3, src_white: Vec3, dst_white: Vec3) -> ColorResult<Vec<(Cat, Vec3)>> {
        Cat::ALL
            .iter()
            .map(|&cat| Ok((cat, cat.adapt(xyz, src_white, dst_white)?)))
            .collect()
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl fmt::Display for Cat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Cat {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cat::from_name(s).ok_or_else(|| ColorError::UnknownCat(s.to_string()))
    }
}
