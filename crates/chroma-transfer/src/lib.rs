//! # chroma-transfer
//!
//! Transfer functions for RGB working spaces.
//!
//! Transfer functions convert between linear light values and the encoded
//! values a working space stores.
//!
//! # Terminology
//!
//! - **Encode** (OETF direction): linear -> encoded
//! - **Decode** (inverse direction): encoded -> linear
//!
//! # Supported Transfer Functions
//!
//! | Function | Used by | Module |
//! |----------|---------|--------|
//! | sRGB piecewise | sRGB, Display P3 | [`srgb`] |
//! | Pure gamma | Adobe RGB (563/256), DCI-P3 (2.6), Wide Gamut RGB | [`gamma`] |
//! | Rec.709 / BT.2020 | ITU-R BT.709, ITU-R BT.2020 | [`rec709`] |
//! | ROMM | ProPhoto RGB | [`romm`] |
//! | Linear | ACEScg, ACES2065-1 | - |
//!
//! # Out-of-range values
//!
//! The scalar functions in each module are defined on `[0, 1]` and clamp
//! negative inputs to zero. [`TransferFunction::encode`] and
//! [`TransferFunction::decode`] extend every curve by odd symmetry
//! (`sign(v) * f(|v|)`), so out-of-gamut values survive a round trip and can
//! be tagged by the caller instead of being lost.
//!
//! # Usage
//!
//! ```rust
//! use chroma_transfer::TransferFunction;
//!
//! let tf = TransferFunction::Srgb;
//! let encoded = tf.encode(0.214);
//! assert!((encoded - 0.5).abs() < 0.01);
//! assert!((tf.decode(encoded) - 0.214).abs() < 1e-12);
//! ```
//!
//! # Used By
//!
//! - `chroma-primaries` - working space definitions
//! - `chroma-color` - XYZ <-> RGB conversion

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use serde::{Deserialize, Serialize};

pub mod gamma;
pub mod rec709;
pub mod romm;
pub mod srgb;

/// Encoding transfer function of an RGB working space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransferFunction {
    /// Identity (scene-linear spaces).
    Linear,
    /// IEC 61966-2-1 piecewise curve.
    Srgb,
    /// Pure power law with the given decoding exponent.
    Gamma(f64),
    /// ITU-R BT.709 OETF.
    Rec709,
    /// ITU-R BT.2020 OETF (full precision constants).
    Bt2020,
    /// ROMM RGB (ProPhoto) curve.
    Romm,
}

impl TransferFunction {
    /// Encodes a linear value, extending the curve to negatives by odd symmetry.
    #[inline]
    pub fn encode(self, linear: f64) -> f64 {
        mirror(linear, |v| match self {
            Self::Linear => v,
            Self::Srgb => srgb::oetf(v),
            Self::Gamma(g) => gamma::gamma_oetf(v, g),
            Self::Rec709 => rec709::oetf(v),
            Self::Bt2020 => rec709::bt2020_oetf(v),
            Self::Romm => romm::encode(v),
        })
    }

    /// Decodes an encoded value, extending the curve to negatives by odd symmetry.
    #[inline]
    pub fn decode(self, encoded: f64) -> f64 {
        mirror(encoded, |v| match self {
            Self::Linear => v,
            Self::Srgb => srgb::eotf(v),
            Self::Gamma(g) => gamma::gamma_eotf(v, g),
            Self::Rec709 => rec709::eotf(v),
            Self::Bt2020 => rec709::bt2020_eotf(v),
            Self::Romm => romm::decode(v),
        })
    }

    /// Applies [`encode`](Self::encode) to an RGB triplet.
    #[inline]
    pub fn encode_rgb(self, rgb: [f64; 3]) -> [f64; 3] {
        rgb.map(|v| self.encode(v))
    }

    /// Applies [`decode`](Self::decode) to an RGB triplet.
    #[inline]
    pub fn decode_rgb(self, rgb: [f64; 3]) -> [f64; 3] {
        rgb.map(|v| self.decode(v))
    }

    /// Short human readable name.
    pub fn name(self) -> String {
        match self {
            Self::Linear => "Linear".into(),
            Self::Srgb => "sRGB".into(),
            Self::Gamma(g) => format!("Gamma {g:.4}"),
            Self::Rec709 => "ITU-R BT.709".into(),
            Self::Bt2020 => "ITU-R BT.2020".into(),
            Self::Romm => "ROMM RGB".into(),
        }
    }
}

#[inline]
fn mirror(v: f64, f: impl Fn(f64) -> f64) -> f64 {
    if v < 0.0 { -f(-v) } else { f(v) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const ALL: [TransferFunction; 7] = [
        TransferFunction::Linear,
        TransferFunction::Srgb,
        TransferFunction::Gamma(563.0 / 256.0),
        TransferFunction::Gamma(2.6),
        TransferFunction::Rec709,
        TransferFunction::Bt2020,
        TransferFunction::Romm,
    ];

    #[test]
    fn test_roundtrip_including_out_of_range() {
        for tf in ALL {
            for i in -50..=150 {
                let l = i as f64 / 100.0;
                assert_abs_diff_eq!(tf.decode(tf.encode(l)), l, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_endpoints() {
        for tf in ALL {
            assert_abs_diff_eq!(tf.encode(0.0), 0.0, epsilon = 1e-15);
            assert_abs_diff_eq!(tf.encode(1.0), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_odd_symmetry() {
        let tf = TransferFunction::Srgb;
        assert_eq!(tf.encode(-0.25), -tf.encode(0.25));
        assert_eq!(tf.decode_rgb([-0.5, 0.0, 0.5])[0], -tf.decode(0.5));
    }
}
