//! ROMM RGB (ProPhoto) transfer function.
//!
//! A 1.8 power law with a short linear segment of slope 16 below
//! `E_t = 16^(1.8 / (1 - 1.8)) = 1/512`.
//!
//! # Reference
//!
//! ANSI/I3A IT10.7666:2003, ROMM RGB

/// Linear segment end in linear light.
pub const ROMM_ET: f64 = 1.0 / 512.0;

/// Encodes linear light to ROMM RGB.
///
/// ```rust
/// use chroma_transfer::romm;
///
/// assert!((romm::encode(0.18) - 0.3857).abs() < 1e-4);
/// ```
#[inline]
pub fn encode(l: f64) -> f64 {
    if l <= 0.0 {
        0.0
    } else if l < ROMM_ET {
        16.0 * l
    } else {
        l.powf(1.0 / 1.8)
    }
}

/// Decodes ROMM RGB to linear light.
#[inline]
pub fn decode(v: f64) -> f64 {
    if v <= 0.0 {
        0.0
    } else if v < 16.0 * ROMM_ET {
        v / 16.0
    } else {
        v.powf(1.8)
    }
}
