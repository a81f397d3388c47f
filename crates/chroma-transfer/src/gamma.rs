//! Pure power-law transfer functions.
//!
//! - 563/256 (≈2.2): Adobe RGB (1998), Wide Gamut RGB
//! - 2.6: DCI-P3 theatrical projection
//!
//! # Range
//!
//! - Input/Output: [0, 1]; non-positive inputs map to 0

/// Adobe RGB (1998) decoding exponent.
pub const ADOBE_RGB_GAMMA: f64 = 563.0 / 256.0;

/// DCI-P3 decoding exponent.
pub const DCI_GAMMA: f64 = 2.6;

/// Decodes with an arbitrary gamma: `v^gamma`.
///
/// ```rust
/// use chroma_transfer::gamma::gamma_eotf;
///
/// assert!((gamma_eotf(0.5, 2.2) - 0.2176).abs() < 1e-4);
/// ```
#[inline]
pub fn gamma_eotf(v: f64, gamma: f64) -> f64 {
    if v <= 0.0 { 0.0 } else { v.powf(gamma) }
}

/// Encodes with an arbitrary gamma: `l^(1/gamma)`.
#[inline]
pub fn gamma_oetf(l: f64, gamma: f64) -> f64 {
    if l <= 0.0 { 0.0 } else { l.powf(1.0 / gamma) }
}
