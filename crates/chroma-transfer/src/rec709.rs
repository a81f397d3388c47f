//! ITU-R BT.709 and BT.2020 opto-electronic transfer functions.
//!
//! Both share the same shape (linear toe, 0.45 power); BT.2020 specifies the
//! constants to higher precision so the two segments meet exactly. The
//! inverse here is the mathematical inverse of the OETF, not BT.1886.
//!
//! # Range
//!
//! - Input/Output: [0, 1]
//!
//! # Reference
//!
//! ITU-R BT.709-6, ITU-R BT.2020-2

/// BT.2020 alpha.
const BT2020_ALPHA: f64 = 1.099_296_826_809_44;
/// BT.2020 beta (linear segment end).
const BT2020_BETA: f64 = 0.018_053_968_510_807;

#[inline]
fn oetf_with(l: f64, alpha: f64, beta: f64) -> f64 {
    if l <= 0.0 {
        0.0
    } else if l < beta {
        4.5 * l
    } else {
        alpha * l.powf(0.45) - (alpha - 1.0)
    }
}

#[inline]
fn eotf_with(v: f64, alpha: f64, beta: f64) -> f64 {
    if v <= 0.0 {
        0.0
    } else if v < 4.5 * beta {
        v / 4.5
    } else {
        ((v + alpha - 1.0) / alpha).powf(1.0 / 0.45)
    }
}

/// Rec.709 OETF: encodes linear to Rec.709.
///
/// # Formula
///
/// ```text
/// if L < 0.018:
///     V = 4.5 * L
/// else:
///     V = 1.099 * L^0.45 - 0.099
/// ```
#[inline]
pub fn oetf(l: f64) -> f64 {
    oetf_with(l, 1.099, 0.018)
}

/// Rec.709 inverse OETF: decodes Rec.709 to linear.
#[inline]
pub fn eotf(v: f64) -> f64 {
    eotf_with(v, 1.099, 0.018)
}

/// BT.2020 OETF.
#[inline]
pub fn bt2020_oetf(l: f64) -> f64 {
    oetf_with(l, BT2020_ALPHA, BT2020_BETA)
}

/// BT.2020 inverse OETF.
#[inline]
pub fn bt2020_eotf(v: f64) -> f64 {
    eotf_with(v, BT2020_ALPHA, BT2020_BETA)
}
