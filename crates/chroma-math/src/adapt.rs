//! Chromatic adaptation matrices.
//!
//! Cone-response (sharpened or physiological) matrices for the von Kries
//! family of chromatic adaptation transforms, and the construction of the
//! full adaptation matrix between two white points.
//!
//! # Algorithm
//!
//! For a cone matrix `M` and white points `W_src`, `W_dst` (XYZ):
//!
//! ```text
//! A = M^-1 * diag((M * W_dst) / (M * W_src)) * M
//! ```
//!
//! # Usage
//!
//! ```rust
//! use chroma_math::{adapt_matrix, BRADFORD, Vec3};
//!
//! let d65 = Vec3::new(0.95047, 1.0, 1.08883);
//! let d50 = Vec3::new(0.96422, 1.0, 0.82521);
//!
//! let d65_to_d50 = adapt_matrix(BRADFORD, d65, d50);
//! let white = d65_to_d50 * d65;
//! assert!((white.z - d50.z).abs() < 1e-9);
//! ```

use crate::{Mat3, Vec3};

// ============================================================================
// Cone response matrices
// ============================================================================

/// Bradford cone response matrix.
///
/// Lam, K.M. (1985). Metamerism and Colour Constancy.
pub const BRADFORD: Mat3 = Mat3::from_rows([
    [0.8951, 0.2664, -0.1614],
    [-0.7502, 1.7135, 0.0367],
    [0.0389, -0.0685, 1.0296],
]);

/// Von Kries (Hunt-Pointer-Estevez, equal-energy normalised) matrix.
pub const VON_KRIES: Mat3 = Mat3::from_rows([
    [0.40024, 0.70760, -0.08081],
    [-0.22630, 1.16532, 0.04570],
    [0.00000, 0.00000, 0.91822],
]);

/// CAT02 matrix from CIECAM02.
pub const CAT02: Mat3 = Mat3::from_rows([
    [0.7328, 0.4296, -0.1624],
    [-0.7036, 1.6975, 0.0061],
    [0.0030, 0.0136, 0.9834],
]);

/// CAT02 with the Brill & Süsstrunk (2008) blue-row correction.
pub const CAT02_BRILL_2008: Mat3 = Mat3::from_rows([
    [0.7328, 0.4296, -0.1624],
    [-0.7036, 1.6975, 0.0061],
    [0.0000, 0.0000, 1.0000],
]);

/// CAT16 matrix from CAM16 (Li et al., 2017).
pub const CAT16: Mat3 = Mat3::from_rows([
    [0.401288, 0.650173, -0.051461],
    [-0.250268, 1.204414, 0.045854],
    [-0.002079, 0.048952, 0.953127],
]);

/// Sharp matrix (Süsstrunk, Holm & Finlayson, 2000).
pub const SHARP: Mat3 = Mat3::from_rows([
    [1.2694, -0.0988, -0.1706],
    [-0.8364, 1.8006, 0.0357],
    [0.0297, -0.0315, 1.0018],
]);

/// Fairchild (2001) matrix.
pub const FAIRCHILD: Mat3 = Mat3::from_rows([
    [0.8562, 0.3372, -0.1934],
    [-0.8360, 1.8327, 0.0033],
    [0.0357, -0.0469, 1.0112],
]);

/// CMCCAT97 matrix, as tabulated by Westland et al. (2012).
pub const CMCCAT97: Mat3 = Mat3::from_rows([
    [0.8951, -0.7502, 0.0389],
    [0.2664, 1.7135, 0.0685],
    [-0.1614, 0.0367, 1.0296],
]);

/// CMCCAT2000 matrix (Li et al., 2002).
pub const CMCCAT2000: Mat3 = Mat3::from_rows([
    [0.7982, 0.3389, -0.1371],
    [-0.5918, 1.5512, 0.0406],
    [0.0008, 0.0239, 0.9753],
]);

/// Bianco & Schettini (2010) matrix.
pub const BIANCO_2010: Mat3 = Mat3::from_rows([
    [0.8752, 0.2787, -0.1539],
    [-0.8904, 1.8709, 0.0195],
    [-0.0061, 0.0162, 0.9899],
]);

/// Bianco & Schettini (2010) matrix with positivity constraint.
pub const BIANCO_PC_2010: Mat3 = Mat3::from_rows([
    [0.6489, 0.3915, -0.0404],
    [-0.3775, 1.3055, 0.0720],
    [-0.0271, 0.0888, 0.9383],
]);

/// XYZ scaling: adaptation directly on tristimulus values.
pub const XYZ_SCALING: Mat3 = Mat3::IDENTITY;

/// Hunt-Pointer-Estevez matrix used by the CIECAM02 post-adaptation stage.
pub const HPE: Mat3 = Mat3::from_rows([
    [0.38971, 0.68898, -0.07868],
    [-0.22981, 1.18340, 0.04641],
    [0.00000, 0.00000, 1.00000],
]);

// ============================================================================
// Adaptation
// ============================================================================

/// Computes a chromatic adaptation matrix between two white points.
///
/// The resulting matrix transforms XYZ values seen under `src_white`
/// to corresponding XYZ values under `dst_white`.
///
/// # Arguments
///
/// * `method` - The cone response matrix ([`BRADFORD`], [`CAT02`], etc.)
/// * `src_white` - Source white point in XYZ
/// * `dst_white` - Destination white point in XYZ
pub fn adapt_matrix(method: Mat3, src_white: Vec3, dst_white: Vec3) -> Mat3 {
    // Cone matrices are well conditioned constants.
    let method_inv = method.inverse().unwrap_or(Mat3::IDENTITY);

    let src_cone = method * src_white;
    let dst_cone = method * dst_white;

    let scale = Mat3::from_diagonal(dst_cone / src_cone);

    method_inv * scale * method
}
