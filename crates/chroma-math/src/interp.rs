//! Interpolation utilities.
//!
//! Scalar helpers ([`lerp`], [`inverse_lerp`], [`saturate`]) and two
//! interpolators over uniformly sampled data:
//!
//! - [`linear_sample`] - piecewise linear
//! - [`sprague`] - Sprague (1880) fifth-order interpolation, the CIE 167:2005
//!   recommendation for uniformly spaced spectral data
//!
//! Both take a *fractional sample index* rather than a wavelength, so
//! callers map `(lambda - start) / interval` themselves.
//!
//! # Usage
//!
//! ```rust
//! use chroma_math::{lerp, sprague};
//!
//! assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
//!
//! let samples = [0.1, 0.2, 0.4, 0.7, 0.9, 1.0, 0.95];
//! // Sprague passes through the original samples.
//! assert!((sprague(&samples, 3.0) - 0.7).abs() < 1e-12);
//! ```

/// Linear interpolation between two values.
///
/// Returns `a` when `t = 0.0`, and `b` when `t = 1.0`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Inverse linear interpolation.
///
/// Given a value between `a` and `b`, returns the corresponding `t` value.
#[inline]
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    if (b - a).abs() < 1e-15 {
        0.0
    } else {
        (value - a) / (b - a)
    }
}

/// Clamps a value to [0, 1].
#[inline]
pub fn saturate(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Samples uniformly spaced data with piecewise linear interpolation.
///
/// `position` is a fractional index. Positions outside `[0, len - 1]`
/// return `None`.
///
/// ```rust
/// use chroma_math::linear_sample;
///
/// assert_eq!(linear_sample(&[0.0, 1.0, 4.0], 1.5), Some(2.5));
/// assert_eq!(linear_sample(&[0.0, 1.0], 2.0), None);
/// ```
pub fn linear_sample(samples: &[f64], position: f64) -> Option<f64> {
    let last = samples.len().checked_sub(1)? as f64;
    if !(0.0..=last).contains(&position) {
        return None;
    }
    let i = (position.floor() as usize).min(samples.len().saturating_sub(2));
    if samples.len() == 1 {
        return Some(samples[0]);
    }
    Some(lerp(samples[i], samples[i + 1], position - i as f64))
}

// ============================================================================
// Sprague interpolation
// ============================================================================

/// Boundary extrapolation coefficients (CIE 167:2005, table 1), divided by 209.
const SPRAGUE_BOUNDARY: [[f64; 6]; 4] = [
    [884.0, -1960.0, 3033.0, -2648.0, 1080.0, -180.0],
    [508.0, -540.0, 488.0, -367.0, 144.0, -24.0],
    [-24.0, 144.0, -367.0, 488.0, -540.0, 508.0],
    [-180.0, 1080.0, -2648.0, 3033.0, -1960.0, 884.0],
];

/// Minimum number of samples Sprague interpolation needs.
pub const SPRAGUE_MIN_SAMPLES: usize = 6;

/// Samples uniformly spaced data with Sprague fifth-order interpolation.
///
/// The interpolant reproduces every original sample exactly and has a
/// continuous second derivative. Two extra points are extrapolated at each
/// end with the CIE boundary coefficients. With fewer than
/// [`SPRAGUE_MIN_SAMPLES`] samples this falls back to [`linear_sample`].
///
/// Positions outside `[0, len - 1]` are clamped to the range.
pub fn sprague(samples: &[f64], position: f64) -> f64 {
    let n = samples.len();
    if n == 0 {
        return 0.0;
    }
    let position = position.clamp(0.0, (n - 1) as f64);
    if n < SPRAGUE_MIN_SAMPLES {
        return linear_sample(samples, position).unwrap_or(samples[0]);
    }

    let boundary = |row: usize, window: &[f64]| -> f64 {
        SPRAGUE_BOUNDARY[row]
            .iter()
            .zip(window)
            .map(|(c, y)| c * y)
            .sum::<f64>()
            / 209.0
    };
    let head = &samples[..6];
    let tail = &samples[n - 6..];
    let before = [boundary(0, head), boundary(1, head)];
    let after = [boundary(2, tail), boundary(3, tail)];

    // Padded accessor: index -2..=n+1
    let p = |k: isize| -> f64 {
        if k < 0 {
            before[(k + 2) as usize]
        } else if k as usize >= n {
            after[k as usize - n]
        } else {
            samples[k as usize]
        }
    };

    let i = (position.floor() as usize).min(n - 2) as isize;
    let x = position - i as f64;
    if x == 0.0 {
        return samples[i as usize];
    }

    let (ym2, ym1, y0, y1, y2, y3) = (p(i - 2), p(i - 1), p(i), p(i + 1), p(i + 2), p(i + 3));
    let a0 = y0;
    let a1 = (2.0 * ym2 - 16.0 * ym1 + 16.0 * y1 - 2.0 * y2) / 24.0;
    let a2 = (-ym2 + 16.0 * ym1 - 30.0 * y0 + 16.0 * y1 - y2) / 24.0;
    let a3 = (-9.0 * ym2 + 39.0 * ym1 - 70.0 * y0 + 66.0 * y1 - 33.0 * y2 + 7.0 * y3) / 24.0;
    let a4 = (13.0 * ym2 - 64.0 * ym1 + 126.0 * y0 - 124.0 * y1 + 61.0 * y2 - 12.0 * y3) / 24.0;
    let a5 = (-5.0 * ym2 + 25.0 * ym1 - 50.0 * y0 + 50.0 * y1 - 25.0 * y2 + 5.0 * y3) / 24.0;

    a0 + x * (a1 + x * (a2 + x * (a3 + x * (a4 + x * a5))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_lerp_inverse() {
        assert_eq!(lerp(2.0, 4.0, 0.25), 2.5);
        assert_eq!(inverse_lerp(2.0, 4.0, 2.5), 0.25);
        assert_eq!(inverse_lerp(1.0, 1.0, 3.0), 0.0);
        assert_eq!(saturate(1.5), 1.0);
    }

    #[test]
    fn test_linear_sample_bounds() {
        let s = [1.0, 3.0, 5.0];
        assert_eq!(linear_sample(&s, 0.0), Some(1.0));
        assert_eq!(linear_sample(&s, 2.0), Some(5.0));
        assert_eq!(linear_sample(&s, -0.1), None);
        assert_eq!(linear_sample(&[], 0.0), None);
        assert_eq!(linear_sample(&[7.0], 0.0), Some(7.0));
    }

    #[test]
    fn test_sprague_reproduces_samples() {
        let s: Vec<f64> = (0..12).map(|i| ((i as f64) * 0.37).sin() * 0.5 + 0.5).collect();
        for (i, &v) in s.iter().enumerate() {
            assert_abs_diff_eq!(sprague(&s, i as f64), v, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sprague_exact_for_quadratic() {
        // Exact on low-degree polynomials away from the extrapolated ends.
        let s: Vec<f64> = (0..10).map(|i| (i as f64).powi(2)).collect();
        assert_abs_diff_eq!(sprague(&s, 4.5), 20.25, epsilon = 1e-9);
        assert_abs_diff_eq!(sprague(&s, 3.25), 10.5625, epsilon = 1e-9);
    }

    #[test]
    fn test_sprague_linear_fallback() {
        let s = [0.0, 1.0, 2.0];
        assert_abs_diff_eq!(sprague(&s, 1.5), 1.5, epsilon = 1e-12);
    }
}
