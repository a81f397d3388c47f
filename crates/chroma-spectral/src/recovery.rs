//! Reflectance recovery from tristimulus values.
//!
//! Implements the low-dimensional model of Jakob & Hanika (2019), "A
//! Low-Dimensional Function Space for Efficient Spectral Upsampling":
//!
//! ```text
//! R(λ) = S(c0·x² + c1·x + c2),   x = (λ - 360) / 470
//! S(t) = 1/2 + t / (2·sqrt(1 + t²))
//! ```
//!
//! The sigmoid keeps every reflectance in `(0, 1)`. The three coefficients
//! are fitted with Levenberg-Marquardt (numeric Jacobian) so that the CIELAB
//! value of `R` under the illuminant and the CIE 1931 2° observer matches the
//! target. Colors outside the object-color solid cannot be matched exactly;
//! the achieved CIE 1976 color difference is always reported.
//!
//! # Usage
//!
//! ```rust
//! use chroma_spectral::{illuminant, recover, RecoveryConfig};
//! use chroma_math::Vec3;
//!
//! let d65 = illuminant::find("D65").unwrap();
//! let gray = d65.spectral_white_point(chroma_spectral::Observer::Cie1931).unwrap() * 0.2;
//! let fit = recover(gray, d65, &RecoveryConfig::default()).unwrap();
//! assert!(fit.converged);
//! assert!(fit.residual < 1e-3);
//! ```

use chroma_color::convert::{delta_e_76, xyz_to_lab};
use chroma_math::{Mat3, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::illuminant::Illuminant;
use crate::observer::{CMF_START, CMF_STOP};
use crate::{Observer, SpectralDistribution, SpectralError, SpectralResult, SpectrumType};

/// Recovery grid interval (nm).
pub const RECOVERY_INTERVAL: f64 = 5.0;

/// Reflectance recovery algorithm.
///
/// A fixed strategy selection: there is exactly one method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RecoveryMethod {
    /// Jakob & Hanika (2019) sigmoid polynomial.
    #[default]
    JakobHanika2019,
}

/// Recovery settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    /// Algorithm.
    pub method: RecoveryMethod,
    /// Maximum Levenberg-Marquardt iterations.
    pub max_iterations: usize,
    /// Target CIE 1976 color difference.
    pub tolerance: f64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            method: RecoveryMethod::JakobHanika2019,
            max_iterations: 200,
            tolerance: 1e-3,
        }
    }
}

/// Outcome of a recovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recovery {
    /// Recovered reflectance on 360..=830 nm at 5 nm.
    pub distribution: SpectralDistribution,
    /// Sigmoid polynomial coefficients `[c0, c1, c2]`.
    pub coefficients: [f64; 3],
    /// Achieved CIE 1976 color difference to the target.
    pub residual: f64,
    /// Iterations used.
    pub iterations: usize,
    /// True if `residual <= tolerance`.
    pub converged: bool,
}

// ============================================================================
// Model
// ============================================================================

#[inline]
fn sigmoid(t: f64) -> f64 {
    0.5 + t / (2.0 * (1.0 + t * t).sqrt())
}

struct Problem {
    /// (normalized wavelength, illuminant-weighted CMF) per grid point
    weights: Vec<(f64, Vec3)>,
    white: Vec3,
    target: Vec3,
}

impl Problem {
    fn new(xyz: Vec3, spd: &SpectralDistribution) -> SpectralResult<Self> {
        let n = ((CMF_STOP - CMF_START) / RECOVERY_INTERVAL).round() as usize;
        let mut weights: Vec<(f64, Vec3)> = (0..=n)
            .map(|i| {
                let w = CMF_START + i as f64 * RECOVERY_INTERVAL;
                let x = (w - CMF_START) / (CMF_STOP - CMF_START);
                (x, Observer::Cie1931.cmf(w) * spd.value_at(w))
            })
            .collect();
        let norm: f64 = weights.iter().map(|(_, c)| c.y).sum();
        weights.iter_mut().for_each(|(_, c)| *c = *c / norm);
        let white = weights.iter().fold(Vec3::ZERO, |acc, (_, c)| acc + *c);
        let target = xyz_to_lab(xyz, white)?;
        Ok(Self { weights, white, target })
    }

    fn reflectance(c: [f64; 3], x: f64) -> f64 {
        sigmoid(c[0] * x * x + c[1] * x + c[2])
    }

    fn xyz(&self, c: [f64; 3]) -> Vec3 {
        self.weights
            .iter()
            .fold(Vec3::ZERO, |acc, &(x, w)| acc + w * Self::reflectance(c, x))
    }

    fn residual(&self, c: [f64; 3]) -> SpectralResult<Vec3> {
        Ok(xyz_to_lab(self.xyz(c), self.white)? - self.target)
    }

    fn jacobian(&self, c: [f64; 3]) -> SpectralResult<Mat3> {
        let mut cols = [[0.0; 3]; 3];
        for (j, col) in cols.iter_mut().enumerate() {
            let h = 1e-5 * c[j].abs().max(1.0);
            let (mut plus, mut minus) = (c, c);
            plus[j] += h;
            minus[j] -= h;
            *col = ((self.residual(plus)? - self.residual(minus)?) / (2.0 * h)).to_array();
        }
        Ok(Mat3::from_cols(cols))
    }
}

/// Recovers a reflectance whose color under `illuminant` matches `xyz`.
///
/// `xyz` is relative to the illuminant's spectral white (`Y = 1`).
///
/// # Errors
///
/// [`SpectralError::MissingSpd`] if the illuminant has no SPD, and color
/// domain errors for non-finite input.
pub fn recover(xyz: Vec3, illuminant: &Illuminant, config: &RecoveryConfig) -> SpectralResult<Recovery> {
    let spd = illuminant
        .spd()
        .ok_or_else(|| SpectralError::MissingSpd(illuminant.name().to_string()))?;
    let problem = Problem::new(xyz, spd)?;

    let mut c = [0.0; 3];
    let mut r = problem.residual(c)?;
    let mut err = r.length();
    let mut mu = 1e-3;
    let mut iterations = 0;

    while iterations < config.max_iterations && err > config.tolerance {
        iterations += 1;
        let j = problem.jacobian(c)?;
        let jt = j.transpose();
        let jtj = jt * j;
        let g = jt * r;

        let mut improved = false;
        for _ in 0..30 {
            let mut damped = jtj;
            (0..3).for_each(|i| damped.m[i][i] *= 1.0 + mu);
            let Some(inv) = damped.inverse() else {
                mu *= 10.0;
                continue;
            };
            let step = inv * (-g);
            let candidate = [c[0] + step.x, c[1] + step.y, c[2] + step.z];
            let rc = problem.residual(candidate)?;
            let ec = rc.length();
            if ec < err {
                c = candidate;
                r = rc;
                err = ec;
                mu = (mu / 10.0).max(1e-12);
                improved = true;
                break;
            }
            mu *= 10.0;
        }
        trace!(iterations, residual = err, "recovery step");
        if !improved {
            break;
        }
    }

    let converged = err <= config.tolerance;
    debug!(
        illuminant = illuminant.name(),
        iterations,
        residual = err,
        converged,
        "reflectance recovered"
    );

    let distribution = SpectralDistribution::sample(CMF_START, CMF_STOP, RECOVERY_INTERVAL, SpectrumType::Reflective, |w| {
        Problem::reflectance(c, (w - CMF_START) / (CMF_STOP - CMF_START))
    });
    let residual = delta_e_76(problem.target + r, problem.target);

    Ok(Recovery {
        distribution,
        coefficients: c,
        residual,
        iterations,
        converged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorimetry::spectral_to_xyz;
    use crate::illuminant;
    use approx::assert_abs_diff_eq;

    fn srgb_xyz(rgb: [f64; 3]) -> Vec3 {
        let lin = rgb.map(|v| {
            let v = v / 255.0;
            if v <= 0.04045 { v / 12.92 } else { ((v + 0.055) / 1.055).powf(2.4) }
        });
        Vec3::new(
            0.4124564 * lin[0] + 0.3575761 * lin[1] + 0.1804375 * lin[2],
            0.2126729 * lin[0] + 0.7151522 * lin[1] + 0.0721750 * lin[2],
            0.0193339 * lin[0] + 0.1191920 * lin[1] + 0.9503041 * lin[2],
        )
    }

    #[test]
    fn test_recovers_in_gamut_colors() {
        let d65 = illuminant::find("D65").unwrap();
        let config = RecoveryConfig::default();
        for rgb in [[132.0, 205.0, 12.0], [255.0, 0.0, 0.0], [20.0, 200.0, 220.0], [128.0, 128.0, 128.0]] {
            let fit = recover(srgb_xyz(rgb), d65, &config).unwrap();
            assert!(fit.converged, "{rgb:?}: {}", fit.residual);
            assert!(fit.distribution.values().iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_recovered_spectrum_reproduces_color() {
        let d65 = illuminant::find("D65").unwrap();
        let target = srgb_xyz([250.0, 200.0, 10.0]);
        let fit = recover(target, d65, &RecoveryConfig::default()).unwrap();
        let xyz = spectral_to_xyz(&fit.distribution, Observer::Cie1931, d65).unwrap();
        // Integration grid differs from the fitting grid
        assert_abs_diff_eq!(xyz.y, target.y, epsilon = 5e-3);
        assert_abs_diff_eq!(xyz.x, target.x, epsilon = 5e-3);
        assert_abs_diff_eq!(xyz.z, target.z, epsilon = 5e-3);
    }

    #[test]
    fn test_residual_reported_when_not_reachable() {
        let d65 = illuminant::find("D65").unwrap();
        let config = RecoveryConfig {
            max_iterations: 3,
            ..RecoveryConfig::default()
        };
        let fit = recover(srgb_xyz([0.0, 0.0, 255.0]), d65, &config).unwrap();
        assert!(fit.iterations <= 3);
        assert_eq!(fit.converged, fit.residual <= config.tolerance);
    }

    #[test]
    fn test_chromaticity_only_illuminant() {
        let c = illuminant::find("C").unwrap();
        let err = recover(Vec3::new(0.2, 0.2, 0.2), c, &RecoveryConfig::default()).unwrap_err();
        assert_eq!(err, SpectralError::MissingSpd("C".into()));
    }
}
