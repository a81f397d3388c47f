//! Spectral Similarity Index (AMPAS SSI).
//!
//! Compares the spectral shape of a test source with a reference source
//! between 375 and 675 nm. 100 means identical relative shape; the score
//! drops as the weighted, smoothed relative differences grow.
//!
//! 1. Both distributions are sampled linearly at 1 nm, zero outside their
//!    range.
//! 2. Each is integrated into thirty 10 nm bins (trapezoid ends) and scaled
//!    to unit sum.
//! 3. Bin differences are taken relative to `reference + mean(reference)`,
//!    weighted down at the spectrum ends, padded with a zero on each side
//!    and smoothed with the kernel `[0.22, 0.56, 0.22]`.
//! 4. `SSI = round(100 - 32 · sqrt(Σ c²))`.
//!
//! # Usage
//!
//! ```rust
//! use chroma_spectral::{illuminant, ssi::spectral_similarity_index};
//!
//! let d65 = illuminant::find("D65").unwrap().spd().unwrap();
//! assert_eq!(spectral_similarity_index(d65, d65), Some(100.0));
//! ```

use chroma_math::lerp;

use crate::SpectralDistribution;

/// First wavelength of the comparison (nm).
pub const SSI_START: f64 = 375.0;
/// Last wavelength of the comparison (nm).
pub const SSI_STOP: f64 = 675.0;

const BINS: usize = 30;
const KERNEL: [f64; 3] = [0.22, 0.56, 0.22];

/// Per-bin weights, reduced at both ends of the visible range.
const WEIGHTS: [f64; BINS] = {
    let mut w = [1.0; BINS];
    w[0] = 12.0 / 45.0;
    w[1] = 22.0 / 45.0;
    w[2] = 32.0 / 45.0;
    w[3] = 40.0 / 45.0;
    w[4] = 44.0 / 45.0;
    w[BINS - 2] = 11.0 / 15.0;
    w[BINS - 1] = 3.0 / 15.0;
    w
};

/// Linear sample at `w` nm, zero outside the distribution.
fn linear_at(sd: &SpectralDistribution, w: f64) -> f64 {
    if w < sd.start() || w > sd.stop() {
        return 0.0;
    }
    let values = sd.values();
    let pos = (w - sd.start()) / sd.interval();
    let i = (pos.floor() as usize).min(values.len().saturating_sub(2));
    match (values.get(i), values.get(i + 1)) {
        (Some(&a), Some(&b)) => lerp(a, b, pos - i as f64),
        (Some(&a), None) => a,
        _ => 0.0,
    }
}

/// Bin integrals scaled to unit sum, `None` if the range holds no power.
fn bins(sd: &SpectralDistribution) -> Option<[f64; BINS]> {
    let mut out = [0.0; BINS];
    for (i, bin) in out.iter_mut().enumerate() {
        let lo = SSI_START + 10.0 * i as f64;
        *bin = (0..=10)
            .map(|k| {
                let weight = if k == 0 || k == 10 { 0.5 } else { 1.0 };
                weight * linear_at(sd, lo + k as f64)
            })
            .sum();
    }
    let total: f64 = out.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return None;
    }
    out.iter_mut().for_each(|v| *v /= total);
    Some(out)
}

/// SSI of `test` against `reference`, rounded to an integer.
///
/// `None` if either distribution has no power in 375..=675 nm.
pub fn spectral_similarity_index(test: &SpectralDistribution, reference: &SpectralDistribution) -> Option<f64> {
    let t = bins(test)?;
    let r = bins(reference)?;
    let mean = r.iter().sum::<f64>() / BINS as f64;

    let mut padded = [0.0; BINS + 2];
    for i in 0..BINS {
        padded[i + 1] = WEIGHTS[i] * (t[i] - r[i]) / (r[i] + mean);
    }

    let at = |j: isize| -> f64 {
        usize::try_from(j).ok().and_then(|j| padded.get(j)).copied().unwrap_or(0.0)
    };
    let energy: f64 = (0..padded.len() as isize)
        .map(|j| KERNEL[0] * at(j - 1) + KERNEL[1] * at(j) + KERNEL[2] * at(j + 1))
        .map(|c| c * c)
        .sum();

    Some((100.0 - 32.0 * energy.sqrt()).round())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SpectrumType, illuminant};

    fn spd(name: &str) -> &'static SpectralDistribution {
        illuminant::find(name).unwrap().spd().unwrap()
    }

    #[test]
    fn test_identical_shape_scores_100() {
        let d65 = spd("D65");
        assert_eq!(spectral_similarity_index(d65, d65), Some(100.0));
        // Scale does not matter
        let doubled = SpectralDistribution::build(
            d65.values().iter().map(|v| 2.0 * v).collect(),
            d65.start(),
            d65.stop(),
            d65.interval(),
            SpectrumType::Emissive,
        )
        .unwrap();
        assert_eq!(spectral_similarity_index(&doubled, d65), Some(100.0));
    }

    #[test]
    fn test_closer_daylights_score_higher() {
        let d50 = spd("D50");
        let near = spectral_similarity_index(spd("D55"), d50).unwrap();
        let far = spectral_similarity_index(spd("A"), d50).unwrap();
        assert!(near > far, "D55 {near}, A {far}");
        assert!(near < 100.0);
    }

    #[test]
    fn test_no_power_in_range() {
        let ir = SpectralDistribution::build(vec![1.0; 11], 700.0, 800.0, 10.0, SpectrumType::Emissive).unwrap();
        assert_eq!(spectral_similarity_index(&ir, spd("D65")), None);
    }

    #[test]
    fn test_weights_shape() {
        assert_eq!(WEIGHTS.iter().filter(|&&w| w == 1.0).count(), 23);
        assert!(WEIGHTS.iter().all(|&w| w > 0.0 && w <= 1.0));
    }
}
