//! Color evaluation samples.
//!
//! 99 smooth reflectances on 380..=780 nm at 5 nm, generated from a fixed
//! low-discrepancy sequence so the set is identical on every run. Each
//! sample is one of three shapes:
//!
//! | `index % 3` | Shape |
//! |-------------|-------|
//! | 0 | Gaussian band over a base level |
//! | 1 | Gaussian notch below a high level |
//! | 2 | Logistic edge, rising or falling |
//!
//! Band centers are spread over 400..700 nm, which populates all sixteen
//! CAM02-UCS hue bins under daylight and Planckian references.

use std::sync::OnceLock;

use crate::{SpectralDistribution, SpectrumType};

/// Number of evaluation samples.
pub const SAMPLE_COUNT: usize = 99;
/// First sample wavelength (nm).
pub const SAMPLE_START: f64 = 380.0;
/// Last sample wavelength (nm).
pub const SAMPLE_STOP: f64 = 780.0;
/// Sample interval (nm).
pub const SAMPLE_INTERVAL: f64 = 5.0;

#[inline]
fn frac(x: f64) -> f64 {
    x - x.floor()
}

/// Reflectance of sample `index` at `wavelength` nm.
pub fn reflectance(index: usize, wavelength: f64) -> f64 {
    let i = index as f64;
    let center = 400.0 + 300.0 * frac(i * 0.618_033_988_7);
    let width = 20.0 + 40.0 * frac(i * 0.414_213_562_4);
    let amplitude = 0.35 + 0.45 * frac(i * 0.732_050_807_6);
    let base = 0.04 + 0.2 * frac(i * 0.236_067_977_5);

    let band = (-0.5 * ((wavelength - center) / width).powi(2)).exp();
    let value = match index % 3 {
        0 => base + amplitude * band,
        1 => base + amplitude * (1.0 - band),
        _ => {
            let edge = 1.0 / (1.0 + (-(wavelength - center) / (width / 4.0)).exp());
            let rising = (index / 3) % 2 == 0;
            base + amplitude * if rising { edge } else { 1.0 - edge }
        }
    };
    value.clamp(0.0, 1.0)
}

/// All samples, built on first use.
pub fn evaluation_samples() -> &'static [SpectralDistribution] {
    static SAMPLES: OnceLock<Vec<SpectralDistribution>> = OnceLock::new();
    SAMPLES.get_or_init(|| {
        (0..SAMPLE_COUNT)
            .map(|i| {
                SpectralDistribution::sample(
                    SAMPLE_START,
                    SAMPLE_STOP,
                    SAMPLE_INTERVAL,
                    SpectrumType::Reflective,
                    |w| reflectance(i, w),
                )
            })
            .collect()
    })
}
