//! Uniformly sampled spectral distributions.
//!
//! A [`SpectralDistribution`] maps wavelengths `start, start + interval, ...,
//! stop` (nm) to values on `[0, 1]`. It is immutable once built;
//! [`SpectralDistribution::interpolate`] returns a new instance.
//!
//! # Valid ranges
//!
//! | Field | Range |
//! |-------|-------|
//! | `start` | 360..=790 nm |
//! | `stop` | 400..=830 nm, greater than `start` |
//! | `interval` | 1..=20 nm, dividing `stop - start` |
//! | values | 0..=1, one per wavelength |
//!
//! # Usage
//!
//! ```rust
//! use chroma_spectral::{SpectralDistribution, SpectrumType};
//!
//! let values = vec![0.5; 9];
//! let sd = SpectralDistribution::build(values, 400.0, 720.0, 40.0, SpectrumType::Reflective);
//! assert!(sd.is_err()); // interval above 20 nm
//!
//! let sd = SpectralDistribution::build(vec![0.5; 17], 400.0, 720.0, 20.0, SpectrumType::Reflective).unwrap();
//! let fine = sd.interpolate(5.0).unwrap();
//! assert_eq!(fine.len(), 65);
//! ```

use std::fmt;
use std::str::FromStr;

use chroma_math::sprague;
use serde::{Deserialize, Serialize};

use crate::{SpectralError, SpectralResult};

/// Shortest accepted start wavelength (nm).
pub const MIN_START: f64 = 360.0;
/// Longest accepted start wavelength (nm).
pub const MAX_START: f64 = 790.0;
/// Shortest accepted stop wavelength (nm).
pub const MIN_STOP: f64 = 400.0;
/// Longest accepted stop wavelength (nm).
pub const MAX_STOP: f64 = 830.0;
/// Accepted sampling intervals (nm).
pub const INTERVAL_RANGE: (f64, f64) = (1.0, 20.0);
/// Accepted interpolation intervals (nm).
pub const INTERPOLATION_RANGE: (f64, f64) = (1.0, 5.0);

const GRID_EPSILON: f64 = 1e-9;

/// What a distribution measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpectrumType {
    /// Light source (relative spectral power).
    Emissive,
    /// Surface reflectance factor.
    Reflective,
    /// Transmittance factor.
    Transmissive,
}

impl SpectrumType {
    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Emissive => "Emissive",
            Self::Reflective => "Reflective",
            Self::Transmissive => "Transmissive",
        }
    }

    /// True for reflective and transmissive data, which need an illuminant.
    pub const fn is_object(self) -> bool {
        !matches!(self, Self::Emissive)
    }
}

impl fmt::Display for SpectrumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpectrumType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "emissive" => Ok(Self::Emissive),
            "reflective" => Ok(Self::Reflective),
            "transmissive" => Ok(Self::Transmissive),
            _ => Err(format!("unknown spectrum type '{s}'")),
        }
    }
}

/// A uniformly sampled spectral distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralDistribution {
    start: f64,
    stop: f64,
    interval: f64,
    kind: SpectrumType,
    values: Vec<f64>,
}

impl SpectralDistribution {
    /// Validates and builds a distribution.
    ///
    /// # Errors
    ///
    /// [`SpectralError::SpectralRange`] when a wavelength parameter, the
    /// sample count or a sample value is out of range.
    pub fn build(
        values: Vec<f64>,
        start: f64,
        stop: f64,
        interval: f64,
        kind: SpectrumType,
    ) -> SpectralResult<Self> {
        if !(MIN_START..=MAX_START).contains(&start) {
            return Err(SpectralError::range("start", start, format!("{MIN_START}..={MAX_START} nm")));
        }
        if !(MIN_STOP..=MAX_STOP).contains(&stop) {
            return Err(SpectralError::range("stop", stop, format!("{MIN_STOP}..={MAX_STOP} nm")));
        }
        if stop <= start {
            return Err(SpectralError::range("stop", stop, format!("greater than start ({start} nm)")));
        }
        let (lo, hi) = INTERVAL_RANGE;
        if !(lo..=hi).contains(&interval) {
            return Err(SpectralError::range("interval", interval, format!("{lo}..={hi} nm")));
        }
        let steps = (stop - start) / interval;
        if (steps - steps.round()).abs() > GRID_EPSILON {
            return Err(SpectralError::range(
                "interval",
                interval,
                format!("a divisor of stop - start ({} nm)", stop - start),
            ));
        }
        let expected = steps.round() as usize + 1;
        if values.len() != expected {
            return Err(SpectralError::range(
                "values.len",
                values.len() as f64,
                format!("{expected} samples for {start}..={stop} nm at {interval} nm"),
            ));
        }
        if let Some((i, &v)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(SpectralError::range(format!("values[{i}]"), v, "0..=1"));
        }

        Ok(Self::from_parts(values, start, interval, kind))
    }

    /// Builds without validation. Used for derived distributions.
    pub(crate) fn from_parts(values: Vec<f64>, start: f64, interval: f64, kind: SpectrumType) -> Self {
        let stop = start + interval * values.len().saturating_sub(1) as f64;
        Self {
            start,
            stop,
            interval,
            kind,
            values,
        }
    }

    /// Samples `f` on `start..=stop` at `interval`.
    pub(crate) fn sample(start: f64, stop: f64, interval: f64, kind: SpectrumType, f: impl Fn(f64) -> f64) -> Self {
        let n = ((stop - start) / interval).round() as usize + 1;
        let values = (0..n).map(|i| f(start + i as f64 * interval)).collect();
        Self::from_parts(values, start, interval, kind)
    }

    /// First wavelength (nm).
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Last wavelength (nm).
    pub fn stop(&self) -> f64 {
        self.stop
    }

    /// Sampling interval (nm).
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Spectrum type.
    pub fn kind(&self) -> SpectrumType {
        self.kind
    }

    /// Sample values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample wavelengths.
    pub fn wavelengths(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.values.len()).map(move |i| self.start + i as f64 * self.interval)
    }

    /// `(wavelength, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.wavelengths().zip(self.values.iter().copied())
    }

    /// Value at an arbitrary wavelength (Sprague), zero outside the range.
    pub fn value_at(&self, wavelength: f64) -> f64 {
        if wavelength < self.start - GRID_EPSILON || wavelength > self.stop + GRID_EPSILON {
            return 0.0;
        }
        sprague(&self.values, (wavelength - self.start) / self.interval)
    }

    /// Wavelength of the largest sample.
    pub fn peak_wavelength(&self) -> f64 {
        self.iter()
            .fold((self.start, f64::NEG_INFINITY), |best, (w, v)| if v > best.1 { (w, v) } else { best })
            .0
    }

    /// Resamples to `target` nm with Sprague interpolation.
    ///
    /// The stop wavelength becomes the last grid point not past the old stop.
    /// Original samples lying on the new grid are reproduced exactly.
    ///
    /// # Errors
    ///
    /// [`SpectralError::InterpolationRange`] if `target` is outside [1, 5] nm.
    pub fn interpolate(&self, target: f64) -> SpectralResult<Self> {
        let (lo, hi) = INTERPOLATION_RANGE;
        if !(lo..=hi).contains(&target) {
            return Err(SpectralError::InterpolationRange { interval: target });
        }
        let steps = ((self.stop - self.start) / target + GRID_EPSILON).floor();
        let stop = self.start + steps * target;
        Ok(Self::sample(self.start, stop, target, self.kind, |w| self.value_at(w)))
    }

    /// Resamples onto an arbitrary grid, zero outside the source range.
    pub fn resample(&self, start: f64, stop: f64, interval: f64) -> Self {
        Self::sample(start, stop, interval, self.kind, |w| self.value_at(w))
    }

    /// Multiplies two distributions sample by sample on this grid.
    pub fn product(&self, other: &SpectralDistribution, kind: SpectrumType) -> Self {
        let values = self.iter().map(|(w, v)| v * other.value_at(w)).collect();
        Self::from_parts(values, self.start, self.interval, kind)
    }

    /// Scales values so the maximum is one.
    pub(crate) fn normalized(mut self) -> Self {
        let max = self.values.iter().copied().fold(0.0, f64::max);
        if max > 0.0 {
            self.values.iter_mut().for_each(|v| *v /= max);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn smooth(start: f64, stop: f64, interval: f64) -> SpectralDistribution {
        let n = ((stop - start) / interval) as usize + 1;
        let values = (0..n)
            .map(|i| {
                let w = start + i as f64 * interval;
                0.5 + 0.4 * ((w - 360.0) / 60.0).sin()
            })
            .collect();
        SpectralDistribution::build(values, start, stop, interval, SpectrumType::Reflective).unwrap()
    }

    #[test]
    fn test_build_ranges() {
        let ok = |s, e, i, n| SpectralDistribution::build(vec![0.5; n], s, e, i, SpectrumType::Emissive);
        assert!(ok(360.0, 830.0, 10.0, 48).is_ok());
        assert!(ok(350.0, 830.0, 10.0, 49).is_err());
        assert!(ok(380.0, 840.0, 10.0, 47).is_err());
        assert!(ok(500.0, 450.0, 10.0, 6).is_err());
        assert!(ok(400.0, 700.0, 25.0, 13).is_err());
        assert!(ok(400.0, 700.0, 0.5, 601).is_err());
        assert!(ok(400.0, 700.0, 7.0, 43).is_err());
        assert!(ok(400.0, 700.0, 10.0, 30).is_err());
        assert!(ok(790.0, 830.0, 20.0, 3).is_ok());
    }

    #[test]
    fn test_value_range() {
        let mut values = vec![0.5; 31];
        values[7] = 1.2;
        let err = SpectralDistribution::build(values, 400.0, 700.0, 10.0, SpectrumType::Reflective).unwrap_err();
        match err {
            SpectralError::SpectralRange { field, value, .. } => {
                assert_eq!(field, "values[7]");
                assert_eq!(value, 1.2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_interpolate_reproduces_samples() {
        let sd = smooth(400.0, 700.0, 5.0);
        let fine = sd.interpolate(1.0).unwrap();
        assert_eq!(fine.len(), 301);
        for (w, v) in sd.iter() {
            let i = ((w - fine.start()) / fine.interval()).round() as usize;
            assert_abs_diff_eq!(fine.values()[i], v, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_interpolate_stop_rounding() {
        let sd = smooth(400.0, 720.0, 20.0);
        let out = sd.interpolate(3.0).unwrap();
        assert_eq!(out.stop(), 718.0);
        assert_eq!(out.start(), 400.0);
    }

    #[test]
    fn test_interpolate_range() {
        let sd = smooth(400.0, 700.0, 10.0);
        assert!(matches!(sd.interpolate(10.0), Err(SpectralError::InterpolationRange { .. })));
        assert!(matches!(sd.interpolate(0.5), Err(SpectralError::InterpolationRange { .. })));
    }

    #[test]
    fn test_double_interpolation_roundtrip() {
        let sd = smooth(380.0, 780.0, 5.0);
        let back = sd.interpolate(1.0).unwrap().interpolate(5.0).unwrap();
        assert_eq!(back.len(), sd.len());
        for (a, b) in back.values().iter().zip(sd.values()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_value_at_and_peak() {
        let sd = SpectralDistribution::build(vec![0.1, 0.9, 0.3], 500.0, 520.0, 10.0, SpectrumType::Emissive).unwrap();
        assert_eq!(sd.value_at(300.0), 0.0);
        assert_abs_diff_eq!(sd.value_at(505.0), 0.5, epsilon = 1e-12);
        assert_eq!(sd.peak_wavelength(), 510.0);
    }
}
