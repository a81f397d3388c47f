//! Dominant wavelength and purity.
//!
//! A ray from the white point through the sample chromaticity meets the
//! boundary of the chromaticity diagram either on the spectral locus (the
//! dominant wavelength) or on the purple line. Purple samples have no
//! dominant wavelength and report the negated complementary wavelength
//! instead, the wavelength hit by the opposite ray.
//!
//! ```text
//! w = white, s = sample, d = boundary hit on the ray w -> s
//!
//! excitation purity    pe = |s - w| / |d - w|
//! colorimetric purity  pc = pe * y_d / y_s
//! ```
//!
//! The locus is the observer's 1 nm chromaticity polyline over 360..=830 nm;
//! wavelengths are interpolated along the segment that is hit.
//!
//! # Usage
//!
//! ```rust
//! use chroma_spectral::{Observer, purity::dominant_wavelength};
//!
//! let d65 = (0.31271, 0.32902);
//! let green = Observer::Cie1931.cmf(520.0);
//! let xy = (green.x / green.sum(), green.y / green.sum());
//! let d = dominant_wavelength(xy, d65, Observer::Cie1931).unwrap();
//! assert!((d.dominant - 520.0).abs() < 0.5);
//! assert!((d.excitation_purity - 1.0).abs() < 1e-4);
//! ```

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::Observer;
use crate::observer::CMF_START;

/// Boundary quantities of one chromaticity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DominantWavelength {
    /// Dominant wavelength (nm), negated complementary wavelength for purples.
    pub dominant: f64,
    /// Complementary wavelength (nm), negated dominant wavelength when the
    /// opposite ray meets the purple line.
    pub complementary: f64,
    /// Distance to the white relative to the boundary's, in [0, 1] inside
    /// the diagram.
    pub excitation_purity: f64,
    /// Luminance share of the boundary stimulus.
    pub colorimetric_purity: f64,
}

/// Where a ray from the white leaves the diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Hit {
    Locus { wavelength: f64, point: (f64, f64) },
    Purple { point: (f64, f64) },
}

impl Hit {
    fn point(self) -> (f64, f64) {
        match self {
            Self::Locus { point, .. } | Self::Purple { point } => point,
        }
    }
}

/// `(wavelength, x, y)` of the spectral locus, 1 nm steps.
fn locus(observer: Observer) -> &'static [(f64, f64, f64)] {
    static LOCI: OnceLock<[Vec<(f64, f64, f64)>; 2]> = OnceLock::new();
    let loci = LOCI.get_or_init(|| {
        let build = |o: Observer| {
            o.table()
                .iter()
                .enumerate()
                .filter(|(_, c)| c.sum() > 0.0)
                .map(|(i, c)| (CMF_START + i as f64, c.x / c.sum(), c.y / c.sum()))
                .collect()
        };
        [build(Observer::Cie1931), build(Observer::Cie1964)]
    });
    &loci[observer.index()]
}

/// Tolerance on the segment parameter so rays through a vertex still hit.
const SEGMENT_SLACK: f64 = 1e-9;

#[inline]
fn cross(a: (f64, f64), b: (f64, f64)) -> f64 {
    a.0 * b.1 - a.1 * b.0
}

/// Ray parameter `t > 0` and segment parameter `s` in [0, 1] of the crossing
/// of `origin + t·dir` with segment `a..b`.
fn intersect(origin: (f64, f64), dir: (f64, f64), a: (f64, f64), b: (f64, f64)) -> Option<(f64, f64)> {
    let e = (b.0 - a.0, b.1 - a.1);
    let denom = cross(dir, e);
    if denom.abs() < 1e-15 {
        return None;
    }
    let ao = (a.0 - origin.0, a.1 - origin.1);
    let t = cross(ao, e) / denom;
    let s = cross(ao, dir) / denom;
    (t > 0.0 && (-SEGMENT_SLACK..=1.0 + SEGMENT_SLACK).contains(&s)).then_some((t, s.clamp(0.0, 1.0)))
}

/// First boundary crossing of the ray from `white` along `dir`.
fn cast(white: (f64, f64), dir: (f64, f64), observer: Observer) -> Option<Hit> {
    let locus = locus(observer);
    let (first, last) = (locus.first()?, locus.last()?);

    let on_locus = locus.windows(2).filter_map(|pair| {
        let ((wa, xa, ya), (wb, xb, yb)) = (pair[0], pair[1]);
        intersect(white, dir, (xa, ya), (xb, yb)).map(|(t, s)| {
            let point = (xa + s * (xb - xa), ya + s * (yb - ya));
            (t, Hit::Locus { wavelength: wa + s * (wb - wa), point })
        })
    });
    let (a, b) = ((last.1, last.2), (first.1, first.2));
    let on_purple = intersect(white, dir, a, b).map(|(t, s)| {
        (t, Hit::Purple { point: (a.0 + s * (b.0 - a.0), a.1 + s * (b.1 - a.1)) })
    });

    on_locus
        .chain(on_purple)
        .min_by(|p, q| p.0.total_cmp(&q.0))
        .map(|(_, hit)| hit)
}

/// Dominant and complementary wavelength, excitation and colorimetric
/// purity of chromaticity `xy` seen against `white`.
///
/// `None` when `xy` coincides with the white, is not finite, or the white
/// lies outside the observer's diagram.
pub fn dominant_wavelength(xy: (f64, f64), white: (f64, f64), observer: Observer) -> Option<DominantWavelength> {
    let dir = (xy.0 - white.0, xy.1 - white.1);
    let len = dir.0.hypot(dir.1);
    if !len.is_finite() || len < 1e-12 {
        return None;
    }

    let forward = cast(white, dir, observer)?;
    let backward = cast(white, (-dir.0, -dir.1), observer)?;
    let (dominant, complementary) = match (forward, backward) {
        (Hit::Locus { wavelength: d, .. }, Hit::Locus { wavelength: c, .. }) => (d, c),
        (Hit::Locus { wavelength: d, .. }, Hit::Purple { .. }) => (d, -d),
        (Hit::Purple { .. }, Hit::Locus { wavelength: c, .. }) => (-c, c),
        (Hit::Purple { .. }, Hit::Purple { .. }) => return None,
    };

    let boundary = forward.point();
    let span = (boundary.0 - white.0).hypot(boundary.1 - white.1);
    let excitation_purity = len / span;
    let colorimetric_purity = if xy.1 > 0.0 { excitation_purity * boundary.1 / xy.1 } else { 0.0 };

    Some(DominantWavelength {
        dominant,
        complementary,
        excitation_purity,
        colorimetric_purity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const D65: (f64, f64) = (0.31271, 0.32902);

    fn spectral_xy(observer: Observer, nm: f64) -> (f64, f64) {
        let c = observer.cmf(nm);
        (c.x / c.sum(), c.y / c.sum())
    }

    fn mix(a: (f64, f64), b: (f64, f64), t: f64) -> (f64, f64) {
        (a.0 + t * (b.0 - a.0), a.1 + t * (b.1 - a.1))
    }

    #[test]
    fn test_monochromatic_stimuli() {
        for o in Observer::ALL {
            for nm in [470.0, 520.0, 580.0, 610.0] {
                let d = dominant_wavelength(spectral_xy(o, nm), D65, o).unwrap();
                assert_abs_diff_eq!(d.dominant, nm, epsilon = 0.5);
                assert_abs_diff_eq!(d.excitation_purity, 1.0, epsilon = 1e-4);
                assert_abs_diff_eq!(d.colorimetric_purity, 1.0, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_purity_scales_toward_white() {
        let o = Observer::Cie1931;
        let xy = mix(D65, spectral_xy(o, 580.0), 0.25);
        let d = dominant_wavelength(xy, D65, o).unwrap();
        assert_abs_diff_eq!(d.dominant, 580.0, epsilon = 0.5);
        assert_abs_diff_eq!(d.excitation_purity, 0.25, epsilon = 1e-6);
        assert!(d.colorimetric_purity > 0.0 && d.colorimetric_purity < 1.0);
        // Yellow's complement is blue
        assert!((440.0..490.0).contains(&d.complementary), "{}", d.complementary);
    }

    #[test]
    fn test_purple_reports_negative_dominant() {
        let o = Observer::Cie1931;
        let ends = locus(o);
        let (blue, red) = (ends[0], ends[ends.len() - 1]);
        let purple = mix((blue.1, blue.2), (red.1, red.2), 0.5);
        let xy = mix(D65, purple, 0.5);
        let d = dominant_wavelength(xy, D65, o).unwrap();
        assert!(d.dominant < 0.0, "{}", d.dominant);
        assert_abs_diff_eq!(d.dominant, -d.complementary, epsilon = 1e-12);
        // Purples complement greens
        assert!((490.0..570.0).contains(&d.complementary), "{}", d.complementary);
        assert_abs_diff_eq!(d.excitation_purity, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_white_has_no_dominant_wavelength() {
        assert!(dominant_wavelength(D65, D65, Observer::Cie1931).is_none());
        assert!(dominant_wavelength((f64::NAN, 0.3), D65, Observer::Cie1931).is_none());
    }
}
