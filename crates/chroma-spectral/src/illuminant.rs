//! Standard illuminant catalog.
//!
//! Each [`Illuminant`] is either backed by a spectral power distribution
//! (synthesized on 360..=830 nm at 5 nm, normalized to a peak of one) or
//! defined by chromaticity only. White points use the published CIE
//! chromaticities where they exist and fall back to integrating the SPD.
//!
//! | Illuminant | Source |
//! |------------|--------|
//! | A | CIE formula, 2856 K |
//! | D50, D55, D60, D65, D75 | CIE daylight basis S0, S1, S2 |
//! | E | equal energy |
//! | ISO 7589 sensitometric | daylight D55, Planckian 3200 K / 3400 K |
//! | B, C, FL1..FL12 | chromaticity only |
//!
//! # Usage
//!
//! ```rust
//! use chroma_spectral::{illuminant, Observer};
//!
//! let d65 = illuminant::find("D65").unwrap();
//! let w = d65.white_point(Observer::Cie1931);
//! assert!((w.x - 0.95047).abs() < 1e-4);
//! assert!(d65.spd().is_some());
//! assert!(illuminant::find("FL2").unwrap().spd().is_none());
//! ```

use std::sync::OnceLock;

use chroma_math::{Vec3, lerp};

use crate::colorimetry::spd_white_point;
use crate::{Observer, SpectralDistribution, SpectrumType};

/// Grid start of synthesized SPDs (nm).
pub const SPD_START: f64 = 360.0;
/// Grid stop of synthesized SPDs (nm).
pub const SPD_STOP: f64 = 830.0;
/// Grid interval of synthesized SPDs (nm).
pub const SPD_INTERVAL: f64 = 5.0;

/// Second radiation constant (m·K).
pub const C2: f64 = 1.4388e-2;

/// How an illuminant's SPD is synthesized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpdSource {
    /// CIE daylight at the given correlated color temperature.
    DSeries {
        /// Correlated color temperature (K).
        cct: f64,
    },
    /// Blackbody radiator.
    Planckian {
        /// Temperature (K).
        cct: f64,
    },
    /// CIE illuminant A.
    CieA,
    /// Equal energy.
    Equal,
    /// No SPD, chromaticity only.
    None,
}

/// A standard illuminant from the catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Illuminant {
    name: &'static str,
    source: SpdSource,
    chromaticity: Option<[(f64, f64); 2]>,
}

impl Illuminant {
    const fn with_spd(name: &'static str, source: SpdSource, xy: Option<[(f64, f64); 2]>) -> Self {
        Self {
            name,
            source,
            chromaticity: xy,
        }
    }

    const fn from_xy(name: &'static str, xy2: (f64, f64), xy10: (f64, f64)) -> Self {
        Self {
            name,
            source: SpdSource::None,
            chromaticity: Some([xy2, xy10]),
        }
    }

    /// Identifier.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// SPD synthesis.
    pub fn source(&self) -> SpdSource {
        self.source
    }

    /// Published xy chromaticity for the 2° and 10° observers.
    pub fn chromaticity(&self) -> Option<[(f64, f64); 2]> {
        self.chromaticity
    }

    /// True if a spectral power distribution is available.
    pub fn has_spd(&self) -> bool {
        !matches!(self.source, SpdSource::None)
    }

    /// Spectral power distribution on 360..=830 nm at 5 nm, peak one.
    ///
    /// Built on first use and cached for the process lifetime.
    pub fn spd(&self) -> Option<&'static SpectralDistribution> {
        static CACHE: OnceLock<Vec<Option<SpectralDistribution>>> = OnceLock::new();
        let cache = CACHE.get_or_init(|| ALL.iter().map(|i| synthesize(i.source)).collect());
        ALL.iter()
            .position(|i| i.name == self.name)
            .and_then(|idx| cache[idx].as_ref())
    }

    /// White point XYZ (`Y = 1`) for `observer`.
    pub fn white_point(&self, observer: Observer) -> Vec3 {
        if let Some(xy) = self.chromaticity {
            let (x, y) = xy[observer.index()];
            return Vec3::new(x / y, 1.0, (1.0 - x - y) / y);
        }
        match self.spd() {
            Some(spd) => spd_white_point(spd, observer),
            None => Vec3::ONE,
        }
    }

    /// White point integrated from the SPD (`Y = 1`), if there is one.
    pub fn spectral_white_point(&self, observer: Observer) -> Option<Vec3> {
        self.spd().map(|spd| spd_white_point(spd, observer))
    }
}

fn synthesize(source: SpdSource) -> Option<SpectralDistribution> {
    let kind = SpectrumType::Emissive;
    let grid = |f: &dyn Fn(f64) -> f64| {
        SpectralDistribution::sample(SPD_START, SPD_STOP, SPD_INTERVAL, kind, f).normalized()
    };
    match source {
        SpdSource::DSeries { cct } => Some(d_series(cct)),
        SpdSource::Planckian { cct } => Some(grid(&|w| planck(w, cct))),
        SpdSource::CieA => Some(grid(&cie_a)),
        SpdSource::Equal => Some(grid(&|_| 1.0)),
        SpdSource::None => None,
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Every illuminant, CIE list first.
pub const ALL: [Illuminant; 25] = [
    Illuminant::with_spd("A", SpdSource::CieA, Some([(0.44757, 0.40745), (0.45117, 0.40594)])),
    Illuminant::from_xy("B", (0.34842, 0.35161), (0.34980, 0.35270)),
    Illuminant::from_xy("C", (0.31006, 0.31616), (0.31039, 0.31905)),
    Illuminant::with_spd("D50", SpdSource::DSeries { cct: 5003.0 }, Some([(0.34567, 0.35850), (0.34773, 0.35952)])),
    Illuminant::with_spd("D55", SpdSource::DSeries { cct: 5503.0 }, Some([(0.33242, 0.34743), (0.33411, 0.34877)])),
    Illuminant::with_spd("D60", SpdSource::DSeries { cct: 6003.0 }, None),
    Illuminant::with_spd("D65", SpdSource::DSeries { cct: 6504.0 }, Some([(0.31270, 0.32900), (0.31382, 0.33100)])),
    Illuminant::with_spd("D75", SpdSource::DSeries { cct: 7504.0 }, Some([(0.29902, 0.31485), (0.29968, 0.31740)])),
    Illuminant::with_spd("E", SpdSource::Equal, Some([(1.0 / 3.0, 1.0 / 3.0), (1.0 / 3.0, 1.0 / 3.0)])),
    Illuminant::from_xy("FL1", (0.31310, 0.33727), (0.31811, 0.33559)),
    Illuminant::from_xy("FL2", (0.37208, 0.37529), (0.37925, 0.36733)),
    Illuminant::from_xy("FL3", (0.40910, 0.39430), (0.41761, 0.38324)),
    Illuminant::from_xy("FL4", (0.44018, 0.40329), (0.44920, 0.39074)),
    Illuminant::from_xy("FL5", (0.31379, 0.34531), (0.31975, 0.34246)),
    Illuminant::from_xy("FL6", (0.37790, 0.38835), (0.38660, 0.37847)),
    Illuminant::from_xy("FL7", (0.31292, 0.32933), (0.31569, 0.32960)),
    Illuminant::from_xy("FL8", (0.34588, 0.35875), (0.34902, 0.35939)),
    Illuminant::from_xy("FL9", (0.37417, 0.37281), (0.37829, 0.37045)),
    Illuminant::from_xy("FL10", (0.34609, 0.35986), (0.35090, 0.35444)),
    Illuminant::from_xy("FL11", (0.38052, 0.37713), (0.38541, 0.37123)),
    Illuminant::from_xy("FL12", (0.43695, 0.40441), (0.44256, 0.39717)),
    Illuminant::with_spd("ISO 7589 Sensitometric Daylight", SpdSource::DSeries { cct: 5503.0 }, None),
    Illuminant::with_spd("ISO 7589 Sensitometric Studio Tungsten", SpdSource::Planckian { cct: 3200.0 }, None),
    Illuminant::with_spd("ISO 7589 Sensitometric Photoflood", SpdSource::Planckian { cct: 3400.0 }, None),
    Illuminant::with_spd("ISO 7589 Sensitometric Printer", SpdSource::Planckian { cct: 3200.0 }, None),
];

/// Names of the `CIE` selection list.
pub const CIE_LIST: [&str; 21] = [
    "A", "B", "C", "D50", "D55", "D60", "D65", "D75", "E", "FL1", "FL2", "FL3", "FL4", "FL5", "FL6", "FL7",
    "FL8", "FL9", "FL10", "FL11", "FL12",
];

/// Names of the `ISO_7589` selection list.
pub const ISO_7589_LIST: [&str; 4] = [
    "ISO 7589 Sensitometric Daylight",
    "ISO 7589 Sensitometric Studio Tungsten",
    "ISO 7589 Sensitometric Photoflood",
    "ISO 7589 Sensitometric Printer",
];

/// Finds an illuminant by name (case-insensitive).
pub fn find(name: &str) -> Option<&'static Illuminant> {
    ALL.iter().find(|i| i.name.eq_ignore_ascii_case(name.trim()))
}

/// Resolves a selection list name (`CIE`, `ISO_7589`, `All`).
pub fn list(name: &str) -> Option<Vec<&'static Illuminant>> {
    let names: &[&str] = match name.to_ascii_uppercase().as_str() {
        "CIE" => &CIE_LIST,
        "ISO_7589" | "ISO 7589" => &ISO_7589_LIST,
        "ALL" => return Some(ALL.iter().collect()),
        _ => return None,
    };
    Some(names.iter().filter_map(|n| find(n)).collect())
}

// ============================================================================
// SPD synthesis
// ============================================================================

/// CIE daylight basis functions S0, S1, S2 on 300..=830 nm at 10 nm.
const DAYLIGHT_BASIS: [[f64; 3]; 54] = [
    [0.04, 0.02, 0.00],
    [6.00, 4.50, 2.00],
    [29.60, 22.40, 4.00],
    [55.30, 42.00, 8.50],
    [57.30, 40.60, 7.80],
    [61.80, 41.60, 6.70],
    [61.50, 38.00, 5.30],
    [68.80, 42.40, 6.10],
    [63.40, 38.50, 3.00],
    [65.80, 35.00, 1.20],
    [94.80, 43.40, -1.10],
    [104.80, 46.30, -0.50],
    [105.90, 43.90, -0.70],
    [96.80, 37.10, -1.20],
    [113.90, 36.70, -2.60],
    [125.60, 35.90, -2.90],
    [125.50, 32.60, -2.80],
    [121.30, 27.90, -2.60],
    [121.30, 24.30, -2.60],
    [113.50, 20.10, -1.80],
    [113.10, 16.20, -1.50],
    [110.80, 13.20, -1.30],
    [106.50, 8.60, -1.20],
    [108.80, 6.10, -1.00],
    [105.30, 4.20, -0.50],
    [104.40, 1.90, -0.30],
    [100.00, 0.00, 0.00],
    [96.00, -1.60, 0.20],
    [95.10, -3.50, 0.50],
    [89.10, -3.50, 2.10],
    [90.50, -5.80, 3.20],
    [90.30, -7.20, 4.10],
    [88.40, -8.60, 4.70],
    [84.00, -9.50, 5.10],
    [85.10, -10.90, 6.70],
    [81.90, -10.70, 7.30],
    [82.60, -12.00, 8.60],
    [84.90, -14.00, 9.80],
    [81.30, -13.60, 10.20],
    [71.90, -12.00, 8.30],
    [74.30, -13.30, 9.60],
    [76.40, -12.90, 8.50],
    [63.30, -10.60, 7.00],
    [71.70, -11.60, 7.60],
    [77.00, -12.20, 8.00],
    [65.20, -10.20, 6.70],
    [47.70, -7.80, 5.20],
    [68.60, -11.20, 7.40],
    [65.00, -10.40, 6.80],
    [66.00, -10.60, 7.00],
    [61.00, -9.70, 6.40],
    [53.30, -8.30, 5.50],
    [58.90, -9.30, 6.10],
    [61.90, -9.80, 6.50],
];

/// CIE daylight chromaticity for a correlated color temperature.
///
/// Valid from 4000 K to 25000 K.
pub fn daylight_chromaticity(cct: f64) -> (f64, f64) {
    let t = cct;
    let x = if t <= 7000.0 {
        -4.6070e9 / t.powi(3) + 2.9678e6 / t.powi(2) + 0.09911e3 / t + 0.244063
    } else {
        -2.0064e9 / t.powi(3) + 1.9018e6 / t.powi(2) + 0.24748e3 / t + 0.237040
    };
    (x, -3.0 * x * x + 2.87 * x - 0.275)
}

fn daylight_basis(w: f64) -> [f64; 3] {
    let pos = ((w - 300.0) / 10.0).clamp(0.0, 53.0);
    let i = (pos.floor() as usize).min(52);
    let t = pos - i as f64;
    let (a, b) = (DAYLIGHT_BASIS[i], DAYLIGHT_BASIS[i + 1]);
    [lerp(a[0], b[0], t), lerp(a[1], b[1], t), lerp(a[2], b[2], t)]
}

/// CIE D-series SPD at `cct` on the synthesis grid, peak one.
pub fn d_series(cct: f64) -> SpectralDistribution {
    let (x, y) = daylight_chromaticity(cct);
    let m = 0.0241 + 0.2562 * x - 0.7341 * y;
    let m1 = (-1.3515 - 1.7703 * x + 5.9114 * y) / m;
    let m2 = (0.0300 - 31.4424 * x + 30.0717 * y) / m;
    SpectralDistribution::sample(SPD_START, SPD_STOP, SPD_INTERVAL, SpectrumType::Emissive, |w| {
        let [s0, s1, s2] = daylight_basis(w);
        (s0 + m1 * s1 + m2 * s2).max(0.0)
    })
    .normalized()
}

/// Relative blackbody spectral radiance at `wavelength` nm.
pub fn planck(wavelength: f64, cct: f64) -> f64 {
    let l = wavelength * 1e-9;
    1.0 / (l.powi(5) * ((C2 / (l * cct)).exp_m1()))
}

/// Planckian SPD at `cct` on the synthesis grid, peak one.
pub fn planckian(cct: f64) -> SpectralDistribution {
    SpectralDistribution::sample(SPD_START, SPD_STOP, SPD_INTERVAL, SpectrumType::Emissive, |w| planck(w, cct))
        .normalized()
}

fn cie_a(w: f64) -> f64 {
    let c: f64 = 1.435e7;
    100.0 * (560.0 / w).powi(5) * ((c / (2848.0 * 560.0)).exp_m1() / (c / (2848.0 * w)).exp_m1())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn xy(v: Vec3) -> (f64, f64) {
        (v.x / v.sum(), v.y / v.sum())
    }

    #[test]
    fn test_d65_spd_matches_published_chromaticity() {
        let d65 = find("D65").unwrap();
        let (x, y) = xy(d65.spectral_white_point(Observer::Cie1931).unwrap());
        assert_abs_diff_eq!(x, 0.3127, epsilon = 2e-3);
        assert_abs_diff_eq!(y, 0.3290, epsilon = 2e-3);
    }

    #[test]
    fn test_a_spd_matches_published_chromaticity() {
        let a = find("A").unwrap();
        let (x, y) = xy(a.spectral_white_point(Observer::Cie1931).unwrap());
        assert_abs_diff_eq!(x, 0.44757, epsilon = 2e-3);
        assert_abs_diff_eq!(y, 0.40745, epsilon = 2e-3);
    }

    #[test]
    fn test_10_degree_whites_from_spd() {
        // (94.81, 100, 107.32) scaled to Y = 1
        let d65 = find("D65").unwrap().spectral_white_point(Observer::Cie1964).unwrap();
        assert_abs_diff_eq!(d65.x, 0.9481, epsilon = 1e-4);
        assert_abs_diff_eq!(d65.z, 1.0732, epsilon = 1e-4);

        let a = find("A").unwrap().spectral_white_point(Observer::Cie1964).unwrap();
        assert_abs_diff_eq!(a.x, 1.11144, epsilon = 5e-4);
        assert_abs_diff_eq!(a.z, 0.35200, epsilon = 5e-4);
    }

    #[test]
    fn test_2_degree_whites_from_spd() {
        let d65 = find("D65").unwrap().spectral_white_point(Observer::Cie1931).unwrap();
        assert_abs_diff_eq!(d65.x, 0.95047, epsilon = 5e-4);
        assert_abs_diff_eq!(d65.z, 1.08883, epsilon = 5e-4);
    }

    #[test]
    fn test_white_points_normalized() {
        for il in &ALL {
            for o in Observer::ALL {
                let w = il.white_point(o);
                assert_abs_diff_eq!(w.y, 1.0, epsilon = 1e-12);
                assert!(w.is_finite() && w.min_element() > 0.0, "{}", il.name);
            }
        }
    }

    #[test]
    fn test_daylight_chromaticity() {
        let (x, y) = daylight_chromaticity(6504.0);
        assert_abs_diff_eq!(x, 0.3127, epsilon = 1e-3);
        assert_abs_diff_eq!(y, 0.3291, epsilon = 1e-3);
    }

    #[test]
    fn test_lists() {
        assert_eq!(list("CIE").unwrap().len(), 21);
        assert_eq!(list("iso_7589").unwrap().len(), 4);
        assert_eq!(list("All").unwrap().len(), ALL.len());
        assert!(list("Nope").is_none());
        assert!(list("ISO_7589").unwrap().iter().all(|i| i.has_spd()));
    }

    #[test]
    fn test_spd_peak_normalized() {
        for il in ALL.iter().filter(|i| i.has_spd()) {
            let spd = il.spd().unwrap();
            let max = spd.values().iter().copied().fold(0.0, f64::max);
            assert_abs_diff_eq!(max, 1.0, epsilon = 1e-12);
            assert_eq!(spd.len(), 95);
        }
    }
}
