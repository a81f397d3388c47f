//! Conversion results.
//!
//! One [`ConversionResult`] per `(observer, illuminant, CAT, working space)`
//! tuple, each complete and immutable once built. A [`ResultSet`] owns the
//! ordered records plus the request-wide [`SpectralReport`], which is shared
//! by every record rather than copied into each.
//!
//! # Layout
//!
//! ```text
//! ResultSet
//! ├── records: [ConversionResult]   sorted by ResultKey
//! │   ├── key, white_point
//! │   ├── xyz, xyy, uv, lab, lchab, luv, lchuv
//! │   ├── rgb: RgbOutput            encoded, linear, scaled, hex, HSL, ...
//! │   └── qualities: Qualities      CCT, dominant wavelength, whiteness, ...
//! └── spectral: SpectralReport?     source, interpolated, recovery, summary, TM-30
//! ```

use std::collections::HashMap;

use chroma_color::indices::{
    E313Coefficients, whiteness_berger, whiteness_cie2004, whiteness_e313, whiteness_stensby, yellowness_d1925,
    yellowness_e313,
};
use chroma_color::{Cat, ColorResult, RgbEncoding};
use chroma_color::rgb::{rgb_to_cmy, rgb_to_cmyk, rgb_to_hsl, rgb_to_hsv, to_hex};
use chroma_math::Vec3;
use chroma_spectral::colorimetry::cct_duv;
use chroma_spectral::{
    Observer, Recovery, SpectralDistribution, SpectralSummary, Tm30Output, dominant_wavelength, illuminant,
};
use serde::{Deserialize, Serialize};

use crate::BitDepth;

/// Identifying tuple of a record. Ordering is lexicographic over the names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResultKey {
    /// Observer name.
    pub observer: String,
    /// Illuminant name.
    pub illuminant: String,
    /// Chromatic adaptation transform name.
    pub cat: String,
    /// RGB working space name.
    pub rgb_space: String,
}

/// RGB in the output working space and its derivatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RgbOutput {
    /// Encoded RGB clamped to 0..1.
    pub encoded: [f64; 3],
    /// Encoded RGB before clamping.
    pub unclamped: [f64; 3],
    /// Linear RGB before encoding.
    pub linear: [f64; 3],
    /// Encoded RGB scaled to the input bit depth.
    pub scaled: [f64; 3],
    /// Depth of `scaled`.
    pub depth: BitDepth,
    /// True if the linear value left the unit cube.
    pub out_of_gamut: bool,
    /// `#RRGGBB`, 8-bit.
    pub hex: String,
    /// Hue (degrees), saturation, lightness.
    pub hsl: [f64; 3],
    /// Hue (degrees), saturation, value.
    pub hsv: [f64; 3],
    /// Cyan, magenta, yellow.
    pub cmy: [f64; 3],
    /// Cyan, magenta, yellow, key.
    pub cmyk: [f64; 4],
}

impl RgbOutput {
    /// Builds every derivative from an encoding.
    pub fn from_encoding(enc: &RgbEncoding, depth: BitDepth) -> Self {
        let value = enc.value;
        Self {
            encoded: value.to_array(),
            unclamped: enc.unclamped.to_array(),
            linear: enc.linear.to_array(),
            scaled: (value * depth.rgb_max()).to_array(),
            depth,
            out_of_gamut: enc.out_of_gamut,
            hex: to_hex(value),
            hsl: rgb_to_hsl(value).to_array(),
            hsv: rgb_to_hsv(value).to_array(),
            cmy: rgb_to_cmy(value).to_array(),
            cmyk: rgb_to_cmyk(value),
        }
    }
}

/// Temperature, purity and whiteness figures of one record.
///
/// Whiteness and yellowness use tristimulus values on the `Y = 100` scale.
/// CCT and Duv are measured against the CIE 1931 2° Planckian locus
/// whatever the record's observer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Qualities {
    /// Correlated color temperature (K), absent for black.
    pub cct: Option<f64>,
    /// Distance from the Planckian locus in CIE 1960 uv.
    pub duv: Option<f64>,
    /// Micro reciprocal degrees, `1e6 / cct`.
    pub mired: Option<f64>,
    /// Dominant wavelength (nm), negative for purples. Absent for the white.
    pub dominant_wavelength: Option<f64>,
    /// Complementary wavelength (nm), negative when the complement is purple.
    pub complementary_wavelength: Option<f64>,
    /// Excitation purity.
    pub excitation_purity: Option<f64>,
    /// Colorimetric purity.
    pub colorimetric_purity: Option<f64>,
    /// CIE 2004 whiteness W.
    pub whiteness_cie: f64,
    /// CIE 2004 tint T.
    pub tint_cie: f64,
    /// ASTM E313 whiteness.
    pub whiteness_e313: f64,
    /// Berger (1959) whiteness.
    pub whiteness_berger: f64,
    /// Stensby (1968) whiteness.
    pub whiteness_stensby: f64,
    /// ASTM E313 yellowness with the coefficients for the record's observer.
    pub yellowness_e313: f64,
    /// ASTM D1925 yellowness, adapted to illuminant C with the record's CAT.
    pub yellowness_d1925: f64,
}

impl Qualities {
    /// Measures `xyz` (and its `lab`) against `white`, both `Y = 1`.
    pub fn measure(
        xyz: Vec3,
        lab: Vec3,
        white: Vec3,
        observer: Observer,
        illuminant_name: &str,
        cat: Cat,
    ) -> ColorResult<Self> {
        let ten_degree = observer == Observer::Cie1964;
        let (xyz100, white100) = (xyz * 100.0, white * 100.0);

        let (cct, duv) = if xyz.y > 0.0 && xyz.is_finite() {
            let (t, d) = cct_duv(xyz);
            (Some(t), Some(d))
        } else {
            (None, None)
        };

        let chromaticity = |v: Vec3| (v.x / v.sum(), v.y / v.sum());
        let dominant = (xyz.sum() > 0.0)
            .then(|| dominant_wavelength(chromaticity(xyz), chromaticity(white), observer))
            .flatten();

        let (whiteness_cie, tint_cie) = whiteness_cie2004(xyz100, white100, ten_degree);
        let c_white = illuminant::find("C").map_or(white, |c| c.white_point(observer));
        let under_c = cat.adapt(xyz, white, c_white)? * 100.0;

        Ok(Self {
            cct,
            duv,
            mired: cct.map(|t| 1e6 / t),
            dominant_wavelength: dominant.map(|d| d.dominant),
            complementary_wavelength: dominant.map(|d| d.complementary),
            excitation_purity: dominant.map(|d| d.excitation_purity),
            colorimetric_purity: dominant.map(|d| d.colorimetric_purity),
            whiteness_cie,
            tint_cie,
            whiteness_e313: whiteness_e313(xyz100),
            whiteness_berger: whiteness_berger(xyz100, white100),
            whiteness_stensby: whiteness_stensby(lab),
            yellowness_e313: yellowness_e313(xyz100, E313Coefficients::for_viewing(illuminant_name, ten_degree)),
            yellowness_d1925: yellowness_d1925(under_c),
        })
    }
}

/// Every representation of the color for one tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Identifying tuple.
    pub key: ResultKey,
    /// Reference white (XYZ, `Y = 1`) of the colorimetric values.
    pub white_point: [f64; 3],
    /// CIE XYZ, `Y` of the white is 1.
    pub xyz: [f64; 3],
    /// Chromaticity and luminance.
    pub xyy: [f64; 3],
    /// CIE 1976 u'v'.
    pub uv: [f64; 2],
    /// CIE L*a*b*.
    pub lab: [f64; 3],
    /// CIE L*C*h (ab), hue in degrees.
    pub lchab: [f64; 3],
    /// CIE L*u*v*.
    pub luv: [f64; 3],
    /// CIE L*C*h (uv), hue in degrees.
    pub lchuv: [f64; 3],
    /// RGB in the tuple's working space.
    pub rgb: RgbOutput,
    /// Temperature, purity and whiteness figures.
    #[serde(default)]
    pub qualities: Qualities,
}

/// Spectral data shared by every record of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectralReport {
    /// Distribution given as input.
    pub source: Option<SpectralDistribution>,
    /// Resampled distribution.
    pub interpolated: Option<SpectralDistribution>,
    /// Reflectance recovered from tristimulus input.
    pub recovery: Option<Recovery>,
    /// Colorimetric summary under the input illuminant.
    pub summary: Option<SpectralSummary>,
    /// TM-30 report in the requested format.
    pub tm30: Option<Tm30Output>,
}

impl SpectralReport {
    /// The most refined distribution available: interpolated, source, then
    /// recovered.
    pub fn distribution(&self) -> Option<&SpectralDistribution> {
        self.interpolated
            .as_ref()
            .or(self.source.as_ref())
            .or(self.recovery.as_ref().map(|r| &r.distribution))
    }
}

/// Ordered records of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// One record per tuple, sorted by key.
    pub records: Vec<ConversionResult>,
    /// Spectral report, when spectral data was given or derived.
    pub spectral: Option<SpectralReport>,
}

impl ResultSet {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record for `key`.
    pub fn get(&self, key: &ResultKey) -> Option<&ConversionResult> {
        self.records
            .binary_search_by(|r| r.key.cmp(key))
            .ok()
            .map(|i| &self.records[i])
    }

    /// Iterates over the records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ConversionResult> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ConversionResult;
    type IntoIter = std::slice::Iter<'a, ConversionResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Previously computed records, taken verbatim for matching tuples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrecalculatedData {
    /// Records in any order.
    pub records: Vec<ConversionResult>,
}

impl PrecalculatedData {
    /// Wraps records.
    pub fn new(records: Vec<ConversionResult>) -> Self {
        Self { records }
    }

    /// Index by key. The last record wins on duplicate keys.
    pub fn index(&self) -> HashMap<&ResultKey, &ConversionResult> {
        self.records.iter().map(|r| (&r.key, r)).collect()
    }
}

impl From<ResultSet> for PrecalculatedData {
    fn from(set: ResultSet) -> Self {
        Self::new(set.records)
    }
}
