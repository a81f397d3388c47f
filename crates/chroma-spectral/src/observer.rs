//! CIE standard observers.
//!
//! Color matching functions are embedded as the CIE 15 tables on
//! 360..=830 nm at 5 nm. They are expanded once per process to 1 nm, linear
//! between samples, and shared read-only.
//!
//! | Observer | Source |
//! |----------|--------|
//! | CIE 1931 2° | CIE 15 table, 360..=830 nm at 5 nm |
//! | CIE 1964 10° | CIE 15 table, 360..=830 nm at 5 nm |
//!
//! # Usage
//!
//! ```rust
//! use chroma_spectral::Observer;
//!
//! let ybar = Observer::Cie1931.cmf(555.0).y;
//! assert!((ybar - 1.0).abs() < 1e-9);
//! ```

use std::fmt;
use std::sync::OnceLock;

use chroma_math::{Vec3, lerp};
use serde::{Deserialize, Serialize};

/// First tabulated wavelength (nm).
pub const CMF_START: f64 = 360.0;
/// Last tabulated wavelength (nm).
pub const CMF_STOP: f64 = 830.0;

const CMF_LEN: usize = 471;
const CMF_SAMPLES: usize = 95;

/// CIE standard observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Observer {
    /// CIE 1931 2° standard observer.
    Cie1931,
    /// CIE 1964 10° supplementary standard observer.
    Cie1964,
}

impl Observer {
    /// Both observers.
    pub const ALL: [Observer; 2] = [Observer::Cie1931, Observer::Cie1964];

    /// Full CIE name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cie1931 => "CIE 1931 2 Degree Standard Observer",
            Self::Cie1964 => "CIE 1964 10 Degree Standard Observer",
        }
    }

    /// Index into per-observer tables.
    pub const fn index(self) -> usize {
        match self {
            Self::Cie1931 => 0,
            Self::Cie1964 => 1,
        }
    }

    /// Looks up by full name or a short alias (`2`, `10`, `1931`, `1964`).
    pub fn from_name(name: &str) -> Option<Self> {
        let n = name.trim();
        Self::ALL.into_iter().find(|o| o.name().eq_ignore_ascii_case(n)).or(match n {
            "2" | "2°" | "1931" | "CIE 1931" => Some(Self::Cie1931),
            "10" | "10°" | "1964" | "CIE 1964" => Some(Self::Cie1964),
            _ => None,
        })
    }

    /// Color matching functions at `wavelength` nm, zero outside 360..=830.
    pub fn cmf(self, wavelength: f64) -> Vec3 {
        if !(CMF_START..=CMF_STOP).contains(&wavelength) {
            return Vec3::ZERO;
        }
        let table = self.table();
        let pos = wavelength - CMF_START;
        let i = (pos.floor() as usize).min(CMF_LEN - 2);
        let t = pos - i as f64;
        let (a, b) = (table[i], table[i + 1]);
        Vec3::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t), lerp(a.z, b.z, t))
    }

    /// The 1 nm table on 360..=830.
    pub fn table(self) -> &'static [Vec3] {
        static TABLES: OnceLock<[Vec<Vec3>; 2]> = OnceLock::new();
        let tables = TABLES.get_or_init(|| {
            let build = |t: &[[f64; 3]; CMF_SAMPLES]| (0..CMF_LEN).map(|i| expand(t, i)).collect();
            [build(&CIE_1931), build(&CIE_1964)]
        });
        &tables[self.index()]
    }
}

impl fmt::Display for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 1 nm entry `i` of a 5 nm table.
fn expand(table: &[[f64; 3]; CMF_SAMPLES], i: usize) -> Vec3 {
    let (j, t) = (i / 5, (i % 5) as f64 / 5.0);
    let a = table[j];
    let b = table[(j + 1).min(CMF_SAMPLES - 1)];
    Vec3::new(lerp(a[0], b[0], t), lerp(a[1], b[1], t), lerp(a[2], b[2], t))
}

// ============================================================================
// Tables
// ============================================================================

/// CIE 1931 2° x̄, ȳ, z̄ at 5 nm, 360..=830 nm
const CIE_1931: [[f64; 3]; CMF_SAMPLES] = [
    [0.0001299, 0.000003917, 0.0006061],
    [0.0002321, 0.000006965, 0.001086],
    [0.0004149, 0.00001239, 0.001946],
    [0.0007416, 0.00002202, 0.003486],
    [0.001368, 0.000039, 0.00645],
    [0.002236, 0.000064, 0.01055],
    [0.004243, 0.00012, 0.02005],
    [0.00765, 0.000217, 0.03621],
    [0.01431, 0.000396, 0.06785], // 400
    [0.02319, 0.00064, 0.1102],
    [0.04351, 0.00121, 0.2074],
    [0.07763, 0.00218, 0.3713],
    [0.13438, 0.004, 0.6456],
    [0.21477, 0.0073, 1.03905],
    [0.2839, 0.0116, 1.3856],
    [0.3285, 0.01684, 1.62296],
    [0.34828, 0.023, 1.74706],
    [0.34806, 0.0298, 1.7826],
    [0.3362, 0.038, 1.77211], // 450
    [0.3187, 0.048, 1.7441],
    [0.2908, 0.06, 1.6692],
    [0.2511, 0.0739, 1.5281],
    [0.19536, 0.09098, 1.28764],
    [0.1421, 0.1126, 1.0419],
    [0.09564, 0.13902, 0.81295],
    [0.05801, 0.1693, 0.6162],
    [0.03201, 0.20802, 0.46518],
    [0.0147, 0.2586, 0.3533],
    [0.0049, 0.323, 0.272], // 500
    [0.0024, 0.4073, 0.2123],
    [0.0093, 0.503, 0.1582],
    [0.0291, 0.6082, 0.1117],
    [0.06327, 0.71, 0.07825],
    [0.1096, 0.7932, 0.05725],
    [0.1655, 0.862, 0.04216],
    [0.22575, 0.91485, 0.02984],
    [0.2904, 0.954, 0.0203],
    [0.3597, 0.9803, 0.0134],
    [0.43345, 0.99495, 0.00875], // 550
    [0.51205, 1.0, 0.00575],
    [0.5945, 0.995, 0.0039],
    [0.6784, 0.9786, 0.00275],
    [0.7621, 0.952, 0.0021],
    [0.8425, 0.9154, 0.0018],
    [0.9163, 0.87, 0.00165],
    [0.9786, 0.8163, 0.0014],
    [1.0263, 0.757, 0.0011],
    [1.0567, 0.6949, 0.001],
    [1.0622, 0.631, 0.0008], // 600
    [1.0456, 0.5668, 0.0006],
    [1.0026, 0.503, 0.00034],
    [0.9384, 0.4412, 0.00024],
    [0.85445, 0.381, 0.00019],
    [0.7514, 0.321, 0.0001],
    [0.6424, 0.265, 0.00005],
    [0.5419, 0.217, 0.00003],
    [0.4479, 0.175, 0.00002],
    [0.3608, 0.1382, 0.00001],
    [0.2835, 0.107, 0.0], // 650
    [0.2187, 0.0816, 0.0],
    [0.1649, 0.061, 0.0],
    [0.1212, 0.04458, 0.0],
    [0.0874, 0.032, 0.0],
    [0.0636, 0.0232, 0.0],
    [0.04677, 0.017, 0.0],
    [0.0329, 0.01192, 0.0],
    [0.0227, 0.00821, 0.0],
    [0.01584, 0.005723, 0.0],
    [0.011359, 0.004102, 0.0], // 700
    [0.008111, 0.002929, 0.0],
    [0.00579, 0.002091, 0.0],
    [0.004109, 0.001484, 0.0],
    [0.002899, 0.001047, 0.0],
    [0.002049, 0.00074, 0.0],
    [0.00144, 0.00052, 0.0],
    [0.001, 0.000361, 0.0],
    [0.00069, 0.000249, 0.0],
    [0.000476, 0.000172, 0.0],
    [0.000332, 0.00012, 0.0], // 750
    [0.000235, 0.000085, 0.0],
    [0.000166, 0.00006, 0.0],
    [0.000117, 0.000042, 0.0],
    [0.000083, 0.00003, 0.0],
    [0.000059, 0.000021, 0.0],
    [0.000042, 0.000015, 0.0],
    [0.000029353, 0.0000106, 0.0],
    [0.000020674, 0.000007466, 0.0],
    [0.00001456, 0.000005258, 0.0],
    [0.000010254, 0.000003703, 0.0], // 800
    [0.000007221, 0.000002608, 0.0],
    [0.000005086, 0.000001837, 0.0],
    [0.000003582, 0.000001293, 0.0],
    [0.000002523, 0.000000911, 0.0],
    [0.000001777, 0.000000642, 0.0],
    [0.000001251, 0.000000452, 0.0],
];

/// CIE 1964 10° x̄₁₀, ȳ₁₀, z̄₁₀ at 5 nm, 360..=830 nm
const CIE_1964: [[f64; 3]; CMF_SAMPLES] = [
    [0.000000122, 0.000000013, 0.000000535],
    [0.000000919, 0.000000101, 0.000004028],
    [0.000005959, 0.000000651, 0.000026144],
    [0.000033266, 0.000003625, 0.00014622],
    [0.000159952, 0.0000174, 0.000704776],
    [0.00066244, 0.0000739, 0.0029278],
    [0.0023616, 0.0002534, 0.0104822],
    [0.0072423, 0.0007685, 0.032344],
    [0.0191097, 0.0020044, 0.0860109], // 400
    [0.0434, 0.004509, 0.19712],
    [0.084736, 0.008756, 0.389366],
    [0.140638, 0.014456, 0.65676],
    [0.204492, 0.021391, 0.972542],
    [0.264737, 0.029497, 1.2825],
    [0.314679, 0.038676, 1.55348],
    [0.357719, 0.049602, 1.7985],
    [0.383734, 0.062077, 1.96728],
    [0.386726, 0.074704, 2.0273],
    [0.370702, 0.089456, 1.9948], // 450
    [0.342957, 0.106256, 1.9007],
    [0.302273, 0.128201, 1.74537],
    [0.254085, 0.152761, 1.5549],
    [0.195618, 0.18519, 1.31756],
    [0.132349, 0.21994, 1.0302],
    [0.080507, 0.253589, 0.772125],
    [0.041072, 0.297665, 0.57006],
    [0.016172, 0.339133, 0.415254],
    [0.005132, 0.395379, 0.302356],
    [0.003816, 0.460777, 0.218502], // 500
    [0.015444, 0.53136, 0.159249],
    [0.037465, 0.606741, 0.112044],
    [0.071358, 0.68566, 0.082248],
    [0.117749, 0.761757, 0.060709],
    [0.172953, 0.82333, 0.04305],
    [0.236491, 0.875211, 0.030451],
    [0.304213, 0.92381, 0.020584],
    [0.376772, 0.961988, 0.013676],
    [0.451584, 0.9822, 0.007918],
    [0.529826, 0.991761, 0.003988], // 550
    [0.616053, 0.99911, 0.001091],
    [0.705224, 0.99734, 0.0],
    [0.793832, 0.98238, 0.0],
    [0.878655, 0.955552, 0.0],
    [0.951162, 0.915175, 0.0],
    [1.01416, 0.868934, 0.0],
    [1.0743, 0.825623, 0.0],
    [1.11852, 0.777405, 0.0],
    [1.1343, 0.720353, 0.0],
    [1.12399, 0.658341, 0.0], // 600
    [1.0891, 0.593878, 0.0],
    [1.03048, 0.527963, 0.0],
    [0.95074, 0.461834, 0.0],
    [0.856297, 0.398057, 0.0],
    [0.75493, 0.339554, 0.0],
    [0.647467, 0.283493, 0.0],
    [0.53511, 0.228254, 0.0],
    [0.431567, 0.179828, 0.0],
    [0.34369, 0.140211, 0.0],
    [0.268329, 0.107633, 0.0], // 650
    [0.2043, 0.081187, 0.0],
    [0.152568, 0.060281, 0.0],
    [0.11221, 0.044096, 0.0],
    [0.081261, 0.0318, 0.0],
    [0.05793, 0.022602, 0.0],
    [0.040851, 0.015905, 0.0],
    [0.028623, 0.01113, 0.0],
    [0.019941, 0.007749, 0.0],
    [0.013842, 0.005375, 0.0],
    [0.009577, 0.003718, 0.0], // 700
    [0.006605, 0.002565, 0.0],
    [0.004553, 0.001768, 0.0],
    [0.003145, 0.001222, 0.0],
    [0.002175, 0.000846, 0.0],
    [0.001506, 0.000586, 0.0],
    [0.001045, 0.000407, 0.0],
    [0.000727, 0.000284, 0.0],
    [0.000508, 0.000199, 0.0],
    [0.000356, 0.00014, 0.0],
    [0.000251, 0.000098, 0.0], // 750
    [0.000178, 0.00007, 0.0],
    [0.000126, 0.00005, 0.0],
    [0.00009, 0.000036, 0.0],
    [0.000065, 0.000025, 0.0],
    [0.000046, 0.000018, 0.0],
    [0.000033, 0.000013, 0.0],
    [0.000023416, 0.000009289, 0.0],
    [0.000016643, 0.000006609, 0.0],
    [0.000011839, 0.000004711, 0.0],
    [0.000008466, 0.000003368, 0.0], // 800
    [0.000006062, 0.000002412, 0.0],
    [0.000004365, 0.000001741, 0.0],
    [0.000003141, 0.000001253, 0.0],
    [0.000002264, 0.000000904, 0.0],
    [0.000001636, 0.000000653, 0.0],
    [0.000001183, 0.000000472, 0.0],
];
