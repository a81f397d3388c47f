//! # chroma-primaries
//!
//! Color primaries, white points, RGB-XYZ matrix generation and the table of
//! RGB working spaces.
//!
//! # What are Color Primaries?
//!
//! Primaries define the gamut a color space can represent. Each primary and
//! the reference white are CIE 1931 xy chromaticity coordinates. Together with
//! a transfer function they make up a [`WorkingSpace`].
//!
//! # Included Working Spaces
//!
//! | Working space | Primaries | White | Transfer |
//! |---------------|-----------|-------|----------|
//! | sRGB | Rec.709 | D65 | sRGB |
//! | Adobe RGB (1998) | Adobe | D65 | gamma 563/256 |
//! | Display P3 | P3 | D65 | sRGB |
//! | DCI-P3 | P3 | DCI | gamma 2.6 |
//! | ITU-R BT.709 | Rec.709 | D65 | BT.709 |
//! | ITU-R BT.2020 | Rec.2020 | D65 | BT.2020 |
//! | ProPhoto RGB | ROMM | D50 | ROMM |
//! | Wide Gamut RGB | Adobe Wide | D50 | gamma 563/256 |
//! | ACEScg | AP1 | ACES | linear |
//! | ACES2065-1 | AP0 | ACES | linear |
//!
//! # Usage
//!
//! ```rust
//! use chroma_primaries::{SRGB, rgb_to_xyz_matrix, working_space};
//! use chroma_math::Vec3;
//!
//! let matrix = rgb_to_xyz_matrix(&SRGB);
//! let white = matrix * Vec3::ONE;
//! assert!((white.y - 1.0).abs() < 1e-12);
//!
//! let space = working_space("ProPhoto RGB").unwrap();
//! assert_eq!(space.primaries.w, (0.34567, 0.35850));
//! ```
//!
//! # Dependencies
//!
//! - [`chroma-math`] - matrix operations
//! - [`chroma-transfer`] - encoding curves
//!
//! # Used By
//!
//! - `chroma-color` - XYZ <-> RGB conversion
//! - `chroma-engine` - working space registry

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use chroma_math::{Mat3, Vec3};
use chroma_transfer::TransferFunction;
use chroma_transfer::gamma::{ADOBE_RGB_GAMMA, DCI_GAMMA};

/// RGB color space primaries definition.
///
/// All coordinates are CIE 1931 xy chromaticities.
///
/// ```rust
/// use chroma_primaries::Primaries;
///
/// let my_space = Primaries {
///     r: (0.64, 0.33),
///     g: (0.30, 0.60),
///     b: (0.15, 0.06),
///     w: (0.3127, 0.3290),
///     name: "Custom",
/// };
/// assert!(my_space.white_xyz().x > 0.95);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary (x, y) chromaticity
    pub r: (f64, f64),
    /// Green primary (x, y) chromaticity
    pub g: (f64, f64),
    /// Blue primary (x, y) chromaticity
    pub b: (f64, f64),
    /// White point (x, y) chromaticity
    pub w: (f64, f64),
    /// Primaries name
    pub name: &'static str,
}

impl Primaries {
    /// White point as XYZ (Y=1).
    #[inline]
    pub fn white_xyz(&self) -> Vec3 {
        xy_to_xyz(self.w.0, self.w.1)
    }
}

// ============================================================================
// Standard White Points
// ============================================================================

/// D65 white point chromaticity (daylight, ~6500K).
pub const D65_XY: (f64, f64) = (0.31270, 0.32900);

/// D50 white point chromaticity (~5000K).
pub const D50_XY: (f64, f64) = (0.34567, 0.35850);

/// ACES white point chromaticity (~6000K).
pub const ACES_XY: (f64, f64) = (0.32168, 0.33767);

/// DCI white point chromaticity (theatrical projection).
pub const DCI_XY: (f64, f64) = (0.31400, 0.35100);

// ============================================================================
// Standard Color Space Primaries
// ============================================================================

/// sRGB / Rec.709 primaries (D65 white point).
pub const SRGB: Primaries = Primaries {
    r: (0.6400, 0.3300),
    g: (0.3000, 0.6000),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "Rec.709",
};

/// Rec.2020 primaries (D65 white point).
pub const REC2020: Primaries = Primaries {
    r: (0.7080, 0.2920),
    g: (0.1700, 0.7970),
    b: (0.1310, 0.0460),
    w: D65_XY,
    name: "Rec.2020",
};

/// DCI-P3 primaries (DCI white point).
pub const DCI_P3: Primaries = Primaries {
    r: (0.6800, 0.3200),
    g: (0.2650, 0.6900),
    b: (0.1500, 0.0600),
    w: DCI_XY,
    name: "DCI-P3",
};

/// Display P3 primaries (P3 with a D65 white point).
pub const DISPLAY_P3: Primaries = Primaries {
    r: (0.6800, 0.3200),
    g: (0.2650, 0.6900),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "Display P3",
};

/// ACES AP0 primaries (ACES white point).
pub const ACES_AP0: Primaries = Primaries {
    r: (0.7347, 0.2653),
    g: (0.0000, 1.0000),
    b: (0.0001, -0.0770),
    w: ACES_XY,
    name: "ACES AP0",
};

/// ACES AP1 primaries (ACES white point).
pub const ACES_AP1: Primaries = Primaries {
    r: (0.7130, 0.2930),
    g: (0.1650, 0.8300),
    b: (0.1280, 0.0440),
    w: ACES_XY,
    name: "ACES AP1",
};

/// Adobe RGB (1998) primaries (D65 white point).
pub const ADOBE_RGB: Primaries = Primaries {
    r: (0.6400, 0.3300),
    g: (0.2100, 0.7100),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "Adobe RGB (1998)",
};

/// ProPhoto / ROMM RGB primaries (D50 white point).
pub const PROPHOTO_RGB: Primaries = Primaries {
    r: (0.7347, 0.2653),
    g: (0.1596, 0.8404),
    b: (0.0366, 0.0001),
    w: D50_XY,
    name: "ROMM RGB",
};

/// Adobe Wide Gamut RGB primaries (D50 white point).
pub const WIDE_GAMUT_RGB: Primaries = Primaries {
    r: (0.7347, 0.2653),
    g: (0.1152, 0.8264),
    b: (0.1566, 0.0177),
    w: D50_XY,
    name: "Wide Gamut RGB",
};

// ============================================================================
// Matrix Generation
// ============================================================================

/// Converts xy chromaticity to XYZ (with Y=1).
#[inline]
pub fn xy_to_xyz(x: f64, y: f64) -> Vec3 {
    if y.abs() < 1e-15 {
        Vec3::ZERO
    } else {
        Vec3::new(x / y, 1.0, (1.0 - x - y) / y)
    }
}

/// Computes the RGB to XYZ matrix for a set of primaries.
///
/// # Algorithm
///
/// 1. Convert xy chromaticities to XYZ (with Y=1)
/// 2. Solve `M * S = W` for the per-primary scale `S`
/// 3. Scale each primary column by its factor
pub fn rgb_to_xyz_matrix(primaries: &Primaries) -> Mat3 {
    let r_xyz = xy_to_xyz(primaries.r.0, primaries.r.1);
    let g_xyz = xy_to_xyz(primaries.g.0, primaries.g.1);
    let b_xyz = xy_to_xyz(primaries.b.0, primaries.b.1);
    let w_xyz = primaries.white_xyz();

    let m = Mat3::from_col_vecs(r_xyz, g_xyz, b_xyz);

    // Non-degenerate primaries are never collinear.
    let m_inv = m.inverse().unwrap_or(Mat3::IDENTITY);
    let s = m_inv * w_xyz;

    Mat3::from_col_vecs(r_xyz * s.x, g_xyz * s.y, b_xyz * s.z)
}

/// Computes the XYZ to RGB matrix for a set of primaries.
///
/// This is the inverse of [`rgb_to_xyz_matrix`].
pub fn xyz_to_rgb_matrix(primaries: &Primaries) -> Mat3 {
    rgb_to_xyz_matrix(primaries).inverse().unwrap_or(Mat3::IDENTITY)
}

// ============================================================================
// Working Spaces
// ============================================================================

/// An RGB working space: primaries, reference white and encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkingSpace {
    /// Working space identifier.
    pub name: &'static str,
    /// Primaries and reference white.
    pub primaries: Primaries,
    /// Encoding transfer function.
    pub transfer: TransferFunction,
}

impl WorkingSpace {
    /// Reference white as XYZ (Y=1).
    #[inline]
    pub fn white_xyz(&self) -> Vec3 {
        self.primaries.white_xyz()
    }

    /// Linear RGB to XYZ matrix (relative to the space's own white).
    #[inline]
    pub fn to_xyz_matrix(&self) -> Mat3 {
        rgb_to_xyz_matrix(&self.primaries)
    }

    /// XYZ to linear RGB matrix (relative to the space's own white).
    #[inline]
    pub fn from_xyz_matrix(&self) -> Mat3 {
        xyz_to_rgb_matrix(&self.primaries)
    }
}

/// Every supported working space, in presentation order.
pub const WORKING_SPACES: [WorkingSpace; 10] = [
    WorkingSpace { name: "sRGB", primaries: SRGB, transfer: TransferFunction::Srgb },
    WorkingSpace {
        name: "Adobe RGB (1998)",
        primaries: ADOBE_RGB,
        transfer: TransferFunction::Gamma(ADOBE_RGB_GAMMA),
    },
    WorkingSpace { name: "Display P3", primaries: DISPLAY_P3, transfer: TransferFunction::Srgb },
    WorkingSpace {
        name: "DCI-P3",
        primaries: DCI_P3,
        transfer: TransferFunction::Gamma(DCI_GAMMA),
    },
    WorkingSpace { name: "ITU-R BT.709", primaries: SRGB, transfer: TransferFunction::Rec709 },
    WorkingSpace { name: "ITU-R BT.2020", primaries: REC2020, transfer: TransferFunction::Bt2020 },
    WorkingSpace { name: "ProPhoto RGB", primaries: PROPHOTO_RGB, transfer: TransferFunction::Romm },
    WorkingSpace {
        name: "Wide Gamut RGB",
        primaries: WIDE_GAMUT_RGB,
        transfer: TransferFunction::Gamma(ADOBE_RGB_GAMMA),
    },
    WorkingSpace { name: "ACEScg", primaries: ACES_AP1, transfer: TransferFunction::Linear },
    WorkingSpace { name: "ACES2065-1", primaries: ACES_AP0, transfer: TransferFunction::Linear },
];

/// Looks up a working space by name (case-insensitive).
pub fn working_space(name: &str) -> Option<&'static WorkingSpace> {
    WORKING_SPACES
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name))
}
