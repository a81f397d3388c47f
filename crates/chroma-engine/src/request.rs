//! Conversion requests.
//!
//! A [`ConversionRequest`] is the engine's whole input contract: one
//! validated [`ColorInput`] plus a selection per parameter axis. Defaults
//! match a typical single conversion: CIE 1931 2°, D65, Bradford, sRGB.
//!
//! The input illuminant is a single name, not a [`Selection`]. Reflectance
//! recovery, TM-30 and the spectral summary each run under exactly one
//! illuminant, so it cannot fan out. The illuminant axis of the cross
//! product is `illuminant_list`.
//!
//! # Example
//!
//! ```rust
//! use chroma_engine::{BitDepth, ConversionRequest, RawInput, Selection, detect};
//!
//! let raw = RawInput { lab: [Some(50.0), Some(10.0), Some(-20.0)], ..Default::default() };
//! let request = ConversionRequest::new(detect(&raw, BitDepth::Eight).unwrap())
//!     .with_illuminant_list("CIE")
//!     .with_cat(Selection::All);
//! assert_eq!(request.illuminant_list.as_deref(), Some("CIE"));
//! ```

use chroma_spectral::Tm30Format;
use serde::{Deserialize, Serialize};

use crate::{BitDepth, ColorInput, Selection};

/// Default observer.
pub const DEFAULT_OBSERVER: &str = "CIE 1931 2 Degree Standard Observer";
/// Default input illuminant.
pub const DEFAULT_ILLUMINANT: &str = "D65";
/// Default chromatic adaptation transform.
pub const DEFAULT_CAT: &str = "Bradford";
/// Default RGB working space.
pub const DEFAULT_RGB_SPACE: &str = "sRGB";

/// Everything one engine run computes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// The color.
    pub input: ColorInput,
    /// Observer(s).
    pub observer: Selection,
    /// Input illuminant, always exactly one name.
    ///
    /// The illuminant for recovery, TM-30 and the spectral summary, and the
    /// viewing illuminant when no list is given. List names such as `All`
    /// are rejected here; use `illuminant_list` to fan out.
    pub illuminant: String,
    /// Illuminant selection list (`CIE`, `ISO_7589`, `All`), replacing the
    /// single input illuminant in the cross product.
    pub illuminant_list: Option<String>,
    /// Chromatic adaptation transform(s).
    pub cat: Selection,
    /// Output RGB working space(s).
    pub rgb_space: Selection,
    /// Working space the RGB input model is encoded in.
    pub input_rgb_space: String,
    /// Resample spectral data to this interval (nm).
    pub interpolation_interval: Option<f64>,
    /// Recover a reflectance for tristimulus input.
    pub recover: bool,
    /// Compute a TM-30 report in this format.
    pub tm30: Option<Tm30Format>,
}

impl ConversionRequest {
    /// Request with default selections.
    pub fn new(input: ColorInput) -> Self {
        Self {
            input,
            observer: Selection::one(DEFAULT_OBSERVER),
            illuminant: DEFAULT_ILLUMINANT.to_string(),
            illuminant_list: None,
            cat: Selection::one(DEFAULT_CAT),
            rgb_space: Selection::one(DEFAULT_RGB_SPACE),
            input_rgb_space: DEFAULT_RGB_SPACE.to_string(),
            interpolation_interval: None,
            recover: false,
            tm30: None,
        }
    }

    /// Sets the observer selection.
    pub fn with_observer(mut self, observer: impl Into<Selection>) -> Self {
        self.observer = observer.into();
        self
    }

    /// Sets the input illuminant.
    pub fn with_illuminant(mut self, name: impl Into<String>) -> Self {
        self.illuminant = name.into();
        self
    }

    /// Sets the illuminant selection list.
    pub fn with_illuminant_list(mut self, name: impl Into<String>) -> Self {
        self.illuminant_list = Some(name.into());
        self
    }

    /// Sets the CAT selection.
    pub fn with_cat(mut self, cat: impl Into<Selection>) -> Self {
        self.cat = cat.into();
        self
    }

    /// Sets the output working-space selection.
    pub fn with_rgb_space(mut self, space: impl Into<Selection>) -> Self {
        self.rgb_space = space.into();
        self
    }

    /// Sets the working space of RGB input.
    pub fn with_input_rgb_space(mut self, name: impl Into<String>) -> Self {
        self.input_rgb_space = name.into();
        self
    }

    /// Requests spectral resampling.
    pub fn with_interpolation(mut self, interval: f64) -> Self {
        self.interpolation_interval = Some(interval);
        self
    }

    /// Requests reflectance recovery.
    pub fn with_recovery(mut self, recover: bool) -> Self {
        self.recover = recover;
        self
    }

    /// Requests a TM-30 report.
    pub fn with_tm30(mut self, format: Tm30Format) -> Self {
        self.tm30 = Some(format);
        self
    }

    /// Bit depth of the input, if it is a triplet.
    pub fn depth(&self) -> Option<BitDepth> {
        match &self.input {
            ColorInput::Color(value) => Some(value.triplet().depth),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Engine, ErrorKind, RawInput, detect};

    fn request() -> ConversionRequest {
        let raw = RawInput {
            lab: [Some(50.0), Some(10.0), Some(-20.0)],
            ..Default::default()
        };
        ConversionRequest::new(detect(&raw, BitDepth::Eight).unwrap())
    }

    #[test]
    fn test_defaults() {
        let r = request();
        assert_eq!(r.illuminant, DEFAULT_ILLUMINANT);
        assert_eq!(r.illuminant_list, None);
        assert_eq!(r.input_rgb_space, DEFAULT_RGB_SPACE);
        assert_eq!(r.depth(), Some(BitDepth::Eight));
    }

    #[test]
    fn test_input_illuminant_is_a_single_name() {
        let engine = Engine::default();
        for list in ["All", "CIE"] {
            let err = engine.convert(&request().with_illuminant(list)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnknownReference, "{list}");
        }

        let single = engine.convert(&request().with_illuminant("D50")).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single.records[0].key.illuminant, "D50");

        // Only the list fans out
        let fanned = engine
            .convert(&request().with_illuminant("D50").with_illuminant_list("CIE"))
            .unwrap();
        assert_eq!(fanned.len(), 21);
    }

    #[test]
    fn test_serde_round_trip() {
        let r = request().with_illuminant("A").with_illuminant_list("ISO_7589");
        let json = serde_json::to_string(&r).unwrap();
        let back: ConversionRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
