//! Reference registry.
//!
//! One lookup facade over the process-wide reference tables: observers,
//! illuminants and their selection lists, chromatic adaptation transforms
//! and RGB working spaces. The tables themselves are constants in the
//! lower crates; the registry only adds name resolution, the `All`
//! sentinel and [`EngineError::UnknownReference`] for unknown names.
//!
//! # Thread Safety
//!
//! The registry is immutable after construction. [`Registry::global`]
//! builds it once and hands out a shared reference to every thread.
//!
//! # Usage
//!
//! ```rust
//! use chroma_engine::{Registry, Selection};
//!
//! let reg = Registry::global();
//! assert_eq!(reg.cats(&Selection::All).unwrap().len(), 12);
//! assert_eq!(reg.illuminant_list("CIE").unwrap().len(), 21);
//! assert!(reg.rgb_space("No Such Space").is_err());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use chroma_color::Cat;
use chroma_primaries::{WORKING_SPACES, WorkingSpace};
use chroma_spectral::{Illuminant, Observer, illuminant};
use serde::{Deserialize, Serialize};

use crate::{EngineError, EngineResult};

/// Name of the sentinel selecting every entry.
pub const ALL: &str = "All";

/// A single identifier or every entry of a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    /// Every entry.
    All,
    /// One entry by name.
    One(String),
}

impl Selection {
    /// Selects one entry.
    pub fn one(name: impl Into<String>) -> Self {
        Self::One(name.into())
    }
}

impl From<String> for Selection {
    fn from(s: String) -> Self {
        if s.trim().eq_ignore_ascii_case(ALL) {
            Self::All
        } else {
            Self::One(s)
        }
    }
}

impl From<&str> for Selection {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<Selection> for String {
    fn from(s: Selection) -> Self {
        s.to_string()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::One(name) => f.write_str(name),
        }
    }
}

/// Read-only lookup over every reference table.
#[derive(Debug)]
pub struct Registry {
    illuminant_lists: HashMap<&'static str, Vec<&'static Illuminant>>,
}

impl Registry {
    fn new() -> Self {
        let illuminant_lists = ["CIE", "ISO_7589", ALL]
            .into_iter()
            .filter_map(|name| illuminant::list(name).map(|list| (name, list)))
            .collect();
        Self { illuminant_lists }
    }

    /// Returns the process-wide registry.
    pub fn global() -> &'static Registry {
        static INSTANCE: OnceLock<Registry> = OnceLock::new();
        INSTANCE.get_or_init(Registry::new)
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Looks up an observer by name or alias.
    pub fn observer(&self, name: &str) -> EngineResult<Observer> {
        Observer::from_name(name).ok_or_else(|| EngineError::unknown("observer", name))
    }

    /// Resolves an observer selection.
    pub fn observers(&self, selection: &Selection) -> EngineResult<Vec<Observer>> {
        match selection {
            Selection::All => Ok(Observer::ALL.to_vec()),
            Selection::One(name) => Ok(vec![self.observer(name)?]),
        }
    }

    // ========================================================================
    // Illuminants
    // ========================================================================

    /// Looks up an illuminant by name.
    pub fn illuminant(&self, name: &str) -> EngineResult<&'static Illuminant> {
        illuminant::find(name).ok_or_else(|| EngineError::unknown("illuminant", name))
    }

    /// Members of a selection list (`CIE`, `ISO_7589`, `All`).
    pub fn illuminant_list(&self, name: &str) -> EngineResult<&[&'static Illuminant]> {
        self.illuminant_lists
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name.trim()) || k.replace('_', " ").eq_ignore_ascii_case(name.trim()))
            .map(|(_, list)| list.as_slice())
            .ok_or_else(|| EngineError::unknown("illuminant list", name))
    }

    /// Names of the selection lists.
    pub fn illuminant_list_names(&self) -> [&'static str; 3] {
        ["CIE", "ISO_7589", ALL]
    }

    // ========================================================================
    // Chromatic adaptation
    // ========================================================================

    /// Looks up a transform by name; `None` is the identity.
    pub fn cat(&self, name: &str) -> EngineResult<Cat> {
        Cat::from_name(name).ok_or_else(|| EngineError::unknown("chromatic adaptation transform", name))
    }

    /// Resolves a transform selection. `All` excludes [`Cat::None`].
    pub fn cats(&self, selection: &Selection) -> EngineResult<Vec<Cat>> {
        match selection {
            Selection::All => Ok(Cat::ALL.to_vec()),
            Selection::One(name) => Ok(vec![self.cat(name)?]),
        }
    }

    // ========================================================================
    // RGB working spaces
    // ========================================================================

    /// Looks up a working space by name.
    pub fn rgb_space(&self, name: &str) -> EngineResult<&'static WorkingSpace> {
        chroma_primaries::working_space(name.trim()).ok_or_else(|| EngineError::unknown("RGB working space", name))
    }

    /// Resolves a working-space selection.
    pub fn rgb_spaces(&self, selection: &Selection) -> EngineResult<Vec<&'static WorkingSpace>> {
        match selection {
            Selection::All => Ok(WORKING_SPACES.iter().collect()),
            Selection::One(name) => Ok(vec![self.rgb_space(name)?]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_selection_parsing() {
        assert_eq!(Selection::from("all"), Selection::All);
        assert_eq!(Selection::from("D65"), Selection::one("D65"));
        assert_eq!(Selection::All.to_string(), "All");
    }

    #[test]
    fn test_observers() {
        let reg = Registry::global();
        assert_eq!(reg.observers(&Selection::All).unwrap(), Observer::ALL.to_vec());
        assert_eq!(reg.observer("10").unwrap(), Observer::Cie1964);
        assert_eq!(reg.observer("CIE 2006").unwrap_err().kind(), ErrorKind::UnknownReference);
    }

    #[test]
    fn test_illuminant_lists() {
        let reg = Registry::global();
        let cie = reg.illuminant_list("cie").unwrap();
        let iso = reg.illuminant_list("ISO 7589").unwrap();
        let all = reg.illuminant_list("All").unwrap();
        assert_eq!(cie.len() + iso.len(), all.len());
        assert!(reg.illuminant_list("F-series").is_err());
        assert_eq!(reg.illuminant("d65").unwrap().name(), "D65");
    }

    #[test]
    fn test_cats_and_spaces() {
        let reg = Registry::global();
        assert!(!reg.cats(&Selection::All).unwrap().contains(&Cat::None));
        assert_eq!(reg.cat("none").unwrap(), Cat::None);
        assert_eq!(reg.cats(&Selection::one("Bradford")).unwrap(), vec![Cat::Bradford]);
        assert_eq!(reg.rgb_spaces(&Selection::All).unwrap().len(), 10);
        assert_eq!(reg.rgb_space("srgb").unwrap().name, "sRGB");

        let err = reg.cat("Hunt").unwrap_err();
        assert_eq!(
            err,
            EngineError::UnknownReference {
                kind: "chromatic adaptation transform",
                name: "Hunt".into()
            }
        );
    }
}
