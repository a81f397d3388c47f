//! Engine configuration.
//!
//! The fixed strategy choices of the engine, gathered in one serializable
//! struct so they are visible and overridable from a config file. Every
//! field has a default; a partial JSON object only overrides what it names.
//!
//! # Example
//!
//! ```rust
//! use chroma_engine::EngineConfig;
//!
//! let config: EngineConfig = serde_json::from_str(r#"{ "recovery_cat": "Cat02" }"#).unwrap();
//! assert_eq!(config.recovery.max_iterations, 200);
//! ```

use chroma_color::Cat;
use chroma_color::cam02::ViewingConditions;
use chroma_spectral::RecoveryConfig;
use serde::{Deserialize, Serialize};

/// Strategy selection and tuning constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Reflectance recovery method and its budget.
    pub recovery: RecoveryConfig,
    /// Transform bringing tristimulus input into the recovery illuminant.
    pub recovery_cat: Cat,
    /// CAM02-UCS viewing conditions for TM-30.
    pub viewing: ViewingConditions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            recovery: RecoveryConfig::default(),
            recovery_cat: Cat::Bradford,
            viewing: ViewingConditions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_spectral::RecoveryMethod;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.recovery.method, RecoveryMethod::JakobHanika2019);
        assert_eq!(config.recovery_cat, Cat::Bradford);
        assert_eq!(config.viewing.adapting_luminance, 100.0);
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{ "recovery": { "tolerance": 0.01 }, "viewing": { "adapting_luminance": 64.0 } }"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.recovery.tolerance, 0.01);
        assert_eq!(config.recovery.max_iterations, 200);
        assert_eq!(config.viewing.adapting_luminance, 64.0);
        assert_eq!(config.viewing.background_luminance, 20.0);
        assert_eq!(config.recovery_cat, Cat::Bradford);
    }
}
