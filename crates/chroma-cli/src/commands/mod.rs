//! CLI command implementations

pub mod convert;
pub mod list;

use anyhow::{Context, Result, anyhow};
use chroma_engine::EngineError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Load a JSON document from path
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse JSON: {}", path.display()))
}

/// Serialize to a JSON string
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.context("Failed to serialize JSON")
}

/// Save a JSON document to path
pub fn write_json<T: Serialize>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    fs::write(path, to_json(value, pretty)?).with_context(|| format!("Failed to write: {}", path.display()))
}

/// Engine error with its kind as prefix, e.g. `RangeError: ...`
pub fn engine_error(err: EngineError) -> anyhow::Error {
    anyhow!("{}: {}", err.kind(), err)
}

/// Format a triplet for display
pub fn format_triplet(v: &[f64], precision: usize) -> String {
    v.iter()
        .map(|c| format!("{c:.precision$}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_triplet() {
        assert_eq!(format_triplet(&[1.0, 0.5, -0.25], 3), "1.000, 0.500, -0.250");
    }

    #[test]
    fn test_engine_error_prefix() {
        let err = engine_error(EngineError::MissingInput);
        assert!(err.to_string().starts_with("IncompleteInputError: "), "{err}");
    }
}
