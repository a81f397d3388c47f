//! Runs the `chroma` binary end to end.

use serde_json::Value;
use std::process::{Command, Output};

fn chroma(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chroma"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run chroma")
}

fn json(args: &[&str]) -> Value {
    let out = chroma(args);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    serde_json::from_slice(&out.stdout).expect("stdout is not JSON")
}

#[test]
fn test_convert_rgb_json() {
    let v = json(&["convert", "--rgb", "132", "205", "12", "--json"]);
    let records = v["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["rgb"]["hex"], "#84CD0C");
    assert_eq!(records[0]["key"]["illuminant"], "D65");
    assert!(v["spectral"].is_null());
}

#[test]
fn test_convert_text_output() {
    let out = chroma(&["convert", "--lab", "50", "10", "-20"]);
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("Bradford"));
    assert!(text.contains("Hex:"));
}

#[test]
fn test_cross_product_selection() {
    let v = json(&["convert", "--xyz", "0.2", "0.3", "0.4", "--rgb-space", "All", "--cat", "All", "--json"]);
    assert_eq!(v["records"].as_array().unwrap().len(), 12 * 10);
}

#[test]
fn test_input_errors_name_their_kind() {
    let out = chroma(&["convert", "--rgb", "1", "2", "3", "--lab", "50", "0", "0"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("AmbiguousInputError"));

    let out = chroma(&["convert", "--lab", "50", "10"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("IncompleteInputError"));

    let out = chroma(&["convert", "--rgb", "300", "0", "0"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("RangeError"));

    let out = chroma(&["convert", "--rgb", "1", "2", "3", "--illuminant", "D42"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("UnknownReferenceError"));
}

#[test]
fn test_spectrum_file_and_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flat.json");
    let data: Vec<f64> = vec![0.5; 41];
    let doc = serde_json::json!({
        "start": 380.0,
        "stop": 780.0,
        "interval": 10.0,
        "type": "Reflective",
        "data": data,
    });
    std::fs::write(&path, doc.to_string()).unwrap();

    let v = json(&["convert", "--spectrum-file", path.to_str().unwrap(), "--interpolate", "5", "--json"]);
    let lab = &v["records"][0]["lab"];
    assert!(lab[1].as_f64().unwrap().abs() < 1e-3);
    assert!(lab[2].as_f64().unwrap().abs() < 1e-3);
    assert_eq!(v["spectral"]["interpolated"]["interval"], 5.0);
}

#[test]
fn test_output_file_feeds_precalculated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    let out = chroma(&["convert", "--rgb", "10", "20", "30", "-o", path.to_str().unwrap()]);
    assert!(out.status.success());
    assert!(path.exists());

    let first: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let second = json(&["convert", "--rgb", "10", "20", "30", "--precalculated", path.to_str().unwrap(), "--json"]);
    assert_eq!(first["records"], second["records"]);
}

#[test]
fn test_list_tables() {
    let out = chroma(&["list", "cats"]);
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert_eq!(text.lines().count(), 13);
    assert!(text.lines().any(|l| l == "None"));

    let v = json(&["list", "illuminants", "--list", "CIE", "--json"]);
    assert_eq!(v.as_array().unwrap().len(), 21);

    let out = chroma(&["list", "illuminants", "--list", "F"]);
    assert!(!out.status.success());
}
