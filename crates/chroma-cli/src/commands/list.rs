//! List command.
//!
//! Prints the reference tables the engine resolves names against, so that
//! selections can be checked before a conversion.

use crate::{ListArgs, ListKind};
use anyhow::Result;
use chroma_color::Cat;
use chroma_engine::Registry;
use chroma_primaries::WORKING_SPACES;
use chroma_spectral::Observer;
use serde_json::{Value, json};

use super::{engine_error, format_triplet, to_json};

/// Runs the list command.
pub fn run(args: ListArgs, verbose: bool) -> Result<()> {
    let rows = rows(&args)?;
    if args.json {
        println!("{}", to_json(&rows, true)?);
        return Ok(());
    }
    for row in &rows {
        print_row(row, verbose);
    }
    Ok(())
}

fn rows(args: &ListArgs) -> Result<Vec<Value>> {
    let registry = Registry::global();
    let rows = match args.kind {
        ListKind::Observers => Observer::ALL.iter().map(|o| json!({ "name": o.name() })).collect(),
        ListKind::Illuminants => {
            let list = args.list.as_deref().unwrap_or(chroma_engine::registry::ALL);
            registry
                .illuminant_list(list)
                .map_err(engine_error)?
                .iter()
                .map(|ill| {
                    json!({
                        "name": ill.name(),
                        "spectral": ill.has_spd(),
                        "white_2": ill.white_point(Observer::Cie1931).to_array(),
                        "white_10": ill.white_point(Observer::Cie1964).to_array(),
                    })
                })
                .collect()
        }
        ListKind::Cats => Cat::ALL
            .iter()
            .chain(std::iter::once(&Cat::None))
            .map(|c| json!({ "name": c.name() }))
            .collect(),
        ListKind::Spaces => WORKING_SPACES
            .iter()
            .map(|s| json!({ "name": s.name, "white": s.white_xyz().to_array() }))
            .collect(),
        ListKind::Lists => registry
            .illuminant_list_names()
            .into_iter()
            .map(|name| {
                let size = registry.illuminant_list(name).map(<[_]>::len).unwrap_or(0);
                json!({ "name": name, "size": size })
            })
            .collect(),
    };
    Ok(rows)
}

fn print_row(row: &Value, verbose: bool) {
    let name = row["name"].as_str().unwrap_or_default();
    if !verbose {
        println!("{name}");
        return;
    }
    let mut line = name.to_string();
    if let Some(spectral) = row.get("spectral").and_then(Value::as_bool) {
        line.push_str(if spectral { "  [SPD]" } else { "  [xy]" });
    }
    for key in ["white_2", "white", "white_10"] {
        if let Some(white) = row.get(key).and_then(Value::as_array) {
            let v: Vec<f64> = white.iter().filter_map(Value::as_f64).collect();
            line.push_str(&format!("  {key}: {}", format_triplet(&v, 5)));
        }
    }
    if let Some(size) = row.get("size").and_then(Value::as_u64) {
        line.push_str(&format!("  ({size} illuminants)"));
    }
    println!("{line}");
}
