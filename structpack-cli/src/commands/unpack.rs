use crate::convert::value_to_json;
use anyhow::{Context, Result};
use colored::*;
use serde_json::Value as Json;
use std::fs;
use structpack_core::{Layout, Mode};
use tracing::info;

pub fn execute(
    format: &str,
    input: &str,
    output: Option<&str>,
    offset: usize,
    loose: bool,
    as_text: bool,
) -> Result<()> {
    info!("Unpacking {} with format {:?}", input, format);

    let layout =
        Layout::parse(format).with_context(|| format!("Invalid format string: {:?}", format))?;

    let data = super::read_input(input)?;

    info!("Input size: {} bytes, reading from offset {}", data.len(), offset);

    let values = layout
        .unpack_from(&data, offset, Mode::from_loose(loose))
        .with_context(|| format!("Failed to unpack {}", input))?;

    let json = values
        .iter()
        .map(|v| value_to_json(v, as_text))
        .collect::<Result<Vec<Json>>>()?;

    if let Some(output_path) = output {
        let rendered = serde_json::to_string_pretty(&json)
            .with_context(|| "Failed to serialize decoded values")?;

        fs::write(output_path, rendered)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;

        info!("Decoded values written to: {}", output_path);
    } else {
        println!("=== Decoded Values ===");
        for (i, value) in json.iter().enumerate() {
            println!("[{}] {}", i, value);
        }
    }

    if values.len() < layout.value_count() {
        println!(
            "{} Input ended early: decoded {} of {} values",
            "✗".yellow(),
            values.len(),
            layout.value_count()
        );
    } else {
        println!("{} Decoded {} values", "✓".green(), values.len());
    }

    Ok(())
}
