use crate::convert::json_to_values;
use anyhow::{Context, Result};
use serde_json::Value as Json;
use std::fs;
use structpack_core::{Layout, Mode};
use tracing::{info, warn};

pub fn execute(
    format: &str,
    input: &str,
    output: Option<&str>,
    loose: bool,
    print_hex: bool,
) -> Result<()> {
    info!("Packing values from {} with format {:?}", input, format);

    let layout =
        Layout::parse(format).with_context(|| format!("Invalid format string: {:?}", format))?;

    // Read input JSON
    let content = super::read_input(input)?;
    let items: Vec<Json> =
        serde_json::from_slice(&content).with_context(|| "Failed to parse JSON input")?;

    info!("Found {} values to pack", items.len());

    let values = json_to_values(&layout, &items)?;
    let packed = layout
        .pack(&values, Mode::from_loose(loose))
        .with_context(|| format!("Failed to pack {} values", values.len()))?;

    if packed.len() < layout.calc_length() {
        warn!(
            "Output truncated: {} of {} bytes packed",
            packed.len(),
            layout.calc_length()
        );
    }

    if let Some(output_path) = output {
        fs::write(output_path, &packed)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;

        info!("Successfully packed {} bytes to {}", packed.len(), output_path);
    }

    if print_hex || output.is_none() {
        println!("{}", hex::encode(&packed));
    }

    Ok(())
}
