use std::path::Path;
use std::sync::Arc;

use pdfwrap::{Metadata, PdfBackend};

use crate::cli::OutputFormat;
use crate::shared::{print_json, report, usage_error};

pub fn run(backend: Arc<dyn PdfBackend>, file: &Path, format: &OutputFormat) -> Result<(), i32> {
    let mut metadata = Metadata::new();
    backend
        .import_metadata(&mut metadata, file)
        .map_err(report)?;

    match format {
        OutputFormat::Text => {
            if metadata.is_empty() {
                println!("No metadata found.");
                return Ok(());
            }
            println!("key\tvalue");
            for (key, value) in metadata.iter() {
                println!("{key}\t{value}");
            }
            Ok(())
        }
        OutputFormat::Json => {
            let object: serde_json::Map<String, serde_json::Value> = metadata
                .iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::from(v)))
                .collect();
            print_json(&serde_json::Value::Object(object))
        }
    }
}

/// Set the `KEY=VALUE` entries on `file`.
pub fn run_set(
    backend: Arc<dyn PdfBackend>,
    file: &Path,
    entries: &[String],
    output: Option<&Path>,
) -> Result<(), i32> {
    let mut metadata = Metadata::new();
    for entry in entries {
        let (key, value) = parse_entry(entry).map_err(|e| usage_error(&e))?;
        metadata.set(key, value).map_err(report)?;
    }

    backend
        .apply_metadata(&metadata, file, output)
        .map_err(report)?;
    eprintln!(
        "Wrote {} metadata entries to {}",
        metadata.len(),
        output.unwrap_or(file).display()
    );
    Ok(())
}

fn parse_entry(entry: &str) -> Result<(&str, &str), String> {
    let (key, value) = entry
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{entry}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{entry}'"));
    }
    Ok((key, value))
}
