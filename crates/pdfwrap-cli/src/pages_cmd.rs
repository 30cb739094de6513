use std::path::Path;
use std::sync::Arc;

use pdfwrap::{Pages, PdfBackend};

use crate::cli::OutputFormat;
use crate::shared::{print_json, report};

pub fn run(backend: Arc<dyn PdfBackend>, file: &Path, format: &OutputFormat) -> Result<(), i32> {
    let mut pages = Pages::new();
    backend.import_pages(&mut pages, file).map_err(report)?;

    match format {
        OutputFormat::Text => write_text(&pages),
        OutputFormat::Json => write_json(&pages),
    }
}

fn write_text(pages: &Pages) -> Result<(), i32> {
    println!("page\twidth_mm\theight_mm\trotation\torientation");

    for page in pages {
        let orientation = if page.is_landscape() {
            "landscape"
        } else {
            "portrait"
        };
        println!(
            "{}\t{}\t{}\t{}\t{}",
            page.page_number(),
            page.width_mm(),
            page.height_mm(),
            page.rotation(),
            orientation
        );
    }

    Ok(())
}

fn write_json(pages: &Pages) -> Result<(), i32> {
    let json_values: Vec<serde_json::Value> = pages
        .iter()
        .map(|page| {
            serde_json::json!({
                "page_number": page.page_number(),
                "width": page.width(),
                "height": page.height(),
                "width_mm": page.width_mm(),
                "height_mm": page.height_mm(),
                "rotation": page.rotation().degrees(),
            })
        })
        .collect();

    print_json(&serde_json::Value::Array(json_values))
}
