use std::fs;
use std::path::Path;
use std::sync::Arc;

use pdfwrap::{Bookmark, Bookmarks, PdfBackend};

use crate::cli::OutputFormat;
use crate::shared::{print_json, report, usage_error};

pub fn run(backend: Arc<dyn PdfBackend>, file: &Path, format: &OutputFormat) -> Result<(), i32> {
    let mut bookmarks = Bookmarks::new();
    backend
        .import_bookmarks(&mut bookmarks, file)
        .map_err(report)?;

    match format {
        OutputFormat::Text => write_text(&bookmarks),
        OutputFormat::Json => write_json(&bookmarks),
    }
}

fn write_text(bookmarks: &Bookmarks) -> Result<(), i32> {
    if bookmarks.is_empty() {
        println!("No bookmarks found.");
        return Ok(());
    }

    println!("level\tpage\ttitle");

    for bm in bookmarks {
        let indent = "  ".repeat(bm.level.saturating_sub(1) as usize);
        println!("{}\t{}\t{}{}", bm.level, bm.page_number, indent, bm.title);
    }

    Ok(())
}

fn write_json(bookmarks: &Bookmarks) -> Result<(), i32> {
    let value = serde_json::to_value(bookmarks.all()).map_err(|e| {
        eprintln!("Error: failed to serialize bookmarks: {e}");
        1
    })?;
    print_json(&value)
}

/// Replace the outline of `file` with the entries listed in `json_file`.
pub fn run_set(
    backend: Arc<dyn PdfBackend>,
    file: &Path,
    json_file: &Path,
    output: Option<&Path>,
) -> Result<(), i32> {
    let text = fs::read_to_string(json_file).map_err(|e| {
        usage_error(&format!("failed to read {}: {e}", json_file.display()))
    })?;
    let entries: Vec<Bookmark> = serde_json::from_str(&text).map_err(|e| {
        usage_error(&format!("invalid bookmarks in {}: {e}", json_file.display()))
    })?;

    let page_count = backend.page_count(file).map_err(report)?;
    let mut bookmarks = Bookmarks::new();
    bookmarks.set_max_page(u32::try_from(page_count).unwrap_or(u32::MAX));
    for entry in entries {
        bookmarks.add(entry).map_err(report)?;
    }

    backend
        .apply_bookmarks(&bookmarks, file, output)
        .map_err(report)?;
    eprintln!(
        "Wrote {} bookmarks to {}",
        bookmarks.len(),
        output.unwrap_or(file).display()
    );
    Ok(())
}
