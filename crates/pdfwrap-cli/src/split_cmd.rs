use std::path::{Path, PathBuf};
use std::sync::Arc;

use pdfwrap::{PdfBackend, SplitEntry, Splitter};

use crate::page_range::parse_split_part;
use crate::shared::{report, usage_error};

pub fn run(
    backend: Arc<dyn PdfBackend>,
    file: &Path,
    parts: &[String],
    output_dir: Option<&Path>,
) -> Result<(), i32> {
    let mapping = parts
        .iter()
        .map(|part| {
            parse_split_part(part)
                .map(|(name, pages)| (PathBuf::from(name), pages))
                .map_err(|e| usage_error(&e))
        })
        .collect::<Result<Vec<SplitEntry>, i32>>()?;

    Splitter::new(backend)
        .split(file, &mapping, output_dir)
        .map_err(report)?;
    eprintln!("Wrote {} parts of {}", mapping.len(), file.display());
    Ok(())
}
