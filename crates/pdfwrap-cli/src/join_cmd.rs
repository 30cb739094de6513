use std::path::{Path, PathBuf};
use std::sync::Arc;

use pdfwrap::{Joiner, PdfBackend};

use crate::shared::report;

pub fn run(backend: Arc<dyn PdfBackend>, files: &[PathBuf], output: &Path) -> Result<(), i32> {
    Joiner::new(backend).join(files, output).map_err(report)?;
    eprintln!("Joined {} files into {}", files.len(), output.display());
    Ok(())
}

pub fn run_pattern(
    backend: Arc<dyn PdfBackend>,
    folder: &Path,
    pattern: &str,
    output: &Path,
) -> Result<(), i32> {
    Joiner::new(backend)
        .join_by_pattern(folder, pattern, output)
        .map_err(report)?;
    eprintln!("Joined files matching '{pattern}' into {}", output.display());
    Ok(())
}
