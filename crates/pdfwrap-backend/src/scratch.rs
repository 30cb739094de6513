//! Scratch files and output placement.
//!
//! Temporary files live in [`tempfile`] guards so they are removed on every
//! exit path. In-place updates write to a sibling scratch directory first and
//! are renamed over the input only after the tool succeeded, so a failed run
//! never touches the original document.

use std::fs;
use std::path::Path;

use pdfwrap_core::PdfError;
use tempfile::TempDir;
use tracing::debug;

/// Fail with [`PdfError::FileNotFound`] unless `path` exists.
///
/// `what` describes the file in the error, e.g. `"PDF"`.
pub fn ensure_file_exists(path: &Path, what: &str) -> Result<(), PdfError> {
    if path.exists() {
        Ok(())
    } else {
        Err(PdfError::FileNotFound(format!(
            "{what} \"{}\"",
            path.display()
        )))
    }
}

/// Fail with [`PdfError::FileNotFound`] unless the input document exists.
pub fn ensure_pdf_exists(path: &Path) -> Result<(), PdfError> {
    ensure_file_exists(path, "PDF")
}

/// A fresh private directory for tool data files.
pub fn scratch_dir() -> Result<TempDir, PdfError> {
    Ok(tempfile::Builder::new().prefix("pdfwrap-").tempdir()?)
}

/// Run `write` against the path the result should be produced at.
///
/// With a distinct `outfile`, `write` targets it directly. Otherwise `write`
/// targets a file in a scratch directory next to `infile`, which then
/// replaces `infile` by rename.
///
/// # Errors
///
/// Propagates the error of `write`; scratch and rename failures are
/// [`PdfError::Io`]. On error `infile` is left as it was.
pub fn write_atomically<F>(infile: &Path, outfile: Option<&Path>, write: F) -> Result<(), PdfError>
where
    F: FnOnce(&Path) -> Result<(), PdfError>,
{
    if let Some(outfile) = outfile.filter(|out| !same_file(infile, out)) {
        return write(outfile);
    }

    let parent = match infile.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let scratch = tempfile::Builder::new()
        .prefix(".pdfwrap-")
        .tempdir_in(parent)
        .map_err(|e| {
            PdfError::from(e).context(format!(
                "failed to create scratch directory in \"{}\"",
                parent.display()
            ))
        })?;
    let target = scratch.path().join("output.pdf");

    write(target.as_path())?;

    fs::rename(&target, infile).map_err(|e| {
        PdfError::from(e).context(format!("failed to replace \"{}\"", infile.display()))
    })?;
    debug!(path = %infile.display(), "replaced input in place");
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
