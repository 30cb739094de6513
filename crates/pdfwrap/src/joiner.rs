//! Concatenating documents.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glob::{MatchOptions, Pattern};
use pdfwrap_backend::PdfBackend;
use pdfwrap_core::{OperationKind, PdfError, natural_cmp_ignore_case};
use tracing::{debug, info};

/// Joins documents through a backend.
///
/// Every failure is returned as a [`PdfError::Operation`] of kind
/// [`OperationKind::Join`].
#[derive(Clone)]
pub struct Joiner {
    backend: Arc<dyn PdfBackend>,
}

impl Joiner {
    pub fn new(backend: Arc<dyn PdfBackend>) -> Self {
        Self { backend }
    }

    /// Concatenate `files` in order into `outfile`.
    pub fn join(&self, files: &[PathBuf], outfile: &Path) -> Result<(), PdfError> {
        self.backend
            .join(files, outfile)
            .map_err(|e| e.within(OperationKind::Join, join_context(outfile)))?;
        info!(
            backend = self.backend.name(),
            inputs = files.len(),
            outfile = %outfile.display(),
            "joined PDFs"
        );
        Ok(())
    }

    /// Join every file below `folder` whose name matches the glob `pattern`.
    ///
    /// Subfolders are searched too. Files are joined in natural,
    /// case-insensitive order of their paths, so `page2.pdf` comes before
    /// `page10.pdf`.
    ///
    /// # Errors
    ///
    /// Wraps [`PdfError::FileNotFound`] if `folder` does not exist or no
    /// file matches, and [`PdfError::InvalidArgument`] for a malformed
    /// pattern.
    pub fn join_by_pattern(
        &self,
        folder: &Path,
        pattern: &str,
        outfile: &Path,
    ) -> Result<(), PdfError> {
        let files = find_files(folder, pattern)
            .map_err(|e| e.within(OperationKind::Join, join_context(outfile)))?;
        debug!(count = files.len(), pattern, folder = %folder.display(), "matched files");
        self.join(&files, outfile)
    }
}

impl std::fmt::Debug for Joiner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Joiner")
            .field("backend", &self.backend.name())
            .finish()
    }
}

fn join_context(outfile: &Path) -> String {
    format!("failed to join PDF \"{}\"", outfile.display())
}

/// Files below `folder` whose file name matches `pattern`, naturally sorted.
pub(crate) fn find_files(folder: &Path, pattern: &str) -> Result<Vec<PathBuf>, PdfError> {
    let matcher = Pattern::new(pattern).map_err(|e| {
        PdfError::InvalidArgument(format!("invalid file pattern \"{pattern}\": {e}"))
    })?;
    if !folder.is_dir() {
        return Err(PdfError::FileNotFound(format!(
            "folder \"{}\"",
            folder.display()
        )));
    }

    let mut files = Vec::new();
    collect_matching(folder, &matcher, &mut files)?;
    if files.is_empty() {
        return Err(PdfError::FileNotFound(format!(
            "no files in \"{}\" are matching the pattern \"{pattern}\"",
            folder.display()
        )));
    }

    files.sort_by(|a, b| compare_paths(a, b));
    Ok(files)
}

fn collect_matching(
    dir: &Path,
    matcher: &Pattern,
    files: &mut Vec<PathBuf>,
) -> Result<(), PdfError> {
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            collect_matching(&path, matcher, files)?;
        } else if path.is_file() {
            let name = entry.file_name();
            if matcher.matches_with(&name.to_string_lossy(), options) {
                files.push(path);
            }
        }
    }
    Ok(())
}

fn compare_paths(a: &Path, b: &Path) -> Ordering {
    natural_cmp_ignore_case(&a.to_string_lossy(), &b.to_string_lossy())
}
