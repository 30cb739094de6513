//! Extracting page sets into separate documents.

use std::path::Path;
use std::sync::Arc;

use pdfwrap_backend::{PdfBackend, SplitEntry};
use pdfwrap_core::{OperationKind, PdfError};
use tracing::info;

/// Splits documents through a backend.
#[derive(Clone)]
pub struct Splitter {
    backend: Arc<dyn PdfBackend>,
}

impl Splitter {
    pub fn new(backend: Arc<dyn PdfBackend>) -> Self {
        Self { backend }
    }

    /// Write one document per entry of `mapping`, each holding the listed
    /// pages of `infile` in the listed order.
    ///
    /// Outputs go to `output_folder` when given. A failing entry stops the
    /// split; outputs written before it are kept.
    ///
    /// # Errors
    ///
    /// Failures are wrapped as [`PdfError::Operation`] of kind
    /// [`OperationKind::Split`], keeping the tool's streams.
    pub fn split(
        &self,
        infile: &Path,
        mapping: &[SplitEntry],
        output_folder: Option<&Path>,
    ) -> Result<(), PdfError> {
        self.backend
            .split(infile, mapping, output_folder)
            .map_err(|e| {
                e.within(
                    OperationKind::Split,
                    format!("failed to split PDF \"{}\"", infile.display()),
                )
            })?;
        info!(
            backend = self.backend.name(),
            infile = %infile.display(),
            outputs = mapping.len(),
            "split PDF"
        );
        Ok(())
    }
}

impl std::fmt::Debug for Splitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Splitter")
            .field("backend", &self.backend.name())
            .finish()
    }
}
