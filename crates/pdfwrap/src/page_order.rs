//! Strict page reordering.

use std::path::Path;
use std::sync::Arc;

use pdfwrap_backend::PdfBackend;
use pdfwrap_core::{OperationKind, PdfError, check_page_count, validate_page_order};
use tracing::info;

/// Reorders the pages of a document, using each page exactly once.
///
/// Unlike [`PdfBackend::reorder`], which extracts whatever pages it is
/// given, this checks that the order is a permutation of all pages of the
/// document before the document is touched.
#[derive(Clone)]
pub struct PageOrder {
    backend: Arc<dyn PdfBackend>,
}

impl PageOrder {
    pub fn new(backend: Arc<dyn PdfBackend>) -> Self {
        Self { backend }
    }

    /// Rewrite `infile` (or write `outfile`) with its pages in `order`.
    ///
    /// # Errors
    ///
    /// Every failure, including a rejected order, is wrapped as
    /// [`PdfError::Operation`] of kind [`OperationKind::Reorder`]. A
    /// rejected order never runs the tool's write step and leaves `infile`
    /// untouched.
    pub fn reorder(
        &self,
        infile: &Path,
        order: &[u32],
        outfile: Option<&Path>,
    ) -> Result<(), PdfError> {
        self.checked_reorder(infile, order, outfile).map_err(|e| {
            e.within(
                OperationKind::Reorder,
                format!("failed to reorder PDF \"{}\"", infile.display()),
            )
        })?;
        info!(
            backend = self.backend.name(),
            infile = %infile.display(),
            pages = order.len(),
            "reordered PDF"
        );
        Ok(())
    }

    fn checked_reorder(
        &self,
        infile: &Path,
        order: &[u32],
        outfile: Option<&Path>,
    ) -> Result<(), PdfError> {
        validate_page_order(order)?;
        let page_count = self.backend.page_count(infile)?;
        check_page_count(order, page_count)?;
        self.backend.reorder(infile, order, outfile)
    }
}

impl std::fmt::Debug for PageOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageOrder")
            .field("backend", &self.backend.name())
            .finish()
    }
}
