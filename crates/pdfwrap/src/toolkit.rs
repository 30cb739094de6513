//! Bundled import and apply of a document's editable data.

use std::path::Path;
use std::sync::Arc;

use pdfwrap_backend::{DocumentInfo, PdfBackend};
use pdfwrap_core::{Bookmarks, Metadata, Pages, PdfError};
use tracing::debug;

use crate::{Joiner, PageOrder, Splitter};

/// Holds the bookmarks, metadata, and pages of one document together with
/// the backend used to read and write them.
///
/// A typical round trip is [`import`](Self::import), edits through the
/// `*_mut` accessors, then [`apply`](Self::apply).
pub struct Toolkit {
    backend: Arc<dyn PdfBackend>,
    bookmarks: Bookmarks,
    metadata: Metadata,
    pages: Pages,
}

impl Toolkit {
    pub fn new(backend: Arc<dyn PdfBackend>) -> Self {
        Self {
            backend,
            bookmarks: Bookmarks::new(),
            metadata: Metadata::new(),
            pages: Pages::new(),
        }
    }

    pub fn backend(&self) -> &Arc<dyn PdfBackend> {
        &self.backend
    }

    pub fn bookmarks(&self) -> &Bookmarks {
        &self.bookmarks
    }

    pub fn bookmarks_mut(&mut self) -> &mut Bookmarks {
        &mut self.bookmarks
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    pub fn pages(&self) -> &Pages {
        &self.pages
    }

    pub fn joiner(&self) -> Joiner {
        Joiner::new(Arc::clone(&self.backend))
    }

    pub fn splitter(&self) -> Splitter {
        Splitter::new(Arc::clone(&self.backend))
    }

    pub fn page_order(&self) -> PageOrder {
        PageOrder::new(Arc::clone(&self.backend))
    }

    /// Replace pages, bookmarks, and metadata with those of `infile`.
    ///
    /// Bookmarks are bounded by the number of imported pages. On error the
    /// held data is left as it was.
    pub fn import(&mut self, infile: &Path) -> Result<&mut Self, PdfError> {
        let DocumentInfo {
            pages,
            bookmarks,
            metadata,
        } = self.backend.import_document(infile)?;
        debug!(
            infile = %infile.display(),
            pages = pages.len(),
            bookmarks = bookmarks.len(),
            metadata = metadata.len(),
            "imported document"
        );
        self.pages = pages;
        self.bookmarks = bookmarks;
        self.metadata = metadata;
        Ok(self)
    }

    /// Write the held bookmarks, then the held metadata.
    ///
    /// The metadata is written to the result of the bookmark step:
    /// `outfile` when given, otherwise `infile` in place.
    pub fn apply(&mut self, infile: &Path, outfile: Option<&Path>) -> Result<&mut Self, PdfError> {
        self.backend.apply_bookmarks(&self.bookmarks, infile, outfile)?;
        let written = outfile.unwrap_or(infile);
        self.backend.apply_metadata(&self.metadata, written, None)?;
        Ok(self)
    }

    /// Drop all held pages, bookmarks, and metadata.
    pub fn clear(&mut self) {
        self.pages.clear();
        self.bookmarks.clear();
        self.metadata.clear();
    }
}

impl std::fmt::Debug for Toolkit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolkit")
            .field("backend", &self.backend.name())
            .field("bookmarks", &self.bookmarks)
            .field("metadata", &self.metadata)
            .field("pages", &self.pages)
            .finish()
    }
}
