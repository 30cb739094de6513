//! The backend capability trait.
//!
//! [`PdfBackend`] is the single seam between the document model and an
//! external PDF tool. Implementations are stateless apart from their tool
//! binding and are shared as `Arc<dyn PdfBackend>`.

use std::path::{Path, PathBuf};

use pdfwrap_core::{Bookmarks, Metadata, Pages, PdfError};

/// One output of a split: file name and the pages it receives, in order.
pub type SplitEntry = (PathBuf, Vec<u32>);

/// Pages, bookmarks, and metadata read from one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub pages: Pages,
    pub bookmarks: Bookmarks,
    pub metadata: Metadata,
}

/// Operations every PDF tool adapter provides.
///
/// Every method that takes an input document fails with
/// [`PdfError::FileNotFound`] before running the tool if it is missing.
/// Tool failures are [`PdfError::Execution`] and carry the tool's raw
/// standard error and output.
///
/// Methods with an `outfile` parameter modify `infile` in place when
/// `outfile` is `None` or names the same file; the original is replaced only
/// after the tool succeeded.
pub trait PdfBackend: Send + Sync {
    /// Short identifier used in logs, e.g. `"pdftk"`.
    fn name(&self) -> &'static str;

    /// Concatenate `files` in order into `outfile`.
    fn join(&self, files: &[PathBuf], outfile: &Path) -> Result<(), PdfError>;

    /// Write one document per entry of `mapping`, sequentially.
    ///
    /// Each entry is written to `output_folder.join(name)`, or to `name`
    /// as given without a folder. A failing entry stops the split; earlier
    /// outputs are kept.
    fn split(
        &self,
        infile: &Path,
        mapping: &[SplitEntry],
        output_folder: Option<&Path>,
    ) -> Result<(), PdfError>;

    /// Rewrite `infile` with the pages listed in `order`.
    ///
    /// No permutation check is done here; see
    /// [`validate_page_order`](pdfwrap_core::validate_page_order).
    fn reorder(
        &self,
        infile: &Path,
        order: &[u32],
        outfile: Option<&Path>,
    ) -> Result<(), PdfError>;

    /// Replace the outline of `infile` with `bookmarks`.
    fn apply_bookmarks(
        &self,
        bookmarks: &Bookmarks,
        infile: &Path,
        outfile: Option<&Path>,
    ) -> Result<(), PdfError>;

    /// Append the outline of `infile` to `bookmarks`, in document order.
    ///
    /// A document without an outline adds nothing.
    fn import_bookmarks(&self, bookmarks: &mut Bookmarks, infile: &Path) -> Result<(), PdfError>;

    /// Write the document information entries of `metadata`.
    fn apply_metadata(
        &self,
        metadata: &Metadata,
        infile: &Path,
        outfile: Option<&Path>,
    ) -> Result<(), PdfError>;

    /// Set every document information entry of `infile` on `metadata`.
    fn import_metadata(&self, metadata: &mut Metadata, infile: &Path) -> Result<(), PdfError>;

    /// Replace the contents of `pages` with the pages of `infile`.
    fn import_pages(&self, pages: &mut Pages, infile: &Path) -> Result<(), PdfError>;

    /// Number of pages in `infile`.
    fn page_count(&self, infile: &Path) -> Result<usize, PdfError> {
        let mut pages = Pages::new();
        self.import_pages(&mut pages, infile)?;
        Ok(pages.len())
    }

    /// Read pages, bookmarks, and metadata of `infile`.
    ///
    /// Bookmarks are bounded by the imported page count.
    fn import_document(&self, infile: &Path) -> Result<DocumentInfo, PdfError> {
        let mut info = DocumentInfo::default();
        self.import_pages(&mut info.pages, infile)?;
        info.bookmarks.set_max_page(page_bound(&info.pages));
        self.import_bookmarks(&mut info.bookmarks, infile)?;
        self.import_metadata(&mut info.metadata, infile)?;
        Ok(info)
    }
}

pub(crate) fn page_bound(pages: &Pages) -> u32 {
    u32::try_from(pages.len()).unwrap_or(u32::MAX)
}

/// Reject page lists the tools would read as "all pages" or choke on.
pub(crate) fn check_page_list(pages: &[u32], what: &str) -> Result<(), PdfError> {
    if pages.is_empty() {
        return Err(PdfError::InvalidArgument(format!("empty page list for {what}")));
    }
    if pages.contains(&0) {
        return Err(PdfError::InvalidArgument(format!(
            "invalid page number 0 for {what}"
        )));
    }
    Ok(())
}

/// Where a split entry is written.
pub(crate) fn split_target(name: &Path, output_folder: Option<&Path>) -> PathBuf {
    match output_folder {
        Some(folder) => folder.join(name),
        None => name.to_path_buf(),
    }
}
