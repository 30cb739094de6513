//! pdfwrap: Join, split, reorder PDFs and edit their bookmarks and metadata.
//!
//! This is the public API facade crate for pdfwrap. It re-exports the
//! document model from pdfwrap-core and drives one of the external tool
//! adapters from pdfwrap-backend.
//!
//! # Architecture
//!
//! - **pdfwrap-core**: Backend-independent document model and errors
//! - **pdfwrap-backend**: The [`PdfBackend`] trait and the pdftk / pdfcpu adapters
//! - **pdfwrap** (this crate): Operation objects that validate input and add
//!   context to backend failures
//!
//! # Example
//!
//! ```no_run
//! use pdfwrap::{BackendConfig, BackendKind, Toolkit};
//!
//! let backend = BackendConfig::new(BackendKind::Pdfcpu).build()?;
//! let mut toolkit = Toolkit::new(backend);
//! toolkit.import("report.pdf".as_ref())?;
//! toolkit.metadata_mut().set("Title", "Quarterly report")?;
//! toolkit.apply("report.pdf".as_ref(), None)?;
//! # Ok::<(), pdfwrap::PdfError>(())
//! ```

mod config;
mod joiner;
mod page_order;
mod splitter;
mod toolkit;

pub use config::{BackendConfig, BackendKind};
pub use joiner::Joiner;
pub use page_order::PageOrder;
pub use splitter::Splitter;
pub use toolkit::Toolkit;

pub use pdfwrap_backend;
pub use pdfwrap_backend::{
    DEFAULT_TIMEOUT, DocumentInfo, PdfBackend, PdfcpuBackend, PdftkBackend, SplitEntry,
};
pub use pdfwrap_core;
pub use pdfwrap_core::{
    Bookmark, Bookmarks, Metadata, OperationKind, Page, Pages, PdfError, Rotation,
};
