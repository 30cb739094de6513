//! pdfwrap-core: Backend-independent document model.
//!
//! This crate provides the value types exchanged with the external PDF tools
//! ([`Page`], [`Bookmark`], and the [`Pages`], [`Bookmarks`], [`Metadata`]
//! collections), the [`PdfError`] taxonomy, and the page-order validation
//! used before a strict reorder. It performs no process or filesystem access.

pub mod bookmark;
pub mod error;
pub mod metadata;
pub mod natural;
pub mod page;
pub mod page_order;

pub use bookmark::{Bookmark, Bookmarks, MAX_LEVEL, MIN_LEVEL};
pub use error::{OperationKind, PdfError};
pub use metadata::Metadata;
pub use natural::{natural_cmp, natural_cmp_ignore_case};
pub use page::{Page, Pages, Rotation, page_size, points_to_mm};
pub use page_order::{check_page_count, validate_page_order};
