//! pdfwrap-backend: Adapters for external PDF command-line tools.
//!
//! This crate defines the [`PdfBackend`] capability trait and implements it
//! for two tools with very different data formats: [`PdftkBackend`] (flat
//! text dumps) and [`PdfcpuBackend`] (JSON reports and nested outline files).
//! Tools are run through a [`ProcessRunner`] so tests can script them.

pub mod backend;
pub mod error;
pub mod pdfcpu;
pub mod pdftk;
pub mod process;
pub mod scratch;

pub use backend::{DocumentInfo, PdfBackend, SplitEntry};
pub use error::BackendError;
pub use pdfcpu::{ExportOutcome, PdfcpuBackend, classify_export_failure};
pub use pdftk::PdftkBackend;
pub use pdfwrap_core;
pub use process::{DEFAULT_TIMEOUT, Invocation, ProcessOutput, ProcessRunner, SystemRunner};
