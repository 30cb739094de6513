//! Error types for pdfwrap.
//!
//! Provides [`PdfError`], the single error type surfaced by every document
//! model operation and backend call, and [`OperationKind`] for the
//! operation-contextual wrappers produced by join, split, and reorder.

use std::fmt;

/// The high-level operation a wrapped error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Concatenating several documents into one.
    Join,
    /// Extracting page sets into separate documents.
    Split,
    /// Rewriting a document with its pages in a new order.
    Reorder,
}

impl OperationKind {
    /// Returns the lowercase verb for this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Join => "join",
            OperationKind::Split => "split",
            OperationKind::Reorder => "reorder",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal error types for PDF operations.
///
/// Validation errors ([`InvalidArgument`](PdfError::InvalidArgument),
/// [`FileNotFound`](PdfError::FileNotFound)) are raised before any external
/// process is spawned. [`Execution`](PdfError::Execution) carries the raw
/// backend streams so callers can diagnose tool failures.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfError {
    /// An input document or backend binary does not exist.
    FileNotFound(String),
    /// A caller-supplied value failed validation.
    InvalidArgument(String),
    /// The external tool exited unsuccessfully, could not be spawned, or timed out.
    Execution {
        /// Human-readable description of the failed invocation.
        message: String,
        /// Raw standard error of the tool, if captured.
        stderr: Option<String>,
        /// Raw standard output of the tool, if captured.
        stdout: Option<String>,
    },
    /// A join, split, or reorder failure with operation context.
    Operation {
        /// The operation that failed.
        kind: OperationKind,
        /// Contextual message, including the inner error text.
        message: String,
        /// The underlying error.
        source: Box<PdfError>,
    },
    /// The backend structurally cannot provide the requested capability.
    NotImplemented(String),
    /// The tool produced output that could not be understood.
    Parse(String),
    /// Scratch file or rename failure.
    Io(String),
}

impl PdfError {
    /// Create an [`Execution`](PdfError::Execution) error from captured streams.
    ///
    /// Empty streams are stored as `None`.
    pub fn execution(
        message: impl Into<String>,
        stderr: impl Into<String>,
        stdout: impl Into<String>,
    ) -> Self {
        let non_empty = |s: String| if s.is_empty() { None } else { Some(s) };
        PdfError::Execution {
            message: message.into(),
            stderr: non_empty(stderr.into()),
            stdout: non_empty(stdout.into()),
        }
    }

    /// Wrap `self` as the cause of a failed high-level operation.
    pub fn within(self, kind: OperationKind, context: impl fmt::Display) -> Self {
        PdfError::Operation {
            kind,
            message: format!("{context}: {self}"),
            source: Box::new(self),
        }
    }

    /// Prefix the message of a backend-level error with `context`.
    ///
    /// Captured streams are kept. Validation and operation errors are
    /// returned unchanged.
    pub fn context(self, context: impl fmt::Display) -> Self {
        match self {
            PdfError::Execution {
                message,
                stderr,
                stdout,
            } => PdfError::Execution {
                message: format!("{context}: {message}"),
                stderr,
                stdout,
            },
            PdfError::Parse(msg) => PdfError::Parse(format!("{context}: {msg}")),
            PdfError::Io(msg) => PdfError::Io(format!("{context}: {msg}")),
            other => other,
        }
    }

    /// Raw standard error of the backend, looking through operation wrappers.
    pub fn backend_stderr(&self) -> Option<&str> {
        match self {
            PdfError::Execution { stderr, .. } => stderr.as_deref(),
            PdfError::Operation { source, .. } => source.backend_stderr(),
            _ => None,
        }
    }

    /// Raw standard output of the backend, looking through operation wrappers.
    pub fn backend_stdout(&self) -> Option<&str> {
        match self {
            PdfError::Execution { stdout, .. } => stdout.as_deref(),
            PdfError::Operation { source, .. } => source.backend_stdout(),
            _ => None,
        }
    }

    /// The operation this error was raised in, if it was wrapped.
    pub fn operation(&self) -> Option<OperationKind> {
        match self {
            PdfError::Operation { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns `true` if this error, or the error it wraps, is a missing file.
    pub fn is_file_not_found(&self) -> bool {
        match self {
            PdfError::FileNotFound(_) => true,
            PdfError::Operation { source, .. } => source.is_file_not_found(),
            _ => false,
        }
    }
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::FileNotFound(what) => write!(f, "not found: {what}"),
            PdfError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            PdfError::Execution { message, .. } => write!(f, "{message}"),
            PdfError::Operation { message, .. } => write!(f, "{message}"),
            PdfError::NotImplemented(msg) => write!(f, "not implemented: {msg}"),
            PdfError::Parse(msg) => write!(f, "parse error: {msg}"),
            PdfError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for PdfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PdfError::Operation { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PdfError {
    fn from(err: std::io::Error) -> Self {
        PdfError::Io(err.to_string())
    }
}
