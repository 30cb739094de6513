//! Error types for the process and adapter layers.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! for failures that happen around a tool invocation (spawning, scratch
//! files, decoding tool output) and converts them to [`PdfError`].

use std::path::PathBuf;

use pdfwrap_core::PdfError;
use thiserror::Error;

/// Error type for backend plumbing.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The tool binary could not be started.
    #[error("failed to spawn \"{}\": {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scratch file, copy, or rename failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tool output was not the JSON we expected.
    #[error("invalid JSON from backend: {0}")]
    Json(#[from] serde_json::Error),

    /// Tool output was readable but did not have the expected shape.
    #[error("unexpected backend output: {0}")]
    Output(String),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] PdfError),
}

impl From<BackendError> for PdfError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Spawn { .. } => PdfError::execution(err.to_string(), "", ""),
            BackendError::Io(e) => PdfError::Io(e.to_string()),
            BackendError::Json(e) => PdfError::Parse(e.to_string()),
            BackendError::Output(msg) => PdfError::Parse(msg),
            BackendError::Core(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_error_becomes_execution() {
        let err = BackendError::Spawn {
            program: PathBuf::from("/usr/bin/pdftk"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let pdf_err: PdfError = err.into();
        assert!(matches!(pdf_err, PdfError::Execution { .. }));
        assert!(pdf_err.to_string().contains("/usr/bin/pdftk"));
        assert!(pdf_err.to_string().contains("denied"));
    }

    #[test]
    fn io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: BackendError = io_err.into();
        assert!(matches!(err, BackendError::Io(_)));
        let pdf_err: PdfError = err.into();
        assert!(matches!(pdf_err, PdfError::Io(_)));
        assert!(pdf_err.to_string().contains("file missing"));
    }

    #[test]
    fn json_error_becomes_parse() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let pdf_err: PdfError = BackendError::from(json_err).into();
        assert!(matches!(pdf_err, PdfError::Parse(_)));
    }

    #[test]
    fn output_error_becomes_parse() {
        let pdf_err: PdfError = BackendError::Output("no infos".to_string()).into();
        assert_eq!(pdf_err, PdfError::Parse("no infos".to_string()));
    }

    #[test]
    fn core_passthrough() {
        let original = PdfError::InvalidArgument("empty page order".to_string());
        let pdf_err: PdfError = BackendError::Core(original.clone()).into();
        assert_eq!(pdf_err, original);
    }
}
