//! Choosing and building a backend.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use pdfwrap_backend::{DEFAULT_TIMEOUT, PdfBackend, PdfcpuBackend, PdftkBackend};
use pdfwrap_core::PdfError;
use tracing::debug;

/// The external tool a backend drives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BackendKind {
    #[default]
    Pdftk,
    Pdfcpu,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Pdftk => PdftkBackend::NAME,
            BackendKind::Pdfcpu => PdfcpuBackend::NAME,
        }
    }

    /// Conventional install location of the tool on `os`.
    pub fn guess_binary(&self, os: &str) -> PathBuf {
        match self {
            BackendKind::Pdftk => PdftkBackend::guess_binary(os),
            BackendKind::Pdfcpu => PdfcpuBackend::guess_binary(os),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = PdfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdftk" => Ok(BackendKind::Pdftk),
            "pdfcpu" => Ok(BackendKind::Pdfcpu),
            other => Err(PdfError::InvalidArgument(format!(
                "unknown backend \"{other}\" (expected pdftk or pdfcpu)"
            ))),
        }
    }
}

/// Settings for building a [`PdfBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Which tool to drive.
    pub kind: BackendKind,
    /// Path to the tool binary. `None` uses the platform's conventional
    /// install location.
    pub binary: Option<PathBuf>,
    /// Upper bound for each tool invocation.
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            binary: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl BackendConfig {
    pub fn new(kind: BackendKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = Some(binary.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The binary that [`build`](Self::build) will use.
    pub fn resolved_binary(&self) -> PathBuf {
        self.binary
            .clone()
            .unwrap_or_else(|| self.kind.guess_binary(std::env::consts::OS))
    }

    /// Build the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::FileNotFound`] if the binary does not exist.
    pub fn build(&self) -> Result<Arc<dyn PdfBackend>, PdfError> {
        let binary = self.resolved_binary();
        debug!(backend = %self.kind, binary = %binary.display(), "building backend");
        let backend: Arc<dyn PdfBackend> = match self.kind {
            BackendKind::Pdftk => Arc::new(PdftkBackend::new(binary)?.with_timeout(self.timeout)),
            BackendKind::Pdfcpu => {
                Arc::new(PdfcpuBackend::new(binary)?.with_timeout(self.timeout))
            }
        };
        Ok(backend)
    }
}
