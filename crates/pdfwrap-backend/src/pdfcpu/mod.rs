//! Adapter for [pdfcpu](https://pdfcpu.io).
//!
//! Pages and metadata are read from `info -j` JSON reports. Outlines travel
//! through a scratch JSON file in pdfcpu's nested bookmark format (see
//! [`bookmark_tree`]). Metadata is written with `properties add` on a copy
//! of the input.

pub mod bookmark_tree;
pub mod info;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use pdfwrap_core::{Bookmarks, Metadata, Pages, PdfError};
use tracing::{debug, warn};

use crate::backend::{PdfBackend, SplitEntry, check_page_list, split_target};
use crate::process::{ProcessOutput, ProcessRunner, SystemRunner, Tool, args};
use crate::scratch::{ensure_pdf_exists, scratch_dir, write_atomically};

pub use bookmark_tree::{BookmarkNode, BookmarkTree};
pub use info::SUPPORTED_METADATA_ATTRIBUTES;

const WINDOWS_BINARY: &str = r"C:\Program Files\pdfcpu\pdfcpu.exe";
const UNIX_BINARY: &str = "/usr/bin/pdfcpu";

const NO_OUTLINES: &str = "no outlines available";
// Printed by pdfcpu builds that predate a subcommand, e.g. `properties`.
const UNKNOWN_COMMAND: &str = "unknown command";

/// How a `bookmarks export` run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The bookmark file was written.
    Exported,
    /// The document has no outline; nothing to import.
    NoOutlines,
    /// Any other failure.
    Failed,
}

/// Classify the result of `pdfcpu bookmarks export`.
///
/// pdfcpu exits non-zero for a document without an outline; that case is
/// recognised by its message on standard error.
pub fn classify_export_failure(output: &ProcessOutput) -> ExportOutcome {
    if output.success {
        ExportOutcome::Exported
    } else if !output.timed_out && output.stderr.contains(NO_OUTLINES) {
        ExportOutcome::NoOutlines
    } else {
        ExportOutcome::Failed
    }
}

/// Whether pdfcpu rejected the subcommand itself rather than failing on it.
fn lacks_subcommand(output: &ProcessOutput) -> bool {
    !output.timed_out
        && (output.stderr.contains(UNKNOWN_COMMAND) || output.stdout.contains(UNKNOWN_COMMAND))
}

/// [`PdfBackend`] driving the pdfcpu command-line tool.
#[derive(Debug, Clone)]
pub struct PdfcpuBackend {
    tool: Tool,
}

impl PdfcpuBackend {
    pub const NAME: &'static str = "pdfcpu";

    /// Use the pdfcpu binary at `binary`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::FileNotFound`] if `binary` does not exist.
    pub fn new(binary: impl Into<PathBuf>) -> Result<Self, PdfError> {
        Self::with_runner(binary, Arc::new(SystemRunner))
    }

    /// Use `binary`, running it through `runner`.
    pub fn with_runner(
        binary: impl Into<PathBuf>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Result<Self, PdfError> {
        Ok(Self {
            tool: Tool::new(Self::NAME, binary, runner)?,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.tool = self.tool.with_timeout(timeout);
        self
    }

    /// Conventional install location of pdfcpu on `os`
    /// (as in [`std::env::consts::OS`]).
    pub fn guess_binary(os: &str) -> PathBuf {
        if os == "windows" {
            PathBuf::from(WINDOWS_BINARY)
        } else {
            PathBuf::from(UNIX_BINARY)
        }
    }

    /// Conventional install location of pdfcpu on this platform.
    pub fn default_binary() -> PathBuf {
        Self::guess_binary(std::env::consts::OS)
    }

    pub fn binary(&self) -> &Path {
        self.tool.binary()
    }

    fn collect(&self, infile: &Path, pages: &[u32], target: &Path) -> Result<(), PdfError> {
        let selection = pages
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.tool
            .run(args!["collect", "-pages", selection, infile, target])?;
        Ok(())
    }

    /// `Key=Value` arguments for the keys pdfcpu can store.
    fn properties(metadata: &Metadata) -> Vec<OsString> {
        metadata
            .iter()
            .filter(|(key, _)| {
                let supported = info::is_supported_attribute(key);
                if !supported {
                    warn!(key, "pdfcpu cannot store metadata key, dropping it");
                }
                supported
            })
            .map(|(key, value)| OsString::from(format!("{key}={value}")))
            .collect()
    }
}

impl PdfBackend for PdfcpuBackend {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn join(&self, files: &[PathBuf], outfile: &Path) -> Result<(), PdfError> {
        if files.is_empty() {
            return Err(PdfError::InvalidArgument("no files to join".to_string()));
        }
        for file in files {
            ensure_pdf_exists(file)?;
        }
        let mut args = args!["merge", outfile];
        args.extend(files.iter().map(OsString::from));
        self.tool.run(args)?;
        Ok(())
    }

    fn split(
        &self,
        infile: &Path,
        mapping: &[SplitEntry],
        output_folder: Option<&Path>,
    ) -> Result<(), PdfError> {
        ensure_pdf_exists(infile)?;
        for (name, pages) in mapping {
            check_page_list(pages, &format!("\"{}\"", name.display()))?;
        }
        for (name, pages) in mapping {
            let target = split_target(name, output_folder);
            self.collect(infile, pages, &target)?;
            debug!(target = %target.display(), pages = pages.len(), "wrote split entry");
        }
        Ok(())
    }

    fn reorder(
        &self,
        infile: &Path,
        order: &[u32],
        outfile: Option<&Path>,
    ) -> Result<(), PdfError> {
        ensure_pdf_exists(infile)?;
        check_page_list(order, "reorder")?;
        write_atomically(infile, outfile, |target| self.collect(infile, order, target))
    }

    fn apply_bookmarks(
        &self,
        bookmarks: &Bookmarks,
        infile: &Path,
        outfile: Option<&Path>,
    ) -> Result<(), PdfError> {
        ensure_pdf_exists(infile)?;
        let scratch = scratch_dir()?;
        let json_file = scratch.path().join("bookmarks.json");
        fs::write(&json_file, BookmarkTree::from_bookmarks(bookmarks).to_json()?)?;

        write_atomically(infile, outfile, |target| {
            self.tool
                .run(args!["bookmarks", "import", "-replace", infile, &json_file, target])?;
            Ok(())
        })
        .map_err(|e| {
            e.context(format!(
                "failed to write bookmarks to \"{}\"",
                infile.display()
            ))
        })
    }

    fn import_bookmarks(&self, bookmarks: &mut Bookmarks, infile: &Path) -> Result<(), PdfError> {
        ensure_pdf_exists(infile)?;
        let scratch = scratch_dir()?;
        let json_file = scratch.path().join("bookmarks.json");

        let output = self
            .tool
            .run_unchecked(args!["bookmarks", "export", infile, &json_file])?;
        match classify_export_failure(&output) {
            ExportOutcome::Exported => {}
            ExportOutcome::NoOutlines => {
                debug!(infile = %infile.display(), "document has no outline");
                return Ok(());
            }
            ExportOutcome::Failed => {
                return Err(self.tool.failure(&output).context(format!(
                    "failed to read bookmarks data from \"{}\"",
                    infile.display()
                )));
            }
        }

        // Some pdfcpu versions exit successfully without writing a file for
        // an empty outline.
        if !json_file.exists() {
            debug!(infile = %infile.display(), "no bookmark file written");
            return Ok(());
        }
        let json = fs::read_to_string(&json_file)?;
        BookmarkTree::from_json(&json)?.flatten_into(bookmarks)
    }

    fn apply_metadata(
        &self,
        metadata: &Metadata,
        infile: &Path,
        outfile: Option<&Path>,
    ) -> Result<(), PdfError> {
        ensure_pdf_exists(infile)?;
        let properties = Self::properties(metadata);

        write_atomically(infile, outfile, |target| {
            fs::copy(infile, target)?;
            if properties.is_empty() {
                debug!("no storable metadata, copied input only");
                return Ok(());
            }
            let mut args = args!["properties", "add", target];
            args.extend(properties);
            let output = self.tool.run_unchecked(args)?;
            if output.success {
                Ok(())
            } else if lacks_subcommand(&output) {
                Err(PdfError::NotImplemented(format!(
                    "{} cannot write document properties",
                    self.binary().display()
                )))
            } else {
                Err(self.tool.failure(&output))
            }
        })
        .map_err(|e| {
            e.context(format!(
                "failed to write PDF metadata to \"{}\"",
                infile.display()
            ))
        })
    }

    fn import_metadata(&self, metadata: &mut Metadata, infile: &Path) -> Result<(), PdfError> {
        ensure_pdf_exists(infile)?;
        let output = self.tool.run(args!["info", "-j", infile]).map_err(|e| {
            e.context(format!(
                "failed to read metadata data from \"{}\"",
                infile.display()
            ))
        })?;
        info::parse_metadata(&output.stdout, metadata)
    }

    fn import_pages(&self, pages: &mut Pages, infile: &Path) -> Result<(), PdfError> {
        ensure_pdf_exists(infile)?;
        let output = self
            .tool
            .run(args!["info", "-pages", "1-", "-j", infile])
            .map_err(|e| {
                e.context(format!(
                    "failed to read pages data from \"{}\"",
                    infile.display()
                ))
            })?;
        info::parse_pages(&output.stdout, pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_platform_binary() {
        assert_eq!(
            PdfcpuBackend::guess_binary("linux"),
            PathBuf::from("/usr/bin/pdfcpu")
        );
        assert_eq!(
            PdfcpuBackend::guess_binary("windows"),
            PathBuf::from(r"C:\Program Files\pdfcpu\pdfcpu.exe")
        );
    }

    #[test]
    fn export_classification() {
        assert_eq!(
            classify_export_failure(&ProcessOutput::ok("")),
            ExportOutcome::Exported
        );
        assert_eq!(
            classify_export_failure(&ProcessOutput::failed(
                1,
                "pdfcpu: no outlines available\n"
            )),
            ExportOutcome::NoOutlines
        );
        assert_eq!(
            classify_export_failure(&ProcessOutput::failed(1, "pdfcpu: corrupt xref")),
            ExportOutcome::Failed
        );
    }

    #[test]
    fn timeout_is_never_benign() {
        let output = ProcessOutput {
            timed_out: true,
            stderr: "no outlines available".to_string(),
            ..ProcessOutput::default()
        };
        assert_eq!(classify_export_failure(&output), ExportOutcome::Failed);
    }

    #[test]
    fn properties_keep_supported_keys_only() {
        let mut metadata = Metadata::new();
        metadata.set("Title", "E=mc²").unwrap();
        metadata.set("Custom", "dropped").unwrap();
        metadata.set("Author", "Älbert €instein").unwrap();
        let properties: Vec<String> = PdfcpuBackend::properties(&metadata)
            .into_iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        assert_eq!(properties, vec!["Title=E=mc²", "Author=Älbert €instein"]);
    }
}
