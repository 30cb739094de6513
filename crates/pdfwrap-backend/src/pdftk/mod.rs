//! Adapter for [pdftk](https://www.pdflabs.com/tools/pdftk-server/).
//!
//! Reads go through a single text dump (`dump_data_utf8`); writes feed dump
//! blocks back with `update_info_utf8`. Page selection uses `cat`.

pub mod dump;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use pdfwrap_core::{Bookmarks, Metadata, Pages, PdfError};
use tracing::debug;

use crate::backend::{
    DocumentInfo, PdfBackend, SplitEntry, check_page_list, page_bound, split_target,
};
use crate::process::{ProcessRunner, SystemRunner, Tool, args};
use crate::scratch::{ensure_pdf_exists, scratch_dir, write_atomically};

const WINDOWS_BINARY: &str = r"C:\Program Files (x86)\PDFtk Server\bin\pdftk.exe";
const UNIX_BINARY: &str = "/usr/bin/pdftk";

/// [`PdfBackend`] driving the pdftk command-line tool.
#[derive(Debug, Clone)]
pub struct PdftkBackend {
    tool: Tool,
}

impl PdftkBackend {
    pub const NAME: &'static str = "pdftk";

    /// Use the pdftk binary at `binary`.
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

    /// Conventional install location of pdftk on `os`
    /// (as in [`std::env::consts::OS`]).
    pub fn guess_binary(os: &str) -> PathBuf {
        if os == "windows" {
            PathBuf::from(WINDOWS_BINARY)
        } else {
            PathBuf::from(UNIX_BINARY)
        }
    }

    /// Conventional install location of pdftk on this platform.
    pub fn default_binary() -> PathBuf {
        Self::guess_binary(std::env::consts::OS)
    }

    pub fn binary(&self) -> &Path {
        self.tool.binary()
    }

    /// Run `dump_data_utf8` on `infile` and return the dump text.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::FileNotFound`] for a missing input, or
    /// [`PdfError::Execution`] if pdftk fails.
    pub fn dump(&self, infile: &Path) -> Result<String, PdfError> {
        ensure_pdf_exists(infile)?;
        let scratch = scratch_dir()?;
        let data_file = scratch.path().join("dump.txt");

        self.tool
            .run(args![infile, "dump_data_utf8", "output", &data_file])
            .map_err(|e| {
                e.context(format!("failed to read data from \"{}\"", infile.display()))
            })?;

        let dump = fs::read_to_string(&data_file).map_err(|e| {
            PdfError::from(e).context(format!("failed to read dump of \"{}\"", infile.display()))
        })?;
        debug!(infile = %infile.display(), bytes = dump.len(), "read pdftk dump");
        Ok(dump)
    }

    /// Feed `data` (dump blocks) to `update_info_utf8`.
    fn update(&self, data: &str, infile: &Path, outfile: Option<&Path>) -> Result<(), PdfError> {
        ensure_pdf_exists(infile)?;
        let scratch = scratch_dir()?;
        let data_file = scratch.path().join("update.txt");
        fs::write(&data_file, data)?;

        write_atomically(infile, outfile, |target| {
            self.tool
                .run(args![infile, "update_info_utf8", &data_file, "output", target])?;
            Ok(())
        })
    }

    fn cat(&self, infile: &Path, pages: &[u32], target: &Path) -> Result<(), PdfError> {
        let mut args = args![infile, "cat"];
        args.extend(pages.iter().map(|page| OsString::from(page.to_string())));
        args.extend(args!["output", target]);
        self.tool.run(args)?;
        Ok(())
    }
}

impl PdfBackend for PdftkBackend {
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
        let mut args: Vec<OsString> = files.iter().map(OsString::from).collect();
        args.extend(args!["cat", "output", outfile]);
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
            self.cat(infile, pages, &target)?;
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
        write_atomically(infile, outfile, |target| self.cat(infile, order, target))
    }

    fn apply_bookmarks(
        &self,
        bookmarks: &Bookmarks,
        infile: &Path,
        outfile: Option<&Path>,
    ) -> Result<(), PdfError> {
        self.update(&dump::bookmark_blocks(bookmarks), infile, outfile)
            .map_err(|e| {
                e.context(format!(
                    "failed to write bookmarks to \"{}\"",
                    infile.display()
                ))
            })
    }

    fn import_bookmarks(&self, bookmarks: &mut Bookmarks, infile: &Path) -> Result<(), PdfError> {
        let dump = self.dump(infile)?;
        dump::parse_bookmarks(&dump, bookmarks)
    }

    fn apply_metadata(
        &self,
        metadata: &Metadata,
        infile: &Path,
        outfile: Option<&Path>,
    ) -> Result<(), PdfError> {
        self.update(&dump::info_blocks(metadata), infile, outfile)
            .map_err(|e| {
                e.context(format!(
                    "failed to write metadata to \"{}\"",
                    infile.display()
                ))
            })
    }

    fn import_metadata(&self, metadata: &mut Metadata, infile: &Path) -> Result<(), PdfError> {
        let dump = self.dump(infile)?;
        dump::parse_metadata(&dump, metadata)
    }

    fn import_pages(&self, pages: &mut Pages, infile: &Path) -> Result<(), PdfError> {
        let dump = self.dump(infile)?;
        let mut parsed = Pages::new();
        dump::parse_pages(&dump, &mut parsed)?;
        *pages = parsed;
        Ok(())
    }

    /// Reads everything from a single dump.
    fn import_document(&self, infile: &Path) -> Result<DocumentInfo, PdfError> {
        let dump = self.dump(infile)?;
        let mut info = DocumentInfo::default();
        dump::parse_pages(&dump, &mut info.pages)?;
        info.bookmarks.set_max_page(page_bound(&info.pages));
        dump::parse_bookmarks(&dump, &mut info.bookmarks)?;
        dump::parse_metadata(&dump, &mut info.metadata)?;
        Ok(info)
    }
}
