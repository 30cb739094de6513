//! A recording in-memory backend for facade tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use pdfwrap::{
    Bookmark, Bookmarks, Metadata, Page, Pages, PdfBackend, PdfError, Rotation, SplitEntry,
};

/// One call received by [`FakeBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Join(Vec<PathBuf>, PathBuf),
    Split(PathBuf, Vec<SplitEntry>, Option<PathBuf>),
    Reorder(PathBuf, Vec<u32>, Option<PathBuf>),
    ApplyBookmarks(Vec<Bookmark>, PathBuf, Option<PathBuf>),
    ImportBookmarks(PathBuf),
    ApplyMetadata(Vec<(String, String)>, PathBuf, Option<PathBuf>),
    ImportMetadata(PathBuf),
    ImportPages(PathBuf),
}

/// Backend double serving a fixed document and recording every call.
#[derive(Default)]
pub struct FakeBackend {
    pub page_count: u32,
    pub bookmarks: Vec<Bookmark>,
    pub metadata: Vec<(&'static str, &'static str)>,
    /// Error returned by every writing operation when set.
    pub fail_with: Option<PdfError>,
    pub log: Mutex<Vec<Call>>,
}

impl FakeBackend {
    pub fn with_pages(page_count: u32) -> Self {
        Self {
            page_count,
            ..Self::default()
        }
    }

    pub fn failing(error: PdfError) -> Self {
        Self {
            page_count: 3,
            fail_with: Some(error),
            ..Self::default()
        }
    }

    pub fn shared(self) -> Arc<FakeBackend> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.log.lock().unwrap().push(call);
    }

    fn outcome(&self) -> Result<(), PdfError> {
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl PdfBackend for FakeBackend {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn join(&self, files: &[PathBuf], outfile: &Path) -> Result<(), PdfError> {
        self.record(Call::Join(files.to_vec(), outfile.to_path_buf()));
        self.outcome()
    }

    fn split(
        &self,
        infile: &Path,
        mapping: &[SplitEntry],
        output_folder: Option<&Path>,
    ) -> Result<(), PdfError> {
        self.record(Call::Split(
            infile.to_path_buf(),
            mapping.to_vec(),
            output_folder.map(Path::to_path_buf),
        ));
        self.outcome()
    }

    fn reorder(
        &self,
        infile: &Path,
        order: &[u32],
        outfile: Option<&Path>,
    ) -> Result<(), PdfError> {
        self.record(Call::Reorder(
            infile.to_path_buf(),
            order.to_vec(),
            outfile.map(Path::to_path_buf),
        ));
        self.outcome()
    }

    fn apply_bookmarks(
        &self,
        bookmarks: &Bookmarks,
        infile: &Path,
        outfile: Option<&Path>,
    ) -> Result<(), PdfError> {
        self.record(Call::ApplyBookmarks(
            bookmarks.all().to_vec(),
            infile.to_path_buf(),
            outfile.map(Path::to_path_buf),
        ));
        self.outcome()
    }

    fn import_bookmarks(&self, bookmarks: &mut Bookmarks, infile: &Path) -> Result<(), PdfError> {
        self.record(Call::ImportBookmarks(infile.to_path_buf()));
        for bookmark in &self.bookmarks {
            bookmarks.add(bookmark.clone())?;
        }
        Ok(())
    }

    fn apply_metadata(
        &self,
        metadata: &Metadata,
        infile: &Path,
        outfile: Option<&Path>,
    ) -> Result<(), PdfError> {
        let entries = metadata
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.record(Call::ApplyMetadata(
            entries,
            infile.to_path_buf(),
            outfile.map(Path::to_path_buf),
        ));
        self.outcome()
    }

    fn import_metadata(&self, metadata: &mut Metadata, infile: &Path) -> Result<(), PdfError> {
        self.record(Call::ImportMetadata(infile.to_path_buf()));
        for (key, value) in &self.metadata {
            metadata.set(key, *value)?;
        }
        Ok(())
    }

    fn import_pages(&self, pages: &mut Pages, infile: &Path) -> Result<(), PdfError> {
        self.record(Call::ImportPages(infile.to_path_buf()));
        pages.clear();
        for number in 1..=self.page_count {
            pages.add(Page::new(number, 595.32, 841.92, Rotation::Up));
        }
        Ok(())
    }
}
