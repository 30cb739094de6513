//! PDF bookmark / outline types.
//!
//! Provides [`Bookmark`] for a single outline entry and [`Bookmarks`], the
//! ordered, validated collection exchanged with backends. The outline tree is
//! encoded implicitly: a bookmark whose level is greater than its
//! predecessor's is a descendant of that predecessor.

use crate::error::PdfError;

/// Shallowest bookmark level (top of the outline).
pub const MIN_LEVEL: u32 = 1;

/// Deepest bookmark level accepted by [`Bookmarks::add`].
pub const MAX_LEVEL: u32 = 99;

/// A single entry in the PDF document outline.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bookmark {
    /// The bookmark title text.
    pub title: String,
    /// The 1-indexed destination page. `0` means "unassigned" and is ignored by [`Bookmarks::add`].
    pub page_number: i32,
    /// Nesting depth, 1 for top-level entries.
    pub level: u32,
}

impl Bookmark {
    pub fn new(title: impl Into<String>, page_number: i32, level: u32) -> Self {
        Self {
            title: title.into(),
            page_number,
            level,
        }
    }
}

impl Default for Bookmark {
    fn default() -> Self {
        Self {
            title: String::new(),
            page_number: 0,
            level: MIN_LEVEL,
        }
    }
}

/// Ordered collection of bookmarks.
///
/// Order is significant: together with each entry's level it encodes the
/// outline hierarchy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bookmarks {
    bookmarks: Vec<Bookmark>,
    max_page: Option<u32>,
}

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the highest page number bookmarks may point to.
    ///
    /// `0` removes the bound. The bound applies to subsequent [`add`](Self::add)
    /// calls only.
    pub fn set_max_page(&mut self, max_page: u32) -> &mut Self {
        self.max_page = if max_page == 0 { None } else { Some(max_page) };
        self
    }

    /// The configured page bound, if any.
    pub fn max_page(&self) -> Option<u32> {
        self.max_page
    }

    /// Append a bookmark after validating it.
    ///
    /// A bookmark with page number `0` is silently ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::InvalidArgument`] if the page number is negative
    /// or beyond the configured maximum, or the level is outside
    /// [`MIN_LEVEL`]..=[`MAX_LEVEL`].
    pub fn add(&mut self, bookmark: Bookmark) -> Result<&mut Self, PdfError> {
        if bookmark.page_number == 0 {
            return Ok(self);
        }
        if bookmark.page_number < 1 {
            return Err(PdfError::InvalidArgument(format!(
                "invalid page number: {}",
                bookmark.page_number
            )));
        }
        if let Some(max_page) = self.max_page {
            if bookmark.page_number as u32 > max_page {
                return Err(PdfError::InvalidArgument(format!(
                    "page number {} out of range (document has {max_page} pages)",
                    bookmark.page_number
                )));
            }
        }
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&bookmark.level) {
            return Err(PdfError::InvalidArgument(format!(
                "invalid bookmark level: {} (expected {MIN_LEVEL}-{MAX_LEVEL})",
                bookmark.level
            )));
        }

        self.bookmarks.push(bookmark);
        Ok(self)
    }

    pub fn all(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bookmark> {
        self.bookmarks.iter()
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    /// Remove every bookmark equal to `bookmark`.
    pub fn remove(&mut self, bookmark: &Bookmark) -> &mut Self {
        self.bookmarks.retain(|b| b != bookmark);
        self
    }

    /// Remove every bookmark pointing to `page_number`.
    pub fn remove_by_page_number(&mut self, page_number: i32) -> &mut Self {
        self.bookmarks.retain(|b| b.page_number != page_number);
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.bookmarks.clear();
        self
    }
}

impl<'a> IntoIterator for &'a Bookmarks {
    type Item = &'a Bookmark;
    type IntoIter = std::slice::Iter<'a, Bookmark>;

    fn into_iter(self) -> Self::IntoIter {
        self.bookmarks.iter()
    }
}
