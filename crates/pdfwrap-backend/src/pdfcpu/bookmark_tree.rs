//! Conversion between the flat bookmark list and pdfcpu's nested outline
//! JSON.
//!
//! pdfcpu reads and writes outlines as a tree:
//!
//! ```json
//! {
//!   "bookmarks": [
//!     { "title": "A", "page": 1 },
//!     { "title": "B", "page": 2, "kids": [
//!       { "title": "C", "page": 3 }
//!     ]}
//!   ]
//! }
//! ```
//!
//! The flat list encodes the same tree through levels: an entry is a child
//! of the nearest earlier entry with a lower level.

use pdfwrap_core::{Bookmark, Bookmarks, PdfError};
use serde::{Deserialize, Serialize};

use crate::error::BackendError;

/// Root of a pdfcpu bookmark file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarkTree {
    #[serde(default)]
    pub bookmarks: Vec<BookmarkNode>,
}

/// One outline entry and its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkNode {
    pub title: String,
    #[serde(default)]
    pub page: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kids: Vec<BookmarkNode>,
}

impl BookmarkNode {
    fn leaf(bookmark: &Bookmark) -> Self {
        Self {
            title: bookmark.title.clone(),
            page: bookmark.page_number,
            kids: Vec::new(),
        }
    }
}

impl BookmarkTree {
    /// Nest `bookmarks` by level.
    ///
    /// Levels need not increase by one: an entry at level 3 directly below
    /// one at level 1 becomes its child.
    pub fn from_bookmarks(bookmarks: &Bookmarks) -> Self {
        // Open ancestors, innermost last. Every level on the stack is lower
        // than the one above it.
        let mut open: Vec<(u32, BookmarkNode)> = Vec::new();
        let mut roots = Vec::new();

        for bookmark in bookmarks {
            while open.last().is_some_and(|(level, _)| *level >= bookmark.level) {
                if let Some((_, node)) = open.pop() {
                    attach(&mut open, &mut roots, node);
                }
            }
            open.push((bookmark.level, BookmarkNode::leaf(bookmark)));
        }
        while let Some((_, node)) = open.pop() {
            attach(&mut open, &mut roots, node);
        }

        Self { bookmarks: roots }
    }

    /// Append the tree to `bookmarks` in pre-order; depth becomes level.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::InvalidArgument`] if an entry fails validation,
    /// e.g. the tree is nested deeper than [`MAX_LEVEL`](pdfwrap_core::MAX_LEVEL).
    pub fn flatten_into(&self, bookmarks: &mut Bookmarks) -> Result<(), PdfError> {
        flatten(&self.bookmarks, 1, bookmarks)
    }

    /// Parse a pdfcpu bookmark file. Unknown fields are ignored.
    pub fn from_json(json: &str) -> Result<Self, PdfError> {
        Ok(serde_json::from_str(json).map_err(BackendError::from)?)
    }

    /// Render as the pretty-printed JSON pdfcpu imports.
    pub fn to_json(&self) -> Result<String, PdfError> {
        Ok(serde_json::to_string_pretty(self).map_err(BackendError::from)?)
    }
}

fn attach(open: &mut [(u32, BookmarkNode)], roots: &mut Vec<BookmarkNode>, node: BookmarkNode) {
    match open.last_mut() {
        Some((_, parent)) => parent.kids.push(node),
        None => roots.push(node),
    }
}

fn flatten(nodes: &[BookmarkNode], level: u32, bookmarks: &mut Bookmarks) -> Result<(), PdfError> {
    for node in nodes {
        bookmarks.add(Bookmark::new(node.title.clone(), node.page, level))?;
        flatten(&node.kids, level + 1, bookmarks)?;
    }
    Ok(())
}
