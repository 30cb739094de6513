//! The pdftk `dump_data_utf8` text format.
//!
//! A dump is a sequence of `Key: value` lines grouped into blocks that start
//! with a `...Begin` marker. Only the block kinds pdfwrap reads or writes are
//! handled here:
//!
//! ```text
//! InfoBegin
//! InfoKey: Title
//! InfoValue: Annual report
//! BookmarkBegin
//! BookmarkTitle: Introduction
//! BookmarkLevel: 1
//! BookmarkPageNumber: 1
//! PageMediaBegin
//! PageMediaNumber: 1
//! PageMediaRotation: 0
//! PageMediaRect: 0 0 595.32 841.92
//! PageMediaDimensions: 595.32 841.92
//! ```
//!
//! Both `\n` and `\r\n` line endings are accepted. Written blocks use `\n`.

use std::sync::LazyLock;

use pdfwrap_core::{Bookmark, Bookmarks, Metadata, Page, Pages, PdfError, Rotation};
use regex::Regex;
use tracing::warn;

static BOOKMARK_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^BookmarkBegin\r?\nBookmarkTitle: ?(?P<title>.*?)\r?\nBookmarkLevel: (?P<level>[0-9]+)\r?\nBookmarkPageNumber: (?P<page>[0-9]+)\r?$",
    )
    .expect("bookmark block pattern")
});

static PAGE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^PageMediaBegin\r?\nPageMediaNumber: (?P<page>[0-9]+)\r?\nPageMediaRotation: (?P<rotation>[0-9]+)\r?\nPageMediaRect: .*?\r?\nPageMediaDimensions: (?P<width>[0-9][0-9,]*(?:\.[0-9]+)?) (?P<height>[0-9][0-9,]*(?:\.[0-9]+)?)\r?$",
    )
    .expect("page media block pattern")
});

static INFO_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^InfoBegin\r?\nInfoKey: ?(?P<key>.*?)\r?\nInfoValue: ?(?P<value>.*?)\r?$")
        .expect("info block pattern")
});

/// Append every bookmark block of `dump` to `bookmarks`.
///
/// # Errors
///
/// Returns [`PdfError::InvalidArgument`] if a bookmark fails validation
/// (e.g. it points past `max_page`), or [`PdfError::Parse`] for numbers that
/// do not fit.
pub fn parse_bookmarks(dump: &str, bookmarks: &mut Bookmarks) -> Result<(), PdfError> {
    for caps in BOOKMARK_BLOCK.captures_iter(dump) {
        let level = parse_number::<u32>(&caps["level"], "BookmarkLevel")?;
        let page_number = parse_number::<i32>(&caps["page"], "BookmarkPageNumber")?;
        bookmarks.add(Bookmark::new(&caps["title"], page_number, level))?;
    }
    Ok(())
}

/// Append every page media block of `dump` to `pages`.
///
/// Thousands separators in the dimensions are ignored.
///
/// # Errors
///
/// Returns [`PdfError::Parse`] for a rotation that is not a quarter turn or
/// an unreadable number.
pub fn parse_pages(dump: &str, pages: &mut Pages) -> Result<(), PdfError> {
    for caps in PAGE_BLOCK.captures_iter(dump) {
        let page_number = parse_number::<u32>(&caps["page"], "PageMediaNumber")?;
        let degrees = parse_number::<i64>(&caps["rotation"], "PageMediaRotation")?;
        let rotation = Rotation::from_degrees(degrees).ok_or_else(|| {
            PdfError::Parse(format!("invalid PageMediaRotation: {degrees}"))
        })?;
        let width = parse_number::<f64>(&caps["width"].replace(',', ""), "PageMediaDimensions")?;
        let height = parse_number::<f64>(&caps["height"].replace(',', ""), "PageMediaDimensions")?;
        pages.add(Page::new(page_number, width, height, rotation));
    }
    Ok(())
}

/// Set every info block of `dump` on `metadata`.
///
/// Blocks with an empty key are skipped.
pub fn parse_metadata(dump: &str, metadata: &mut Metadata) -> Result<(), PdfError> {
    for caps in INFO_BLOCK.captures_iter(dump) {
        let key = &caps["key"];
        if key.is_empty() {
            warn!(value = &caps["value"], "skipping info block without key");
            continue;
        }
        metadata.set(key, &caps["value"])?;
    }
    Ok(())
}

/// Render `bookmarks` as dump blocks.
pub fn bookmark_blocks(bookmarks: &Bookmarks) -> String {
    let mut out = String::new();
    for bookmark in bookmarks {
        out.push_str("BookmarkBegin\n");
        out.push_str(&format!("BookmarkTitle: {}\n", single_line(&bookmark.title)));
        out.push_str(&format!("BookmarkLevel: {}\n", bookmark.level));
        out.push_str(&format!("BookmarkPageNumber: {}\n", bookmark.page_number));
    }
    out
}

/// Render `metadata` as dump blocks.
pub fn info_blocks(metadata: &Metadata) -> String {
    let mut out = String::new();
    for (key, value) in metadata.iter() {
        out.push_str("InfoBegin\n");
        out.push_str(&format!("InfoKey: {}\n", single_line(key)));
        out.push_str(&format!("InfoValue: {}\n", single_line(value)));
    }
    out
}

// A line break would end the field early and corrupt the next block.
fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

fn parse_number<T: std::str::FromStr>(text: &str, field: &str) -> Result<T, PdfError> {
    text.parse()
        .map_err(|_| PdfError::Parse(format!("invalid {field}: {text:?}")))
}
