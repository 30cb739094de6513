//! Decoding of `pdfcpu info -j` reports.
//!
//! ```json
//! {
//!   "header": { "version": "pdfcpu v0.8.0" },
//!   "infos": [{
//!     "title": "Annual report",
//!     "keywords": ["finance", "2024"],
//!     "pageBoundaries": {
//!       "1": { "mediaBox": { "rect": { "ll": {"x": 0, "y": 0}, "ur": {"x": 595.32, "y": 841.92} } }, "rot": 0 }
//!     }
//!   }]
//! }
//! ```
//!
//! Only the first entry of `infos` is read: pdfwrap always asks about a
//! single file.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use pdfwrap_core::{Metadata, Page, Pages, PdfError, Rotation, natural_cmp};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::error::BackendError;

/// Document information keys pdfcpu reads and writes.
pub const SUPPORTED_METADATA_ATTRIBUTES: [&str; 8] = [
    "Title",
    "Keywords",
    "Subject",
    "Author",
    "Creator",
    "Producer",
    "CreationDate",
    "ModificationDate",
];

// Some pdfcpu versions print the selected pages before the JSON document.
static PAGE_LISTING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^pages: (\d,?)+\r?$").expect("page listing pattern"));

#[derive(Debug, Deserialize)]
struct InfoReport<T> {
    #[serde(default = "Vec::new")]
    infos: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageReport {
    #[serde(default)]
    page_boundaries: HashMap<String, PageBoundaries>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageBoundaries {
    media_box: MediaBox,
    #[serde(default)]
    rot: i64,
}

#[derive(Debug, Deserialize)]
struct MediaBox {
    rect: Rect,
}

#[derive(Debug, Deserialize)]
struct Rect {
    ur: Point,
}

#[derive(Debug, Deserialize)]
struct Point {
    x: f64,
    y: f64,
}

/// Remove the `pages: 1,2,3` preamble some pdfcpu versions print.
pub fn strip_page_listing(output: &str) -> Cow<'_, str> {
    PAGE_LISTING.replace_all(output, "")
}

/// Replace `pages` with the pages described by a `pdfcpu info -pages 1- -j`
/// report, in ascending page order.
///
/// # Errors
///
/// Returns [`PdfError::Parse`] for malformed JSON, a report without
/// `infos`, a non-numeric page key, or a rotation that is not a quarter turn.
/// `pages` is left untouched on error.
pub fn parse_pages(output: &str, pages: &mut Pages) -> Result<(), PdfError> {
    let cleaned = strip_page_listing(output);
    let report: InfoReport<PageReport> =
        serde_json::from_str(&cleaned).map_err(BackendError::from)?;
    let first = report
        .infos
        .into_iter()
        .next()
        .ok_or_else(|| BackendError::Output("info report has no entries".to_string()))?;

    let mut boundaries: Vec<(String, PageBoundaries)> = first.page_boundaries.into_iter().collect();
    boundaries.sort_by(|(a, _), (b, _)| natural_cmp(a, b));

    let mut parsed = Vec::with_capacity(boundaries.len());
    for (key, boundary) in boundaries {
        let page_number = key
            .parse::<u32>()
            .map_err(|_| PdfError::Parse(format!("invalid page key {key:?}")))?;
        let rotation = Rotation::from_degrees(boundary.rot)
            .ok_or_else(|| PdfError::Parse(format!("invalid rotation: {}", boundary.rot)))?;
        let ur = boundary.media_box.rect.ur;
        parsed.push(Page::new(page_number, ur.x, ur.y, rotation));
    }

    pages.clear();
    for page in parsed {
        pages.add(page);
    }
    Ok(())
}

/// Set the supported, non-blank attributes of a `pdfcpu info -j` report on
/// `metadata`. Keywords reported as a list are joined with `", "`.
///
/// # Errors
///
/// Returns [`PdfError::Parse`] for malformed JSON or a report without
/// `infos`.
pub fn parse_metadata(output: &str, metadata: &mut Metadata) -> Result<(), PdfError> {
    let cleaned = strip_page_listing(output);
    let report: InfoReport<serde_json::Map<String, Value>> =
        serde_json::from_str(&cleaned).map_err(BackendError::from)?;
    let first = report
        .infos
        .into_iter()
        .next()
        .ok_or_else(|| BackendError::Output("info report has no entries".to_string()))?;

    for attribute in SUPPORTED_METADATA_ATTRIBUTES {
        let Some(value) = first.get(&json_field_name(attribute)).and_then(attribute_text) else {
            continue;
        };
        if !value.trim().is_empty() {
            metadata.set(attribute, value)?;
        }
    }
    Ok(())
}

/// JSON field for a document information key: first letter lowercased.
pub fn json_field_name(attribute: &str) -> String {
    let mut chars = attribute.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn attribute_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Returns `true` if pdfcpu can store `key`.
pub fn is_supported_attribute(key: &str) -> bool {
    SUPPORTED_METADATA_ATTRIBUTES.contains(&key)
}
