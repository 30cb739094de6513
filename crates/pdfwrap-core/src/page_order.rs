//! Validation for strict page reordering.
//!
//! A reorder must use every page of the document exactly once. The check is
//! split in two so the cheap, local part runs before any backend is asked
//! for the document's page count.

use crate::error::PdfError;

/// Check that `order` is a permutation of `1..=order.len()`.
///
/// Duplicates are rejected: `[1, 1, 2]` is not a valid order.
///
/// # Errors
///
/// Returns [`PdfError::InvalidArgument`] for an empty order or one that is
/// not a permutation.
pub fn validate_page_order(order: &[u32]) -> Result<(), PdfError> {
    if order.is_empty() {
        return Err(PdfError::InvalidArgument("empty page order".to_string()));
    }

    let mut sorted = order.to_vec();
    sorted.sort_unstable();
    let is_permutation = sorted
        .iter()
        .zip(1u32..)
        .all(|(&page, expected)| page == expected);

    if !is_permutation {
        return Err(PdfError::InvalidArgument(format!(
            "invalid page order: {order:?}"
        )));
    }
    Ok(())
}

/// Check that `order` addresses exactly `page_count` pages.
///
/// # Errors
///
/// Returns [`PdfError::InvalidArgument`] if the lengths differ.
pub fn check_page_count(order: &[u32], page_count: usize) -> Result<(), PdfError> {
    if order.len() != page_count {
        return Err(PdfError::InvalidArgument(format!(
            "invalid number of pages: order has {}, document has {page_count}",
            order.len()
        )));
    }
    Ok(())
}
