use std::path::Path;
use std::sync::Arc;

use pdfwrap::{PageOrder, PdfBackend};

use crate::page_range::parse_page_list;
use crate::shared::{report, usage_error};

pub fn run(
    backend: Arc<dyn PdfBackend>,
    file: &Path,
    order: &str,
    output: Option<&Path>,
) -> Result<(), i32> {
    let order = parse_page_list(order).map_err(|e| usage_error(&e))?;

    PageOrder::new(backend)
        .reorder(file, &order, output)
        .map_err(report)?;
    eprintln!(
        "Reordered {} pages of {}",
        order.len(),
        output.unwrap_or(file).display()
    );
    Ok(())
}
