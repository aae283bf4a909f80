//! First-page text extraction with `lopdf`.

use crate::utils::error::{EtlError, Result};
use lopdf::Document;

/// Extracts the plain text of the first page of a PDF held in memory.
///
/// A page without a text layer (scanned image, blank page) yields an empty
/// string. A document without any page fails with [`EtlError::PageNotFound`].
pub fn extract_first_page_text(pdf_bytes: &[u8]) -> Result<String> {
    let doc = Document::load_mem(pdf_bytes)?;

    let pages = doc.get_pages();
    tracing::debug!("Loaded PDF with {} page(s)", pages.len());

    let page_number = pages
        .keys()
        .next()
        .copied()
        .ok_or(EtlError::PageNotFound { page: 1 })?;

    let text = doc.extract_text(&[page_number])?;
    if text.trim().is_empty() {
        tracing::warn!("Page {} has no extractable text", page_number);
        return Ok(String::new());
    }

    Ok(text)
}
