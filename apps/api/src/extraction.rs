//! PDF text extraction. Failures are reported inline: the returned text starts with
//! `EXTRACTION_ERROR_PREFIX` instead of an `Err`, so callers must check for it.

use tracing::warn;

pub const EXTRACTION_ERROR_PREFIX: &str = "Error reading PDF:";

/// Extracts the text of every page, concatenated in page order.
/// CPU-bound; call from `spawn_blocking` inside async handlers.
pub fn extract_text(file_bytes: &[u8]) -> String {
    // pdf-extract can panic on malformed documents; treat that like any other failure.
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(file_bytes)) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF extraction failed ({} bytes): {e}", file_bytes.len());
            format!("{EXTRACTION_ERROR_PREFIX} {e}")
        }
        Err(_) => {
            warn!("PDF extraction panicked ({} bytes)", file_bytes.len());
            format!("{EXTRACTION_ERROR_PREFIX} malformed document")
        }
    }
}

/// True if `text` is an inline extraction failure.
pub fn is_extraction_error(text: &str) -> bool {
    text.starts_with(EXTRACTION_ERROR_PREFIX)
}
