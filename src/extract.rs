// WHY: PDF parsing sits behind a trait so the comparison pipeline can be driven
// by any text source, including fixed pages in tests

use lopdf::Document as PdfDocument;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::{debug, info, warn};

use crate::error::InputError;

/// The `%PDF-` marker must appear within this many leading bytes
pub const PDF_HEADER_SEARCH_LIMIT: usize = 1024;

const PDF_HEADER: &[u8] = b"%PDF-";

/// Content identity of a PDF: SHA-256 of its bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId([u8; 32]);

impl DocumentId {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(Sha256::digest(bytes).into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl Serialize for DocumentId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Per-page extracted text in page order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pages: Vec<String>,
}

impl Document {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Newline-joined text of the pages that yielded anything
    ///
    /// A page whose text is empty or whitespace only contributes nothing, not
    /// even a separator.
    pub fn full_text(&self) -> String {
        let mut full_text = String::new();
        for page in self.pages.iter().filter(|page| !page.trim().is_empty()) {
            if !full_text.is_empty() {
                full_text.push('\n');
            }
            full_text.push_str(page);
        }
        full_text
    }
}

/// Character, page and line statistics surfaced next to the comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TextMetrics {
    pub char_count: usize,
    pub page_count: usize,
    pub newline_count: usize,
}

impl TextMetrics {
    pub fn measure(full_text: &str, page_count: usize) -> Self {
        Self {
            char_count: full_text.chars().count(),
            page_count,
            newline_count: full_text.matches('\n').count(),
        }
    }
}

/// Turns raw document bytes into per-page text
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<Document, InputError>;
}

/// Check for the `%PDF-` header before handing bytes to the parser
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(PDF_HEADER_SEARCH_LIMIT)];
    head.windows(PDF_HEADER.len()).any(|window| window == PDF_HEADER)
}

/// lopdf-backed extractor
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<Document, InputError> {
        if !looks_like_pdf(bytes) {
            return Err(InputError::NotPdf);
        }

        let pdf = PdfDocument::load_mem(bytes).map_err(|e| InputError::Malformed(e.to_string()))?;
        if pdf.is_encrypted() {
            return Err(InputError::Encrypted);
        }

        let page_numbers: Vec<u32> = pdf.get_pages().keys().copied().collect();
        debug!("Loaded PDF with {} pages ({} bytes)", page_numbers.len(), bytes.len());

        let mut pages = Vec::with_capacity(page_numbers.len());
        for page_number in page_numbers {
            // WHY: one unreadable page must not sink the rest of the document
            let text = match pdf.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Text extraction failed for page {}: {}", page_number, e);
                    String::new()
                }
            };
            if text.trim().is_empty() {
                debug!("Page {} has no extractable text", page_number);
            }
            pages.push(text);
        }

        let document = Document::new(pages);
        info!("Extracted text from {} pages", document.page_count());
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_text_skips_empty_pages() {
        let document = Document::new(vec![
            "First page.".to_string(),
            String::new(),
            "\n".to_string(),
            "Last page.".to_string(),
        ]);
        assert_eq!(document.page_count(), 4);
        assert_eq!(document.full_text(), "First page.\nLast page.");
    }

    #[test]
    fn test_full_text_of_empty_document() {
        assert_eq!(Document::default().full_text(), "");
        assert_eq!(Document::new(vec![String::new(), " ".to_string()]).full_text(), "");
    }

    #[test]
    fn test_metrics_count_characters_not_bytes() {
        let metrics = TextMetrics::measure("Ünïcode\nline two\n", 3);
        assert_eq!(metrics.char_count, 17);
        assert_eq!(metrics.page_count, 3);
        assert_eq!(metrics.newline_count, 2);
    }

    #[test]
    fn test_pdf_header_detection() {
        assert!(looks_like_pdf(b"%PDF-1.7\n..."));
        assert!(looks_like_pdf(b"\xEF\xBB\xBF%PDF-1.4"));
        assert!(!looks_like_pdf(b"Hello, world"));
        assert!(!looks_like_pdf(b""));

        let mut late_header = vec![b' '; PDF_HEADER_SEARCH_LIMIT];
        late_header.extend_from_slice(PDF_HEADER);
        assert!(!looks_like_pdf(&late_header));
    }

    #[test]
    fn test_non_pdf_rejected_before_parsing() {
        let err = PdfTextExtractor::new().extract(b"plain text").unwrap_err();
        assert!(matches!(err, InputError::NotPdf));
    }

    #[test]
    fn test_truncated_pdf_is_malformed() {
        let err = PdfTextExtractor::new().extract(b"%PDF-1.4\ngarbage").unwrap_err();
        assert!(matches!(err, InputError::Malformed(_)));
    }

    #[test]
    fn test_document_id_is_stable_hex() {
        let a = DocumentId::from_bytes(b"abc");
        let b = DocumentId::from_bytes(b"abc");
        assert_eq!(a, b);
        assert_eq!(
            a.to_string(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_ne!(a, DocumentId::from_bytes(b"abd"));
    }
}
