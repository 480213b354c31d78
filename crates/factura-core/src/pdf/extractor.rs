//! PDF text extraction using lopdf and pdf-extract.

use std::panic;
use std::path::Path;

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// PDF text extractor backed by lopdf, with pdf-extract for layout-aware
/// text when it agrees with the page structure.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

/// Text of a single PDF page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text, possibly empty for image-only pages.
    pub text: String,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Read and load a PDF file.
    pub fn open(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let mut extractor = Self::new();
        extractor.load(&data)?;
        Ok(extractor)
    }

    /// Extract the text of every page, including empty ones.
    pub fn extract_pages(&self) -> Result<Vec<PdfPage>> {
        let doc = self.document()?;
        let page_map = doc.get_pages();

        // pdf-extract keeps reading order better than lopdf, but only its
        // form-feed page split tells us which text belongs to which page.
        let layout_pages = self
            .layout_text_pages()
            .filter(|pages| pages.len() == page_map.len());

        let mut pages = Vec::with_capacity(page_map.len());
        for (index, page_no) in page_map.keys().enumerate() {
            let layout_text = layout_pages
                .as_ref()
                .and_then(|p| p.get(index))
                .filter(|t| !t.trim().is_empty())
                .cloned();

            let text = match layout_text {
                Some(text) => text,
                None => doc.extract_text(&[*page_no]).unwrap_or_else(|e| {
                    trace!("lopdf could not read page {}: {}", page_no, e);
                    String::new()
                }),
            };

            pages.push(PdfPage {
                number: *page_no,
                text,
            });
        }

        Ok(pages)
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }

    fn layout_text_pages(&self) -> Option<Vec<String>> {
        let data = self.raw_data.as_slice();

        // pdf-extract panics on some malformed font tables; one bad file must
        // not take the whole batch down.
        match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data)) {
            Ok(Ok(text)) => Some(split_text_into_pages(&text)),
            Ok(Err(e)) => {
                debug!("pdf-extract failed, using lopdf text: {}", e);
                None
            }
            Err(_) => {
                warn!("pdf-extract panicked, using lopdf text");
                None
            }
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        if !doc.get_pages().contains_key(&page) {
            return Err(PdfError::InvalidPage(page));
        }
        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    fn extract_text(&self) -> Result<String> {
        let pages = self.extract_pages()?;
        let total = pages.len();

        let texts: Vec<&str> = pages
            .iter()
            .map(|p| p.text.trim())
            .filter(|t| !t.is_empty())
            .collect();

        debug!("{} of {} pages carry text", texts.len(), total);

        if texts.is_empty() {
            return Err(PdfError::NoText);
        }
        Ok(texts.join("\n"))
    }
}

fn split_text_into_pages(raw_text: &str) -> Vec<String> {
    let mut pages = raw_text
        .split('\u{000C}')
        .map(str::to_string)
        .collect::<Vec<_>>();
    if pages.last().is_some_and(String::is_empty) {
        pages.pop();
    }
    pages
}
