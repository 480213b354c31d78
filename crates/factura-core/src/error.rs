//! Error types for the factura-core library.

use thiserror::Error;

use crate::models::invoice::InvoiceField;

/// Main error type for the factura library.
#[derive(Error, Debug)]
pub enum FacturaError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Invoice extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Spreadsheet read/write error.
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] SpreadsheetError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to read the file from disk.
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// No page yielded any text (e.g. scanned images only).
    #[error("no text could be extracted from any page")]
    NoText,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to invoice field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The record does not satisfy the active validation mode.
    #[error("{}", describe_missing(.missing))]
    Validation { missing: Vec<InvoiceField> },

    /// An amount token could not be turned into a number.
    #[error("invalid amount: {value:?}")]
    Format { value: String },
}

fn describe_missing(missing: &[InvoiceField]) -> String {
    if missing.len() == InvoiceField::ALL.len() {
        return "no invoice data found".to_string();
    }
    let names: Vec<&str> = missing.iter().map(|f| f.header()).collect();
    format!("missing fields: {}", names.join(", "))
}

/// Errors related to the output spreadsheet.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// Failed to read an existing workbook.
    #[error("failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    /// Failed to write the workbook.
    #[error("failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
}

/// Result type for the factura library.
pub type Result<T> = std::result::Result<T, FacturaError>;
