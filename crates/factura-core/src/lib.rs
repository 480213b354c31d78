//! Core library for Argentine invoice extraction.
//!
//! This crate provides:
//! - PDF text extraction (lopdf, pdf-extract)
//! - Rule-based field extraction (CUIT, issue date, total, supplier, number)
//! - Record validation in lenient or strict mode
//! - Appending records to an xlsx spreadsheet
//! - Batch processing of a folder of PDFs

pub mod batch;
pub mod error;
pub mod invoice;
pub mod models;
pub mod pdf;
pub mod spreadsheet;

pub use batch::{BatchController, BatchObserver, BatchReport, BatchState, FileOutcome, NoopObserver};
pub use error::{FacturaError, Result};
pub use invoice::{ExtractionResult, InvoiceParser, RecordValidator, RuleInvoiceParser, ValidationMode};
pub use models::{FacturaConfig, InvoiceField, InvoiceRecord};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use spreadsheet::{SpreadsheetDocument, SpreadsheetWriter};
