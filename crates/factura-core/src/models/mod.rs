//! Data models shared across the pipeline.

pub mod config;
pub mod invoice;

pub use config::{ExtractionConfig, FacturaConfig, SpreadsheetConfig};
pub use invoice::{InvoiceField, InvoiceRecord};
