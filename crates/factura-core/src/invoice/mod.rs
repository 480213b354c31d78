//! Invoice field extraction module.

mod parser;
pub mod rules;
mod validator;

pub use parser::{ExtractionResult, InvoiceParser, RuleInvoiceParser};
pub use validator::{RecordValidator, ValidationMode};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
