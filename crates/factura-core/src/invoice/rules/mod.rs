//! Rule-based field extractors for Argentine invoices.
//!
//! Every rule has the same shape, `fn(&str) -> Option<String>`, so a field's
//! primary pattern and its fallbacks are interchangeable links of one chain.

pub mod amounts;
pub mod cuit;
pub mod dates;
pub mod number;
pub mod patterns;
pub mod supplier;

pub use amounts::{extract_total_amount, format_amount, parse_amount};
pub use cuit::{extract_cuit, extract_valid_cuit, format_cuit, validate_cuit};
pub use dates::{extract_any_date, extract_labeled_issue_date, normalize_date};
pub use number::extract_invoice_number;
pub use supplier::{extract_labeled_supplier, guess_uppercase_supplier, title_case};

use crate::models::invoice::InvoiceField;

/// A single extraction rule.
pub type FieldRule = fn(&str) -> Option<String>;

/// Ordered rule chain for one field; the first rule that matches wins.
#[derive(Debug, Clone)]
pub struct FieldRules {
    /// Field these rules fill.
    pub field: InvoiceField,
    /// Rules in priority order.
    pub rules: Vec<FieldRule>,
}

impl FieldRules {
    pub fn new(field: InvoiceField, rules: Vec<FieldRule>) -> Self {
        Self { field, rules }
    }

    /// Run the chain against the text.
    pub fn apply(&self, text: &str) -> Option<String> {
        self.rules
            .iter()
            .find_map(|rule| rule(text))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// The default rule table, one chain per field in column order.
pub fn default_rules() -> Vec<FieldRules> {
    vec![
        FieldRules::new(
            InvoiceField::IssueDate,
            vec![extract_labeled_issue_date as FieldRule, extract_any_date],
        ),
        FieldRules::new(InvoiceField::TotalAmount, vec![extract_total_amount as FieldRule]),
        FieldRules::new(InvoiceField::TaxId, vec![extract_cuit as FieldRule]),
        FieldRules::new(
            InvoiceField::SupplierName,
            vec![extract_labeled_supplier as FieldRule, guess_uppercase_supplier],
        ),
        FieldRules::new(InvoiceField::InvoiceNumber, vec![extract_invoice_number as FieldRule]),
    ]
}
