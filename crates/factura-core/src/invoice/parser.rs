//! Rule-table invoice parser.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::invoice::{InvoiceField, InvoiceRecord};

use super::rules::{
    cuit::extract_valid_cuit, dates::normalize_date, default_rules, parse_amount, FieldRule,
    FieldRules,
};
use super::Result;

/// Result of invoice extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted fields.
    pub record: InvoiceRecord,
    /// Fields that were not found or had to be degraded.
    pub warnings: Vec<String>,
}

/// Trait for invoice parsing.
pub trait InvoiceParser {
    /// Parse invoice fields from text.
    fn parse(&self, text: &str) -> Result<ExtractionResult>;
}

/// Parser that runs one rule chain per field over the whole text.
pub struct RuleInvoiceParser {
    rules: Vec<FieldRules>,
    normalize_dates: bool,
}

impl RuleInvoiceParser {
    /// Create a parser with the default rule table.
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
            normalize_dates: true,
        }
    }

    /// Only accept CUITs with a valid check digit.
    pub fn with_cuit_validation(self, validate: bool) -> Self {
        if validate {
            self.with_rules(InvoiceField::TaxId, vec![extract_valid_cuit as FieldRule])
        } else {
            self
        }
    }

    /// Set zero-padding of issue dates.
    pub fn with_date_normalization(mut self, normalize: bool) -> Self {
        self.normalize_dates = normalize;
        self
    }

    /// Replace the rule chain of one field.
    pub fn with_rules(mut self, field: InvoiceField, rules: Vec<FieldRule>) -> Self {
        match self.rules.iter_mut().find(|r| r.field == field) {
            Some(existing) => existing.rules = rules,
            None => self.rules.push(FieldRules::new(field, rules)),
        }
        self
    }

    fn apply(&self, field: InvoiceField, text: &str) -> Option<String> {
        self.rules
            .iter()
            .find(|r| r.field == field)
            .and_then(|r| r.apply(text))
    }

    fn parse_total(&self, text: &str, warnings: &mut Vec<String>) -> Decimal {
        let Some(token) = self.apply(InvoiceField::TotalAmount, text) else {
            return Decimal::ZERO;
        };

        match parse_amount(&token) {
            Ok(amount) => amount,
            Err(e) => {
                warn!("Amount degraded to zero: {}", e);
                warnings.push(format!("{}, using 0", e));
                Decimal::ZERO
            }
        }
    }
}

impl Default for RuleInvoiceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceParser for RuleInvoiceParser {
    fn parse(&self, text: &str) -> Result<ExtractionResult> {
        let mut warnings = Vec::new();

        debug!("Parsing invoice from {} characters of text", text.len());

        let issue_date = self
            .apply(InvoiceField::IssueDate, text)
            .map(|d| if self.normalize_dates { normalize_date(&d) } else { d })
            .unwrap_or_default();

        let record = InvoiceRecord {
            issue_date,
            total_amount: self.parse_total(text, &mut warnings),
            tax_id: self.apply(InvoiceField::TaxId, text).unwrap_or_default(),
            supplier_name: self.apply(InvoiceField::SupplierName, text).unwrap_or_default(),
            invoice_number: self.apply(InvoiceField::InvoiceNumber, text).unwrap_or_default(),
        };

        for field in record.missing_fields() {
            warnings.push(format!("Could not extract {}", field));
        }

        Ok(ExtractionResult { record, warnings })
    }
}
