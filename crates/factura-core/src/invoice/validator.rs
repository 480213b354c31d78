//! Record acceptance policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;
use crate::models::invoice::InvoiceRecord;

use super::Result;

/// How many fields a record needs before it is written to the spreadsheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Reject only records where every field is empty.
    #[default]
    Lenient,
    /// Reject records with any empty field.
    Strict,
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown validation mode '{}' (expected lenient or strict)", other)),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => f.write_str("lenient"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

/// Applies a [`ValidationMode`] to extracted records.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordValidator {
    mode: ValidationMode,
}

impl RecordValidator {
    pub fn new(mode: ValidationMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Accept or reject a record, naming the missing fields on rejection.
    pub fn validate(&self, record: &InvoiceRecord) -> Result<()> {
        let missing = record.missing_fields();

        let rejected = match self.mode {
            ValidationMode::Lenient => missing.len() == crate::models::InvoiceField::ALL.len(),
            ValidationMode::Strict => !missing.is_empty(),
        };

        if rejected {
            Err(ExtractionError::Validation { missing })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn supplier_only() -> InvoiceRecord {
        InvoiceRecord {
            supplier_name: "Acme SA".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_lenient_accepts_single_field() {
        assert!(RecordValidator::new(ValidationMode::Lenient)
            .validate(&supplier_only())
            .is_ok());
    }

    #[test]
    fn test_strict_rejects_partial_record() {
        let err = RecordValidator::new(ValidationMode::Strict)
            .validate(&supplier_only())
            .unwrap_err();
        match err {
            ExtractionError::Validation { missing } => assert_eq!(missing.len(), 4),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lenient_rejects_empty_record() {
        let err = RecordValidator::new(ValidationMode::Lenient)
            .validate(&InvoiceRecord::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "no invoice data found");
    }

    #[test]
    fn test_strict_treats_zero_amount_as_missing() {
        let record = InvoiceRecord {
            issue_date: "01/01/2025".to_string(),
            total_amount: Decimal::ZERO,
            tax_id: "20123456786".to_string(),
            supplier_name: "Acme SA".to_string(),
            invoice_number: "0001-00000001".to_string(),
        };
        let validator = RecordValidator::new(ValidationMode::Strict);
        assert_eq!(
            validator.validate(&record).unwrap_err().to_string(),
            "missing fields: Monto"
        );

        let paid = InvoiceRecord {
            total_amount: Decimal::new(1050, 2),
            ..record
        };
        assert!(validator.validate(&paid).is_ok());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("STRICT".parse::<ValidationMode>(), Ok(ValidationMode::Strict));
        assert!("medium".parse::<ValidationMode>().is_err());
        assert_eq!(ValidationMode::Lenient.to_string(), "lenient");
    }
}
