//! Invoice record model and its spreadsheet column layout.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::invoice::rules::amounts::format_amount;

/// One of the five fields extracted from an invoice.
///
/// The declaration order is the column order of the output spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceField {
    /// Emission date (Fecha de Emisión).
    IssueDate,
    /// Total payable amount (Importe Total).
    TotalAmount,
    /// Issuer tax identifier (CUIT).
    TaxId,
    /// Issuer name (Razón Social).
    SupplierName,
    /// Point of sale and voucher number (Comp. Nro).
    InvoiceNumber,
}

impl InvoiceField {
    /// All fields, in column order.
    pub const ALL: [InvoiceField; 5] = [
        InvoiceField::IssueDate,
        InvoiceField::TotalAmount,
        InvoiceField::TaxId,
        InvoiceField::SupplierName,
        InvoiceField::InvoiceNumber,
    ];

    /// Spreadsheet header for this field.
    pub fn header(&self) -> &'static str {
        match self {
            InvoiceField::IssueDate => "Fecha",
            InvoiceField::TotalAmount => "Monto",
            InvoiceField::TaxId => "CUIT",
            InvoiceField::SupplierName => "Proveedor",
            InvoiceField::InvoiceNumber => "Número de Factura",
        }
    }

    /// The header row of the output spreadsheet.
    pub fn header_row() -> Vec<String> {
        Self::ALL.iter().map(|f| f.header().to_string()).collect()
    }
}

impl fmt::Display for InvoiceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Fields extracted from a single invoice.
///
/// Any field may be empty; whether the record is acceptable is decided by
/// [`crate::invoice::RecordValidator`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Issue date as `DD/MM/YYYY`, or empty.
    pub issue_date: String,

    /// Total amount. Zero when not found or unparsable.
    pub total_amount: Decimal,

    /// CUIT digits, or empty.
    pub tax_id: String,

    /// Supplier name, or empty.
    pub supplier_name: String,

    /// Invoice number as `NNNN-NNNNNNNN`, or empty.
    pub invoice_number: String,
}

impl InvoiceRecord {
    /// Whether the given field carries a value.
    pub fn has(&self, field: InvoiceField) -> bool {
        match field {
            InvoiceField::IssueDate => !self.issue_date.is_empty(),
            InvoiceField::TotalAmount => !self.total_amount.is_zero(),
            InvoiceField::TaxId => !self.tax_id.is_empty(),
            InvoiceField::SupplierName => !self.supplier_name.is_empty(),
            InvoiceField::InvoiceNumber => !self.invoice_number.is_empty(),
        }
    }

    /// Fields without a value, in column order.
    pub fn missing_fields(&self) -> Vec<InvoiceField> {
        InvoiceField::ALL
            .iter()
            .copied()
            .filter(|f| !self.has(*f))
            .collect()
    }

    /// Display value of a field as written to the spreadsheet.
    pub fn cell(&self, field: InvoiceField) -> String {
        match field {
            InvoiceField::IssueDate => self.issue_date.clone(),
            InvoiceField::TotalAmount => self.formatted_amount(),
            InvoiceField::TaxId => self.tax_id.clone(),
            InvoiceField::SupplierName => self.supplier_name.clone(),
            InvoiceField::InvoiceNumber => self.invoice_number.clone(),
        }
    }

    /// Total amount rendered as `$1.234,56`.
    pub fn formatted_amount(&self) -> String {
        format_amount(self.total_amount)
    }

    /// Spreadsheet row, in the same order as [`InvoiceField::header_row`].
    pub fn to_row(&self) -> Vec<String> {
        InvoiceField::ALL.iter().map(|f| self.cell(*f)).collect()
    }
}
