//! Common regex patterns for Argentine (AFIP-style) invoice extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // CUIT: category prefix, 8 digit document number, check digit
    pub static ref CUIT_PATTERN: Regex = Regex::new(
        r"(?i)\b(20|23|24|25|26|27|30|33|34)-?(\d{8})-?(\d)\b"
    ).unwrap();

    // Dates (D/M/YYYY)
    pub static ref ISSUE_DATE: Regex = Regex::new(
        r"(?i)Fecha\s+de\s+Emisi[oó]n[:\s]*([0-3]?\d/[01]?\d/\d{4})"
    ).unwrap();

    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b([0-3]?\d/[01]?\d/\d{4})\b"
    ).unwrap();

    // Invoice number: point of sale + voucher number
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)Comp\.?\s*Nro\.?[:\s]*(\d{4})(?:\s*-\s*|\s*)(\d{8})\b"
    ).unwrap();

    // Supplier
    pub static ref SUPPLIER_NAME: Regex = Regex::new(
        r"(?i)(?:Apellido\s+y\s+Nombre\s*/\s*)?Raz[oó]n\s+Social[: \t]*([^\s:][^\n]*)"
    ).unwrap();

    pub static ref SUPPLIER_TRAILER: Regex = Regex::new(
        r"(?i)\s*Fecha\s+de\s+Emisi[oó]n.*$"
    ).unwrap();

    pub static ref UPPERCASE_LINE: Regex = Regex::new(
        r"(?m)^[ \t]*([A-ZÁÉÍÓÚÜÑ][A-ZÁÉÍÓÚÜÑ ]*?)[ \t]*$"
    ).unwrap();

    // Amounts (1.234,56)
    pub static ref TOTAL_AMOUNT: Regex = Regex::new(
        r"(?i)Importe\s+Total[:\s]*\$?\s*([\d.,]+)"
    ).unwrap();
}
