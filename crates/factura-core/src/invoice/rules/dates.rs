//! Issue date extraction.

use chrono::NaiveDate;

use super::patterns::{DATE_DMY, ISSUE_DATE};

/// Date following the "Fecha de Emisión" label.
pub fn extract_labeled_issue_date(text: &str) -> Option<String> {
    ISSUE_DATE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

/// First date-shaped token anywhere in the text.
pub fn extract_any_date(text: &str) -> Option<String> {
    DATE_DMY
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

/// Zero-pad a `D/M/YYYY` token to `DD/MM/YYYY` when it is a real calendar
/// date. Anything else is returned unchanged.
pub fn normalize_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, "%d/%m/%Y") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}
