//! CUIT (Argentine tax identification number) extraction and validation.

use super::patterns::CUIT_PATTERN;

/// Every CUIT-shaped token in document order, as bare digits.
pub fn extract_all_cuits(text: &str) -> Vec<String> {
    CUIT_PATTERN
        .captures_iter(text)
        .map(|caps| format!("{}{}{}", &caps[1], &caps[2], &caps[3]))
        .collect()
}

/// First CUIT-shaped token in the text.
pub fn extract_cuit(text: &str) -> Option<String> {
    extract_all_cuits(text).into_iter().next()
}

/// First CUIT in the text whose check digit verifies.
pub fn extract_valid_cuit(text: &str) -> Option<String> {
    extract_all_cuits(text).into_iter().find(|c| validate_cuit(c))
}

/// Validate a CUIT using the mod-11 check digit.
///
/// Weights: 5, 4, 3, 2, 7, 6, 5, 4, 3, 2
pub fn validate_cuit(cuit: &str) -> bool {
    let digits: Vec<u32> = cuit
        .chars()
        .filter(|c| c.is_ascii_digit())
        .filter_map(|c| c.to_digit(10))
        .collect();

    if digits.len() != 11 {
        return false;
    }

    let weights = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];
    let sum: u32 = digits
        .iter()
        .take(10)
        .zip(weights.iter())
        .map(|(d, w)| d * w)
        .sum();

    let check = match 11 - sum % 11 {
        11 => 0,
        10 => return false,
        n => n,
    };

    check == digits[10]
}

/// Format CUIT with dashes (XX-XXXXXXXX-X).
pub fn format_cuit(cuit: &str) -> String {
    let digits: String = cuit.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() != 11 {
        return cuit.to_string();
    }

    format!("{}-{}-{}", &digits[0..2], &digits[2..10], &digits[10..11])
}
