//! Amount extraction and Argentine currency formatting.
//!
//! Amounts use `.` to group thousands and `,` as the decimal separator, both
//! in the invoice text and in the rendered output (`$1.234,56`).

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use super::patterns::TOTAL_AMOUNT;
use crate::error::ExtractionError;

/// Raw numeric token following the "Importe Total" label.
pub fn extract_total_amount(text: &str) -> Option<String> {
    TOTAL_AMOUNT
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|token| token.chars().any(|c| c.is_ascii_digit()))
}

/// Parse an Argentine-formatted amount (e.g. "1.234,56" or "$ 1.234,56").
///
/// Negative amounts are rejected.
pub fn parse_amount(s: &str) -> Result<Decimal, ExtractionError> {
    let invalid = || ExtractionError::Format {
        value: s.to_string(),
    };

    let token = s
        .trim()
        .trim_start_matches('$')
        .trim()
        .trim_end_matches(['.', ',']);

    let normalized = token.replace('.', "").replace(',', ".");
    let amount = Decimal::from_str(&normalized).map_err(|_| invalid())?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(invalid());
    }
    Ok(amount)
}

/// Format an amount in Argentine style (`$1.234,56`).
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let s = format!("{:.2}", rounded.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut grouped = String::new();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}${},{}", sign, grouped, decimal_part)
}
