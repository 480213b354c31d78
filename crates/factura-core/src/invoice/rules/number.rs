//! Invoice number (point of sale + voucher) extraction.

use super::patterns::INVOICE_NUMBER;

/// Number following the "Comp. Nro" label, as `NNNN-NNNNNNNN`.
pub fn extract_invoice_number(text: &str) -> Option<String> {
    INVOICE_NUMBER
        .captures(text)
        .map(|caps| format!("{}-{}", &caps[1], &caps[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_separated() {
        assert_eq!(
            extract_invoice_number("Comp. Nro: 0003 00000154"),
            Some("0003-00000154".to_string())
        );
    }

    #[test]
    fn test_separator_variants() {
        assert_eq!(
            extract_invoice_number("Comp Nro 0003   00000154"),
            Some("0003-00000154".to_string())
        );
        assert_eq!(
            extract_invoice_number("COMP. NRO: 0003-00000154"),
            Some("0003-00000154".to_string())
        );
        assert_eq!(
            extract_invoice_number("Comp. Nro:000300000154"),
            Some("0003-00000154".to_string())
        );
    }

    #[test]
    fn test_five_digit_point_of_sale_is_not_matched() {
        assert_eq!(extract_invoice_number("Comp. Nro: 00003 00000154"), None);
    }

    #[test]
    fn test_missing_label() {
        assert_eq!(extract_invoice_number("0003 00000154"), None);
    }
}
