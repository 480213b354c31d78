//! Supplier name extraction.

use super::patterns::{SUPPLIER_NAME, SUPPLIER_TRAILER, UPPERCASE_LINE};

/// Copy labels that sit on their own uppercase line in AFIP layouts and are
/// never a name.
const HEADER_WORDS: &[&str] = &["ORIGINAL", "DUPLICADO", "TRIPLICADO", "FACTURA"];

/// Rest of the line after the "Razón Social" label.
///
/// Layouts that print the emission date on the same line leave a trailing
/// "Fecha de Emisión ..." fragment, which is cut off.
pub fn extract_labeled_supplier(text: &str) -> Option<String> {
    let caps = SUPPLIER_NAME.captures(text)?;
    let name = SUPPLIER_TRAILER.replace(caps[1].trim(), "");
    let name = name.trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Shortest uppercase line, in letters, taken as a name.
const MIN_NAME_LETTERS: usize = 3;

/// Best guess: the first standalone all-uppercase line, title-cased.
pub fn guess_uppercase_supplier(text: &str) -> Option<String> {
    UPPERCASE_LINE
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|line| line.chars().filter(|c| c.is_alphabetic()).count() >= MIN_NAME_LETTERS)
        .find(|line| !HEADER_WORDS.contains(&line.as_str()))
        .map(|line| title_case(&line))
}

/// Capitalize the first letter of every word and lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_supplier() {
        let text = "Apellido y Nombre / Razón Social: HAAS LEANDRO DAMIAN\nDomicilio: Calle 1";
        assert_eq!(
            extract_labeled_supplier(text),
            Some("HAAS LEANDRO DAMIAN".to_string())
        );
    }

    #[test]
    fn test_labeled_supplier_strips_emission_date() {
        let text = "Razón Social: ACME SRL Fecha de Emisión: 05/03/2025";
        assert_eq!(extract_labeled_supplier(text), Some("ACME SRL".to_string()));
    }

    #[test]
    fn test_labeled_supplier_without_accent() {
        assert_eq!(
            extract_labeled_supplier("razon social: Ferreteria El Tornillo"),
            Some("Ferreteria El Tornillo".to_string())
        );
    }

    #[test]
    fn test_empty_label_does_not_take_next_line() {
        let text = "Apellido y Nombre / Razón Social:\nCUIT: 20123456789\n";
        assert_eq!(extract_labeled_supplier(text), None);

        let text = "Razón Social:   \nDomicilio: Calle 1";
        assert_eq!(extract_labeled_supplier(text), None);
    }

    #[test]
    fn test_uppercase_fallback() {
        let text = "ORIGINAL\nFACTURA\nHAAS LEANDRO DAMIAN\nDomicilio Comercial: Calle 1";
        assert_eq!(extract_labeled_supplier(text), None);
        assert_eq!(
            guess_uppercase_supplier(text),
            Some("Haas Leandro Damian".to_string())
        );
    }

    #[test]
    fn test_uppercase_fallback_keeps_accents() {
        assert_eq!(
            guess_uppercase_supplier("x\nMUÑOZ ÁLVAREZ\n"),
            Some("Muñoz Álvarez".to_string())
        );
    }

    #[test]
    fn test_uppercase_fallback_ignores_mixed_case() {
        assert_eq!(guess_uppercase_supplier("Domicilio Comercial\nab\n"), None);
    }

    #[test]
    fn test_uppercase_fallback_needs_three_letters() {
        assert_eq!(guess_uppercase_supplier("x\nAB  \n"), None);
        assert_eq!(guess_uppercase_supplier("x\nA B\n"), None);
        assert_eq!(guess_uppercase_supplier("x\nAB  \nIBM\n"), Some("Ibm".to_string()));
        assert_eq!(
            guess_uppercase_supplier("x\nDE LA CRUZ\n"),
            Some("De La Cruz".to_string())
        );
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("JUAN PÉREZ S.A."), "Juan Pérez S.A.");
    }
}
