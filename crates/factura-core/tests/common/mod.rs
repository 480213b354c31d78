//! Shared helpers for building invoice PDFs in tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lopdf::{Document, Object, Stream, dictionary};

/// Build a single-page PDF with one text line per entry.
pub fn pdf_bytes(lines: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let mut content = String::new();
    for (i, line) in lines.iter().enumerate() {
        let y = 760 - (i as i64) * 18;
        content.push_str(&format!("BT /F1 11 Tf 50 {y} Td ({line}) Tj ET\n"));
    }
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => Object::Reference(pages_id),
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(595),
            Object::Integer(842),
        ],
        "Contents" => Object::Reference(content_id),
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => Object::Reference(font_id) },
        },
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => Object::Integer(1),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Text lines of a complete invoice.
pub fn invoice_lines(number: u32, supplier: &str, cuit: &str, total: &str) -> Vec<String> {
    vec![
        "ORIGINAL".to_string(),
        "FACTURA".to_string(),
        format!("Comp. Nro: 0001-{:08}", number),
        "Fecha de Emision: 05/03/2025".to_string(),
        format!("Razon Social: {}", supplier),
        format!("CUIT: {}", cuit),
        format!("Importe Total: $ {}", total),
    ]
}

/// Write a PDF with the given lines into `dir`.
pub fn write_pdf(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let path = dir.join(name);
    std::fs::write(&path, pdf_bytes(&refs)).unwrap();
    path
}

/// Write a complete invoice PDF into `dir`.
pub fn write_invoice(dir: &Path, name: &str, number: u32, supplier: &str) -> PathBuf {
    write_pdf(dir, name, &invoice_lines(number, supplier, "30712345671", "1.234,56"))
}
