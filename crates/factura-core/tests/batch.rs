//! End-to-end batch runs over generated PDFs.

mod common;

use std::fs;
use std::path::Path;

use factura_core::batch::{BatchController, BatchObserver, BatchReport, FileOutcome, NoopObserver};
use factura_core::invoice::ValidationMode;
use factura_core::models::{ExtractionConfig, FacturaConfig};
use factura_core::spreadsheet::SpreadsheetDocument;
use factura_core::{InvoiceField, InvoiceRecord};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

use common::{write_invoice, write_pdf};

fn config_for(output: &Path) -> FacturaConfig {
    FacturaConfig {
        output_dir: output.to_path_buf(),
        ..Default::default()
    }
}

#[derive(Default)]
struct Recorder {
    total: usize,
    done: Vec<(usize, bool)>,
    finished: bool,
}

impl BatchObserver for Recorder {
    fn on_start(&mut self, total: usize) {
        self.total = total;
    }

    fn on_file_done(&mut self, index: usize, _path: &Path, outcome: &FileOutcome) {
        self.done.push((index, matches!(outcome, FileOutcome::Accepted(_))));
    }

    fn on_finish(&mut self, _report: &BatchReport) {
        self.finished = true;
    }
}

#[test]
fn three_valid_and_one_corrupt() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    write_invoice(input.path(), "a.pdf", 1, "Acme SA");
    write_invoice(input.path(), "b.pdf", 2, "Beta SRL");
    write_invoice(input.path(), "c.PDF", 3, "Gamma SA");
    fs::write(input.path().join("corrupt.pdf"), b"this is not a pdf").unwrap();
    fs::write(input.path().join("readme.txt"), b"ignored").unwrap();

    let mut controller = BatchController::new(config_for(output.path()));
    let mut recorder = Recorder::default();
    let report = controller.run(input.path(), &mut recorder).unwrap();

    assert_eq!(report.files_found, 4);
    assert_eq!(report.succeeded(), 3);
    assert_eq!(report.failed(), 1);
    assert_eq!(recorder.total, 4);
    assert_eq!(recorder.done.len(), 4);
    assert!(recorder.finished);

    let sheet = SpreadsheetDocument::open(&output.path().join("facturas.xlsx")).unwrap();
    assert_eq!(sheet.header(), InvoiceField::header_row().as_slice());
    assert_eq!(sheet.rows().len(), 3);
    assert_eq!(
        sheet.rows()[0],
        vec![
            "05/03/2025".to_string(),
            "$1.234,56".to_string(),
            "30712345671".to_string(),
            "Acme SA".to_string(),
            "0001-00000001".to_string(),
        ]
    );

    let log = fs::read_to_string(output.path().join("errores_factura.txt")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("corrupt.pdf: "));
}

#[test]
fn processed_records_carry_parsed_fields() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_invoice(input.path(), "factura.pdf", 154, "Haas Leandro");

    let mut controller = BatchController::new(config_for(output.path()));
    let report = controller.run(input.path(), &mut NoopObserver).unwrap();

    assert_eq!(
        report.processed[0].record,
        InvoiceRecord {
            issue_date: "05/03/2025".to_string(),
            total_amount: Decimal::new(123456, 2),
            tax_id: "30712345671".to_string(),
            supplier_name: "Haas Leandro".to_string(),
            invoice_number: "0001-00000154".to_string(),
        }
    );
    assert!(report.error_log.is_none());
    assert!(!output.path().join("errores_factura.txt").exists());
}

#[test]
fn empty_folder_leaves_output_untouched() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let mut controller = BatchController::new(config_for(output.path()));
    let mut recorder = Recorder::default();
    let report = controller.run(input.path(), &mut recorder).unwrap();

    assert_eq!(report.succeeded(), 0);
    assert_eq!(report.failed(), 0);
    assert!(recorder.done.is_empty());
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn second_batch_appends_to_existing_spreadsheet() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    write_invoice(first.path(), "1.pdf", 1, "Uno SA");
    write_invoice(first.path(), "2.pdf", 2, "Dos SA");
    for n in 3..=5 {
        write_invoice(second.path(), &format!("{n}.pdf"), n, "Otro SA");
    }

    let mut controller = BatchController::new(config_for(output.path()));
    controller.run(first.path(), &mut NoopObserver).unwrap();
    controller.run(second.path(), &mut NoopObserver).unwrap();

    let sheet = SpreadsheetDocument::open(&output.path().join("facturas.xlsx")).unwrap();
    let numbers: Vec<&str> = sheet.rows().iter().map(|r| r[4].as_str()).collect();
    assert_eq!(
        numbers,
        vec![
            "0001-00000001",
            "0001-00000002",
            "0001-00000003",
            "0001-00000004",
            "0001-00000005",
        ]
    );
}

#[test]
fn strict_mode_rejects_partial_invoices() {
    let input = tempfile::tempdir().unwrap();
    write_pdf(
        input.path(),
        "parcial.pdf",
        &["Razon Social: Solo Proveedor SA".to_string()],
    );

    let lenient_out = tempfile::tempdir().unwrap();
    let mut lenient = BatchController::new(config_for(lenient_out.path()));
    let report = lenient.run(input.path(), &mut NoopObserver).unwrap();
    assert_eq!(report.succeeded(), 1);

    let strict_out = tempfile::tempdir().unwrap();
    let mut strict = BatchController::new(FacturaConfig {
        extraction: ExtractionConfig {
            validation: ValidationMode::Strict,
            ..Default::default()
        },
        ..config_for(strict_out.path())
    });
    let report = strict.run(input.path(), &mut NoopObserver).unwrap();

    assert_eq!(report.succeeded(), 0);
    assert_eq!(report.failures[0].file_name, "parcial.pdf");
    assert!(report.failures[0].error.contains("missing fields"));
    assert!(!strict_out.path().join("facturas.xlsx").exists());
}

#[test]
fn unreadable_folder_is_fatal() {
    let output = tempfile::tempdir().unwrap();
    let mut controller = BatchController::new(config_for(output.path()));

    assert!(controller
        .run(&output.path().join("no-such-dir"), &mut NoopObserver)
        .is_err());
}
