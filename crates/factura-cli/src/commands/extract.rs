//! Extract command - print the fields of a single invoice PDF.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use factura_core::invoice::rules::format_cuit;
use factura_core::invoice::{InvoiceParser, RecordValidator, RuleInvoiceParser};
use factura_core::pdf::{PdfExtractor, PdfProcessor};
use factura_core::{InvoiceField, InvoiceRecord, ValidationMode};

use super::{load_config, resolve_config_path};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Fail unless the record passes the given validation mode
    #[arg(long)]
    validate: Option<ValidationMode>,

    /// Print the raw extracted text instead of the fields
    #[arg(long)]
    raw: bool,

    /// Print the raw text of a single page (1-indexed)
    #[arg(long, conflicts_with = "raw")]
    page: Option<u32>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output with the spreadsheet header
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(&resolve_config_path(config_path));

    if !args.input.is_file() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Extracting {}", args.input.display());

    let extractor = PdfExtractor::open(&args.input)?;

    if let Some(page) = args.page {
        info!("Page {} of {}", page, extractor.page_count());
        println!("{}", extractor.extract_page_text(page)?);
        return Ok(());
    }

    let text = extractor.extract_text()?;

    if args.raw {
        println!("{}", text);
        return Ok(());
    }

    let parser = RuleInvoiceParser::new()
        .with_cuit_validation(config.extraction.validate_cuit)
        .with_date_normalization(config.extraction.normalize_dates);
    let result = parser.parse(&text)?;

    for warning in &result.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }

    if let Some(mode) = args.validate {
        RecordValidator::new(mode).validate(&result.record)?;
    }

    let output = format_record(&result.record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    Ok(())
}

fn format_record(record: &InvoiceRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(record)?)),
        OutputFormat::Csv => format_record_csv(record),
        OutputFormat::Text => Ok(format_record_text(record)),
    }
}

fn format_record_csv(record: &InvoiceRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(InvoiceField::header_row())?;
    wtr.write_record(record.to_row())?;
    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_record_text(record: &InvoiceRecord) -> String {
    let mut output = String::new();
    for field in InvoiceField::ALL {
        let value = match field {
            _ if !record.has(field) => "-".to_string(),
            InvoiceField::TaxId => format_cuit(&record.tax_id),
            _ => record.cell(field),
        };
        output.push_str(&format!("{:<18} {}\n", format!("{}:", field.header()), value));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn record() -> InvoiceRecord {
        InvoiceRecord {
            issue_date: "05/03/2025".to_string(),
            total_amount: Decimal::new(123456, 2),
            tax_id: "30712345671".to_string(),
            supplier_name: "Acme SA".to_string(),
            invoice_number: "0001-00000001".to_string(),
        }
    }

    #[test]
    fn test_csv_has_header_and_row() {
        let csv = format_record(&record(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Fecha,Monto,CUIT,Proveedor,Número de Factura");
        assert_eq!(lines[1], "05/03/2025,\"$1.234,56\",30712345671,Acme SA,0001-00000001");
    }

    #[test]
    fn test_text_marks_missing_fields() {
        let text = format_record_text(&InvoiceRecord {
            supplier_name: "Acme SA".to_string(),
            ..Default::default()
        });
        assert!(text.contains("Proveedor:         Acme SA"));
        assert!(text.contains("CUIT:              -"));
    }

    #[test]
    fn test_text_shows_hyphenated_cuit() {
        let text = format_record(&record(), OutputFormat::Text).unwrap();
        assert!(text.contains("30-71234567-1"));
        assert!(text.contains("$1.234,56"));
    }
}
