//! Output spreadsheet: load existing rows, append records, rewrite.
//!
//! The workbook is read with calamine and always written back in full with
//! rust_xlsxwriter. A crash during `save` can leave a truncated file.

use std::path::Path;

use calamine::{open_workbook, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};
use tracing::{debug, info};

use crate::error::SpreadsheetError;
use crate::models::config::SpreadsheetConfig;
use crate::models::invoice::{InvoiceField, InvoiceRecord};

/// Result type for spreadsheet operations.
pub type Result<T> = std::result::Result<T, SpreadsheetError>;

/// In-memory copy of the output worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetDocument {
    sheet_name: String,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SpreadsheetDocument {
    /// Create an empty document with the invoice header row.
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            header: InvoiceField::header_row(),
            rows: Vec::new(),
        }
    }

    /// Load the first worksheet of an existing workbook.
    ///
    /// The first row is taken as the header; every following row is kept
    /// verbatim.
    pub fn open(path: &Path) -> Result<Self> {
        let read_error = |reason: String| SpreadsheetError::Read {
            path: path.display().to_string(),
            reason,
        };

        let mut workbook: Xlsx<_> =
            open_workbook(path).map_err(|e: calamine::XlsxError| read_error(e.to_string()))?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| read_error("workbook has no worksheets".to_string()))?;
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| read_error(e.to_string()))?;

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<_>>());

        let header = rows.next().unwrap_or_else(InvoiceField::header_row);
        let rows: Vec<Vec<String>> = rows.collect();

        debug!("Loaded {} existing rows from {}", rows.len(), path.display());

        Ok(Self {
            sheet_name,
            header,
            rows,
        })
    }

    /// Load `path` if it exists, otherwise start a new document.
    pub fn open_or_create(path: &Path, sheet_name: &str) -> Result<Self> {
        if path.exists() {
            Self::open(path)
        } else {
            debug!("Creating new workbook at {}", path.display());
            Ok(Self::new(sheet_name))
        }
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows, header excluded.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Append a record in column order.
    pub fn append_record(&mut self, record: &InvoiceRecord) {
        self.rows.push(record.to_row());
    }

    /// Width of every column: longest cell plus `padding`, capped at `max`.
    pub fn column_widths(&self, padding: usize, max: usize) -> Vec<usize> {
        let columns = std::iter::once(&self.header)
            .chain(&self.rows)
            .map(Vec::len)
            .max()
            .unwrap_or(0);

        (0..columns)
            .map(|col| {
                let longest = std::iter::once(&self.header)
                    .chain(&self.rows)
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0);
                (longest + padding).min(max)
            })
            .collect()
    }

    /// Write the whole document to `path`, replacing any existing file.
    pub fn save(&self, path: &Path, config: &SpreadsheetConfig) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        let bold = Format::new().set_bold();
        for (col, title) in self.header.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, title, &bold)?;
        }

        for (row_idx, row) in self.rows.iter().enumerate() {
            let row_num = (row_idx + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                if !cell.is_empty() {
                    worksheet.write_string(row_num, col as u16, cell)?;
                }
            }
        }

        let widths = self.column_widths(config.column_padding, config.max_column_width);
        for (col, width) in widths.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width as f64)?;
        }

        workbook.save(path)?;
        Ok(())
    }
}

/// Appends invoice records to the configured workbook.
pub struct SpreadsheetWriter {
    config: SpreadsheetConfig,
}

impl SpreadsheetWriter {
    pub fn new(config: SpreadsheetConfig) -> Self {
        Self { config }
    }

    /// Append `records` to the workbook at `path`, creating it with a header
    /// row if needed. Returns the total number of data rows after saving.
    pub fn append(&self, path: &Path, records: &[InvoiceRecord]) -> Result<usize> {
        let mut document = SpreadsheetDocument::open_or_create(path, &self.config.sheet_name)?;
        let existing = document.rows().len();

        for record in records {
            document.append_record(record);
        }
        document.save(path, &self.config)?;

        info!(
            "Wrote {} new rows to {} ({} kept)",
            records.len(),
            path.display(),
            existing
        );
        Ok(document.rows().len())
    }
}
