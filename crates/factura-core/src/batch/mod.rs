//! Batch processing of a folder of invoice PDFs.
//!
//! A batch lists the PDFs in one directory, extracts a record from each,
//! appends every accepted record to the output spreadsheet in a single
//! rewrite and logs the rejected files to a plain-text error log.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::invoice::{InvoiceParser, RecordValidator, RuleInvoiceParser};
use crate::models::config::FacturaConfig;
use crate::models::invoice::InvoiceRecord;
use crate::pdf::{PdfExtractor, PdfProcessor};
use crate::spreadsheet::SpreadsheetWriter;

/// Lifecycle of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchState {
    #[default]
    Idle,
    SelectingFolder,
    Processing,
    Reporting,
}

/// Outcome of a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Accepted(InvoiceRecord),
    Failed(String),
}

/// Receives progress callbacks while a batch runs.
///
/// All methods default to no-ops.
pub trait BatchObserver {
    /// Called once the PDFs have been listed.
    fn on_start(&mut self, _total: usize) {}

    /// Called after every file, in processing order.
    fn on_file_done(&mut self, _index: usize, _path: &Path, _outcome: &FileOutcome) {}

    /// Called after the spreadsheet and error log have been written.
    fn on_finish(&mut self, _report: &BatchReport) {}
}

/// Observer that ignores every callback.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl BatchObserver for NoopObserver {}

/// A file whose record reached the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFile {
    pub path: PathBuf,
    pub record: InvoiceRecord,
}

/// A file that was skipped, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file_name: String,
    pub error: String,
}

impl FileFailure {
    /// Error log line for this failure.
    pub fn log_line(&self) -> String {
        format!("{}: {}", self.file_name, self.error.replace(['\r', '\n'], " "))
    }
}

/// Summary of a finished batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Number of PDFs found in the folder.
    pub files_found: usize,
    pub processed: Vec<ProcessedFile>,
    pub failures: Vec<FileFailure>,
    /// Spreadsheet that was written, if any record was accepted.
    pub spreadsheet: Option<PathBuf>,
    /// Error log that was written, if any file failed.
    pub error_log: Option<PathBuf>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.processed.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files_found == 0
    }
}

/// Drives one batch at a time over a folder of PDFs.
pub struct BatchController {
    config: FacturaConfig,
    parser: RuleInvoiceParser,
    validator: RecordValidator,
    state: BatchState,
}

impl BatchController {
    /// Build a controller whose parser and validator follow `config`.
    pub fn new(config: FacturaConfig) -> Self {
        let parser = RuleInvoiceParser::new()
            .with_cuit_validation(config.extraction.validate_cuit)
            .with_date_normalization(config.extraction.normalize_dates);
        let validator = RecordValidator::new(config.extraction.validation);

        Self {
            config,
            parser,
            validator,
            state: BatchState::Idle,
        }
    }

    pub fn config(&self) -> &FacturaConfig {
        &self.config
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    /// List the PDFs directly inside `dir`, sorted by file name.
    pub fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_pdf(&path) {
                files.push(path);
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        debug!("Found {} PDF files in {}", files.len(), dir.display());
        Ok(files)
    }

    /// Extract and validate the record of a single PDF.
    pub fn process_file(&self, path: &Path) -> Result<InvoiceRecord> {
        let extractor = PdfExtractor::open(path)?;
        debug!("{}: {} pages", display_name(path), extractor.page_count());
        let text = extractor.extract_text()?;

        let result = self.parser.parse(&text)?;
        for warning in &result.warnings {
            warn!("{}: {}", display_name(path), warning);
        }

        self.validator.validate(&result.record)?;
        Ok(result.record)
    }

    /// Process every PDF in `dir`.
    ///
    /// Per-file errors become failures in the report. Listing the folder or
    /// writing the spreadsheet or error log aborts the run.
    pub fn run(&mut self, dir: &Path, observer: &mut dyn BatchObserver) -> Result<BatchReport> {
        self.state = BatchState::SelectingFolder;
        let files = match Self::discover(dir) {
            Ok(files) => files,
            Err(e) => {
                self.state = BatchState::Idle;
                return Err(e);
            }
        };

        let mut report = BatchReport {
            files_found: files.len(),
            ..Default::default()
        };

        if files.is_empty() {
            info!("No PDF files in {}", dir.display());
            self.state = BatchState::Idle;
            observer.on_finish(&report);
            return Ok(report);
        }

        self.state = BatchState::Processing;
        observer.on_start(files.len());

        for (index, path) in files.iter().enumerate() {
            let outcome = match self.process_file(path) {
                Ok(record) => {
                    debug!("Accepted {}", path.display());
                    FileOutcome::Accepted(record)
                }
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    FileOutcome::Failed(e.to_string())
                }
            };

            observer.on_file_done(index, path, &outcome);

            match outcome {
                FileOutcome::Accepted(record) => report.processed.push(ProcessedFile {
                    path: path.clone(),
                    record,
                }),
                FileOutcome::Failed(error) => report.failures.push(FileFailure {
                    file_name: display_name(path),
                    error,
                }),
            }
        }

        self.state = BatchState::Reporting;
        let written = self.write_outputs(&mut report);
        self.state = BatchState::Idle;
        written?;

        info!(
            "Batch finished: {} processed, {} failed",
            report.succeeded(),
            report.failed()
        );
        observer.on_finish(&report);
        Ok(report)
    }

    fn write_outputs(&self, report: &mut BatchReport) -> Result<()> {
        if !report.processed.is_empty() {
            let path = self.config.spreadsheet_path();
            let records: Vec<InvoiceRecord> =
                report.processed.iter().map(|p| p.record.clone()).collect();

            SpreadsheetWriter::new(self.config.spreadsheet.clone()).append(&path, &records)?;
            report.spreadsheet = Some(path);
        }

        if !report.failures.is_empty() {
            let path = self.config.error_log_path();
            let mut content = String::new();
            for failure in &report.failures {
                content.push_str(&failure.log_line());
                content.push('\n');
            }

            fs::write(&path, content)?;
            report.error_log = Some(path);
        }

        Ok(())
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
