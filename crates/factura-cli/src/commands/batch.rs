//! Batch command - process every PDF in a folder into the spreadsheet.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use factura_core::batch::{BatchController, BatchObserver, BatchReport, FileOutcome};
use factura_core::ValidationMode;

use super::{load_config, resolve_config_path};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Folder containing the invoice PDFs
    #[arg(required = true)]
    folder: PathBuf,

    /// Directory for the spreadsheet and error log (stored in the config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Validation mode for this run (lenient or strict)
    #[arg(short, long)]
    mode: Option<ValidationMode>,

    /// Do not show a progress bar
    #[arg(short, long)]
    quiet: bool,
}

/// Drives an indicatif progress bar from batch callbacks.
struct ProgressObserver {
    quiet: bool,
    bar: Option<ProgressBar>,
}

impl ProgressObserver {
    fn new(quiet: bool) -> Self {
        Self { quiet, bar: None }
    }
}

impl BatchObserver for ProgressObserver {
    fn on_start(&mut self, total: usize) {
        if self.quiet {
            return;
        }

        let bar = ProgressBar::new(total as u64);
        if let Ok(bar_style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
        {
            bar.set_style(bar_style.progress_chars("=>-"));
        }
        self.bar = Some(bar);
    }

    fn on_file_done(&mut self, _index: usize, path: &Path, outcome: &FileOutcome) {
        if let FileOutcome::Failed(error) = outcome {
            debug!("{} failed: {}", path.display(), error);
        }
        if let Some(bar) = &self.bar {
            if let Some(name) = path.file_name() {
                bar.set_message(name.to_string_lossy().into_owned());
            }
            bar.inc(1);
        }
    }

    fn on_finish(&mut self, _report: &BatchReport) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config_path = resolve_config_path(config_path);
    let mut config = load_config(&config_path);

    if let Some(output_dir) = args.output_dir {
        fs::create_dir_all(&output_dir)?;
        config.output_dir = output_dir;
        config.save(&config_path)?;
        println!(
            "{} Output directory set to {}",
            style("✓").green(),
            config.output_dir.display()
        );
    }

    if let Some(mode) = args.mode {
        config.extraction.validation = mode;
    }

    if !args.folder.is_dir() {
        anyhow::bail!("Folder not found: {}", args.folder.display());
    }

    let mut controller = BatchController::new(config);
    let mut observer = ProgressObserver::new(args.quiet);
    let report = controller.run(&args.folder, &mut observer)?;

    if report.is_empty() {
        println!(
            "{} No PDF files found in {}",
            style("ℹ").blue(),
            args.folder.display()
        );
        return Ok(());
    }

    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        report.files_found,
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(report.succeeded()).green(),
        style(report.failed()).red()
    );

    if let Some(path) = &report.spreadsheet {
        println!("   Spreadsheet: {}", path.display());
    }

    if !report.failures.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for failure in &report.failures {
            println!("  - {}: {}", failure.file_name, failure.error);
        }
        if let Some(path) = &report.error_log {
            println!("   Error log: {}", path.display());
        }
    }

    Ok(())
}
