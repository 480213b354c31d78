//! Persisted configuration for the extraction pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{FacturaError, Result};
use crate::invoice::ValidationMode;

/// Main configuration for factura.
///
/// `output_dir` and `last_processed` sit at the top level so that the file
/// stays a flat key-value record for simple setups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacturaConfig {
    /// Directory where the spreadsheet and error log are written.
    pub output_dir: PathBuf,

    /// Counter of previously processed items. Round-tripped only.
    pub last_processed: u64,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output spreadsheet configuration.
    pub spreadsheet: SpreadsheetConfig,
}

impl Default for FacturaConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            last_processed: 0,
            extraction: ExtractionConfig::default(),
            spreadsheet: SpreadsheetConfig::default(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Invoice extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Which records are accepted into the spreadsheet.
    pub validation: ValidationMode,

    /// Only accept CUITs whose check digit verifies.
    pub validate_cuit: bool,

    /// Zero-pad valid dates to DD/MM/YYYY.
    pub normalize_dates: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            validation: ValidationMode::Lenient,
            validate_cuit: false,
            normalize_dates: true,
        }
    }
}

/// Output spreadsheet configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpreadsheetConfig {
    /// Spreadsheet file name inside the output directory.
    pub file_name: String,

    /// Worksheet name used when creating a new workbook.
    pub sheet_name: String,

    /// Error log file name inside the output directory.
    pub error_log: String,

    /// Upper bound for column widths, in characters.
    pub max_column_width: usize,

    /// Extra characters added to the longest cell of a column.
    pub column_padding: usize,
}

impl Default for SpreadsheetConfig {
    fn default() -> Self {
        Self {
            file_name: "facturas.xlsx".to_string(),
            sheet_name: "Facturas".to_string(),
            error_log: "errores_factura.txt".to_string(),
            max_column_width: 30,
            column_padding: 2,
        }
    }
}

impl FacturaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| FacturaError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load configuration, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring unreadable config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save configuration to a JSON file, creating its directory if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content =
            serde_json::to_string_pretty(self).map_err(|e| FacturaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Full path of the output spreadsheet.
    pub fn spreadsheet_path(&self) -> PathBuf {
        self.output_dir.join(&self.spreadsheet.file_name)
    }

    /// Full path of the error log.
    pub fn error_log_path(&self) -> PathBuf {
        self.output_dir.join(&self.spreadsheet.error_log)
    }
}
