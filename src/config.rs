//! Configuration for Toolshed.
//!
//! Loaded from `.toolshed.yml` or `~/.config/toolshed/toolshed.yml`, falling
//! back to defaults.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::export::{ExportSettings, PdfOptions};
use crate::session::DuplicatePolicy;

/// Default primary catalog location.
pub const DEFAULT_CATALOG_PRIMARY: &str = "Data/Tools_description.csv";

/// Default fallback catalog location.
pub const DEFAULT_CATALOG_FALLBACK: &str = "Tools_description.csv";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Catalog file locations.
    pub catalog: CatalogConfig,

    /// Selection store policy.
    pub selection: SelectionConfig,

    /// Export settings shared by all formats.
    pub export: ExportConfig,

    /// Document layout and encoding.
    pub pdf: PdfConfig,
}

impl Config {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .toolshed.yml in current directory
    /// 3. ~/.config/toolshed/toolshed.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_config = PathBuf::from(".toolshed.yml");
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => {
                    log::info!("Loaded config from .toolshed.yml");
                    return Ok(config);
                }
                Err(e) => {
                    log::warn!("Failed to load .toolshed.yml: {}", e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("toolshed").join("toolshed.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", user_config.display());
                        return Ok(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load and validate configuration from a specific YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let sizes = [self.pdf.font_size, self.pdf.header_size, self.pdf.title_size];
        if sizes.iter().any(|size| !size.is_finite() || *size <= 0.0) {
            eyre::bail!("pdf font sizes must be finite and > 0");
        }
        let margin = self.pdf.margin;
        if !margin.is_finite() || margin < 0.0 || margin * 2.0 >= PdfOptions::PAGE_WIDTH {
            eyre::bail!("pdf.margin must be finite, >= 0 and leave room on the page");
        }
        Ok(())
    }

    /// Selection policy derived from the selection section.
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        DuplicatePolicy::from_flag(self.selection.allow_duplicates)
    }

    /// Exporter settings derived from the export and pdf sections.
    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            include_date_columns: self.export.include_date_columns,
            csv_bom: self.export.csv_bom,
            pdf: self.pdf_options(),
        }
    }

    /// Document options derived from the pdf section.
    pub fn pdf_options(&self) -> PdfOptions {
        PdfOptions {
            replacement: self.pdf.replacement.clone(),
            font_size: self.pdf.font_size,
            header_size: self.pdf.header_size,
            title_size: self.pdf.title_size,
            margin: self.pdf.margin,
        }
    }
}

/// Catalog file locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Tried first.
    pub primary: PathBuf,

    /// Tried when the primary path does not exist.
    pub fallback: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            primary: PathBuf::from(DEFAULT_CATALOG_PRIMARY),
            fallback: PathBuf::from(DEFAULT_CATALOG_FALLBACK),
        }
    }
}

/// Selection store policy.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Allow the same tool more than once within a phase.
    #[serde(rename = "allow-duplicates")]
    pub allow_duplicates: bool,
}

/// Export settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory export files are written into.
    #[serde(rename = "out-dir")]
    pub out_dir: PathBuf,

    /// Add blank Start Date / Completion Date columns to delimited and spreadsheet output.
    #[serde(rename = "include-date-columns")]
    pub include_date_columns: bool,

    /// Prefix CSV output with a UTF-8 byte-order mark.
    #[serde(rename = "csv-bom")]
    pub csv_bom: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            include_date_columns: true,
            csv_bom: true,
        }
    }
}

/// Document layout and encoding.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Substitute for characters the document font cannot encode. Absent strips them.
    pub replacement: Option<String>,

    /// Body text size in points.
    #[serde(rename = "font-size")]
    pub font_size: f32,

    /// Phase header size in points.
    #[serde(rename = "header-size")]
    pub header_size: f32,

    /// Title size in points.
    #[serde(rename = "title-size")]
    pub title_size: f32,

    /// Page margin in points.
    pub margin: f32,
}

impl Default for PdfConfig {
    fn default() -> Self {
        let options = PdfOptions::default();
        Self {
            replacement: options.replacement,
            font_size: options.font_size,
            header_size: options.header_size,
            title_size: options.title_size,
            margin: options.margin,
        }
    }
}
