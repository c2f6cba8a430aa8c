//! Project plan exporters
//!
//! Each format is produced by an `Exporter` turning a `ProjectPlan` into a byte
//! buffer. Spreadsheet and document backends are cargo features; when one is
//! not compiled in, its format reports `ExportUnavailable` and the others keep
//! working.

pub mod delimited;
pub mod document;
#[cfg(feature = "pdf")]
pub mod pdf;
#[cfg(feature = "xlsx")]
pub mod xlsx;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::domain::PlanTask;
use crate::error::{Result, ToolshedError};
use crate::plan::ProjectPlan;

pub use delimited::DelimitedExporter;
pub use document::{PdfOptions, layout_plan};

/// Column headers shared by tabular formats
pub const BASE_HEADERS: [&str; 3] = ["PDCA Phase", "Task Name", "Description"];
pub const DATE_HEADERS: [&str; 2] = ["Start Date", "Completion Date"];

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Txt,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [Self::Csv, Self::Txt, Self::Xlsx, Self::Pdf];

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Csv => "Project_Plan.csv",
            Self::Txt => "Project_Plan.txt",
            Self::Xlsx => "Project_Plan.xlsx",
            Self::Pdf => "Project_Plan.pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Txt => "text/plain",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Pdf => "application/pdf",
        }
    }

    /// Whether the backend for this format is compiled in
    pub fn is_available(&self) -> bool {
        match self {
            Self::Csv | Self::Txt => true,
            Self::Xlsx => cfg!(feature = "xlsx"),
            Self::Pdf => cfg!(feature = "pdf"),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Csv => "csv",
            Self::Txt => "txt",
            Self::Xlsx => "xlsx",
            Self::Pdf => "pdf",
        };
        f.write_str(name)
    }
}

/// Formats whose backend is compiled in
pub fn available_formats() -> Vec<ExportFormat> {
    ExportFormat::ALL.into_iter().filter(|f| f.is_available()).collect()
}

/// Settings shared by all exporters
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub include_date_columns: bool,
    pub csv_bom: bool,
    pub pdf: PdfOptions,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            include_date_columns: true,
            csv_bom: true,
            pdf: PdfOptions::default(),
        }
    }
}

/// Serializes a project plan into one output format
pub trait Exporter {
    fn format(&self) -> ExportFormat;

    fn export(&self, plan: &ProjectPlan) -> Result<Vec<u8>>;

    fn file_name(&self) -> &'static str {
        self.format().file_name()
    }
}

/// Exporter for a format, or `ExportUnavailable` when its backend is missing
pub fn exporter_for(format: ExportFormat, settings: &ExportSettings) -> Result<Box<dyn Exporter>> {
    match format {
        ExportFormat::Csv => Ok(Box::new(DelimitedExporter::csv(settings))),
        ExportFormat::Txt => Ok(Box::new(DelimitedExporter::tsv(settings))),
        ExportFormat::Xlsx => xlsx_exporter(settings),
        ExportFormat::Pdf => pdf_exporter(settings),
    }
}

#[cfg(feature = "xlsx")]
fn xlsx_exporter(settings: &ExportSettings) -> Result<Box<dyn Exporter>> {
    Ok(Box::new(xlsx::XlsxExporter::new(settings.include_date_columns)))
}

#[cfg(not(feature = "xlsx"))]
fn xlsx_exporter(_settings: &ExportSettings) -> Result<Box<dyn Exporter>> {
    Err(ToolshedError::ExportUnavailable(ExportFormat::Xlsx))
}

#[cfg(feature = "pdf")]
fn pdf_exporter(settings: &ExportSettings) -> Result<Box<dyn Exporter>> {
    Ok(Box::new(pdf::PdfExporter::new(settings.pdf.clone())))
}

#[cfg(not(feature = "pdf"))]
fn pdf_exporter(_settings: &ExportSettings) -> Result<Box<dyn Exporter>> {
    Err(ToolshedError::ExportUnavailable(ExportFormat::Pdf))
}

/// Export a plan into a byte buffer
pub fn export(plan: &ProjectPlan, format: ExportFormat, settings: &ExportSettings) -> Result<Vec<u8>> {
    exporter_for(format, settings)?.export(plan)
}

/// Outcome of writing several formats
#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
    pub unavailable: Vec<ExportFormat>,
}

/// Write each requested format into `dir`. Unavailable formats are skipped
/// and listed in the report; other failures abort.
pub fn export_to_dir(
    plan: &ProjectPlan,
    formats: &[ExportFormat],
    dir: &Path,
    settings: &ExportSettings,
) -> Result<ExportReport> {
    fs::create_dir_all(dir)?;
    let mut report = ExportReport::default();

    for &format in formats {
        let exporter = match exporter_for(format, settings) {
            Ok(exporter) => exporter,
            Err(ToolshedError::ExportUnavailable(f)) => {
                warn!("{} export not available", f);
                report.unavailable.push(f);
                continue;
            }
            Err(e) => return Err(e),
        };

        let bytes = exporter.export(plan)?;
        let path = dir.join(exporter.file_name());
        fs::write(&path, &bytes)?;
        info!("Wrote {} ({} bytes)", path.display(), bytes.len());
        report.written.push(path);
    }

    Ok(report)
}

/// Header row for tabular formats
pub fn table_headers(include_dates: bool) -> Vec<&'static str> {
    let mut headers = BASE_HEADERS.to_vec();
    if include_dates {
        headers.extend(DATE_HEADERS);
    }
    headers
}

/// One task as a tabular row matching `table_headers`
pub fn task_row(task: &PlanTask, include_dates: bool) -> Vec<String> {
    let mut row = vec![
        task.phase.to_string(),
        task.task_name.clone(),
        task.description.clone(),
    ];
    if include_dates {
        row.push(task.start_date_display());
        row.push(task.completion_date_display());
    }
    row
}
