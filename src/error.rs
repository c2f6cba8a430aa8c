//! Error types for Toolshed
//!
//! Centralized error handling using thiserror.

use std::path::PathBuf;

use thiserror::Error;

use crate::export::ExportFormat;

/// All error types that can occur in Toolshed
#[derive(Debug, Error)]
pub enum ToolshedError {
    /// Neither the primary nor the fallback catalog path exists
    #[error("Catalog not found: tried {} and {}", .primary.display(), .fallback.display())]
    CatalogNotFound { primary: PathBuf, fallback: PathBuf },

    /// Catalog file exists but could not be mapped to tool records
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A phase name that is not one of Plan, Do, Check, Act
    #[error("Invalid phase: {0}")]
    InvalidPhase(String),

    /// Export backend for this format is not compiled in
    #[error("Export unavailable: {0}")]
    ExportUnavailable(ExportFormat),

    /// Export backend failed while producing output
    #[error("Export error: {0}")]
    Export(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading/writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for Toolshed operations
pub type Result<T> = std::result::Result<T, ToolshedError>;
