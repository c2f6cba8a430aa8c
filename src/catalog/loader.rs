//! Catalog loading from CSV with primary/fallback path resolution

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use csv::{ReaderBuilder, Trim};
use log::{debug, info, warn};

use super::ToolCatalog;
use super::columns::ColumnMap;
use crate::error::{Result, ToolshedError};

static SHARED: OnceLock<Arc<ToolCatalog>> = OnceLock::new();

/// Pick the first existing catalog file.
pub fn resolve_path(primary: &Path, fallback: &Path) -> Result<PathBuf> {
    if primary.is_file() {
        return Ok(primary.to_path_buf());
    }
    if fallback.is_file() {
        warn!(
            "Catalog not found at {}, using {}",
            primary.display(),
            fallback.display()
        );
        return Ok(fallback.to_path_buf());
    }
    Err(ToolshedError::CatalogNotFound {
        primary: primary.to_path_buf(),
        fallback: fallback.to_path_buf(),
    })
}

/// Process-wide catalog, loaded on first call and never reloaded.
///
/// Paths passed after the first successful load are ignored.
pub fn shared(primary: &Path, fallback: &Path) -> Result<Arc<ToolCatalog>> {
    if let Some(catalog) = SHARED.get() {
        return Ok(Arc::clone(catalog));
    }
    let catalog = Arc::new(ToolCatalog::load(primary, fallback)?);
    Ok(Arc::clone(SHARED.get_or_init(|| catalog)))
}

impl ToolCatalog {
    /// Load from the primary path, falling back to the secondary path
    pub fn load(primary: impl AsRef<Path>, fallback: impl AsRef<Path>) -> Result<Self> {
        let path = resolve_path(primary.as_ref(), fallback.as_ref())?;
        Self::from_file(path)
    }

    /// Load catalog from a CSV file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = Self::from_reader(file)?;
        info!("Loaded {} tools from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Load catalog from CSV text
    pub fn from_csv(content: &str) -> Result<Self> {
        Self::from_reader(content.as_bytes())
    }

    /// Load catalog from any CSV source. The first row must be the header.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let columns = ColumnMap::from_headers(reader.headers()?)?;
        debug!("Catalog column map: {:?}", columns);

        let mut catalog = Self::new();
        for row in reader.records() {
            let row = row?;
            if row.iter().all(|cell| cell.is_empty()) {
                continue;
            }
            catalog.add(columns.to_record(&row));
        }
        Ok(catalog)
    }
}
