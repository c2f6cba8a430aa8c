//! Header-to-field mapping for catalog CSV files
//!
//! Catalog sheets carry three named columns and up to four link columns that
//! are often left without a header. Named link headers win; otherwise the
//! 4th column is the more-info link and the 5th-7th are videos.

use csv::StringRecord;

use crate::domain::{MAX_VIDEOS, Phase, ToolRecord};
use crate::error::{Result, ToolshedError};

pub const TOOL_NAME: &str = "Tool Name";
pub const PDCA_CATEGORY: &str = "PDCA Category";
pub const DESCRIPTION: &str = "Description";
pub const MORE_INFO: &str = "More Info";

const MORE_INFO_POSITION: usize = 3;
const FIRST_VIDEO_POSITION: usize = 4;

/// Column positions for each ToolRecord field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: usize,
    pub category: usize,
    pub description: usize,
    pub more_info: Option<usize>,
    pub videos: Vec<usize>,
}

impl ColumnMap {
    /// Map a header row. Fails when a required column is missing.
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();

        let required = |label: &str| -> Result<usize> {
            find(&normalized, label)
                .ok_or_else(|| ToolshedError::Catalog(format!("missing column '{}'", label)))
        };

        let name = required(TOOL_NAME)?;
        let category = required(PDCA_CATEGORY)?;
        let description = required(DESCRIPTION)?;

        let more_info = find(&normalized, MORE_INFO)
            .or_else(|| positional(&normalized, MORE_INFO_POSITION));

        let videos = (0..MAX_VIDEOS)
            .filter_map(|i| {
                let named = [format!("Video{}", i + 1), format!("Video {}", i + 1)];
                named
                    .iter()
                    .find_map(|label| find(&normalized, label))
                    .or_else(|| positional(&normalized, FIRST_VIDEO_POSITION + i))
            })
            .collect();

        Ok(Self {
            name,
            category,
            description,
            more_info,
            videos,
        })
    }

    /// Convert one data row into a record. Blank cells become absent values.
    pub fn to_record(&self, row: &StringRecord) -> ToolRecord {
        let cell = |i: usize| row.get(i).unwrap_or("");

        let mut record = ToolRecord::new(
            cell(self.name).trim(),
            Phase::from_cell(cell(self.category)),
            cell(self.description),
        );
        if let Some(i) = self.more_info {
            record = record.with_more_info(cell(i));
        }
        for &i in &self.videos {
            record = record.with_video(cell(i));
        }
        record
    }
}

fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}

fn find(normalized: &[String], label: &str) -> Option<usize> {
    let label = label.to_lowercase();
    normalized.iter().position(|h| *h == label)
}

/// A positional column is usable when its header is blank or absent.
fn positional(normalized: &[String], position: usize) -> Option<usize> {
    match normalized.get(position) {
        Some(h) if !h.is_empty() => None,
        _ => Some(position),
    }
}
