//! Tool record: one typed row of the catalog

use serde::{Deserialize, Serialize};

use super::Phase;

/// Maximum number of video links carried per tool
pub const MAX_VIDEOS: usize = 3;

/// A catalog entry describing one improvement tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRecord {
    /// Tool name, unique within the catalog (join key for selections)
    pub name: String,
    /// PDCA phase; None when the catalog cell was blank or unrecognized
    pub category: Option<Phase>,
    /// Description; None when the catalog cell was blank
    pub description: Option<String>,
    /// Link to further reading
    pub more_info_url: Option<String>,
    /// Up to three video links, in column order
    #[serde(default)]
    pub video_urls: Vec<String>,
}

impl ToolRecord {
    /// Create a record. A blank description is stored as absent.
    pub fn new(name: impl Into<String>, category: Option<Phase>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category,
            description: non_blank(description.into()),
            more_info_url: None,
            video_urls: Vec::new(),
        }
    }

    /// Set the more-info link; blank links are ignored
    pub fn with_more_info(mut self, url: impl Into<String>) -> Self {
        self.more_info_url = non_blank(url.into());
        self
    }

    /// Append a video link; blank links and links past the third are ignored
    pub fn with_video(mut self, url: impl Into<String>) -> Self {
        if self.video_urls.len() < MAX_VIDEOS {
            if let Some(url) = non_blank(url.into()) {
                self.video_urls.push(url);
            }
        }
        self
    }

    /// Description text, empty when absent
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Whether the record belongs to one of the four phases
    pub fn is_classified(&self) -> bool {
        self.category.is_some()
    }

    /// Whether name or description contains `needle`, which must already be lowercase
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

/// Trim a cell and map blank to None
pub(crate) fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}
