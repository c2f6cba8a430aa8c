//! Project metadata captured once per session

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Format used wherever the created date is shown or exported
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Name, owner and created date of the project being planned.
///
/// Fields are read-only after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMeta {
    name: String,
    owner: String,
    created: NaiveDate,
}

impl ProjectMeta {
    /// Create metadata dated today (local time)
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self::with_created(name, owner, Local::now().date_naive())
    }

    /// Create metadata with an explicit created date
    pub fn with_created(name: impl Into<String>, owner: impl Into<String>, created: NaiveDate) -> Self {
        Self {
            name: name.into().trim().to_string(),
            owner: owner.into().trim().to_string(),
            created,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn created(&self) -> NaiveDate {
        self.created
    }

    /// Created date as DD-MM-YYYY
    pub fn created_display(&self) -> String {
        self.created.format(DATE_FORMAT).to_string()
    }

    /// Project name, or "Untitled" when blank
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { "Untitled" } else { &self.name }
    }

    /// Owner, or "N/A" when blank
    pub fn display_owner(&self) -> &str {
        if self.owner.is_empty() { "N/A" } else { &self.owner }
    }
}

impl Default for ProjectMeta {
    fn default() -> Self {
        Self::new("", "")
    }
}
