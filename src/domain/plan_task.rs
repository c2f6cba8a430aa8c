//! Plan task: one row of the derived project plan

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Phase, project::DATE_FORMAT};

/// A selected tool turned into a plan task.
///
/// Built fresh on every plan assembly; dates start blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTask {
    pub phase: Phase,
    pub task_name: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
}

impl PlanTask {
    pub fn new(phase: Phase, task_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            phase,
            task_name: task_name.into(),
            description: description.into(),
            start_date: None,
            completion_date: None,
        }
    }

    /// Start date as DD-MM-YYYY, empty when unset
    pub fn start_date_display(&self) -> String {
        format_date(self.start_date)
    }

    /// Completion date as DD-MM-YYYY, empty when unset
    pub fn completion_date_display(&self) -> String {
        format_date(self.completion_date)
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default()
}
