//! Session context
//!
//! A Session holds everything one user works on: project metadata captured at
//! start and the per-phase selections. It is created with `Session::start`,
//! passed explicitly to every operation, and consumed by `Session::end`.

mod store;

use log::info;

use crate::catalog::ToolCatalog;
use crate::domain::{Phase, ProjectMeta};
use crate::id::{generate_session_id, now_ms};
use crate::plan::ProjectPlan;

pub use store::{DuplicatePolicy, SelectionStore};

/// One user's working state
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    meta: ProjectMeta,
    selections: SelectionStore,
    started_at: u64,
}

impl Session {
    /// Begin a session for a project
    pub fn start(meta: ProjectMeta, policy: DuplicatePolicy) -> Self {
        let id = generate_session_id();
        info!(
            "Session {} started for project '{}' (policy: {:?})",
            id,
            meta.display_name(),
            policy
        );
        Self {
            id,
            meta,
            selections: SelectionStore::new(policy),
            started_at: now_ms(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn meta(&self) -> &ProjectMeta {
        &self.meta
    }

    pub fn selections(&self) -> &SelectionStore {
        &self.selections
    }

    pub fn started_at(&self) -> u64 {
        self.started_at
    }

    /// Add a tool to a phase
    pub fn select(&mut self, phase: Phase, tool_name: impl Into<String>) -> bool {
        self.selections.select(phase, tool_name)
    }

    /// Remove a tool from a phase
    pub fn deselect(&mut self, phase: Phase, tool_name: &str) -> bool {
        self.selections.deselect(phase, tool_name)
    }

    /// Selected tools for a phase
    pub fn get_selections(&self, phase: Phase) -> &[String] {
        self.selections.get_selections(phase)
    }

    /// Assemble the project plan from current selections
    pub fn plan(&self, catalog: &ToolCatalog) -> ProjectPlan {
        ProjectPlan::build(&self.selections, catalog, &self.meta)
    }

    /// End the session, discarding its state
    pub fn end(self) {
        info!(
            "Session {} ended after {} ms with {} selections",
            self.id,
            now_ms().saturating_sub(self.started_at),
            self.selections.total()
        );
    }
}
