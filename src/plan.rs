//! Project plan assembly
//!
//! Joins per-phase selections against the catalog. Ordering is phase
//! (Plan, Do, Check, Act) then selection order within the phase; every
//! exporter consumes this sequence unchanged.

use serde::Serialize;

use crate::catalog::ToolCatalog;
use crate::domain::{Phase, PlanTask, ProjectMeta};
use crate::session::SelectionStore;

/// Build the flat task list for the current selections.
///
/// A selected name missing from the catalog yields an empty description.
pub fn build_plan(selections: &SelectionStore, catalog: &ToolCatalog) -> Vec<PlanTask> {
    selections
        .iter()
        .flat_map(|(phase, names)| {
            names
                .iter()
                .map(move |name| PlanTask::new(phase, name.clone(), catalog.description_of(name)))
        })
        .collect()
}

/// Project metadata together with its assembled tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPlan {
    pub meta: ProjectMeta,
    pub tasks: Vec<PlanTask>,
}

impl ProjectPlan {
    pub fn build(selections: &SelectionStore, catalog: &ToolCatalog, meta: &ProjectMeta) -> Self {
        let tasks = build_plan(selections, catalog);
        log::debug!("Built plan '{}' with {} tasks", meta.display_name(), tasks.len());
        Self {
            meta: meta.clone(),
            tasks,
        }
    }

    /// Tasks belonging to one phase, in plan order
    pub fn tasks_for(&self, phase: Phase) -> impl Iterator<Item = &PlanTask> {
        self.tasks.iter().filter(move |t| t.phase == phase)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
