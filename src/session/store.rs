//! Per-phase tool selections

use serde::{Deserialize, Serialize};

use crate::catalog::ToolCatalog;
use crate::domain::Phase;

/// Whether a phase may hold the same tool name more than once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Each name at most once per phase
    #[default]
    Reject,
    /// Repeats allowed within a phase
    Allow,
}

impl DuplicatePolicy {
    pub fn from_flag(allow_duplicates: bool) -> Self {
        if allow_duplicates { Self::Allow } else { Self::Reject }
    }

    pub fn allows_duplicates(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Ordered tool names selected for each phase.
///
/// Names are kept as given; a name missing from the catalog is not rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionStore {
    policy: DuplicatePolicy,
    phases: [Vec<String>; 4],
}

impl SelectionStore {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            phases: Default::default(),
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Append a tool to a phase. Returns false when the policy rejects a repeat.
    pub fn select(&mut self, phase: Phase, tool_name: impl Into<String>) -> bool {
        let tool_name = tool_name.into();
        let selected = &mut self.phases[phase.index()];
        if !self.policy.allows_duplicates() && selected.contains(&tool_name) {
            log::debug!("'{}' already selected for {}", tool_name, phase);
            return false;
        }
        selected.push(tool_name);
        true
    }

    /// Remove the first occurrence of a tool from a phase
    pub fn deselect(&mut self, phase: Phase, tool_name: &str) -> bool {
        let selected = &mut self.phases[phase.index()];
        match selected.iter().position(|n| n == tool_name) {
            Some(pos) => {
                selected.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Replace a phase's selections, applying the duplicate policy
    pub fn set_selections<I, S>(&mut self, phase: Phase, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phases[phase.index()].clear();
        for name in names {
            self.select(phase, name);
        }
    }

    /// Selected names for a phase, in selection order
    pub fn get_selections(&self, phase: Phase) -> &[String] {
        &self.phases[phase.index()]
    }

    /// Catalog tools of a phase that can still be selected.
    ///
    /// Under the reject policy, already-selected names are left out.
    pub fn available<'a>(&self, phase: Phase, catalog: &'a ToolCatalog) -> Vec<&'a str> {
        let selected = self.get_selections(phase);
        catalog
            .names_for_phase(phase)
            .into_iter()
            .filter(|name| self.policy.allows_duplicates() || !selected.iter().any(|s| s.as_str() == *name))
            .collect()
    }

    /// Iterate phases in canonical order with their selections
    pub fn iter(&self) -> impl Iterator<Item = (Phase, &[String])> {
        Phase::ALL.into_iter().map(|p| (p, self.get_selections(p)))
    }

    /// Total selected names across all phases, counting repeats
    pub fn total(&self) -> usize {
        self.phases.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Drop all selections, keeping the policy
    pub fn clear(&mut self) {
        for selected in &mut self.phases {
            selected.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;

    #[test]
    fn test_select_preserves_order() {
        let mut store = SelectionStore::default();
        assert!(store.select(Phase::Plan, "Fishbone"));
        assert!(store.select(Phase::Plan, "5 Whys"));
        assert_eq!(store.get_selections(Phase::Plan), &["Fishbone", "5 Whys"]);
        assert!(store.get_selections(Phase::Do).is_empty());
    }

    #[test]
    fn test_reject_policy_blocks_repeat() {
        let mut store = SelectionStore::new(DuplicatePolicy::Reject);
        assert!(store.select(Phase::Do, "Gemba"));
        assert!(!store.select(Phase::Do, "Gemba"));
        assert_eq!(store.get_selections(Phase::Do).len(), 1);
    }

    #[test]
    fn test_allow_policy_keeps_repeat() {
        let mut store = SelectionStore::new(DuplicatePolicy::Allow);
        assert!(store.select(Phase::Do, "Gemba"));
        assert!(store.select(Phase::Do, "Gemba"));
        assert_eq!(store.total(), 2);
    }

    #[test]
    fn test_cross_phase_duplicate_permitted() {
        let mut store = SelectionStore::new(DuplicatePolicy::Reject);
        assert!(store.select(Phase::Plan, "Gemba"));
        assert!(store.select(Phase::Check, "Gemba"));
        assert_eq!(store.total(), 2);
    }

    #[test]
    fn test_unknown_tool_retained() {
        let mut store = SelectionStore::default();
        assert!(store.select(Phase::Act, "Not In Catalog"));
        assert_eq!(store.get_selections(Phase::Act), &["Not In Catalog"]);
    }

    #[test]
    fn test_deselect_first_occurrence() {
        let mut store = SelectionStore::new(DuplicatePolicy::Allow);
        store.select(Phase::Plan, "A");
        store.select(Phase::Plan, "B");
        store.select(Phase::Plan, "A");
        assert!(store.deselect(Phase::Plan, "A"));
        assert_eq!(store.get_selections(Phase::Plan), &["B", "A"]);
        assert!(!store.deselect(Phase::Plan, "C"));
        assert!(!store.deselect(Phase::Do, "B"));
    }

    #[test]
    fn test_set_selections_replaces_and_dedups() {
        let mut store = SelectionStore::default();
        store.select(Phase::Check, "Old");
        store.set_selections(Phase::Check, ["Control Chart", "Pareto", "Control Chart"]);
        assert_eq!(store.get_selections(Phase::Check), &["Control Chart", "Pareto"]);
    }

    #[test]
    fn test_available_shrinks_under_reject() {
        let catalog = sample_catalog();
        let mut store = SelectionStore::new(DuplicatePolicy::Reject);
        assert_eq!(store.available(Phase::Plan, &catalog), vec!["5 Whys", "Fishbone"]);
        store.select(Phase::Plan, "5 Whys");
        assert_eq!(store.available(Phase::Plan, &catalog), vec!["Fishbone"]);
    }

    #[test]
    fn test_available_full_under_allow() {
        let catalog = sample_catalog();
        let mut store = SelectionStore::new(DuplicatePolicy::Allow);
        store.select(Phase::Plan, "5 Whys");
        assert_eq!(store.available(Phase::Plan, &catalog), vec!["5 Whys", "Fishbone"]);
    }

    #[test]
    fn test_iter_canonical_order_and_clear() {
        let mut store = SelectionStore::default();
        store.select(Phase::Act, "Standard Work");
        store.select(Phase::Plan, "5 Whys");
        let phases: Vec<Phase> = store.iter().map(|(p, _)| p).collect();
        assert_eq!(phases, Phase::ALL.to_vec());

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.policy(), DuplicatePolicy::Reject);
    }

    #[test]
    fn test_policy_from_flag() {
        assert_eq!(DuplicatePolicy::from_flag(true), DuplicatePolicy::Allow);
        assert_eq!(DuplicatePolicy::from_flag(false), DuplicatePolicy::Reject);
    }
}
