//! Tool catalog: loading, lookup and search
//!
//! The catalog is read once from a CSV file and is read-only afterwards.

mod columns;
mod loader;
mod search;

use std::collections::HashMap;

use log::warn;

use crate::domain::{Phase, ToolRecord};

pub use columns::ColumnMap;
pub use loader::{resolve_path, shared};
pub use search::search;

/// Ordered collection of tool records keyed by unique name
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    tools: Vec<ToolRecord>,
    index: HashMap<String, usize>,
}

impl ToolCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from records, keeping the first of any repeated name
    pub fn from_records(records: impl IntoIterator<Item = ToolRecord>) -> Self {
        let mut catalog = Self::new();
        for record in records {
            catalog.add(record);
        }
        catalog
    }

    /// Add a record. Returns false (and keeps the existing record) when the
    /// name is blank or already present.
    pub fn add(&mut self, record: ToolRecord) -> bool {
        if record.name.trim().is_empty() {
            warn!("Skipping catalog record with blank tool name");
            return false;
        }
        if self.index.contains_key(&record.name) {
            warn!("Skipping duplicate catalog record '{}'", record.name);
            return false;
        }
        self.index.insert(record.name.clone(), self.tools.len());
        self.tools.push(record);
        true
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&ToolRecord> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Description for a tool name, empty when the tool or its description is missing
    pub fn description_of(&self, name: &str) -> &str {
        self.get(name).map(|t| t.description()).unwrap_or("")
    }

    /// All records in catalog order
    pub fn all(&self) -> &[ToolRecord] {
        &self.tools
    }

    /// Iterate records in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &ToolRecord> {
        self.tools.iter()
    }

    /// Records of one phase, in catalog order
    pub fn by_phase(&self, phase: Phase) -> Vec<&ToolRecord> {
        self.tools.iter().filter(|t| t.category == Some(phase)).collect()
    }

    /// Names of one phase's tools, in catalog order
    pub fn names_for_phase(&self, phase: Phase) -> Vec<&str> {
        self.by_phase(phase).into_iter().map(|t| t.name.as_str()).collect()
    }

    /// Records with no recognized phase
    pub fn unclassified(&self) -> Vec<&ToolRecord> {
        self.tools.iter().filter(|t| !t.is_classified()).collect()
    }

    /// Case-insensitive substring search over name and description
    pub fn search(&self, query: &str) -> Vec<&ToolRecord> {
        search(query, self)
    }

    /// Get number of tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Small catalog shared by tests across the crate
    pub(crate) fn sample_catalog() -> ToolCatalog {
        ToolCatalog::from_records(vec![
            ToolRecord::new("5 Whys", Some(Phase::Plan), "Root cause tool"),
            ToolRecord::new("Gemba", Some(Phase::Do), "Go and see"),
            ToolRecord::new("Fishbone", Some(Phase::Plan), "Cause and effect diagram"),
            ToolRecord::new("Control Chart", Some(Phase::Check), "Track process variation"),
            ToolRecord::new("Standard Work", Some(Phase::Act), ""),
            ToolRecord::new("Brainstorming", None, "Generate ideas as a group"),
        ])
    }

    #[test]
    fn test_catalog_new_empty() {
        let catalog = ToolCatalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn test_from_records_preserves_order() {
        let catalog = sample_catalog();
        let names: Vec<&str> = catalog.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["5 Whys", "Gemba", "Fishbone", "Control Chart", "Standard Work", "Brainstorming"]
        );
    }

    #[test]
    fn test_duplicate_name_keeps_first() {
        let catalog = ToolCatalog::from_records(vec![
            ToolRecord::new("Gemba", Some(Phase::Do), "Go and see"),
            ToolRecord::new("Gemba", Some(Phase::Check), "Second copy"),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("Gemba").unwrap().category, Some(Phase::Do));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut catalog = ToolCatalog::new();
        assert!(!catalog.add(ToolRecord::new("  ", Some(Phase::Do), "nameless")));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_get_and_contains() {
        let catalog = sample_catalog();
        assert_eq!(catalog.get("Gemba").unwrap().description(), "Go and see");
        assert!(catalog.contains("Fishbone"));
        assert!(catalog.get("gemba").is_none());
        assert!(!catalog.contains("Nonexistent"));
    }

    #[test]
    fn test_description_of_missing() {
        let catalog = sample_catalog();
        assert_eq!(catalog.description_of("5 Whys"), "Root cause tool");
        assert_eq!(catalog.description_of("Standard Work"), "");
        assert_eq!(catalog.description_of("Nonexistent"), "");
    }

    #[test]
    fn test_by_phase() {
        let catalog = sample_catalog();
        assert_eq!(catalog.names_for_phase(Phase::Plan), vec!["5 Whys", "Fishbone"]);
        assert_eq!(catalog.names_for_phase(Phase::Do), vec!["Gemba"]);
        assert_eq!(catalog.names_for_phase(Phase::Check), vec!["Control Chart"]);
        assert_eq!(catalog.names_for_phase(Phase::Act), vec!["Standard Work"]);
    }

    #[test]
    fn test_unclassified_excluded_from_phases() {
        let catalog = sample_catalog();
        let unclassified = catalog.unclassified();
        assert_eq!(unclassified.len(), 1);
        assert_eq!(unclassified[0].name, "Brainstorming");

        let in_phases: usize = Phase::ALL.iter().map(|p| catalog.by_phase(*p).len()).sum();
        assert_eq!(in_phases, catalog.len() - 1);
    }
}
