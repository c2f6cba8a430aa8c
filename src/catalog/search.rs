//! Substring search over the catalog

use log::debug;

use super::ToolCatalog;
use crate::domain::ToolRecord;

/// Case-insensitive substring match on name or description.
///
/// An empty query returns the whole catalog. Results keep catalog order.
pub fn search<'a>(query: &str, catalog: &'a ToolCatalog) -> Vec<&'a ToolRecord> {
    if query.is_empty() {
        return catalog.iter().collect();
    }
    let needle = query.to_lowercase();
    let results: Vec<&ToolRecord> = catalog.iter().filter(|t| t.matches_lowercase(&needle)).collect();
    debug!("Search '{}' matched {} of {} tools", query, results.len(), catalog.len());
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;
    use crate::domain::Phase;

    fn names<'a>(records: &[&'a ToolRecord]) -> Vec<&'a str> {
        records.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let catalog = sample_catalog();
        let results = search("", &catalog);
        assert_eq!(results.len(), catalog.len());
        for (found, original) in results.iter().zip(catalog.iter()) {
            assert_eq!(found.name, original.name);
        }
    }

    #[test]
    fn test_case_insensitive() {
        let catalog = ToolCatalog::from_records(vec![
            ToolRecord::new("5 Whys", Some(Phase::Plan), "Root cause tool"),
            ToolRecord::new("Gemba", Some(Phase::Do), "Go and see"),
        ]);
        let lower = search("gemba", &catalog);
        let upper = search("GEMBA", &catalog);
        assert_eq!(names(&lower), names(&upper));
        assert_eq!(names(&lower), vec!["Gemba"]);
    }

    #[test]
    fn test_matches_description() {
        let catalog = ToolCatalog::from_records(vec![
            ToolRecord::new("5 Whys", Some(Phase::Plan), "Root cause tool"),
            ToolRecord::new("Gemba", Some(Phase::Do), "Go and see"),
        ]);
        assert_eq!(names(&search("cause", &catalog)), vec!["5 Whys"]);
    }

    #[test]
    fn test_results_subset_in_catalog_order() {
        let catalog = sample_catalog();
        let results = search("c", &catalog);
        let all: Vec<&str> = catalog.iter().map(|t| t.name.as_str()).collect();
        let mut last = None;
        for record in &results {
            let pos = all.iter().position(|n| *n == record.name).unwrap();
            assert!(last.is_none_or(|l| pos > l));
            last = Some(pos);
        }
    }

    #[test]
    fn test_missing_description_does_not_match() {
        let catalog = sample_catalog();
        assert!(search("standard", &catalog).iter().any(|t| t.name == "Standard Work"));
        assert!(search("procedure", &catalog).is_empty());
    }

    #[test]
    fn test_unclassified_searchable() {
        let catalog = sample_catalog();
        assert_eq!(names(&search("ideas", &catalog)), vec!["Brainstorming"]);
    }

    #[test]
    fn test_no_ranking_or_tokenizing() {
        let catalog = sample_catalog();
        assert!(search("cause tool", &catalog).iter().any(|t| t.name == "5 Whys"));
        assert!(search("tool cause", &catalog).is_empty());
    }
}
