//! Adjacency index over the blocking edges of an issue collection.
//!
//! The index is rebuilt wholesale from the current issues; it is never
//! patched in place.

use std::collections::HashMap;

use crate::insights::Insights;
use crate::models::Issue;

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// What each issue depends on
    blockers: HashMap<String, Vec<String>>,
    /// What depends on each issue
    dependents: HashMap<String, Vec<String>>,
    /// Navigation order, each issue ID exactly once
    sorted_ids: Vec<String>,
}

impl DependencyGraph {
    /// Build the index in one pass over issues and their edges.
    ///
    /// With insights, issues are ordered by descending critical-path score
    /// (ties by ascending ID); without, by ascending ID.
    pub fn build(issues: &[Issue], insights: Option<&Insights>) -> Self {
        let mut graph = Self::default();

        for issue in issues {
            for target in issue.blocking_dependencies() {
                graph
                    .blockers
                    .entry(issue.id.clone())
                    .or_default()
                    .push(target.to_string());
                graph
                    .dependents
                    .entry(target.to_string())
                    .or_default()
                    .push(issue.id.clone());
            }
            graph.sorted_ids.push(issue.id.clone());
        }

        graph.sorted_ids.sort();
        graph.sorted_ids.dedup();

        if let Some(insights) = insights {
            graph.sorted_ids.sort_by(|a, b| {
                let score_a = insights.critical_path(a).unwrap_or(0.0);
                let score_b = insights.critical_path(b).unwrap_or(0.0);
                score_b.total_cmp(&score_a).then_with(|| a.cmp(b))
            });
        }

        graph
    }

    pub fn blockers(&self, id: &str) -> &[String] {
        self.blockers.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn dependents(&self, id: &str) -> &[String] {
        self.dependents.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn sorted_ids(&self) -> &[String] {
        &self.sorted_ids
    }

    pub fn len(&self) -> usize {
        self.sorted_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_ids.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.sorted_ids.iter().position(|candidate| candidate == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dependency, DependencyKind};

    fn issue(id: &str, deps: &[(&str, DependencyKind)]) -> Issue {
        let mut issue = Issue::new(id, format!("Issue {}", id));
        issue.dependencies = deps
            .iter()
            .map(|(target, kind)| Dependency::new(*target, kind.clone()))
            .collect();
        issue
    }

    fn sample() -> Vec<Issue> {
        vec![
            issue(
                "c",
                &[("a", DependencyKind::Blocks), ("b", DependencyKind::ParentChild)],
            ),
            issue("b", &[("a", DependencyKind::Blocks)]),
            issue("a", &[]),
            issue("d", &[("a", DependencyKind::Related), ("zz", DependencyKind::Blocks)]),
        ]
    }

    #[test]
    fn test_blockers_and_dependents_are_symmetric() {
        let issues = sample();
        let graph = DependencyGraph::build(&issues, None);

        for issue in &issues {
            for blocker in graph.blockers(&issue.id) {
                assert!(graph.dependents(blocker).contains(&issue.id));
            }
            for dependent in graph.dependents(&issue.id) {
                assert!(graph.blockers(dependent).contains(&issue.id));
            }
        }
        assert_eq!(graph.blockers("c"), ["a", "b"]);
        assert_eq!(graph.dependents("a"), ["c", "b"]);
    }

    #[test]
    fn test_non_blocking_edges_are_ignored() {
        let graph = DependencyGraph::build(&sample(), None);
        assert_eq!(graph.blockers("d"), ["zz"]);
        assert!(!graph.dependents("a").contains(&"d".to_string()));
    }

    #[test]
    fn test_edges_to_unknown_issues_are_kept() {
        let graph = DependencyGraph::build(&sample(), None);
        assert_eq!(graph.dependents("zz"), ["d"]);
        assert_eq!(graph.position("zz"), None);
    }

    #[test]
    fn test_lexical_order_without_insights() {
        let graph = DependencyGraph::build(&sample(), None);
        assert_eq!(graph.sorted_ids(), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_critical_path_order_with_ties_by_id() {
        let mut insights = Insights::default();
        insights.critical_path_score.insert("c".to_string(), 3.0);
        insights.critical_path_score.insert("b".to_string(), 5.0);
        insights.critical_path_score.insert("d".to_string(), 3.0);

        let issues = sample();
        let first = DependencyGraph::build(&issues, Some(&insights));
        assert_eq!(first.sorted_ids(), ["b", "c", "d", "a"]);

        let second = DependencyGraph::build(&issues, Some(&insights));
        assert_eq!(first.sorted_ids(), second.sorted_ids());
    }

    #[test]
    fn test_duplicate_ids_appear_once() {
        let issues = vec![issue("a", &[]), issue("a", &[])];
        let graph = DependencyGraph::build(&issues, None);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_empty_collection() {
        let graph = DependencyGraph::build(&[], None);
        assert!(graph.is_empty());
        assert!(graph.blockers("a").is_empty());
    }
}
