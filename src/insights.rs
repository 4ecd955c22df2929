use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-issue graph metrics computed by the analysis pipeline.
///
/// Consumed read-only; a missing map is treated as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    #[serde(default)]
    pub page_rank: HashMap<String, f64>,

    #[serde(default)]
    pub critical_path_score: HashMap<String, f64>,

    #[serde(default)]
    pub betweenness: HashMap<String, f64>,
}

impl Insights {
    pub fn page_rank(&self, id: &str) -> Option<f64> {
        self.page_rank.get(id).copied()
    }

    pub fn critical_path(&self, id: &str) -> Option<f64> {
        self.critical_path_score.get(id).copied()
    }

    pub fn betweenness(&self, id: &str) -> Option<f64> {
        self.betweenness.get(id).copied()
    }

    /// Impact shown in list rows: the critical-path score, 0 when unknown
    pub fn impact(&self, id: &str) -> f64 {
        self.critical_path(id).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_maps_default_to_empty() {
        let insights: Insights = serde_json::from_str(r#"{"pageRank": {"bd-1": 0.25}}"#).unwrap();
        assert_eq!(insights.page_rank("bd-1"), Some(0.25));
        assert_eq!(insights.critical_path("bd-1"), None);
        assert_eq!(insights.impact("bd-1"), 0.0);
    }

    #[test]
    fn test_impact_reads_critical_path() {
        let mut insights = Insights::default();
        insights.critical_path_score.insert("bd-1".to_string(), 7.5);
        assert_eq!(insights.impact("bd-1"), 7.5);
    }
}
