//! Reading issues and insights from disk.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{BeadviewError, Result};
use crate::insights::Insights;
use crate::models::Issue;

/// Default location of the beads export relative to the working directory
pub const DEFAULT_ISSUES_PATH: &str = ".beads/issues.jsonl";

/// Resolve the issues file: explicit path, else the beads default
pub fn resolve_issues_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ISSUES_PATH))
}

/// Load issues from a JSONL file.
pub fn load_issues(path: &Path) -> Result<Vec<Issue>> {
    if !path.exists() {
        return Err(BeadviewError::IssuesNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let issues = parse_issues(&content);
    info!(path = %path.display(), count = issues.len(), "loaded issues");
    Ok(issues)
}

/// Parse JSONL content. Blank lines are skipped, malformed lines are
/// logged and skipped, and a later record with the same ID replaces the
/// earlier one in place.
pub fn parse_issues(content: &str) -> Vec<Issue> {
    let mut issues: Vec<Issue> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Issue>(line) {
            Ok(issue) => {
                if let Some(&pos) = positions.get(&issue.id) {
                    debug!(id = %issue.id, line = line_no + 1, "duplicate issue replaced");
                    issues[pos] = issue;
                } else {
                    positions.insert(issue.id.clone(), issues.len());
                    issues.push(issue);
                }
            }
            Err(err) => {
                warn!(line = line_no + 1, error = %err, "skipping malformed issue line");
            }
        }
    }

    issues
}

/// Load insights from a JSON file.
pub fn load_insights(path: &Path) -> Result<Insights> {
    let content = fs::read_to_string(path)?;
    let insights: Insights = serde_json::from_str(&content)?;
    info!(
        path = %path.display(),
        scored = insights.critical_path_score.len(),
        "loaded insights"
    );
    Ok(insights)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE_A: &str = r#"{"id":"bd-a","title":"First","status":"open","priority":1,"issue_type":"bug","created_at":"2024-01-01T00:00:00Z"}"#;
    const LINE_B: &str = r#"{"id":"bd-b","title":"Second","status":"closed","priority":3,"issue_type":"task","created_at":"2024-01-01T00:00:00Z","dependencies":[{"depends_on_id":"bd-a","type":"blocks"}]}"#;

    #[test]
    fn test_parse_skips_blank_and_malformed_lines() {
        let content = format!("{}\n\n{{not json\n{}\n", LINE_A, LINE_B);
        let issues = parse_issues(&content);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].id, "bd-a");
        assert_eq!(issues[1].dependencies.len(), 1);
    }

    #[test]
    fn test_later_duplicate_replaces_earlier() {
        let replacement = LINE_A.replace("First", "Renamed");
        let content = format!("{}\n{}\n{}", LINE_A, LINE_B, replacement);
        let issues = parse_issues(&content);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].title, "Renamed");
    }

    #[test]
    fn test_missing_file_is_reported() {
        let path = Path::new("/definitely/not/here/issues.jsonl");
        match load_issues(path) {
            Err(BeadviewError::IssuesNotFound(p)) => assert_eq!(p, path),
            other => panic!("unexpected result: {:?}", other.map(|i| i.len())),
        }
    }

    #[test]
    fn test_resolve_defaults_to_beads_export() {
        assert_eq!(
            resolve_issues_path(None),
            PathBuf::from(DEFAULT_ISSUES_PATH)
        );
        assert_eq!(
            resolve_issues_path(Some(Path::new("x.jsonl"))),
            PathBuf::from("x.jsonl")
        );
    }
}
