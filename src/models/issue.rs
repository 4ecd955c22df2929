use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dependency::Dependency;

/// Workflow status of an issue
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Open,
    InProgress,
    Blocked,
    Closed,
    Other(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Open => "open",
            Status::InProgress => "in_progress",
            Status::Blocked => "blocked",
            Status::Closed => "closed",
            Status::Other(s) => s,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Status::Closed)
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match s.as_str() {
            "open" => Status::Open,
            "in_progress" => Status::InProgress,
            "blocked" => Status::Blocked,
            "closed" => Status::Closed,
            _ => Status::Other(s),
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

/// Kind of work an issue represents
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IssueType {
    Bug,
    Feature,
    #[default]
    Task,
    Epic,
    Chore,
    Other(String),
}

impl IssueType {
    pub fn as_str(&self) -> &str {
        match self {
            IssueType::Bug => "bug",
            IssueType::Feature => "feature",
            IssueType::Task => "task",
            IssueType::Epic => "epic",
            IssueType::Chore => "chore",
            IssueType::Other(s) => s,
        }
    }
}

impl From<String> for IssueType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "bug" => IssueType::Bug,
            "feature" => IssueType::Feature,
            "task" => IssueType::Task,
            "epic" => IssueType::Epic,
            "chore" => IssueType::Chore,
            _ => IssueType::Other(s),
        }
    }
}

impl From<IssueType> for String {
    fn from(issue_type: IssueType) -> Self {
        issue_type.as_str().to_string()
    }
}

/// A comment attached to an issue. Only the count is displayed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// An issue record as exported by beads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    pub status: Status,

    /// Lower is more urgent
    #[serde(default)]
    pub priority: i32,

    #[serde(default)]
    pub issue_type: IssueType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub updated_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,
}

impl Issue {
    /// Creates an open task with both timestamps set to now.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            status: Status::Open,
            priority: 2,
            issue_type: IssueType::Task,
            assignee: None,
            created_at: now,
            updated_at: now,
            comments: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Assignee with empty strings treated as unassigned
    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref().filter(|a| !a.is_empty())
    }

    /// IDs of the issues that must complete before this one
    pub fn blocking_dependencies(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .iter()
            .filter(|dep| dep.kind.is_blocking())
            .map(|dep| dep.depends_on_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DependencyKind;

    #[test]
    fn test_status_round_trips_known_and_unknown_values() {
        assert_eq!(Status::from("in_progress".to_string()), Status::InProgress);
        assert_eq!(
            Status::from("tombstone".to_string()),
            Status::Other("tombstone".to_string())
        );
        assert_eq!(String::from(Status::InProgress), "in_progress");
    }

    #[test]
    fn test_issue_deserializes_minimal_record() {
        let json = r#"{
            "id": "bd-1",
            "title": "Implement parser",
            "status": "open",
            "priority": 1,
            "issue_type": "feature",
            "created_at": "2024-01-02T03:04:05Z"
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.id, "bd-1");
        assert_eq!(issue.issue_type, IssueType::Feature);
        assert!(issue.assignee().is_none());
        assert!(issue.comments.is_empty());
        assert!(issue.dependencies.is_empty());
    }

    #[test]
    fn test_empty_assignee_is_unassigned() {
        let mut issue = Issue::new("bd-1", "x");
        issue.assignee = Some(String::new());
        assert_eq!(issue.assignee(), None);
        issue.assignee = Some("alice".to_string());
        assert_eq!(issue.assignee(), Some("alice"));
    }

    #[test]
    fn test_blocking_dependencies_skip_related_edges() {
        let mut issue = Issue::new("bd-3", "x");
        issue.dependencies = vec![
            Dependency::new("bd-1", DependencyKind::Blocks),
            Dependency::new("bd-2", DependencyKind::Related),
            Dependency::new("bd-0", DependencyKind::ParentChild),
        ];
        let ids: Vec<&str> = issue.blocking_dependencies().collect();
        assert_eq!(ids, vec!["bd-1", "bd-0"]);
    }
}
