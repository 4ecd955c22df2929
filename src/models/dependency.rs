use serde::{Deserialize, Serialize};

/// Relation kind carried by a dependency edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DependencyKind {
    Blocks,
    ParentChild,
    Related,
    DiscoveredFrom,
    Other(String),
}

impl DependencyKind {
    pub fn as_str(&self) -> &str {
        match self {
            DependencyKind::Blocks => "blocks",
            DependencyKind::ParentChild => "parent-child",
            DependencyKind::Related => "related",
            DependencyKind::DiscoveredFrom => "discovered-from",
            DependencyKind::Other(s) => s,
        }
    }

    /// Whether the target must complete before the source can proceed
    pub fn is_blocking(&self) -> bool {
        matches!(self, DependencyKind::Blocks | DependencyKind::ParentChild)
    }
}

impl From<String> for DependencyKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "blocks" => DependencyKind::Blocks,
            "parent-child" => DependencyKind::ParentChild,
            "related" => DependencyKind::Related,
            "discovered-from" => DependencyKind::DiscoveredFrom,
            _ => DependencyKind::Other(s),
        }
    }
}

impl From<DependencyKind> for String {
    fn from(kind: DependencyKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Directed edge from an issue to the issue it depends on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependency {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<String>,

    pub depends_on_id: String,

    #[serde(rename = "type")]
    pub kind: DependencyKind,
}

impl Dependency {
    pub fn new(depends_on_id: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            issue_id: None,
            depends_on_id: depends_on_id.into(),
            kind,
        }
    }
}
