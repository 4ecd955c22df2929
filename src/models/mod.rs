mod dependency;
mod issue;

pub use dependency::{Dependency, DependencyKind};
pub use issue::{Comment, Issue, IssueType, Status};
