use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BeadviewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Issues file not found: {}", .0.display())]
    IssuesNotFound(PathBuf),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("TUI error: {0}")]
    Tui(String),
}

pub type Result<T> = std::result::Result<T, BeadviewError>;
