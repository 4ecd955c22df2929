pub mod config;
pub mod error;
pub mod graph;
pub mod insights;
pub mod loader;
pub mod logging;
pub mod models;
pub mod render;
pub mod tui;

pub use error::{BeadviewError, Result};
