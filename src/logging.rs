use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{BeadviewError, Result};

/// Where log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    /// Append to a file; the only option while the TUI owns the terminal
    File(&'a Path),
    Stderr,
    Disabled,
}

impl<'a> LogTarget<'a> {
    /// Pick a target: a configured file always wins, otherwise stderr for
    /// plain output and nothing for the interactive UI.
    pub fn choose(log_file: Option<&'a Path>, interactive: bool) -> Self {
        match (log_file, interactive) {
            (Some(path), _) => LogTarget::File(path),
            (None, false) => LogTarget::Stderr,
            (None, true) => LogTarget::Disabled,
        }
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init_logging(target: LogTarget<'_>, default_level: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match target {
        LogTarget::Disabled => Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .map_err(|e| BeadviewError::Logging(e.to_string())),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(|e| BeadviewError::Logging(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_target_wins_over_mode() {
        let path = Path::new("/tmp/bv.log");
        assert_eq!(LogTarget::choose(Some(path), true), LogTarget::File(path));
        assert_eq!(LogTarget::choose(Some(path), false), LogTarget::File(path));
    }

    #[test]
    fn test_interactive_without_file_disables_logging() {
        assert_eq!(LogTarget::choose(None, true), LogTarget::Disabled);
        assert_eq!(LogTarget::choose(None, false), LogTarget::Stderr);
    }
}
