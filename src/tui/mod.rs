mod actions;
mod app;
mod event;
pub mod format;
pub mod layout;
pub mod theme;
mod ui;
pub mod widgets;

use crate::error::{BeadviewError, Result};
pub use app::{App, StatusFilter, ViewMode};

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;

/// Run the TUI application
pub fn run(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode().map_err(|e| BeadviewError::Tui(e.to_string()))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| BeadviewError::Tui(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| BeadviewError::Tui(e.to_string()))?;

    info!(issues = app.issues.len(), "starting interactive view");
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().map_err(|e| BeadviewError::Tui(e.to_string()))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| BeadviewError::Tui(e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| BeadviewError::Tui(e.to_string()))?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let events = event::EventHandler::new(250);

    while app.running {
        terminal
            .draw(|f| ui::render(f, app))
            .map_err(|e| BeadviewError::Tui(e.to_string()))?;

        match events.next()? {
            event::Event::Key(key) => actions::handle_key_event(app, key)?,
            event::Event::Tick => app.tick(),
            // Next draw picks up the new size
            event::Event::Resize(_, _) => {}
        }
    }

    Ok(())
}
