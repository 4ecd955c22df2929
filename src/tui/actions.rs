use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::warn;

use crate::error::Result;

use super::app::{App, StatusKind, ViewMode};

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return Ok(());
    }

    // Help popup swallows everything except its own dismissal
    if app.show_help {
        if matches!(
            key.code,
            KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')
        ) {
            app.show_help = false;
        }
        return Ok(());
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('l') | KeyCode::Right if app.view == ViewMode::Graph => {
            app.graph.move_right()
        }
        KeyCode::Char('h') | KeyCode::Left if app.view == ViewMode::Graph => {
            app.graph.move_left()
        }
        KeyCode::PageDown => app.page_down(),
        KeyCode::PageUp => app.page_up(),

        // Views
        KeyCode::Char('g') => app.toggle_view(),
        KeyCode::Enter if app.view == ViewMode::Graph => app.show_graph_selection_in_list(),
        KeyCode::Char('f') => app.cycle_filter(),

        KeyCode::Char('y') => {
            if let Err(err) = app.copy_selected_id() {
                warn!(error = %err, "clipboard copy failed");
                app.set_status(err.to_string(), StatusKind::Error);
            }
        }

        KeyCode::Char('?') => app.show_help = true,

        _ => {}
    }

    Ok(())
}
