use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, StatusKind, ViewMode};

pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    // Counts line or status message
    if let Some(ref msg) = app.status_message {
        let style = match msg.kind {
            StatusKind::Success => app.theme.success,
            StatusKind::Error => app.theme.error,
            StatusKind::Info => app.theme.info,
        };
        let line = Line::from(vec![Span::raw("  "), Span::styled(&msg.text, style)]);
        frame.render_widget(Paragraph::new(line), chunks[0]);
    } else {
        let counts = app.counts();
        let counts_line = Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{}", counts.open), app.theme.info),
            Span::styled(" open", app.theme.muted),
            Span::styled(" · ", app.theme.muted),
            Span::styled(format!("{}", counts.in_progress), app.theme.warning),
            Span::styled(" in-progress", app.theme.muted),
            Span::styled(" · ", app.theme.muted),
            Span::styled(format!("{}", counts.blocked), app.theme.error),
            Span::styled(" blocked", app.theme.muted),
            Span::styled(" · ", app.theme.muted),
            Span::styled(format!("{}", counts.closed), app.theme.success),
            Span::styled(" closed", app.theme.muted),
        ]);
        frame.render_widget(Paragraph::new(counts_line), chunks[0]);
    }

    // Keybindings line
    let keybindings = match app.view {
        ViewMode::List => vec![
            ("?", "Help"),
            ("g", "Graph"),
            ("f", "Filter"),
            ("y", "Copy ID"),
            ("q", "Quit"),
        ],
        ViewMode::Graph => vec![
            ("?", "Help"),
            ("enter", "Show in list"),
            ("g", "List"),
            ("f", "Filter"),
            ("q", "Quit"),
        ],
    };

    let mut spans: Vec<Span> = vec![Span::raw("  ")];
    for (i, (key, desc)) in keybindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", app.theme.muted));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            app.theme.muted.add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", desc), app.theme.muted));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
}
