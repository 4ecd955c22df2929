use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::{App, ViewMode};
use super::widgets::{
    help_popup::render_help_popup,
    issue_list::render_issue_list,
    issue_row::IssueDelegate,
    status_bar::render_status_bar,
};

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    if app.show_help {
        render_help_popup(frame, app);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let view_name = match app.view {
        ViewMode::List => "Issues",
        ViewMode::Graph => "Dependency Graph",
    };

    let mut spans = vec![
        Span::styled("  beadview", app.theme.title),
        Span::raw("  "),
        Span::styled(view_name, app.theme.muted),
        Span::raw("  "),
        Span::styled(format!("({})", app.items.len()), app.theme.muted),
    ];

    if app.filter.label() != "all" {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("[Filter: {}]", app.filter.label()),
            app.theme.info,
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_content(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(app.theme.border);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match app.view {
        ViewMode::List => render_list(frame, app, inner),
        ViewMode::Graph => {
            let text = app.graph.view(inner.width, inner.height);
            frame.render_widget(Paragraph::new(text), inner);
        }
    }
}

fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.items.is_empty() {
        let msg = format!("  No {} issues", app.filter.label());
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(msg, app.theme.muted))),
            area,
        );
        return;
    }

    let delegate = IssueDelegate::new(app.tier_for(area.width), &app.theme, Utc::now());
    render_issue_list(
        frame,
        area,
        &delegate,
        &app.items,
        app.selected_index,
        &mut app.list_window,
    );
}

/// Helper to create a centered rectangle
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
