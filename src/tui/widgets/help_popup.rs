use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::ui::centered_rect;

const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/↓", "Move down"),
            ("k/↑", "Move up"),
            ("h/l", "Previous / next node (graph)"),
            ("PgUp/PgDn", "Move by 10"),
        ],
    ),
    (
        "Views",
        &[
            ("g", "Toggle list / graph"),
            ("enter", "Show graph selection in list"),
            ("f", "Cycle status filter"),
        ],
    ),
    (
        "Other",
        &[
            ("y", "Copy selected ID"),
            ("?", "Toggle this help"),
            ("q/Esc", "Quit"),
        ],
    ),
];

pub fn render_help_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(50, 20, frame.area());

    let block = Block::default()
        .title(" Keybindings ")
        .borders(Borders::ALL)
        .border_style(app.theme.border)
        .style(Style::default().bg(app.theme.highlight));

    let key_style = app.theme.warning.add_modifier(Modifier::BOLD);
    let section_style = app.theme.section;

    let mut text = Vec::new();
    for (section, keys) in BINDINGS {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(format!("  {}", section), section_style)));
        for (key, desc) in keys.iter() {
            text.push(Line::from(vec![
                Span::styled(format!("    {:<11}", key), key_style),
                Span::styled(*desc, app.theme.muted),
            ]));
        }
    }

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(text), inner);
}
