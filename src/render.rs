use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};

use crate::insights::Insights;
use crate::models::Issue;
use crate::tui::layout::line_text;
use crate::tui::theme::Theme;
use crate::tui::widgets::graph_view::GraphView;
use crate::tui::widgets::issue_list::list_lines;
use crate::tui::widgets::issue_row::{IssueDelegate, IssueItem, Tier};

/// Non-interactive output: the same rows and graph the TUI draws, printed
/// to stdout as ANSI text.
pub struct Render {
    theme: Theme,
    color: bool,
}

impl Render {
    pub fn new(theme: Theme) -> Self {
        Self { theme, color: true }
    }

    /// Keep styling only when `color` is set, e.g. when stdout is a terminal
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// One string per row, no row selected
    pub fn list(
        &self,
        issues: &[Issue],
        insights: Option<&Insights>,
        tier: Tier,
        width: u16,
        now: DateTime<Utc>,
    ) -> Vec<String> {
        let items: Vec<IssueItem> = issues
            .iter()
            .map(|issue| IssueItem::new(issue.clone(), insights))
            .collect();
        let delegate = IssueDelegate::new(tier, &self.theme, now);
        // usize::MAX never matches a row index
        list_lines(&delegate, &items, usize::MAX, width, 0..items.len())
            .iter()
            .map(|line| self.line_to_ansi(line))
            .collect()
    }

    /// The graph view for `select` (or the first issue by rank)
    pub fn graph(
        &self,
        issues: Vec<Issue>,
        insights: Option<Insights>,
        select: Option<&str>,
        width: u16,
        height: u16,
    ) -> Vec<String> {
        let mut view = GraphView::new(issues, insights, self.theme.clone());
        if let Some(id) = select {
            if !view.select_id(id) {
                self.unknown_issue(id);
            }
        }
        self.text_to_ansi(&view.view(width, height))
    }

    pub fn display(&self, lines: &[String]) {
        for line in lines {
            println!("{}", line.trim_end());
        }
    }

    pub fn unknown_issue(&self, id: &str) {
        eprintln!(
            "\n {} Unknown issue id: {}",
            "✖".red(),
            id.dimmed()
        );
    }

    pub fn no_issues(&self) {
        println!("\n  {}", "No issues found".dimmed());
    }

    fn text_to_ansi(&self, text: &Text<'_>) -> Vec<String> {
        text.lines.iter().map(|line| self.line_to_ansi(line)).collect()
    }

    fn line_to_ansi(&self, line: &Line<'_>) -> String {
        if !self.color {
            return line_text(line);
        }
        line.spans
            .iter()
            .map(|span| styled(&span.content, line.style.patch(span.style)).to_string())
            .collect()
    }
}

fn styled(text: &str, style: Style) -> ColoredString {
    let mut out = text.normal();
    if let Some(fg) = style.fg.and_then(to_colored) {
        out = out.color(fg);
    }
    if let Some(bg) = style.bg.and_then(to_colored) {
        out = out.on_color(bg);
    }
    if style.add_modifier.contains(Modifier::BOLD) {
        out = out.bold();
    }
    if style.add_modifier.contains(Modifier::DIM) {
        out = out.dimmed();
    }
    if style.add_modifier.contains(Modifier::ITALIC) {
        out = out.italic();
    }
    if style.add_modifier.contains(Modifier::UNDERLINED) {
        out = out.underline();
    }
    out
}

fn to_colored(color: Color) -> Option<colored::Color> {
    use colored::Color as C;
    Some(match color {
        Color::Black => C::Black,
        Color::Red => C::Red,
        Color::Green => C::Green,
        Color::Yellow => C::Yellow,
        Color::Blue => C::Blue,
        Color::Magenta => C::Magenta,
        Color::Cyan => C::Cyan,
        Color::Gray => C::White,
        Color::DarkGray => C::BrightBlack,
        Color::LightRed => C::BrightRed,
        Color::LightGreen => C::BrightGreen,
        Color::LightYellow => C::BrightYellow,
        Color::LightBlue => C::BrightBlue,
        Color::LightMagenta => C::BrightMagenta,
        Color::LightCyan => C::BrightCyan,
        Color::White => C::BrightWhite,
        Color::Rgb(r, g, b) => C::TrueColor { r, g, b },
        Color::Reset | Color::Indexed(_) => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dependency, DependencyKind};

    fn issues() -> Vec<Issue> {
        let a = Issue::new("bd-a", "Design schema");
        let mut b = Issue::new("bd-b", "Write migration");
        b.dependencies
            .push(Dependency::new("bd-a", DependencyKind::Blocks));
        vec![a, b]
    }

    #[test]
    fn test_list_prints_one_row_per_issue() {
        let render = Render::new(Theme::default()).with_color(false);
        let rows = render.list(&issues(), None, Tier::Normal, 120, Utc::now());
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("  bd-a"));
        assert!(rows[1].contains("Write migration"));
    }

    #[test]
    fn test_graph_plain_text_shows_selected_neighborhood() {
        let render = Render::new(Theme::default()).with_color(false);
        let lines = render.graph(issues(), None, Some("bd-b"), 100, 30);
        assert_eq!(lines.len(), 28);
        let joined = lines.join("\n");
        assert!(joined.contains("Write migration"));
        assert!(joined.contains("BLOCKED BY"));
    }

    #[test]
    fn test_uncolored_rows_carry_no_escape_codes() {
        let render = Render::new(Theme::default()).with_color(false);
        let rows = render.list(&issues(), None, Tier::UltraWide, 200, Utc::now());
        assert!(rows.iter().all(|row| !row.contains('\x1b')));
        let lines = render.graph(issues(), None, None, 120, 20);
        assert!(lines.iter().all(|line| !line.contains('\x1b')));
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(
            to_colored(Color::Rgb(1, 2, 3)),
            Some(colored::Color::TrueColor { r: 1, g: 2, b: 3 })
        );
        assert_eq!(
            to_colored(Color::DarkGray),
            Some(colored::Color::BrightBlack)
        );
        assert_eq!(to_colored(Color::Reset), None);
    }
}
