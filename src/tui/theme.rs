use ratatui::style::{Color, Modifier, Style};

use crate::config::{Rgb, ThemeColors};
use crate::models::{IssueType, Status};

fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Glyph set used for status, priority and type markers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IconSet {
    #[default]
    Emoji,
    Ascii,
}

impl IconSet {
    pub fn status(self, status: &Status) -> &'static str {
        match self {
            IconSet::Emoji => match status {
                Status::Open => "🔵",
                Status::InProgress => "🟡",
                Status::Blocked => "🔴",
                Status::Closed => "✅",
                Status::Other(_) => "⚪",
            },
            IconSet::Ascii => match status {
                Status::Open => "o ",
                Status::InProgress => "~ ",
                Status::Blocked => "x ",
                Status::Closed => "v ",
                Status::Other(_) => ". ",
            },
        }
    }

    pub fn priority(self, priority: i32) -> &'static str {
        match self {
            IconSet::Emoji => match priority {
                0 => "🚨",
                1 => "🔥",
                2 => "⚡",
                3 => "📌",
                4 => "📋",
                _ => "  ",
            },
            IconSet::Ascii => match priority {
                0 => "P0",
                1 => "P1",
                2 => "P2",
                3 => "P3",
                4 => "P4",
                _ => "  ",
            },
        }
    }

    pub fn issue_type(self, issue_type: &IssueType) -> &'static str {
        match self {
            IconSet::Emoji => match issue_type {
                IssueType::Bug => "🐛",
                IssueType::Feature => "✨",
                IssueType::Task => "📝",
                IssueType::Epic => "🎯",
                IssueType::Chore => "🔧",
                IssueType::Other(_) => "📄",
            },
            IconSet::Ascii => match issue_type {
                IssueType::Bug => "B",
                IssueType::Feature => "F",
                IssueType::Task => "T",
                IssueType::Epic => "E",
                IssueType::Chore => "C",
                IssueType::Other(_) => "?",
            },
        }
    }

    pub fn comments(self) -> &'static str {
        match self {
            IconSet::Emoji => "💬",
            IconSet::Ascii => "#",
        }
    }

    pub fn nodes(self) -> &'static str {
        match self {
            IconSet::Emoji => "📊",
            IconSet::Ascii => "#",
        }
    }

    pub fn metrics(self) -> &'static str {
        match self {
            IconSet::Emoji => "📈",
            IconSet::Ascii => "#",
        }
    }

    pub fn blocked_by(self) -> &'static str {
        match self {
            IconSet::Emoji => "⬆",
            IconSet::Ascii => "^",
        }
    }

    pub fn blocks(self) -> &'static str {
        match self {
            IconSet::Emoji => "⬇",
            IconSet::Ascii => "v",
        }
    }
}

/// Rendering capability passed to every renderer: styles, per-status and
/// per-type colors, glyphs, and the impact heatmap.
#[derive(Debug, Clone)]
pub struct Theme {
    pub text: Style,
    pub muted: Style,
    pub primary: Style,
    pub section: Style,
    pub selected: Style,
    pub border: Style,
    pub title: Style,
    pub success: Style,
    pub error: Style,
    pub info: Style,
    pub warning: Style,
    pub highlight: Color,
    pub icons: IconSet,
    colors: ThemeColors,
}

impl From<&ThemeColors> for Theme {
    fn from(colors: &ThemeColors) -> Self {
        Self {
            text: Style::default().fg(rgb(colors.text)),
            muted: Style::default().fg(rgb(colors.muted)),
            primary: Style::default()
                .fg(rgb(colors.primary))
                .add_modifier(Modifier::BOLD),
            section: Style::default()
                .fg(rgb(colors.accent))
                .add_modifier(Modifier::BOLD),
            selected: Style::default()
                .fg(rgb(colors.text))
                .bg(rgb(colors.highlight))
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(rgb(colors.muted)),
            title: Style::default()
                .fg(rgb(colors.primary))
                .add_modifier(Modifier::BOLD),
            success: Style::default().fg(rgb(colors.closed)),
            error: Style::default().fg(rgb(colors.blocked)),
            info: Style::default().fg(rgb(colors.open)),
            warning: Style::default().fg(rgb(colors.in_progress)),
            highlight: rgb(colors.highlight),
            icons: IconSet::default(),
            colors: colors.clone(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::from(&ThemeColors::default())
    }
}

impl Theme {
    pub fn with_icons(mut self, icons: IconSet) -> Self {
        self.icons = icons;
        self
    }

    pub fn status_color(&self, status: &Status) -> Color {
        rgb(match status {
            Status::Open => self.colors.open,
            Status::InProgress => self.colors.in_progress,
            Status::Blocked => self.colors.blocked,
            Status::Closed => self.colors.closed,
            Status::Other(_) => self.colors.muted,
        })
    }

    pub fn status_icon(&self, status: &Status) -> &'static str {
        self.icons.status(status)
    }

    pub fn priority_icon(&self, priority: i32) -> &'static str {
        self.icons.priority(priority)
    }

    /// Glyph and color for an issue type
    pub fn type_icon(&self, issue_type: &IssueType) -> (&'static str, Color) {
        let color = match issue_type {
            IssueType::Bug => self.colors.blocked,
            IssueType::Feature => self.colors.accent,
            IssueType::Task => self.colors.open,
            IssueType::Epic => self.colors.in_progress,
            IssueType::Chore | IssueType::Other(_) => self.colors.muted,
        };
        (self.icons.issue_type(issue_type), rgb(color))
    }

    /// Color on the low -> mid -> high impact gradient for `value` in [0, 1]
    pub fn heatmap_color(&self, value: f64) -> Color {
        let value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        let c = if value < 0.5 {
            self.colors.heat_low.lerp(self.colors.heat_mid, value * 2.0)
        } else {
            self.colors.heat_mid.lerp(self.colors.heat_high, (value - 0.5) * 2.0)
        };
        rgb(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unicode_width::UnicodeWidthStr;

    #[test]
    fn test_status_colors_follow_palette() {
        let colors = ThemeColors::default();
        let theme = Theme::from(&colors);
        assert_eq!(theme.status_color(&Status::Blocked), rgb(colors.blocked));
        assert_eq!(
            theme.status_color(&Status::Other("tombstone".to_string())),
            rgb(colors.muted)
        );
    }

    #[test]
    fn test_heatmap_endpoints() {
        let colors = ThemeColors::default();
        let theme = Theme::from(&colors);
        assert_eq!(theme.heatmap_color(0.0), rgb(colors.heat_low));
        assert_eq!(theme.heatmap_color(0.5), rgb(colors.heat_mid));
        assert_eq!(theme.heatmap_color(1.0), rgb(colors.heat_high));
        assert_eq!(theme.heatmap_color(3.0), rgb(colors.heat_high));
    }

    #[test]
    fn test_icon_sets_keep_column_widths() {
        let statuses = [
            Status::Open,
            Status::InProgress,
            Status::Blocked,
            Status::Closed,
            Status::Other("x".to_string()),
        ];
        for icons in [IconSet::Emoji, IconSet::Ascii] {
            for status in &statuses {
                assert_eq!(icons.status(status).width(), 2);
            }
            for priority in -1..=5 {
                assert_eq!(icons.priority(priority).width(), 2);
            }
            assert!(icons.issue_type(&IssueType::Bug).width() <= 2);
        }
    }

    #[test]
    fn test_ascii_theme_swaps_glyphs() {
        let theme = Theme::default().with_icons(IconSet::Ascii);
        assert_eq!(theme.priority_icon(1), "P1");
        assert_eq!(theme.type_icon(&IssueType::Epic).0, "E");
    }
}
