//! Single-line issue rows for the main list.
//!
//! Column visibility depends on the width [`Tier`]; every tier shows a
//! strict superset of the columns of the tier below it.

use chrono::{DateTime, Utc};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use serde::{Deserialize, Serialize};

use crate::insights::Insights;
use crate::models::Issue;
use crate::tui::format::{format_time_rel, smart_truncate_id, sparkline};
use crate::tui::layout::{display_width, fit, Align};
use crate::tui::theme::Theme;

const ID_WIDTH: usize = 8;
const TYPE_WIDTH: usize = 2;
const PRIORITY_WIDTH: usize = 3;
const STATUS_WIDTH: usize = 12;
const ASSIGNEE_WIDTH: usize = 12;
const AGE_WIDTH: usize = 8;
const COMMENTS_WIDTH: usize = 4;
const UPDATED_WIDTH: usize = 10;
const IMPACT_WIDTH: usize = 8;
const SPARK_CELLS: usize = 4;
const MIN_TITLE_WIDTH: usize = 10;
const IMPACT_CAP: f64 = 999.5;

/// Width band controlling which optional columns are shown
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Compact,
    Normal,
    Wide,
    UltraWide,
}

impl Tier {
    pub fn for_width(width: u16) -> Self {
        match width {
            0..=99 => Tier::Compact,
            100..=139 => Tier::Normal,
            140..=179 => Tier::Wide,
            _ => Tier::UltraWide,
        }
    }

    /// Cells spent on separators between the visible columns
    fn gaps(self) -> usize {
        let mut gaps = 4;
        if self >= Tier::Normal {
            gaps += 1;
        }
        if self >= Tier::Wide {
            gaps += 2;
        }
        if self >= Tier::UltraWide {
            gaps += 1;
        }
        gaps
    }
}

/// An issue as shown in the list, with its impact score attached
#[derive(Debug, Clone)]
pub struct IssueItem {
    pub issue: Issue,
    pub impact: f64,
}

impl IssueItem {
    pub fn new(issue: Issue, insights: Option<&Insights>) -> Self {
        let impact = insights.map(|i| i.impact(&issue.id)).unwrap_or(0.0);
        Self { issue, impact }
    }
}

/// Anything a list can hold. Delegates render only the entries they
/// understand and skip the rest.
pub trait ListEntry {
    fn as_issue_item(&self) -> Option<&IssueItem> {
        None
    }
}

impl ListEntry for IssueItem {
    fn as_issue_item(&self) -> Option<&IssueItem> {
        Some(self)
    }
}

/// Position of the row being drawn within its list
#[derive(Debug, Clone, Copy)]
pub struct RowContext {
    pub selected: usize,
    pub index: usize,
    pub width: u16,
}

impl RowContext {
    pub fn is_selected(&self) -> bool {
        self.index == self.selected
    }
}

/// Per-row renderer plugged into a list
pub trait RowDelegate {
    fn height(&self) -> usize {
        1
    }

    fn spacing(&self) -> usize {
        0
    }

    fn render(&self, out: &mut Vec<Line<'static>>, ctx: &RowContext, entry: &dyn ListEntry);
}

/// Renders [`IssueItem`]s as one responsive line each
pub struct IssueDelegate<'a> {
    pub tier: Tier,
    pub theme: &'a Theme,
    /// Reference time for relative ages
    pub now: DateTime<Utc>,
}

impl<'a> IssueDelegate<'a> {
    pub fn new(tier: Tier, theme: &'a Theme, now: DateTime<Utc>) -> Self {
        Self { tier, theme, now }
    }

    fn title_width(&self, total_width: u16, extra_width: usize) -> usize {
        let fixed = ID_WIDTH
            + TYPE_WIDTH
            + PRIORITY_WIDTH
            + STATUS_WIDTH
            + extra_width
            + self.tier.gaps();
        (total_width as usize)
            .saturating_sub(fixed + 4)
            .max(MIN_TITLE_WIDTH)
    }

    fn impact_cell(&self, impact: f64) -> Vec<Span<'static>> {
        let t = self.theme;
        let normalized = (impact / 10.0).clamp(0.0, 1.0);
        let spark = Span::styled(
            sparkline(normalized, SPARK_CELLS),
            Style::default().fg(t.heatmap_color(normalized)),
        );
        // Four cells hold " 999"; anything larger is capped
        let number = if impact >= IMPACT_CAP {
            " 1k+".to_string()
        } else if impact > 0.0 {
            format!(" {:.0}", impact)
        } else {
            String::new()
        };
        let pad = (IMPACT_WIDTH - SPARK_CELLS).saturating_sub(display_width(&number));
        vec![
            Span::raw(" ".repeat(pad)),
            spark,
            Span::styled(number, t.muted),
        ]
    }
}

impl RowDelegate for IssueDelegate<'_> {
    fn render(&self, out: &mut Vec<Line<'static>>, ctx: &RowContext, entry: &dyn ListEntry) {
        let Some(item) = entry.as_issue_item() else {
            return;
        };
        let t = self.theme;
        let issue = &item.issue;
        let is_selected = ctx.is_selected();

        let short_id = smart_truncate_id(&issue.id, ID_WIDTH);
        let id = vec![Span::styled(
            fit(&short_id, ID_WIDTH, Align::Left),
            t.muted.add_modifier(Modifier::BOLD),
        )];

        let (icon, icon_color) = t.type_icon(&issue.issue_type);
        let type_icon = vec![Span::styled(
            fit(icon, TYPE_WIDTH, Align::Center),
            Style::default().fg(icon_color),
        )];

        let priority = vec![Span::raw(fit(
            t.priority_icon(issue.priority),
            PRIORITY_WIDTH,
            Align::Center,
        ))];

        let status_label = issue.status.as_str().to_uppercase();
        let status = vec![Span::styled(
            fit(&status_label, STATUS_WIDTH, Align::Center),
            Style::default()
                .fg(t.status_color(&issue.status))
                .add_modifier(Modifier::BOLD),
        )];

        let mut extra_width = 0;

        let assignee = (self.tier >= Tier::Normal).then(|| {
            extra_width += ASSIGNEE_WIDTH;
            let name = issue.assignee().map(|a| format!("@{}", a)).unwrap_or_default();
            vec![Span::styled(fit(&name, ASSIGNEE_WIDTH, Align::Right), t.muted)]
        });

        let age_and_comments = (self.tier >= Tier::Wide).then(|| {
            extra_width += AGE_WIDTH + COMMENTS_WIDTH;
            let age = format_time_rel(issue.created_at, self.now);
            let count = issue.comments.len();
            let badge = if count > 0 {
                format!("{}{}", t.icons.comments(), count)
            } else {
                String::new()
            };
            (
                vec![Span::styled(fit(&badge, COMMENTS_WIDTH, Align::Right), t.muted)],
                vec![Span::styled(fit(&age, AGE_WIDTH, Align::Right), t.muted)],
            )
        });

        let updated = (self.tier >= Tier::UltraWide).then(|| {
            extra_width += UPDATED_WIDTH + IMPACT_WIDTH;
            let rel = format_time_rel(issue.updated_at, self.now);
            let mut spans = vec![Span::styled(fit(&rel, UPDATED_WIDTH, Align::Right), t.muted)];
            spans.extend(self.impact_cell(item.impact));
            spans
        });

        let title_width = self.title_width(ctx.width, extra_width);
        let title_style = if is_selected {
            t.primary
        } else {
            t.text
        };
        let title = vec![Span::styled(
            fit(&issue.title, title_width, Align::Left),
            title_style,
        )];

        let mut columns = vec![id, type_icon, priority, status, title];
        if let Some((comments, age)) = age_and_comments {
            columns.push(comments);
            columns.push(age);
        }
        if let Some(assignee) = assignee {
            columns.push(assignee);
        }
        if let Some(updated) = updated {
            columns.push(updated);
        }

        let (lead, base) = if is_selected {
            (Span::styled("▌ ", t.primary), t.selected)
        } else {
            (Span::raw("  "), t.text)
        };

        let mut spans = vec![lead];
        for (i, column) in columns.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.extend(column);
        }
        spans.push(Span::raw(" "));

        out.push(Line::from(spans).style(base));
    }
}
