//! Ego-centric dependency view: a scrollable node list beside the direct
//! blockers and dependents of the selected issue.

use std::collections::HashMap;

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};
use tracing::debug;

use crate::graph::DependencyGraph;
use crate::insights::Insights;
use crate::models::Issue;
use crate::tui::format::smart_truncate_id;
use crate::tui::layout::{centered_block, fit, join_horizontal, truncate_with_ellipsis, Align};
use crate::tui::theme::Theme;

const PAGE_SIZE: usize = 10;
const RELATED_LIMIT: usize = 8;
const RELATED_ID_WIDTH: usize = 20;
const RELATED_PREFIX: &str = "   ";
const NARROW_WIDTH: usize = 80;
const WIDE_WIDTH: usize = 100;
const SEPARATOR: &str = " │ ";
const SEPARATOR_WIDTH: usize = 3;
const EMPTY_MESSAGE: &str = "No issues to display";
const NAV_HINT: &str = "j/k: navigate • enter: view details • g: back to list";

pub struct GraphView {
    issues: Vec<Issue>,
    /// Issue ID -> position in `issues`
    issue_index: HashMap<String, usize>,
    insights: Option<Insights>,
    graph: DependencyGraph,
    selected_idx: usize,
    scroll_offset: usize,
    theme: Theme,
}

impl GraphView {
    pub fn new(issues: Vec<Issue>, insights: Option<Insights>, theme: Theme) -> Self {
        let mut view = Self {
            issues,
            issue_index: HashMap::new(),
            insights,
            graph: DependencyGraph::default(),
            selected_idx: 0,
            scroll_offset: 0,
            theme,
        };
        view.rebuild_graph(None);
        view
    }

    /// Replace the issue collection. The selected issue stays selected
    /// when it survives; otherwise the selection is clamped into range.
    pub fn set_issues(&mut self, issues: Vec<Issue>, insights: Option<Insights>) {
        let previous = self.selected_id().map(str::to_owned);
        self.issues = issues;
        self.insights = insights;
        self.rebuild_graph(previous.as_deref());
    }

    fn rebuild_graph(&mut self, keep: Option<&str>) {
        self.issue_index = self
            .issues
            .iter()
            .enumerate()
            .map(|(pos, issue)| (issue.id.clone(), pos))
            .collect();
        self.graph = DependencyGraph::build(&self.issues, self.insights.as_ref());

        let last = self.graph.len().saturating_sub(1);
        self.selected_idx = keep
            .and_then(|id| self.graph.position(id))
            .unwrap_or_else(|| self.selected_idx.min(last));
        self.scroll_offset = self.scroll_offset.min(self.selected_idx);

        debug!(
            nodes = self.graph.len(),
            selected = self.selected_idx,
            "rebuilt dependency graph"
        );
    }

    fn lookup(&self, id: &str) -> Option<&Issue> {
        self.issue_index.get(id).map(|&pos| &self.issues[pos])
    }

    // Navigation

    pub fn move_up(&mut self) {
        self.selected_idx = self.selected_idx.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_idx + 1 < self.graph.len() {
            self.selected_idx += 1;
        }
    }

    /// Same as [`GraphView::move_up`]; the view is a linear list
    pub fn move_left(&mut self) {
        self.move_up();
    }

    /// Same as [`GraphView::move_down`]; the view is a linear list
    pub fn move_right(&mut self) {
        self.move_down();
    }

    pub fn page_up(&mut self) {
        self.selected_idx = self.selected_idx.saturating_sub(PAGE_SIZE);
    }

    pub fn page_down(&mut self) {
        let last = self.graph.len().saturating_sub(1);
        self.selected_idx = (self.selected_idx + PAGE_SIZE).min(last);
    }

    /// Select an issue by ID; false when it is not in the view
    pub fn select_id(&mut self, id: &str) -> bool {
        match self.graph.position(id) {
            Some(pos) => {
                self.selected_idx = pos;
                true
            }
            None => false,
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected_idx
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.graph.sorted_ids().get(self.selected_idx).map(String::as_str)
    }

    pub fn selected_issue(&self) -> Option<&Issue> {
        self.selected_id().and_then(|id| self.lookup(id))
    }

    pub fn total_count(&self) -> usize {
        self.graph.len()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Render the whole view into a `width` x `height` block of text.
    pub fn view(&mut self, width: u16, height: u16) -> Text<'static> {
        let (width, height) = (width as usize, height as usize);

        if self.graph.is_empty() {
            return centered_block(EMPTY_MESSAGE, width, height, self.theme.muted);
        }

        let pane_height = height.saturating_sub(2);
        if width >= NARROW_WIDTH {
            self.keep_selection_visible(visible_items(pane_height));
        }

        let Some(issue) = self.selected_issue() else {
            return Text::from(Line::styled(
                "Error: selected issue not found",
                self.theme.error,
            ));
        };

        if width < NARROW_WIDTH {
            let mut lines = self.render_neighborhood(issue, width);
            lines.truncate(height);
            return Text::from(lines);
        }

        let list_width = if width < WIDE_WIDTH { 24 } else { 32 };
        let detail_width = width.saturating_sub(list_width + SEPARATOR_WIDTH);

        let mut list = self.render_node_list(list_width, pane_height);
        list.truncate(pane_height);
        let separator = vec![Line::styled(SEPARATOR, self.theme.border); pane_height];
        let mut detail = self.render_neighborhood(issue, detail_width);
        detail.truncate(pane_height);

        Text::from(join_horizontal(vec![
            (list, list_width),
            (separator, SEPARATOR_WIDTH),
            (detail, detail_width),
        ]))
    }

    fn keep_selection_visible(&mut self, visible: usize) {
        if self.selected_idx < self.scroll_offset {
            self.scroll_offset = self.selected_idx;
        } else if self.selected_idx >= self.scroll_offset + visible {
            self.scroll_offset = self.selected_idx + 1 - visible;
        }
        let max_offset = self.graph.len().saturating_sub(visible);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    fn render_node_list(&self, width: usize, height: usize) -> Vec<Line<'static>> {
        let t = &self.theme;
        let ids = self.graph.sorted_ids();
        let mut lines = vec![
            Line::styled(format!("{} Nodes ({})", t.icons.nodes(), ids.len()), t.primary),
            Line::styled("─".repeat(width), t.border),
        ];

        let visible = visible_items(height);
        let start = self.scroll_offset;
        let end = (start + visible).min(ids.len());

        for (idx, id) in ids.iter().enumerate().take(end).skip(start) {
            let Some(issue) = self.lookup(id) else {
                continue;
            };
            let label = format!(
                "{} {}",
                t.status_icon(&issue.status),
                smart_truncate_id(id, width.saturating_sub(4))
            );
            let style = if idx == self.selected_idx {
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(t.primary.fg.unwrap_or_default())
                    .bg(t.highlight)
            } else {
                Style::default().fg(t.status_color(&issue.status))
            };
            lines.push(Line::styled(label, style));
        }

        if ids.len() > visible {
            let info = format!("({}-{} of {})", start + 1, end, ids.len());
            lines.push(Line::styled(
                fit(&info, width, Align::Center),
                t.muted.add_modifier(Modifier::ITALIC),
            ));
        }

        lines
    }

    fn render_neighborhood(&self, issue: &Issue, width: usize) -> Vec<Line<'static>> {
        let t = &self.theme;
        let id = issue.id.as_str();
        let mut lines = Vec::new();

        let (type_icon, _) = t.type_icon(&issue.issue_type);
        lines.push(Line::styled(
            format!(
                "{} {} {} {}",
                t.status_icon(&issue.status),
                t.priority_icon(issue.priority),
                type_icon,
                id
            ),
            t.primary,
        ));

        if !issue.title.is_empty() {
            let title = truncate_with_ellipsis(&issue.title, width.saturating_sub(4), "…");
            lines.push(Line::styled(format!("{}{}", RELATED_PREFIX, title), t.text));
        }
        lines.push(Line::default());

        let blockers = self.graph.blockers(id);
        let dependents = self.graph.dependents(id);
        lines.push(Line::styled(
            format!(
                "{} Blocked by: {}    {} Blocks: {}",
                t.icons.blocked_by(),
                blockers.len(),
                t.icons.blocks(),
                dependents.len()
            ),
            t.muted,
        ));
        lines.push(Line::default());

        let sections = [
            (
                format!("{} BLOCKED BY (must complete first)", t.icons.blocked_by()),
                blockers,
            ),
            (
                format!("{} BLOCKS (waiting on this)", t.icons.blocks()),
                dependents,
            ),
        ];
        for (header, related) in sections {
            if related.is_empty() {
                continue;
            }
            lines.push(Line::styled(header, t.section));
            for related_id in related.iter().take(RELATED_LIMIT) {
                lines.push(self.render_related(related_id, width));
            }
            if related.len() > RELATED_LIMIT {
                lines.push(Line::styled(
                    format!("{}... and {} more", RELATED_PREFIX, related.len() - RELATED_LIMIT),
                    t.muted.add_modifier(Modifier::ITALIC),
                ));
            }
            lines.push(Line::default());
        }

        if let Some(insights) = &self.insights {
            lines.push(Line::styled(
                format!("{} IMPACT METRICS", t.icons.metrics()),
                t.section,
            ));
            let metrics = [
                insights
                    .page_rank(id)
                    .filter(|s| *s > 0.0)
                    .map(|s| format!("PageRank: {:.4}", s)),
                insights
                    .critical_path(id)
                    .filter(|s| *s > 0.0)
                    .map(|s| format!("Critical Path: {:.2}", s)),
                insights
                    .betweenness(id)
                    .filter(|s| *s > 0.0)
                    .map(|s| format!("Betweenness: {:.4}", s)),
            ];
            for metric in metrics.into_iter().flatten() {
                lines.push(Line::styled(format!("{}{}", RELATED_PREFIX, metric), t.muted));
            }
        }

        lines.push(Line::default());
        lines.push(Line::styled(NAV_HINT, t.muted.add_modifier(Modifier::ITALIC)));
        lines
    }

    fn render_related(&self, id: &str, width: usize) -> Line<'static> {
        let t = &self.theme;
        let Some(issue) = self.lookup(id) else {
            return Line::styled(
                format!("{}{} (not in current filter)", RELATED_PREFIX, id),
                t.muted.add_modifier(Modifier::ITALIC),
            );
        };

        let display_id = smart_truncate_id(id, RELATED_ID_WIDTH);
        let overhead = RELATED_PREFIX.len() + 3 + display_id.chars().count() + 3;
        let remaining = width.saturating_sub(overhead);
        let snippet = if remaining > 10 && !issue.title.is_empty() {
            format!(" {}", truncate_with_ellipsis(&issue.title, remaining, "…"))
        } else {
            String::new()
        };

        Line::from(vec![Span::styled(
            format!(
                "{}{} {}{}",
                RELATED_PREFIX,
                t.status_icon(&issue.status),
                display_id,
                snippet
            ),
            Style::default().fg(t.status_color(&issue.status)),
        )])
    }
}

/// Rows available for nodes once header, rule and footer are placed
fn visible_items(pane_height: usize) -> usize {
    pane_height.saturating_sub(4).max(1)
}
