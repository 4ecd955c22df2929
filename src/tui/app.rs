use std::time::{Duration, Instant};

use arboard::Clipboard;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{BeadviewError, Result};
use crate::insights::Insights;
use crate::models::{Issue, Status};

use super::theme::{IconSet, Theme};
use super::widgets::graph_view::GraphView;
use super::widgets::issue_list::ListWindow;
use super::widgets::issue_row::{IssueItem, Tier};

const PAGE_SIZE: usize = 10;

/// Main application state
pub struct App {
    /// Every issue that was loaded, unfiltered
    pub issues: Vec<Issue>,
    pub insights: Option<Insights>,
    /// Issues passing the current filter, in list order
    pub items: Vec<IssueItem>,
    pub view: ViewMode,
    /// Selected index into `items`
    pub selected_index: usize,
    pub list_window: ListWindow,
    pub graph: GraphView,
    pub filter: StatusFilter,
    /// Status message (success/error feedback)
    pub status_message: Option<StatusMessage>,
    pub show_help: bool,
    /// Application running flag
    pub running: bool,
    pub theme: Theme,
    /// Fixed tier from config; `None` derives it from the content width
    pub tier_override: Option<Tier>,
    pub config: Config,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Graph,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    Closed,
}

impl StatusFilter {
    pub fn matches(self, issue: &Issue) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Open => !issue.status.is_closed(),
            StatusFilter::Closed => issue.status.is_closed(),
        }
    }

    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Open,
            StatusFilter::Open => StatusFilter::Closed,
            StatusFilter::Closed => StatusFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Open => "open",
            StatusFilter::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

/// Per-status totals for the visible issues
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub open: usize,
    pub in_progress: usize,
    pub blocked: usize,
    pub closed: usize,
}

impl App {
    pub fn new(issues: Vec<Issue>, insights: Option<Insights>, config: Config) -> Self {
        let icons = if config.ascii_icons {
            IconSet::Ascii
        } else {
            IconSet::Emoji
        };
        let theme = Theme::from(&config.theme.resolve()).with_icons(icons);
        let graph = GraphView::new(Vec::new(), insights.clone(), theme.clone());

        let mut app = Self {
            issues,
            insights,
            items: Vec::new(),
            view: config.default_view,
            selected_index: 0,
            list_window: ListWindow::default(),
            graph,
            filter: StatusFilter::All,
            status_message: None,
            show_help: false,
            running: true,
            theme,
            tier_override: config.tier,
            config,
        };
        app.refresh_filter();
        app
    }

    /// Rebuild the filtered list and the graph, keeping the selected issue
    /// when it survives the filter.
    pub fn refresh_filter(&mut self) {
        let previous = self.selected_id().map(str::to_string);

        let visible: Vec<Issue> = self
            .issues
            .iter()
            .filter(|issue| self.filter.matches(issue))
            .cloned()
            .collect();
        self.items = visible
            .iter()
            .map(|issue| IssueItem::new(issue.clone(), self.insights.as_ref()))
            .collect();
        self.graph.set_issues(visible, self.insights.clone());

        self.selected_index = previous
            .and_then(|id| self.position_of(&id))
            .unwrap_or_else(|| self.selected_index.min(self.items.len().saturating_sub(1)));
        debug!(
            filter = self.filter.label(),
            visible = self.items.len(),
            "filter applied"
        );
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.issue.id == id)
    }

    /// ID of the issue selected in the list
    pub fn selected_id(&self) -> Option<&str> {
        self.items
            .get(self.selected_index)
            .map(|item| item.issue.id.as_str())
    }

    /// ID of the issue selected in whichever view is active
    pub fn active_id(&self) -> Option<&str> {
        match self.view {
            ViewMode::List => self.selected_id(),
            ViewMode::Graph => self.graph.selected_id(),
        }
    }

    pub fn counts(&self) -> Counts {
        let mut counts = Counts::default();
        for item in &self.items {
            match item.issue.status {
                Status::InProgress => counts.in_progress += 1,
                Status::Blocked => counts.blocked += 1,
                Status::Closed => counts.closed += 1,
                Status::Open | Status::Other(_) => counts.open += 1,
            }
        }
        counts
    }

    pub fn select_next(&mut self) {
        match self.view {
            ViewMode::List => {
                if self.selected_index + 1 < self.items.len() {
                    self.selected_index += 1;
                }
            }
            ViewMode::Graph => self.graph.move_down(),
        }
    }

    pub fn select_previous(&mut self) {
        match self.view {
            ViewMode::List => self.selected_index = self.selected_index.saturating_sub(1),
            ViewMode::Graph => self.graph.move_up(),
        }
    }

    pub fn page_down(&mut self) {
        match self.view {
            ViewMode::List => {
                let last = self.items.len().saturating_sub(1);
                self.selected_index = (self.selected_index + PAGE_SIZE).min(last);
            }
            ViewMode::Graph => self.graph.page_down(),
        }
    }

    pub fn page_up(&mut self) {
        match self.view {
            ViewMode::List => self.selected_index = self.selected_index.saturating_sub(PAGE_SIZE),
            ViewMode::Graph => self.graph.page_up(),
        }
    }

    /// Switch between list and graph, carrying the selected issue across.
    pub fn toggle_view(&mut self) {
        match self.view {
            ViewMode::List => {
                if let Some(id) = self.selected_id().map(str::to_string) {
                    self.graph.select_id(&id);
                }
                self.view = ViewMode::Graph;
            }
            ViewMode::Graph => {
                self.show_graph_selection_in_list();
            }
        }
        debug!(view = ?self.view, "view toggled");
    }

    /// Leave the graph with the list cursor on the graph's selected issue.
    pub fn show_graph_selection_in_list(&mut self) {
        let index = self.graph.selected_id().and_then(|id| self.position_of(id));
        if let Some(index) = index {
            self.selected_index = index;
        }
        self.view = ViewMode::List;
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.refresh_filter();
        let text = format!(
            "Showing {} issues ({})",
            self.filter.label(),
            self.items.len()
        );
        self.set_status(text, StatusKind::Info);
    }

    /// Select `id` in both views; false when it is not visible
    pub fn select_id(&mut self, id: &str) -> bool {
        let Some(index) = self.position_of(id) else {
            return false;
        };
        self.selected_index = index;
        self.graph.select_id(id)
    }

    /// Copy the active issue ID to the system clipboard
    pub fn copy_selected_id(&mut self) -> Result<()> {
        let Some(id) = self.active_id().map(str::to_string) else {
            return Ok(());
        };
        let mut clipboard =
            Clipboard::new().map_err(|e| BeadviewError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(id.clone())
            .map_err(|e| BeadviewError::Clipboard(e.to_string()))?;
        info!(%id, "copied issue id");
        self.set_status(format!("Copied {}", id), StatusKind::Success);
        Ok(())
    }

    /// Tier used for list rows at the given content width
    pub fn tier_for(&self, width: u16) -> Tier {
        self.tier_override.unwrap_or_else(|| Tier::for_width(width))
    }

    /// Set a status message that expires after 3 seconds
    pub fn set_status(&mut self, text: String, kind: StatusKind) {
        self.status_message = Some(StatusMessage {
            text,
            kind,
            expires_at: Instant::now() + Duration::from_secs(3),
        });
    }

    /// Tick - called periodically for time-based updates
    pub fn tick(&mut self) {
        if let Some(ref msg) = self.status_message {
            if Instant::now() >= msg.expires_at {
                self.status_message = None;
            }
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(id: &str, status: Status) -> Issue {
        let mut issue = Issue::new(id, format!("Issue {}", id));
        issue.status = status;
        issue
    }

    fn app() -> App {
        App::new(
            vec![
                issue("bd-1", Status::Open),
                issue("bd-2", Status::Closed),
                issue("bd-3", Status::InProgress),
                issue("bd-4", Status::Blocked),
            ],
            None,
            Config::default(),
        )
    }

    #[test]
    fn test_new_selects_first_issue() {
        let app = app();
        assert_eq!(app.view, ViewMode::List);
        assert_eq!(app.items.len(), 4);
        assert_eq!(app.selected_id(), Some("bd-1"));
        assert_eq!(app.graph.total_count(), 4);
    }

    #[test]
    fn test_filter_cycle_keeps_selection_by_id() {
        let mut app = app();
        app.selected_index = 2;
        app.cycle_filter();
        assert_eq!(app.filter, StatusFilter::Open);
        assert_eq!(app.items.len(), 3);
        assert_eq!(app.selected_id(), Some("bd-3"));
        assert_eq!(app.graph.total_count(), 3);

        app.cycle_filter();
        assert_eq!(app.filter, StatusFilter::Closed);
        assert_eq!(app.selected_id(), Some("bd-2"));

        app.cycle_filter();
        assert_eq!(app.filter, StatusFilter::All);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_filter_to_empty_clamps_selection() {
        let mut app = App::new(vec![issue("bd-1", Status::Open)], None, Config::default());
        app.filter = StatusFilter::Closed;
        app.refresh_filter();
        assert!(app.items.is_empty());
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.selected_id(), None);
    }

    #[test]
    fn test_list_navigation_stops_at_edges() {
        let mut app = app();
        app.select_previous();
        assert_eq!(app.selected_index, 0);
        app.page_down();
        assert_eq!(app.selected_index, 3);
        app.select_next();
        assert_eq!(app.selected_index, 3);
        app.page_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_toggle_view_carries_selection_both_ways() {
        let mut app = app();
        app.selected_index = 1;
        app.toggle_view();
        assert_eq!(app.view, ViewMode::Graph);
        assert_eq!(app.graph.selected_id(), Some("bd-2"));

        app.select_next();
        let graph_id = app.graph.selected_id().map(str::to_string);
        app.toggle_view();
        assert_eq!(app.view, ViewMode::List);
        assert_eq!(app.selected_id().map(str::to_string), graph_id);
    }

    #[test]
    fn test_counts_by_status() {
        let counts = app().counts();
        assert_eq!(
            counts,
            Counts {
                open: 1,
                in_progress: 1,
                blocked: 1,
                closed: 1
            }
        );
    }

    #[test]
    fn test_select_id_unknown_is_rejected() {
        let mut app = app();
        assert!(!app.select_id("bd-99"));
        assert!(app.select_id("bd-4"));
        assert_eq!(app.selected_id(), Some("bd-4"));
        assert_eq!(app.graph.selected_id(), Some("bd-4"));
    }

    #[test]
    fn test_tier_override_wins() {
        let mut app = app();
        assert_eq!(app.tier_for(200), Tier::UltraWide);
        app.tier_override = Some(Tier::Compact);
        assert_eq!(app.tier_for(200), Tier::Compact);
    }

    #[test]
    fn test_tick_expires_status_message() {
        let mut app = app();
        app.status_message = Some(StatusMessage {
            text: "done".to_string(),
            kind: StatusKind::Info,
            expires_at: Instant::now(),
        });
        app.tick();
        assert!(app.status_message.is_none());
    }
}
