use std::ops::Range;

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use super::issue_row::{ListEntry, RowContext, RowDelegate};

/// First visible entry of a list; moved only as far as needed to keep the
/// selection on screen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    pub offset: usize,
}

impl ListWindow {
    /// Adjust the offset for `selected` and return the visible range.
    pub fn follow(&mut self, selected: usize, visible: usize, len: usize) -> Range<usize> {
        let visible = visible.max(1);
        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + visible {
            self.offset = selected + 1 - visible;
        }
        self.offset = self.offset.min(len.saturating_sub(visible));
        self.offset..(self.offset + visible).min(len)
    }
}

/// Lines for the entries in `range`, one delegate call per entry
pub fn list_lines<E: ListEntry>(
    delegate: &dyn RowDelegate,
    entries: &[E],
    selected: usize,
    width: u16,
    range: Range<usize>,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for index in range {
        let Some(entry) = entries.get(index) else {
            break;
        };
        let ctx = RowContext {
            selected,
            index,
            width,
        };
        delegate.render(&mut lines, &ctx, entry);
        for _ in 0..delegate.spacing() {
            lines.push(Line::default());
        }
    }
    lines
}

/// Render the visible slice of `entries` with a scrollbar when the list
/// overflows the area.
pub fn render_issue_list<E: ListEntry>(
    frame: &mut Frame,
    area: Rect,
    delegate: &dyn RowDelegate,
    entries: &[E],
    selected: usize,
    window: &mut ListWindow,
) {
    let row_height = (delegate.height() + delegate.spacing()).max(1);
    let visible = area.height as usize / row_height;
    let range = window.follow(selected, visible, entries.len());
    let lines = list_lines(delegate, entries, selected, area.width, range);
    frame.render_widget(Paragraph::new(lines), area);

    if entries.len() > visible {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None);
        let mut scrollbar_state = ScrollbarState::new(entries.len()).position(selected);
        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}
