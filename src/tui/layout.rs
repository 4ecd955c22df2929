//! Width-aware text helpers for composing fixed-size panes out of
//! ratatui lines. Widths are terminal cells, not bytes or chars.

use ratatui::{
    style::Style,
    text::{Line, Span, Text},
};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Longest prefix of `s` that fits in `max` cells. Never splits a char.
/// Control chars become spaces so the result measures the same as it draws.
pub fn clip(s: &str, max: usize) -> String {
    let mut out = String::new();
    for c in s.chars() {
        out.push(if c.is_control() { ' ' } else { c });
        // Measured as a whole: a variation selector can widen the char before it
        if display_width(&out) > max {
            out.pop();
            break;
        }
    }
    out
}

/// Clip to `max` cells, ending in `ellipsis` when anything was cut.
pub fn truncate_with_ellipsis(s: &str, max: usize, ellipsis: &str) -> String {
    if display_width(s) <= max {
        return clip(s, max);
    }
    let budget = max.saturating_sub(display_width(ellipsis));
    if budget == 0 {
        return clip(ellipsis, max);
    }
    let mut out = clip(s, budget);
    out.push_str(ellipsis);
    out
}

/// Clip and pad to exactly `width` cells.
pub fn fit(s: &str, width: usize, align: Align) -> String {
    let clipped = clip(s, width);
    let slack = width.saturating_sub(display_width(&clipped));
    let (left, right) = match align {
        Align::Left => (0, slack),
        Align::Right => (slack, 0),
        Align::Center => (slack / 2, slack - slack / 2),
    };
    format!("{}{}{}", " ".repeat(left), clipped, " ".repeat(right))
}

/// Clip or pad a line to exactly `width` cells. The line style is folded
/// into every span (padding included) so the result can be concatenated
/// with other lines without losing it.
pub fn fit_line(line: Line<'static>, width: usize) -> Line<'static> {
    let base = line.style;
    let mut spans: Vec<Span<'static>> = Vec::with_capacity(line.spans.len() + 1);
    let mut used = 0;

    for span in line.spans {
        if used >= width {
            break;
        }
        let style = base.patch(span.style);
        let w = display_width(&span.content);
        if used + w <= width {
            used += w;
            spans.push(Span::styled(span.content, style));
        } else {
            let clipped = clip(&span.content, width.saturating_sub(used));
            used += display_width(&clipped);
            spans.push(Span::styled(clipped, style));
        }
    }

    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), base));
    }
    Line::from(spans)
}

/// Place columns side by side. Each column is a list of lines and a cell
/// width; shorter columns are padded with blank rows.
pub fn join_horizontal(columns: Vec<(Vec<Line<'static>>, usize)>) -> Vec<Line<'static>> {
    let rows = columns
        .iter()
        .map(|(lines, _)| lines.len())
        .max()
        .unwrap_or(0);
    let mut iters: Vec<_> = columns
        .into_iter()
        .map(|(lines, width)| (lines.into_iter(), width))
        .collect();

    (0..rows)
        .map(|_| {
            let mut spans = Vec::new();
            for (lines, width) in iters.iter_mut() {
                let line = lines.next().unwrap_or_default();
                spans.extend(fit_line(line, *width).spans);
            }
            Line::from(spans)
        })
        .collect()
}

/// A `width` x `height` block with `msg` centered both ways.
pub fn centered_block(msg: &str, width: usize, height: usize, style: Style) -> Text<'static> {
    let height = height.max(1);
    let middle = (height - 1) / 2;
    let lines: Vec<Line<'static>> = (0..height)
        .map(|row| {
            let content = if row == middle {
                fit(msg, width, Align::Center)
            } else {
                " ".repeat(width)
            };
            Line::from(Span::styled(content, style))
        })
        .collect();
    Text::from(lines)
}

/// Plain text of a line, styles dropped
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Modifier};

    #[test]
    fn test_clip_respects_wide_chars() {
        assert_eq!(clip("abc", 2), "ab");
        assert_eq!(clip("日本語", 5), "日本");
        assert_eq!(clip("", 3), "");
    }

    #[test]
    fn test_clip_measures_variation_selector_with_its_base() {
        let clipped = clip("aaaaaaaaa\u{2B06}\u{FE0F}tail", 10);
        assert!(display_width(&clipped) <= 10);
        assert!(clipped.starts_with("aaaaaaaaa"));
        let fitted = fit("aaaaaaaaa\u{2B06}\u{FE0F}tail", 10, Align::Left);
        assert_eq!(display_width(&fitted), 10);
    }

    #[test]
    fn test_clip_replaces_control_chars() {
        assert_eq!(clip("ab\tcd\nef", 5), "ab cd");
        assert_eq!(fit("ab\tcd\nef", 5, Align::Left), "ab cd");
        assert_eq!(fit("a\tb", 5, Align::Right), "  a b");
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 10, "…"), "short");
        assert_eq!(truncate_with_ellipsis("Implement parser", 8, "…"), "Impleme…");
        assert_eq!(truncate_with_ellipsis("abc", 1, "…"), "…");
        assert_eq!(truncate_with_ellipsis("abc", 0, "…"), "");
    }

    #[test]
    fn test_fit_pads_by_alignment() {
        assert_eq!(fit("ab", 5, Align::Left), "ab   ");
        assert_eq!(fit("ab", 5, Align::Right), "   ab");
        assert_eq!(fit("ab", 5, Align::Center), " ab  ");
        assert_eq!(fit("abcdef", 3, Align::Right), "abc");
    }

    #[test]
    fn test_fit_line_clips_and_pads() {
        let line = Line::from(vec![Span::raw("abc"), Span::raw("def")]);
        assert_eq!(line_text(&fit_line(line.clone(), 4)), "abcd");
        assert_eq!(line_text(&fit_line(line, 8)), "abcdef  ");
    }

    #[test]
    fn test_fit_line_folds_line_style_into_padding() {
        let style = Style::default().bg(Color::Blue);
        let line = Line::from("ab").style(style);
        let fitted = fit_line(line, 4);
        assert_eq!(fitted.style, Style::default());
        assert!(fitted.spans.iter().all(|s| s.style.bg == Some(Color::Blue)));
    }

    #[test]
    fn test_fit_line_keeps_span_modifiers() {
        let line = Line::from(Span::styled("x", Style::default().add_modifier(Modifier::BOLD)))
            .style(Style::default().fg(Color::Red));
        let fitted = fit_line(line, 1);
        assert_eq!(fitted.spans[0].style.fg, Some(Color::Red));
        assert!(fitted.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_join_horizontal_pads_short_columns() {
        let left = vec![Line::from("a"), Line::from("b"), Line::from("c")];
        let right = vec![Line::from("xyz")];
        let joined = join_horizontal(vec![(left, 2), (right, 3)]);
        let text: Vec<String> = joined.iter().map(line_text).collect();
        assert_eq!(text, vec!["a xyz", "b    ", "c    "]);
    }

    #[test]
    fn test_centered_block() {
        let text = centered_block("hi", 6, 3, Style::default());
        let rows: Vec<String> = text.lines.iter().map(line_text).collect();
        assert_eq!(rows, vec!["      ", "  hi  ", "      "]);
    }
}
