//! Diff panel renderer for hunkpick.
//!
//! Renders the centre diff panel using a List widget with manual virtual scrolling.
//! Only `lines[diff_scroll..diff_scroll + viewport_height]` are materialised per
//! frame, so rendering is O(viewport) rather than O(total lines). Hunk header
//! lines get a selection checkbox, and the header under the cursor is highlighted.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

pub fn render_diff(frame: &mut Frame, area: Rect, focus: PanelFocus, state: &AppState, theme: &Theme) {
    let is_focused = focus == PanelFocus::Diff;
    let title = format!("Diff [{}]", state.diff_mode.label());
    let block = panel_block(&title, is_focused, theme);
    let inner = inner_rect(area);

    frame.render_widget(block, area);

    if state.diff_lines.is_empty() {
        let msg = if state.diff_loading {
            "Computing diff..."
        } else {
            "Nothing to pick: the diff is empty."
        };
        frame.render_widget(List::new(vec![ListItem::new(Line::raw(msg))]), inner);
        return;
    }

    let items: Vec<ListItem> = visible_lines(state, inner.height as usize, theme)
        .into_iter()
        .map(ListItem::new)
        .collect();
    frame.render_widget(List::new(items), inner);
}

/// The window of diff lines to draw, with checkboxes spliced onto hunk headers.
fn visible_lines(state: &AppState, viewport_height: usize, theme: &Theme) -> Vec<Line<'static>> {
    let total = state.diff_lines.len();
    let start = state.diff_scroll.min(total.saturating_sub(1));
    let end = (start + viewport_height).min(total);

    (start..end)
        .map(|idx| {
            let line = &state.diff_lines[idx];
            let Ok(hunk) = state.hunk_offsets.binary_search(&idx) else {
                return line.clone();
            };
            let mark = if state.is_hunk_selected(hunk) {
                Span::styled("[x] ", Style::default().fg(theme.check_selected))
            } else {
                Span::styled("[ ] ", Style::default().fg(theme.check_unselected))
            };
            let mut spans = Vec::with_capacity(line.spans.len() + 1);
            spans.push(mark);
            spans.extend(line.spans.iter().cloned());
            let header = Line::from(spans);
            if hunk == state.hunk_cursor {
                header.style(Style::default().bg(theme.hunk_cursor_bg))
            } else {
                header
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunkpick_core::{BranchFile, Hunk, SelectedOwnership, VirtualBranch};

    fn state() -> AppState {
        let branch = VirtualBranch::new(
            "worktree",
            vec![BranchFile::new("a.txt", vec![Hunk::local("1-2", "h"), Hunk::local("5-6", "i")])],
        );
        let mut ownership = SelectedOwnership::from_branch(&branch);
        ownership.ignore("a.txt", ["5-6"]);
        AppState {
            ownership: Some(ownership),
            diff_lines: vec![
                Line::raw("a.txt"),
                Line::raw("@@ -1 +1 @@"),
                Line::raw("+one"),
                Line::raw("@@ -5 +5 @@"),
                Line::raw("+five"),
            ],
            hunk_offsets: vec![1, 3],
            hunk_keys: vec![("a.txt".to_owned(), "1-2".to_owned()), ("a.txt".to_owned(), "5-6".to_owned())],
            ..AppState::default()
        }
    }

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn hunk_headers_carry_checkboxes() {
        let lines = visible_lines(&state(), 10, &Theme::dark());
        assert_eq!(lines.len(), 5);
        assert_eq!(text(&lines[0]), "a.txt");
        assert_eq!(text(&lines[1]), "[x] @@ -1 +1 @@");
        assert_eq!(text(&lines[3]), "[ ] @@ -5 +5 @@");
        assert_eq!(text(&lines[4]), "+five");
    }

    #[test]
    fn only_the_viewport_is_materialised() {
        let mut state = state();
        state.diff_scroll = 3;
        let lines = visible_lines(&state, 1, &Theme::dark());
        assert_eq!(lines.len(), 1);
        assert_eq!(text(&lines[0]), "[ ] @@ -5 +5 @@");
    }

    #[test]
    fn cursor_header_is_highlighted() {
        let mut state = state();
        state.hunk_cursor = 1;
        let theme = Theme::dark();
        let lines = visible_lines(&state, 10, &theme);
        assert_eq!(lines[3].style.bg, Some(theme.hunk_cursor_bg));
        assert_eq!(lines[1].style.bg, None);
    }
}
