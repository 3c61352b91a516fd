//! UI rendering module for hunkpick.
//!
//! `render()` is the single entry point called by the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs`, the diff
//! panel in `diff_view.rs` and the file list in `file_tree.rs`. The selection
//! preview on the right is small enough to live here.

mod layout;
pub mod diff_view;
pub mod file_tree;
pub mod help;
pub mod keybindings;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Text},
    widgets::{Paragraph, Wrap},
};

use crate::app::{AppState, Mode, PanelFocus};
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, panel_block, render_status_bar};

/// Renders one complete frame: three panels, status bar and any modal.
///
/// Viewport heights and panel rects are written back into `state` so that the
/// next keypress can page by the right distance and mouse clicks can be
/// hit-tested. The one-frame lag is imperceptible in practice.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [left, center, right, status_bar] = compute_layout(frame, state);

    state.file_list_viewport_height = inner_rect(left).height;
    state.diff_viewport_height = inner_rect(center).height;
    state.selection_viewport_height = inner_rect(right).height;
    state.panel_rects = [left, center, right];

    let focus = state.focus;

    if left.width > 0 {
        file_tree::render_file_list(frame, left, focus, state, theme);
    }
    diff_view::render_diff(frame, center, focus, state, theme);
    if right.width > 0 {
        render_selection(frame, right, focus, state, theme);
    }
    render_status_bar(frame, status_bar, state, theme);

    match state.mode {
        Mode::HelpOverlay => help::render_help_overlay(frame, theme, state.help_scroll),
        Mode::ConfirmQuit => help::render_confirm_quit(frame, theme),
        Mode::Normal => {}
    }
}

/// Renders the serialized selection exactly as `c` would print it.
fn render_selection(frame: &mut Frame, area: Rect, focus: PanelFocus, state: &AppState, theme: &Theme) {
    let block = panel_block("Selection", focus == PanelFocus::Selection, theme);
    let text = state.selection_text();
    let body = if text.is_empty() {
        Text::from(Line::styled("(nothing selected)", Style::default().fg(theme.muted)))
    } else {
        Text::from(text)
    };
    frame.render_widget(
        Paragraph::new(body)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((state.selection_scroll, 0)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunkpick_core::{BranchFile, Hunk, SelectedOwnership, VirtualBranch};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn selection_panel_previews_the_ownership_string() {
        let branch = VirtualBranch::new(
            "worktree",
            vec![BranchFile::new("a.txt", vec![Hunk::local("1-2", "abc")])],
        );
        let mut state = AppState {
            ownership: Some(SelectedOwnership::from_branch(&branch)),
            ..AppState::default()
        };
        let mut terminal = Terminal::new(TestBackend::new(160, 20)).unwrap();
        terminal.draw(|frame| render(frame, &mut state, &Theme::dark())).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("a.txt:1-2-abc"));
        assert!(text.contains("1/1 hunks selected"));
        assert!(state.panel_rects[2].width > 0);
    }

    #[test]
    fn empty_selection_shows_placeholder() {
        let mut state = AppState::default();
        let mut terminal = Terminal::new(TestBackend::new(160, 20)).unwrap();
        terminal.draw(|frame| render(frame, &mut state, &Theme::dark())).unwrap();
        assert!(screen(&terminal).contains("(nothing selected)"));
    }
}
