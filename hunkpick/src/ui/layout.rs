//! Responsive 3-panel layout engine for hunkpick.
//!
//! This module is pure layout arithmetic — no mutable application state lives here.
//! It is called inside `terminal.draw()` on every render so every frame gets a fresh
//! layout that automatically reflects the current terminal size.
//!
//! # Panel geometry
//!
//! At `>= 120` columns all three panels are visible with widths driven by
//! `AppState.left_pct / center_pct / right_pct` (defaults 25 / 50 / 25).
//! Below 120 columns both side panels collapse and the diff fills the full width.
//! Below 80 columns the same collapse applies (minimum viable single-panel display).
//!
//! `Spacing::Overlap(1)` combined with `Block::merge_borders(MergeStrategy::Fuzzy)`
//! makes adjacent panel borders share a single column and merge their corner/junction
//! Unicode box-drawing characters automatically.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;

/// Returns `[left, center, right, status_bar]` panel `Rect`s for the current frame.
///
/// Called inside `terminal.draw()` on every render. The returned slices are valid only
/// for the current draw closure — never store them across frames.
///
/// # Responsive behaviour
///
/// | Terminal width | Layout |
/// |----------------|--------|
/// | `< 120` cols   | Side panels collapsed; diff fills full width |
/// | `>= 120` cols  | 3-panel split using `state.left_pct / center_pct / right_pct` |
///
/// # Arguments
///
/// * `frame` — current render frame (provides `frame.area()` with live terminal size)
/// * `state` — read-only app state supplying panel width percentages
pub fn compute_layout(frame: &Frame, state: &AppState) -> [Rect; 4] {
    let term_width = frame.area().width;

    // Vertical split: main area (fills remaining height) + 1-row status bar.
    let [main_area, status_bar] =
        frame.area().layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]));

    // Horizontal split: collapse side panels when terminal is narrow.
    let horizontal = if term_width >= 120 {
        Layout::horizontal([
            Constraint::Percentage(state.left_pct),
            Constraint::Percentage(state.center_pct),
            Constraint::Percentage(state.right_pct),
        ])
        .spacing(Spacing::Overlap(1))
    } else {
        // Both < 80 and 80..119 collapse side panels.
        Layout::horizontal([
            Constraint::Length(0),
            Constraint::Fill(1),
            Constraint::Length(0),
        ])
        .spacing(Spacing::Overlap(1))
    };

    let [left, center, right] = main_area.layout(&horizontal);

    [left, center, right, status_bar]
}

/// Returns the inner `Rect` of a panel after removing the 1-cell border on each side.
///
/// Used to cache viewport heights in `AppState` before panels are rendered, so that
/// half-page and full-page scroll distances are available at keypress time.
///
/// # Arguments
///
/// * `area` — the outer `Rect` of the panel (including borders)
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Builds a bordered `Block` for a panel.
///
/// Applies `BorderType::Thick` when the panel is focused and `BorderType::Plain`
/// otherwise. `MergeStrategy::Exact` produces broken junctions when `Thick` and
/// `Plain` borders meet, so `Fuzzy` is used.
///
/// # Arguments
///
/// * `title` — panel title shown in the top border
/// * `is_focused` — `true` when this panel has keyboard focus
/// * `theme` — active color theme (supplies `border_active` / `border_inactive`)
pub fn panel_block<'a>(title: &'a str, is_focused: bool, theme: &'a Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Renders the 1-row status bar at the bottom of the terminal.
///
/// Left to right: mode indicator, diff mode, selected/claimed hunk counts, and
/// either a loading marker or the current status message.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, mode_fg) = match state.mode {
        Mode::ConfirmQuit => (" CONFIRM ", theme.status_mode_confirm),
        Mode::Normal | Mode::HelpOverlay => (" NORMAL ", theme.status_mode_normal),
    };
    let (selected, claimed) = state.selection_totals();

    let mut spans = vec![
        Span::styled(mode_text, Style::default().fg(mode_fg).add_modifier(Modifier::BOLD)),
        Span::raw(format!(" {} ", state.diff_mode.label())),
        Span::raw(format!(" {selected}/{claimed} hunks selected ")),
    ];
    if state.diff_loading {
        spans.push(Span::styled(" loading... ", Style::default().fg(theme.muted)));
    } else if let Some(status) = &state.status {
        let fg = if status.is_error { theme.status_error } else { theme.status_bar_fg };
        spans.push(Span::styled(format!(" {} ", status.text), Style::default().fg(fg)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn panels(width: u16) -> [Rect; 4] {
        let mut terminal = Terminal::new(TestBackend::new(width, 40)).unwrap();
        let state = AppState::default();
        let mut rects = [Rect::default(); 4];
        terminal.draw(|frame| rects = compute_layout(frame, &state)).unwrap();
        rects
    }

    #[test]
    fn narrow_terminals_collapse_side_panels() {
        let [left, center, right, status] = panels(100);
        assert_eq!(left.width, 0);
        assert_eq!(right.width, 0);
        assert!(center.width >= 99);
        assert_eq!(status.height, 1);
    }

    #[test]
    fn wide_terminals_show_three_panels() {
        let [left, center, right, _] = panels(160);
        assert!(left.width > 0);
        assert!(right.width > 0);
        assert!(center.width > left.width);
    }
}
