//! Keybinding dispatcher for hunkpick.
//!
//! Translates raw crossterm `KeyEvent`s into `AppState` mutations and returns a
//! `KeyAction` telling the event loop whether to continue or quit. The dispatcher
//! branches first on `state.mode` so HelpOverlay, ConfirmQuit and Normal each
//! have an isolated handler function.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use tracing::info;

use crate::app::{AppState, Mode, PanelFocus};

/// Control-flow signal returned from the key dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Continue the event loop and redraw.
    Continue,
    /// Tear down the terminal and exit. `state.commit_requested` tells main
    /// whether to print the selection.
    Quit,
}

/// Dispatches a key event to the handler matching the current mode.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::ConfirmQuit => handle_confirm_quit(key, state),
        Mode::Normal => handle_normal(key, state),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

/// Handles a key event while in Normal mode.
///
/// Scroll keys are tried first, then selection keys, then focus, resize,
/// hunk navigation and mode transitions.
fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if let Some(action) = handle_scroll_key(key, state) {
        return action;
    }
    if let Some(action) = handle_selection_key(key, state) {
        return action;
    }

    match key.code {
        KeyCode::Enter | KeyCode::Char('l') if state.focus == PanelFocus::FileList => {
            state.jump_to_selected_file();
        }
        KeyCode::Tab => state.cycle_mode(),
        KeyCode::Char('r') => state.request_diff(),

        KeyCode::Char('H') => state.focus = state.focus.prev(),
        KeyCode::Char('L') => state.focus = state.focus.next(),

        KeyCode::Char('{') => state.prev_file(),
        KeyCode::Char('}') => state.next_file(),
        KeyCode::Char('[') => state.prev_hunk(),
        KeyCode::Char(']') => state.next_hunk(),

        KeyCode::Char('<') => state.shrink_diff_panel(),
        KeyCode::Char('>') => state.grow_diff_panel(),

        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
        }

        KeyCode::Char('q') | KeyCode::Esc => {
            if state.selection_dirty {
                state.mode = Mode::ConfirmQuit;
            } else {
                return KeyAction::Quit;
            }
        }

        _ => {}
    }
    KeyAction::Continue
}

/// Handles the selection keys: space, a, x and c.
///
/// Returns `Some(KeyAction)` when the key was consumed.
fn handle_selection_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    match key.code {
        KeyCode::Char(' ') => state.toggle_focused(),
        KeyCode::Char('a') => state.select_all(),
        KeyCode::Char('x') => state.clear_selection(),
        KeyCode::Char('c') => {
            if state.request_commit() {
                let (selected, claimed) = state.selection_totals();
                info!(selected, claimed, "selection committed");
                return Some(KeyAction::Quit);
            }
        }
        _ => return None,
    }
    Some(KeyAction::Continue)
}

/// Handles j / k / g / G and the Ctrl paging combos.
///
/// Returns `Some(KeyAction)` when the key was consumed.
fn handle_scroll_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => state.scroll_up(1),
        KeyCode::Char('g') => state.scroll_top(),
        KeyCode::Char('G') => state.scroll_bottom(),
        KeyCode::Char('d') if ctrl => state.half_page_down(),
        KeyCode::Char('u') if ctrl => state.half_page_up(),
        KeyCode::Char('f') if ctrl => state.full_page_down(),
        KeyCode::Char('b') if ctrl => state.full_page_up(),
        _ => return None,
    }
    Some(KeyAction::Continue)
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

/// `?`, `Esc` or `q` dismisses the overlay; j/k/g/G scroll it.
fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') => state.help_scroll = state.help_scroll.saturating_add(1),
        KeyCode::Char('k') => state.help_scroll = state.help_scroll.saturating_sub(1),
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('G') => state.help_scroll = u16::MAX,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// ConfirmQuit mode
// ---------------------------------------------------------------------------

/// `y` quits without printing, `c` commits, `n` / `Esc` go back.
fn handle_confirm_quit(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => KeyAction::Quit,
        KeyCode::Char('c') => {
            state.mode = Mode::Normal;
            if state.request_commit() {
                KeyAction::Quit
            } else {
                KeyAction::Continue
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Left click focuses a panel; the wheel scrolls the focused panel or the
/// help overlay by 3 lines.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_mouse_click(mouse.column, mouse.row, state),
        MouseEventKind::ScrollUp => {
            if state.mode == Mode::HelpOverlay {
                state.help_scroll = state.help_scroll.saturating_sub(3);
            } else {
                state.scroll_up(3);
            }
        }
        MouseEventKind::ScrollDown => {
            if state.mode == Mode::HelpOverlay {
                state.help_scroll = state.help_scroll.saturating_add(3);
            } else {
                state.scroll_down(3);
            }
        }
        _ => {}
    }
    KeyAction::Continue
}

/// Sets panel focus from the cached panel rects. Zero-width panels are skipped.
fn handle_mouse_click(col: u16, row: u16, state: &mut AppState) {
    let pos = Position { x: col, y: row };
    let [left, center, right] = state.panel_rects;

    if left.width > 0 && left.contains(pos) {
        state.focus = PanelFocus::FileList;
    } else if center.contains(pos) {
        state.focus = PanelFocus::Diff;
    } else if right.width > 0 && right.contains(pos) {
        state.focus = PanelFocus::Selection;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use hunkpick_core::{BranchFile, Hunk, SelectedOwnership, VirtualBranch};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn state_with_selection() -> AppState {
        let branch = VirtualBranch::new(
            "worktree",
            vec![BranchFile::new("a.txt", vec![Hunk::local("1-2", "h")])],
        );
        AppState {
            ownership: Some(SelectedOwnership::from_branch(&branch)),
            hunk_keys: vec![("a.txt".to_owned(), "1-2".to_owned())],
            hunk_offsets: vec![1],
            focus: PanelFocus::Diff,
            ..AppState::default()
        }
    }

    #[test]
    fn quit_is_immediate_without_edits() {
        let mut state = state_with_selection();
        assert_eq!(handle_key(press(KeyCode::Char('q')), &mut state), KeyAction::Quit);
        assert!(!state.commit_requested);
    }

    #[test]
    fn quit_after_edit_asks_for_confirmation() {
        let mut state = state_with_selection();
        handle_key(press(KeyCode::Char(' ')), &mut state);
        assert!(state.selection_dirty);
        assert_eq!(handle_key(press(KeyCode::Char('q')), &mut state), KeyAction::Continue);
        assert_eq!(state.mode, Mode::ConfirmQuit);
        assert_eq!(handle_key(press(KeyCode::Char('n')), &mut state), KeyAction::Continue);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn commit_with_empty_selection_stays_open() {
        let mut state = state_with_selection();
        handle_key(press(KeyCode::Char('x')), &mut state);
        assert_eq!(handle_key(press(KeyCode::Char('c')), &mut state), KeyAction::Continue);
        assert!(!state.commit_requested);

        handle_key(press(KeyCode::Char('a')), &mut state);
        assert_eq!(handle_key(press(KeyCode::Char('c')), &mut state), KeyAction::Quit);
        assert!(state.commit_requested);
    }

    #[test]
    fn help_overlay_round_trip() {
        let mut state = AppState::default();
        handle_key(press(KeyCode::Char('?')), &mut state);
        assert_eq!(state.mode, Mode::HelpOverlay);
        handle_key(press(KeyCode::Char('j')), &mut state);
        assert_eq!(state.help_scroll, 1);
        handle_key(press(KeyCode::Esc), &mut state);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn click_focuses_selection_panel() {
        let mut state = AppState {
            panel_rects: [
                ratatui::layout::Rect::new(0, 0, 10, 10),
                ratatui::layout::Rect::new(10, 0, 20, 10),
                ratatui::layout::Rect::new(30, 0, 10, 10),
            ],
            ..AppState::default()
        };
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 35,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(click, &mut state);
        assert_eq!(state.focus, PanelFocus::Selection);
    }
}
