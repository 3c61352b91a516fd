//! Central application state for hunkpick.
//!
//! This module owns all mutable UI state: the current mode, which panel has focus,
//! per-panel scroll offsets and viewport heights, panel width percentages, the loaded
//! diff, and the [`SelectedOwnership`] tracker for the session. No ratatui rendering
//! logic lives here — the render module reads this state and the keybinding
//! dispatcher mutates it.

use crossbeam_channel::Sender;
use hunkpick_core::{FileSelection, SelectedOwnership};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tracing::{debug, info, warn};

use crate::git::types::{DiffMode, FileSummary, GitRequest, GitResultPayload};

/// How many 250 ms ticks a status message stays visible.
const STATUS_TICKS: u8 = 16;

/// Editor mode controlling which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal vim-style navigation mode (default).
    #[default]
    Normal,
    /// Full-screen help overlay is shown above all panels.
    HelpOverlay,
    /// Quit-confirmation dialog shown when the selection was edited.
    ConfirmQuit,
}

/// Which panel currently has keyboard focus.
///
/// Cycle order: FileList → Diff → Selection → FileList.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Left panel showing changed files with their selection state.
    #[default]
    FileList,
    /// Centre panel showing the diff with a checkbox per hunk.
    Diff,
    /// Right panel previewing the serialized selection.
    Selection,
}

impl PanelFocus {
    pub fn prev(self) -> Self {
        match self {
            PanelFocus::FileList => PanelFocus::Selection,
            PanelFocus::Diff => PanelFocus::FileList,
            PanelFocus::Selection => PanelFocus::Diff,
        }
    }

    pub fn next(self) -> Self {
        match self {
            PanelFocus::FileList => PanelFocus::Diff,
            PanelFocus::Diff => PanelFocus::Selection,
            PanelFocus::Selection => PanelFocus::FileList,
        }
    }
}

/// A transient message in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    ticks_left: u8,
}

/// All mutable UI state passed through every render cycle.
pub struct AppState {
    /// Current editor mode governing which keybindings are active.
    pub mode: Mode,
    /// Which panel currently receives keyboard scroll/navigation events.
    pub focus: PanelFocus,

    /// Stateful list widget backing the file-list panel (left).
    pub file_list_state: ListState,
    /// Vertical scroll offset for the diff panel; clamped by the renderer.
    pub diff_scroll: usize,
    /// Vertical scroll offset for the selection preview.
    pub selection_scroll: u16,
    /// Vertical scroll offset for the help overlay.
    pub help_scroll: u16,

    /// Inner panel heights after borders, cached after each render for paging.
    pub file_list_viewport_height: u16,
    pub diff_viewport_height: u16,
    pub selection_viewport_height: u16,
    /// Outer panel rects from the last render, `[left, center, right]`, for mouse hit-testing.
    pub panel_rects: [Rect; 3],

    /// Width percentages of the three panels. Defaults 25 / 50 / 25.
    pub left_pct: u16,
    pub center_pct: u16,
    pub right_pct: u16,

    /// Pre-highlighted diff lines from the git background thread.
    pub diff_lines: Vec<ratatui::text::Line<'static>>,
    /// File summaries from the most recent diff.
    pub file_summaries: Vec<FileSummary>,
    /// Line index of each hunk header within `diff_lines`.
    pub hunk_offsets: Vec<usize>,
    /// `(file id, hunk id)` of each hunk, parallel to `hunk_offsets`.
    pub hunk_keys: Vec<(String, String)>,
    /// Line index of each file header within `diff_lines`, parallel to `file_summaries`.
    pub file_line_offsets: Vec<usize>,
    /// Index into `hunk_offsets` of the hunk under the cursor.
    pub hunk_cursor: usize,

    /// Mode currently requested or shown.
    pub diff_mode: DiffMode,
    /// Mode of the last applied payload; a change resets the selection.
    pub(crate) loaded_mode: Option<DiffMode>,
    /// True while the background thread is computing a diff.
    pub diff_loading: bool,
    /// `(from, to)` refs for `DiffMode::CommitRange`, from the command line.
    pub range: Option<(String, String)>,
    /// Request channel to the git worker thread; `None` in tests.
    pub git_tx: Option<Sender<GitRequest>>,

    /// Claims and selection for the loaded diff; `None` until the first load.
    pub ownership: Option<SelectedOwnership>,
    /// Set once the user edits the selection; guards quitting.
    pub selection_dirty: bool,
    /// Set when the user commits; main prints the selection after teardown.
    pub commit_requested: bool,
    pub status: Option<StatusMessage>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            focus: PanelFocus::default(),
            file_list_state: ListState::default(),
            diff_scroll: 0,
            selection_scroll: 0,
            help_scroll: 0,
            file_list_viewport_height: 0,
            diff_viewport_height: 0,
            selection_viewport_height: 0,
            panel_rects: [Rect::default(); 3],
            left_pct: 25,
            center_pct: 50,
            right_pct: 25,
            diff_lines: Vec::new(),
            file_summaries: Vec::new(),
            hunk_offsets: Vec::new(),
            hunk_keys: Vec::new(),
            file_line_offsets: Vec::new(),
            hunk_cursor: 0,
            diff_mode: DiffMode::default(),
            loaded_mode: None,
            diff_loading: false,
            range: None,
            git_tx: None,
            ownership: None,
            selection_dirty: false,
            commit_requested: false,
            status: None,
        }
    }
}

impl AppState {
    // -----------------------------------------------------------------------
    // Scrolling
    // -----------------------------------------------------------------------

    /// Scrolls the focused panel down by `lines` rows.
    pub fn scroll_down(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::FileList => self.file_list_state.scroll_down_by(lines),
            PanelFocus::Diff => {
                self.diff_scroll = self.diff_scroll.saturating_add(lines as usize);
                self.sync_hunk_cursor();
            }
            PanelFocus::Selection => {
                self.selection_scroll = self.selection_scroll.saturating_add(lines);
            }
        }
    }

    /// Scrolls the focused panel up by `lines` rows.
    pub fn scroll_up(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::FileList => self.file_list_state.scroll_up_by(lines),
            PanelFocus::Diff => {
                self.diff_scroll = self.diff_scroll.saturating_sub(lines as usize);
                self.sync_hunk_cursor();
            }
            PanelFocus::Selection => {
                self.selection_scroll = self.selection_scroll.saturating_sub(lines);
            }
        }
    }

    pub fn scroll_top(&mut self) {
        match self.focus {
            PanelFocus::FileList => self.file_list_state.select_first(),
            PanelFocus::Diff => {
                self.diff_scroll = 0;
                self.sync_hunk_cursor();
            }
            PanelFocus::Selection => self.selection_scroll = 0,
        }
    }

    pub fn scroll_bottom(&mut self) {
        match self.focus {
            PanelFocus::FileList => self.file_list_state.select_last(),
            PanelFocus::Diff => {
                self.diff_scroll = self.diff_lines.len().saturating_sub(1);
                self.sync_hunk_cursor();
            }
            // ratatui clamps the paragraph scroll.
            PanelFocus::Selection => self.selection_scroll = u16::MAX,
        }
    }

    fn focused_viewport_height(&self) -> u16 {
        match self.focus {
            PanelFocus::FileList => self.file_list_viewport_height,
            PanelFocus::Diff => self.diff_viewport_height,
            PanelFocus::Selection => self.selection_viewport_height,
        }
    }

    /// Scrolls by half the focused panel's height (at least one row).
    pub fn half_page_down(&mut self) {
        self.scroll_down((self.focused_viewport_height() / 2).max(1));
    }

    pub fn half_page_up(&mut self) {
        self.scroll_up((self.focused_viewport_height() / 2).max(1));
    }

    pub fn full_page_down(&mut self) {
        self.scroll_down(self.focused_viewport_height().max(1));
    }

    pub fn full_page_up(&mut self) {
        self.scroll_up(self.focused_viewport_height().max(1));
    }

    // -----------------------------------------------------------------------
    // File and hunk navigation
    // -----------------------------------------------------------------------

    pub fn prev_file(&mut self) {
        self.file_list_state.scroll_up_by(1);
    }

    pub fn next_file(&mut self) {
        self.file_list_state.scroll_down_by(1);
    }

    /// Points the hunk cursor at the last hunk header at or above the top
    /// visible diff line.
    fn sync_hunk_cursor(&mut self) {
        let passed = self.hunk_offsets.partition_point(|&offset| offset <= self.diff_scroll);
        self.hunk_cursor = passed.saturating_sub(1);
    }

    /// Moves the cursor to the previous hunk header ([ keybinding).
    pub fn prev_hunk(&mut self) {
        if self.hunk_offsets.is_empty() {
            return;
        }
        self.hunk_cursor = self.hunk_cursor.saturating_sub(1);
        self.diff_scroll = self.hunk_offsets[self.hunk_cursor];
    }

    /// Moves the cursor to the next hunk header (] keybinding).
    pub fn next_hunk(&mut self) {
        if self.hunk_offsets.is_empty() {
            return;
        }
        self.hunk_cursor = (self.hunk_cursor + 1).min(self.hunk_offsets.len() - 1);
        self.diff_scroll = self.hunk_offsets[self.hunk_cursor];
    }

    /// Scrolls the diff to the file selected in the file list and focuses the diff.
    pub fn jump_to_selected_file(&mut self) {
        let Some(idx) = self.file_list_state.selected() else {
            return;
        };
        if let Some(&offset) = self.file_line_offsets.get(idx) {
            self.diff_scroll = offset;
            let first_hunk = self.hunk_offsets.partition_point(|&o| o < offset);
            self.hunk_cursor = first_hunk.min(self.hunk_offsets.len().saturating_sub(1));
            self.focus = PanelFocus::Diff;
        }
    }

    /// Shrinks the diff (centre) panel by 5%, giving the width to the side panels.
    ///
    /// The centre panel will not shrink below 20%.
    pub fn shrink_diff_panel(&mut self) {
        const MIN_CENTER: u16 = 20;
        const STEP: u16 = 5;
        if self.center_pct <= MIN_CENTER {
            return;
        }
        let transfer = STEP.min(self.center_pct - MIN_CENTER);
        self.center_pct -= transfer;
        let left_gain = transfer / 2;
        self.left_pct = self.left_pct.saturating_add(left_gain);
        self.right_pct = self.right_pct.saturating_add(transfer - left_gain);
    }

    /// Grows the diff (centre) panel by up to 5%, taken from the side panels.
    ///
    /// The centre panel will not grow above 80% and side panels keep at least 5%.
    pub fn grow_diff_panel(&mut self) {
        const MAX_CENTER: u16 = 80;
        const MIN_SIDE: u16 = 5;
        const STEP: u16 = 5;
        if self.center_pct >= MAX_CENTER {
            return;
        }
        let transfer = STEP.min(MAX_CENTER - self.center_pct);
        let left_give = (transfer / 2).min(self.left_pct.saturating_sub(MIN_SIDE));
        let right_give = (transfer - transfer / 2).min(self.right_pct.saturating_sub(MIN_SIDE));
        self.left_pct -= left_give;
        self.right_pct -= right_give;
        self.center_pct += left_give + right_give;
    }

    // -----------------------------------------------------------------------
    // Git requests and results
    // -----------------------------------------------------------------------

    fn current_request(&self) -> Option<GitRequest> {
        match (self.diff_mode, &self.range) {
            (DiffMode::CommitRange, Some((from, to))) => {
                Some(GitRequest::LoadDiffRange { from: from.clone(), to: to.clone() })
            }
            (DiffMode::CommitRange, None) => None,
            (mode, _) => Some(GitRequest::LoadDiff(mode)),
        }
    }

    /// Asks the git worker for the diff of the current mode.
    pub fn request_diff(&mut self) {
        let Some(request) = self.current_request() else {
            return;
        };
        if let Some(ref tx) = self.git_tx {
            if tx.send(request).is_ok() {
                self.diff_loading = true;
            } else {
                warn!("git worker is gone; diff request dropped");
            }
        }
    }

    /// Reloads live (worktree/staged) diffs so outside edits get reconciled.
    pub fn refresh(&mut self) {
        if !self.diff_mode.is_historical() && !self.diff_loading {
            self.request_diff();
        }
    }

    /// Switches to the next diff mode and requests its diff.
    pub fn cycle_mode(&mut self) {
        self.diff_mode = self.diff_mode.next(self.range.is_some());
        self.request_diff();
    }

    /// Applies a diff payload from the git worker.
    ///
    /// The first payload of a mode starts a fresh ownership with everything
    /// selected. Later payloads of the same mode reconcile the existing
    /// selection. A failed reload of the same mode keeps the current view so
    /// a transient git error does not wipe the selection. Payloads for a mode
    /// other than the one currently requested are stale and dropped; the
    /// request for the current mode is still outstanding.
    pub fn apply_git_result(&mut self, payload: GitResultPayload) {
        if payload.mode != self.diff_mode {
            debug!(stale = payload.mode.label(), current = self.diff_mode.label(), "dropping stale diff");
            return;
        }
        let mode_changed = self.loaded_mode != Some(payload.mode);
        self.diff_loading = false;

        if let Some(error) = &payload.error {
            self.set_status(error.clone(), true);
            if !mode_changed {
                return;
            }
        }

        match self.ownership.as_mut() {
            Some(ownership) if !mode_changed => {
                ownership.update(&payload.branch);
            }
            _ => {
                info!(mode = payload.mode.label(), files = payload.branch.files.len(), "diff mode loaded");
                self.ownership = Some(SelectedOwnership::from_branch(&payload.branch));
                self.selection_dirty = false;
            }
        }

        self.loaded_mode = Some(payload.mode);
        self.file_summaries = payload.files;
        self.diff_lines = payload.highlighted_lines;
        self.hunk_offsets = payload.hunk_offsets;
        self.hunk_keys = payload.hunk_keys;
        self.file_line_offsets = payload.file_line_offsets;

        if mode_changed {
            self.diff_scroll = 0;
            self.hunk_cursor = 0;
            self.selection_scroll = 0;
            if self.file_summaries.is_empty() {
                self.file_list_state.select(None);
            } else {
                self.file_list_state.select_first();
            }
        } else {
            self.diff_scroll = self.diff_scroll.min(self.diff_lines.len().saturating_sub(1));
            self.hunk_cursor = self.hunk_cursor.min(self.hunk_keys.len().saturating_sub(1));
        }
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Selects or deselects the hunk under the cursor.
    pub fn toggle_current_hunk(&mut self) {
        let Some((file_id, hunk_id)) = self.hunk_keys.get(self.hunk_cursor) else {
            return;
        };
        let Some(ownership) = self.ownership.as_mut() else {
            return;
        };
        if ownership.is_selected(file_id, [hunk_id]) {
            ownership.ignore(file_id, [hunk_id]);
        } else {
            let claimed = ownership.claims().get(file_id).and_then(|hunks| hunks.get(hunk_id)).cloned();
            ownership.select(file_id, claimed);
        }
        debug!(file = %file_id, hunk = %hunk_id, "hunk toggled");
        self.selection_dirty = true;
    }

    /// Selects every hunk of the highlighted file, or deselects them all when
    /// the file is already fully selected.
    pub fn toggle_selected_file(&mut self) {
        let Some(idx) = self.file_list_state.selected() else {
            return;
        };
        let Some(file) = self.file_summaries.get(idx) else {
            return;
        };
        let Some(ownership) = self.ownership.as_mut() else {
            return;
        };
        if ownership.file_state(&file.path) == FileSelection::All {
            let ids: Vec<String> = ownership
                .claims()
                .get(&file.path)
                .map(|hunks| hunks.keys().cloned().collect())
                .unwrap_or_default();
            ownership.ignore(&file.path, ids);
        } else {
            ownership.select_file(&file.path);
        }
        debug!(file = %file.path, "file toggled");
        self.selection_dirty = true;
    }

    /// Space: toggles the file in the file list, otherwise the hunk under the cursor.
    pub fn toggle_focused(&mut self) {
        if self.focus == PanelFocus::FileList {
            self.toggle_selected_file();
        } else {
            self.toggle_current_hunk();
        }
    }

    pub fn select_all(&mut self) {
        if let Some(ownership) = self.ownership.as_mut() {
            ownership.select_all();
            self.selection_dirty = true;
        }
    }

    pub fn clear_selection(&mut self) {
        if let Some(ownership) = self.ownership.as_mut() {
            ownership.clear_selection();
            self.selection_dirty = true;
        }
    }

    /// Whether the hunk at `index` in `hunk_keys` is selected.
    pub fn is_hunk_selected(&self, index: usize) -> bool {
        match (self.ownership.as_ref(), self.hunk_keys.get(index)) {
            (Some(ownership), Some((file_id, hunk_id))) => ownership.is_selected(file_id, [hunk_id]),
            _ => false,
        }
    }

    pub fn file_selection(&self, file_id: &str) -> FileSelection {
        self.ownership
            .as_ref()
            .map_or(FileSelection::None, |ownership| ownership.file_state(file_id))
    }

    /// `(selected, claimed)` hunk totals across the branch.
    pub fn selection_totals(&self) -> (usize, usize) {
        self.ownership.as_ref().map_or((0, 0), |ownership| {
            let count = |claims: &hunkpick_core::FileClaims| -> usize { claims.values().map(|h| h.len()).sum() };
            (count(ownership.selection()), count(ownership.claims()))
        })
    }

    /// The serialized selection, empty when nothing is loaded or selected.
    pub fn selection_text(&self) -> String {
        self.ownership.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    /// Marks the session for commit. Returns `false` (with a status message)
    /// when nothing is selected.
    pub fn request_commit(&mut self) -> bool {
        let has_selection = self.ownership.as_ref().is_some_and(|o| !o.nothing_selected());
        if !has_selection {
            self.set_status("nothing selected".to_owned(), false);
            return false;
        }
        self.commit_requested = true;
        true
    }

    // -----------------------------------------------------------------------
    // Status bar
    // -----------------------------------------------------------------------

    pub fn set_status(&mut self, text: String, is_error: bool) {
        self.status = Some(StatusMessage { text, is_error, ticks_left: STATUS_TICKS });
    }

    /// Ages the status message; called on every `AppEvent::Tick`.
    pub fn tick(&mut self) {
        if let Some(status) = self.status.as_mut() {
            status.ticks_left = status.ticks_left.saturating_sub(1);
            if status.ticks_left == 0 {
                self.status = None;
            }
        }
    }
}
