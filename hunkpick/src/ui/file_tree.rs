//! File list panel renderer for hunkpick.
//!
//! Renders the left panel from `AppState.file_summaries`. Each entry shows a
//! selection checkbox, a status badge (M/A/D/R), the path and +N/-N counts.

use hunkpick_core::FileSelection;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};

use crate::app::{AppState, PanelFocus};
use crate::git::types::FileSummary;
use crate::theme::Theme;
use crate::ui::layout::panel_block;

const MAX_PATH_LEN: usize = 28;

/// Renders the file-list panel with the `ListState` selection highlight.
///
/// The title carries the file count, e.g. "Files (12)".
pub fn render_file_list(frame: &mut Frame, area: Rect, focus: PanelFocus, state: &mut AppState, theme: &Theme) {
    let is_focused = focus == PanelFocus::FileList;
    let file_count = state.file_summaries.len();
    let title = if file_count > 0 {
        format!("Files ({file_count})")
    } else {
        "Files".to_owned()
    };
    let block = panel_block(&title, is_focused, theme);

    let items: Vec<ListItem> = if state.file_summaries.is_empty() {
        let msg = if state.diff_loading { "Loading..." } else { "No changes" };
        vec![ListItem::new(Line::raw(msg))]
    } else {
        state
            .file_summaries
            .iter()
            .map(|f| file_summary_item(f, state.file_selection(&f.path), theme))
            .collect()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(theme.border_active).add_modifier(Modifier::BOLD));

    frame.render_stateful_widget(list, area, &mut state.file_list_state);
}

/// The `[x]` / `[~]` / `[ ]` checkbox for a file's selection state.
pub fn checkbox(selection: FileSelection, theme: &Theme) -> Span<'static> {
    match selection {
        FileSelection::All => Span::styled("[x] ", Style::default().fg(theme.check_selected)),
        FileSelection::Partial => Span::styled("[~] ", Style::default().fg(theme.check_partial)),
        FileSelection::None => Span::styled("[ ] ", Style::default().fg(theme.check_unselected)),
    }
}

/// Keeps the tail of long paths, cutting on a char boundary.
fn truncate_path(path: &str) -> String {
    let chars = path.chars().count();
    if chars <= MAX_PATH_LEN {
        return path.to_owned();
    }
    let tail: String = path.chars().skip(chars - (MAX_PATH_LEN - 3)).collect();
    format!("...{tail}")
}

/// Format: `[x] [M] src/main.rs  +42 -7`.
fn file_summary_item(f: &FileSummary, selection: FileSelection, theme: &Theme) -> ListItem<'static> {
    let badge_color = match f.status {
        'A' => theme.file_added,
        'D' => theme.file_removed,
        'R' => theme.file_renamed,
        _ => theme.file_modified,
    };
    let badge = Span::styled(format!("[{}] ", f.status), Style::default().fg(badge_color));
    let counts = if f.added > 0 || f.removed > 0 {
        Span::styled(format!("  +{} -{}", f.added, f.removed), Style::default().fg(theme.muted))
    } else {
        Span::raw("")
    };
    ListItem::new(Line::from(vec![
        checkbox(selection, theme),
        badge,
        Span::raw(truncate_path(&f.path)),
        counts,
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_paths_are_untouched() {
        assert_eq!(truncate_path("src/lib.rs"), "src/lib.rs");
    }

    #[test]
    fn long_paths_keep_their_tail() {
        let path = "crates/very/deeply/nested/module/path/file.rs";
        let shown = truncate_path(path);
        assert_eq!(shown.chars().count(), MAX_PATH_LEN);
        assert!(shown.starts_with("..."));
        assert!(shown.ends_with("path/file.rs"));
    }

    #[test]
    fn multibyte_paths_do_not_split_chars() {
        let path = "docs/ünïcödé/ünïcödé/ünïcödé/readme.md";
        assert!(truncate_path(path).ends_with("readme.md"));
    }

    #[test]
    fn checkbox_reflects_state() {
        let theme = Theme::dark();
        assert_eq!(checkbox(FileSelection::All, &theme).content, "[x] ");
        assert_eq!(checkbox(FileSelection::Partial, &theme).content, "[~] ");
        assert_eq!(checkbox(FileSelection::None, &theme).content, "[ ] ");
    }
}
