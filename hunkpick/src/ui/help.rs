//! Help overlay and quit-confirmation dialog.
//!
//! Both are modals drawn inside the same `terminal.draw()` closure as the panels:
//! `Clear` erases the area first, then a bordered `Paragraph` goes on top.

use ratatui::{
    Frame,
    layout::Constraint,
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay as a centred modal scrolled by `help_scroll` rows.
///
/// Skipped on terminals narrower than 60 columns, where the centred area
/// could collapse to zero height.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 60 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(80), Constraint::Percentage(80));
    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help  (j/k scroll, ? or Esc to dismiss) ")
        .border_style(Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

/// Renders the "discard selection?" dialog shown when quitting after edits.
pub fn render_confirm_quit(frame: &mut Frame, theme: &Theme) {
    let area = frame.area().centered(Constraint::Length(44), Constraint::Length(5));
    frame.render_widget(Clear, area);

    let block = Block::bordered()
        .title(" Quit ")
        .border_style(Style::default().fg(theme.status_mode_confirm));
    let body = Text::from(vec![
        Line::from("The selection was edited."),
        Line::from("y quit   c commit and quit   n cancel"),
    ]);
    frame.render_widget(Paragraph::new(body).block(block).centered(), area);
}

fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Selection"),
        Line::from("  Space         Toggle file (file list) or hunk under cursor (diff)"),
        Line::from("  a             Select every hunk"),
        Line::from("  x             Clear the selection"),
        Line::from("  c             Commit: quit and print the selection to stdout"),
        Line::from(""),
        Line::from("Navigation"),
        Line::from("  j / k         Scroll down / up one line"),
        Line::from("  g / G         Jump to top / bottom"),
        Line::from("  Ctrl-d / u    Scroll half page down / up"),
        Line::from("  Ctrl-f / b    Scroll full page down / up"),
        Line::from("  H / L         Move panel focus left / right"),
        Line::from(""),
        Line::from("File List"),
        Line::from("  { / }         Previous / next file"),
        Line::from("  Enter / l     Jump to selected file in diff view"),
        Line::from(""),
        Line::from("Diff View"),
        Line::from("  [ / ]         Previous / next hunk"),
        Line::from("  < / >         Shrink / grow diff panel by 5%"),
        Line::from(""),
        Line::from("Diff Mode"),
        Line::from("  Tab           Worktree -> Staged -> Branch -> Range (with --from/--to)"),
        Line::from("  r             Reload the diff now"),
        Line::from(""),
        Line::from("General"),
        Line::from("  ?             Open / close this help overlay"),
        Line::from("  q / Esc       Quit (confirms if the selection was edited)"),
    ])
}
