//! Color theme system for hunkpick.
//!
//! Two built-in themes:
//!
//! - `dark` — ANSI 16 colors only, works on any terminal.
//! - `catppuccin_mocha` — Catppuccin Mocha palette in RGB; requires truecolor.

use ratatui::style::Color;
use tracing::warn;

/// All color values used across hunkpick's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border color for the currently focused panel.
    pub border_active: Color,
    /// Border color for unfocused panels.
    pub border_inactive: Color,

    // Selection checkboxes
    /// `[x]` — hunk or whole file selected.
    pub check_selected: Color,
    /// `[~]` — some hunks of a file selected.
    pub check_partial: Color,
    /// `[ ]` — nothing selected.
    pub check_unselected: Color,
    /// Background of the hunk header under the cursor.
    pub hunk_cursor_bg: Color,

    // File list status badges
    pub file_added: Color,
    pub file_removed: Color,
    pub file_modified: Color,
    pub file_renamed: Color,

    /// De-emphasised text (counts, placeholders).
    pub muted: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    /// Mode indicator in NORMAL mode.
    pub status_mode_normal: Color,
    /// Mode indicator while a confirmation is pending.
    pub status_mode_confirm: Color,
    /// Git errors and other warnings in the status bar.
    pub status_error: Color,
}

impl Theme {
    /// The built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            check_selected: Color::Green,
            check_partial: Color::Yellow,
            check_unselected: Color::DarkGray,
            hunk_cursor_bg: Color::DarkGray,

            file_added: Color::Green,
            file_removed: Color::Red,
            file_modified: Color::Yellow,
            file_renamed: Color::Cyan,

            muted: Color::DarkGray,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_confirm: Color::Yellow,
            status_error: Color::Red,
        }
    }

    /// The Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161);    // #a6e3a1
        let red = Color::Rgb(243, 139, 168);      // #f38ba8
        let yellow = Color::Rgb(249, 226, 175);   // #f9e2af
        let teal = Color::Rgb(148, 226, 213);     // #94e2d5
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface0 = Color::Rgb(49, 50, 68);    // #313244
        let surface1 = Color::Rgb(69, 71, 90);    // #45475a
        let text = Color::Rgb(205, 214, 244);     // #cdd6f4
        let peach = Color::Rgb(250, 179, 135);    // #fab387

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            check_selected: green,
            check_partial: peach,
            check_unselected: overlay1,
            hunk_cursor_bg: surface0,

            file_added: green,
            file_removed: red,
            file_modified: yellow,
            file_renamed: teal,

            muted: overlay1,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_normal: lavender,
            status_mode_confirm: peach,
            status_error: red,
        }
    }

    /// Resolves a theme name from config. Unknown names fall back to `dark()`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }
}
