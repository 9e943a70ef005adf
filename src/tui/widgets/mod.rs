//! TUI widgets for rendering different UI panels.

pub mod attachments;
pub mod compose;
pub mod content;
pub mod email_list;
pub mod header_bar;
pub mod help_popup;
pub mod prompt_bar;
pub mod recipient_list;
pub mod status_bar;

use ratatui::widgets::{Block, Borders};
use unicode_width::UnicodeWidthStr;

use crate::tui::theme::Theme;

/// Bordered panel block, highlighted when focused.
pub(crate) fn panel_block<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if focused {
        theme.border_focused
    } else {
        theme.border
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
}

/// Truncate a string to fit within `max_width` display columns, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    let width = UnicodeWidthStr::width(s);
    if width <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let mut result = String::new();
        let mut current_width = 0;
        for ch in s.chars() {
            let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
            if current_width + ch_width + 3 > max_width {
                break;
            }
            result.push(ch);
            current_width += ch_width;
        }
        result.push_str("...");
        result
    }
}

/// First row to draw so that `selected` stays inside a `height`-row viewport.
pub(crate) fn scroll_offset(selected: usize, height: usize) -> usize {
    if height == 0 {
        0
    } else {
        selected.saturating_sub(height - 1)
    }
}
