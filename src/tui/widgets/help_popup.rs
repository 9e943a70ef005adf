//! Help popup showing keyboard shortcuts in multi-column layout.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::i18n;
use crate::tui::theme::{current_theme, Theme};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A single shortcut entry.
struct Shortcut {
    key: &'static str,
    desc: &'static str,
}

/// Render the help popup centered on screen with multi-column shortcuts.
pub fn render(frame: &mut Frame) {
    let theme = current_theme();
    let screen = frame.area();

    let popup_width = (screen.width * 78 / 100).min(screen.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(2) as usize; // borders

    let cols = if inner_width >= 90 {
        3
    } else if inner_width >= 56 {
        2
    } else {
        1
    };
    let col_width = inner_width / cols;
    let sep_width = inner_width.saturating_sub(2);

    let lines = build_lines(cols, col_width, sep_width, &theme);

    // Size popup to fit content: lines + 2 (borders) + 1 (bottom padding)
    let content_height = lines.len() as u16 + 1;
    let popup_height = (content_height + 2).min(screen.height.saturating_sub(2));

    let area = centered_rect_exact(popup_width, popup_height, screen);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_title)
        .title(i18n::tui_help_title())
        .style(theme.popup);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Build all the help content lines.
fn build_lines(
    cols: usize,
    col_width: usize,
    sep_width: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(format!("  {}", i18n::app_name()), theme.popup_title),
        Span::styled(format!("  v{VERSION}"), theme.help_dim),
    ]));
    lines.push(Line::from(Span::styled(
        format!("  {}", i18n::tui_help_description()),
        theme.help_dim,
    )));
    lines.push(Line::from(""));

    let sections: [(&str, &[Shortcut]); 3] = [
        (
            i18n::tui_help_general(),
            &[
                Shortcut { key: "Tab", desc: i18n::tui_help_cycle_panel() },
                Shortcut { key: "^R / r", desc: i18n::tui_help_refresh() },
                Shortcut { key: "F1 / ?", desc: i18n::tui_help_toggle() },
                Shortcut { key: "^C / q", desc: i18n::tui_help_quit() },
            ],
        ),
        (
            i18n::tui_help_compose(),
            &[
                Shortcut { key: "\u{2191} / \u{2193}", desc: i18n::tui_help_next_field() },
                Shortcut { key: "^S", desc: i18n::tui_help_send() },
                Shortcut { key: "^O / a", desc: i18n::tui_help_attach() },
                Shortcut { key: "^L", desc: i18n::tui_help_clear() },
                Shortcut { key: "d", desc: i18n::tui_help_remove() },
            ],
        ),
        (
            i18n::tui_help_mailbox(),
            &[
                Shortcut { key: "j / k", desc: i18n::tui_help_move() },
                Shortcut { key: "Enter", desc: i18n::tui_help_open() },
                Shortcut { key: "PgDn/Up", desc: i18n::tui_help_scroll() },
            ],
        ),
    ];

    for (title, shortcuts) in sections {
        add_section_header(&mut lines, title, theme, sep_width);
        add_shortcuts_columns(&mut lines, shortcuts, cols, col_width, theme);
        lines.push(Line::from(""));
    }

    lines
}

/// Add a section header with a trailing separator line.
fn add_section_header(lines: &mut Vec<Line<'static>>, title: &str, theme: &Theme, width: usize) {
    let remaining = width.saturating_sub(title.width() + 4);
    lines.push(Line::from(vec![
        Span::styled(format!("  {title} "), theme.popup_title),
        Span::styled("\u{2500}".repeat(remaining), theme.help_dim),
    ]));
}

/// Lay out shortcuts in N columns per row.
fn add_shortcuts_columns(
    lines: &mut Vec<Line<'static>>,
    shortcuts: &[Shortcut],
    cols: usize,
    col_width: usize,
    theme: &Theme,
) {
    let key_w: usize = 8;

    for row in shortcuts.chunks(cols) {
        let mut spans: Vec<Span<'static>> = vec![Span::raw("  ")];

        for s in row {
            let desc_avail = col_width.saturating_sub(key_w + 3);
            let desc: String = s.desc.chars().take(desc_avail).collect();
            let padding = col_width.saturating_sub(key_w + 1 + desc.width()).max(1);

            spans.push(Span::styled(format!("{:>key_w$}", s.key), theme.prompt));
            spans.push(Span::styled(format!(" {desc}"), theme.popup));
            spans.push(Span::raw(" ".repeat(padding)));
        }

        lines.push(Line::from(spans));
    }
}

/// Calculate a centered rectangle with exact dimensions, clamped to screen.
fn centered_rect_exact(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_clamped() {
        let screen = Rect::new(0, 0, 40, 10);
        let r = centered_rect_exact(20, 4, screen);
        assert_eq!(r, Rect::new(10, 3, 20, 4));
        let r = centered_rect_exact(100, 100, screen);
        assert_eq!(r, screen);
    }

    #[test]
    fn test_help_has_every_section() {
        let theme = current_theme();
        let lines = build_lines(2, 30, 58, &theme);
        let text: String = lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains(i18n::tui_help_compose()));
        assert!(text.contains(i18n::tui_help_mailbox()));
        assert!(text.contains("^S"));
    }
}
