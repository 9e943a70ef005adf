//! Top header bar showing the server and the connection indicator.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::i18n;
use crate::session::ConnectionState;
use crate::tui::app::App;
use crate::tui::theme::current_theme;

/// Render the top header bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();
    let session = &app.session;

    let (indicator, indicator_style) = match session.connection() {
        ConnectionState::Connected => (
            format!(" \u{25cf} {}", i18n::tui_connected()),
            theme.connected,
        ),
        ConnectionState::Connecting => (
            format!(" \u{25cb} {}", i18n::tui_connecting()),
            theme.header_bar,
        ),
        ConnectionState::Disconnected => (
            format!(" \u{25cb} {}", i18n::tui_disconnected()),
            theme.disconnected,
        ),
    };

    let mut spans = vec![
        Span::styled(format!(" {}", i18n::app_name()), theme.popup_title),
        Span::styled(format!(" | {}", app.server_url), theme.header_bar),
        Span::styled(" |", theme.header_bar),
        Span::styled(indicator, indicator_style),
    ];

    if let Some(recipients) = session.recipients() {
        let total: u64 = recipients.iter().map(|r| r.count).sum();
        spans.push(Span::styled(
            format!(" | {total} {}", i18n::tui_email_count()),
            theme.header_bar,
        ));
    }

    // Right-aligned help hint
    let left_len: usize = spans.iter().map(|s| s.content.width()).sum();
    let right_text = " [F1] ? ";
    let width = area.width as usize;
    if width > left_len + right_text.len() {
        spans.push(Span::styled(
            " ".repeat(width - left_len - right_text.len()),
            theme.header_bar,
        ));
    }
    spans.push(Span::styled(right_text, theme.header_bar));

    let bar = Paragraph::new(Line::from(spans)).style(theme.header_bar);
    frame.render_widget(bar, area);
}
