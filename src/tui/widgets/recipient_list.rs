//! Recipient mailbox list.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::i18n;
use crate::tui::app::{App, PanelFocus};
use crate::tui::theme::current_theme;

use super::{panel_block, scroll_offset, truncate_str};

/// Render the recipient list with per-mailbox email counts.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();
    let focused = app.focus == PanelFocus::Recipients;

    let block = panel_block(i18n::tui_recipients_title(), focused, &theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 1 || inner.width < 4 {
        return;
    }

    let recipients = app.session.recipients().unwrap_or_default();
    if recipients.is_empty() {
        let empty =
            Paragraph::new(format!(" {}", i18n::tui_no_emails_yet())).style(theme.help_dim);
        frame.render_widget(empty, inner);
        return;
    }

    let height = inner.height as usize;
    let width = inner.width as usize;
    let offset = scroll_offset(app.recipient_selected, height);
    let active = app.session.selected_recipient();

    let lines: Vec<Line> = recipients
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, recipient)| {
            let count = format!(" {} {}", recipient.count, i18n::tui_email_count());
            let name_width = width.saturating_sub(count.len() + 1);
            let name = truncate_str(&recipient.display_name(), name_width);
            let padding = width.saturating_sub(1 + name.width() + count.len());

            let style = if focused && i == app.recipient_selected {
                theme.list_selected
            } else if active == Some(recipient.name.as_str()) {
                theme.list_active
            } else {
                theme.list_normal
            };
            Line::from(vec![
                Span::styled(format!(" {name}{}", " ".repeat(padding)), style),
                Span::styled(count, theme.list_count),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
