//! Email list of the selected recipient.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::i18n;
use crate::model::recipient::display_name;
use crate::tui::app::{App, PanelFocus};
use crate::tui::theme::current_theme;

use super::{panel_block, scroll_offset, truncate_str};

/// Render the email list. Attachment files are marked and colored.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();
    let focused = app.focus == PanelFocus::Emails;

    let title = match app.session.emails() {
        Some(list) => format!(" {} ", display_name(&list.recipient)),
        None => i18n::tui_emails_title().to_string(),
    };
    let block = panel_block(&title, focused, &theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 1 || inner.width < 4 {
        return;
    }

    let Some(list) = app.session.emails() else {
        let hint =
            Paragraph::new(format!(" {}", i18n::tui_select_recipient())).style(theme.help_dim);
        frame.render_widget(hint, inner);
        return;
    };

    if list.entries.is_empty() {
        let empty = Paragraph::new(format!(" {}", i18n::tui_no_emails())).style(theme.help_dim);
        frame.render_widget(empty, inner);
        return;
    }

    let height = inner.height as usize;
    let width = (inner.width as usize).saturating_sub(3);
    let offset = scroll_offset(app.email_selected, height);
    let opened = app.session.selected_email();

    let lines: Vec<Line> = list
        .entries
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, entry)| {
            let marker = if entry.is_attachment { "+" } else { " " };
            let style = if focused && i == app.email_selected {
                theme.list_selected
            } else if opened == Some(entry.filename.as_str()) {
                theme.list_active
            } else if entry.is_attachment {
                theme.attachment
            } else {
                theme.list_normal
            };
            Line::from(Span::styled(
                format!(" {marker}{}", truncate_str(entry.label(), width)),
                style,
            ))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
