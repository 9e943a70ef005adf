//! Staged attachment list.

use humansize::{format_size, BINARY};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::i18n;
use crate::tui::app::{App, PanelFocus};
use crate::tui::theme::current_theme;

use super::{panel_block, scroll_offset, truncate_str};

/// Render the attachments panel: a summary line then one row per file.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();
    let focused = app.focus == PanelFocus::Attachments;

    let block = panel_block(i18n::tui_attachments_title(), focused, &theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 1 {
        return;
    }

    let attachments = app.session.attachments();
    let summary = if attachments.is_empty() {
        i18n::tui_no_attachments().to_string()
    } else {
        format!("{} {}", attachments.len(), i18n::tui_files_attached())
    };
    let mut lines = vec![Line::from(Span::styled(format!(" {summary}"), theme.help_dim))];

    let rows = (inner.height as usize).saturating_sub(1);
    let offset = scroll_offset(app.attachment_selected, rows);
    let width = inner.width as usize;

    for (i, attachment) in attachments.iter().enumerate().skip(offset).take(rows) {
        let size = format_size(attachment.byte_len(), BINARY);
        let meta = format!(" {size} {}", attachment.mime_type());
        let name_width = width.saturating_sub(meta.len() + 3);
        let style = if focused && i == app.attachment_selected {
            theme.list_selected
        } else {
            theme.attachment
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!(" + {}", truncate_str(&attachment.name, name_width)),
                style,
            ),
            Span::styled(meta, theme.list_count),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
