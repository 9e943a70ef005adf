//! Content view for the selected email.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::i18n;
use crate::tui::app::{App, PanelFocus};
use crate::tui::theme::current_theme;

use super::panel_block;

/// Render the content panel, or the placeholder when nothing is open.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();
    let focused = app.focus == PanelFocus::Content;

    let title = match app.session.content().and_then(|c| c.filename.as_deref()) {
        Some(filename) => format!(" {filename} "),
        None => i18n::tui_content_title().to_string(),
    };
    let block = panel_block(&title, focused, &theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(content) = app.session.content() else {
        let placeholder =
            Paragraph::new(format!(" {}", i18n::tui_select_email())).style(theme.help_dim);
        frame.render_widget(placeholder, inner);
        return;
    };

    let lines: Vec<Line> = if content.is_binary {
        vec![
            Line::from(Span::styled(
                format!("[{}]", i18n::tui_attachment_label()),
                theme.popup_title,
            )),
            Line::from(""),
            Line::from(Span::styled(content.content.clone(), theme.binary_content)),
        ]
    } else {
        content
            .content
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), theme.message_body)))
            .collect()
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.content_scroll, 0));
    frame.render_widget(paragraph, inner);
}
