//! Attach prompt that replaces the status bar while it is open.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::current_theme;

/// Render the path input with a cursor marker and key hints.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();
    let input = app.prompt.clone().unwrap_or_default();

    let spans: Vec<Span<'static>> = vec![
        Span::styled(i18n::tui_attach_prompt(), theme.prompt),
        Span::styled(input, theme.message_body),
        Span::styled("_", theme.prompt), // cursor indicator
        Span::styled(
            format!(
                "  Enter:{} Esc:{}",
                i18n::tui_hint_confirm(),
                i18n::tui_hint_cancel()
            ),
            theme.help_dim,
        ),
    ];

    let bar = Paragraph::new(Line::from(spans)).style(theme.status_bar);
    frame.render_widget(bar, area);
}
