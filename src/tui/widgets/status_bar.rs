//! Bottom status bar showing transient messages or context-sensitive keyboard hints.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::i18n;
use crate::session::StatusKind;
use crate::tui::app::{App, PanelFocus};
use crate::tui::theme::current_theme;

/// Version string shown at the right edge of the status bar.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render the status bar at the bottom with the status message or hints, and version.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();

    let version_text = format!("v{VERSION} ");
    let version_width = version_text.len() as u16;

    // Split: hints (flexible) | version (fixed)
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(version_width)])
        .split(area);

    let content = if let Some(status) = app.session.status() {
        let style = match status.kind {
            StatusKind::Info => theme.status_bar,
            StatusKind::Success => theme.status_success,
            StatusKind::Error => theme.status_error,
        };
        Line::from(Span::styled(format!(" {}", status.text), style))
    } else {
        let mut spans = Vec::new();
        for (i, (key, desc)) in build_hints(app).iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" ", theme.status_bar));
            }
            spans.push(Span::styled(format!(" {key}"), theme.prompt));
            spans.push(Span::styled(format!(":{desc}"), theme.status_bar));
        }
        Line::from(spans)
    };

    let bar = Paragraph::new(content).style(theme.status_bar);
    frame.render_widget(bar, chunks[0]);

    let version = Paragraph::new(Line::from(Span::styled(version_text, theme.border)))
        .alignment(Alignment::Right)
        .style(theme.status_bar);
    frame.render_widget(version, chunks[1]);
}

/// Return context-sensitive hint pairs (key, description) for the active panel.
fn build_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    let mut hints = Vec::new();

    match app.focus {
        PanelFocus::Compose => {
            hints.push(("\u{2191}/\u{2193}", i18n::tui_hint_field()));
            hints.push(("^S", i18n::tui_hint_send()));
            hints.push(("^O", i18n::tui_hint_attach()));
            hints.push(("^L", i18n::tui_hint_clear()));
            hints.push(("^R", i18n::tui_hint_refresh()));
            hints.push(("Tab", i18n::tui_hint_panel()));
            hints.push(("F1", i18n::tui_hint_help()));
            hints.push(("^C", i18n::tui_hint_quit()));
        }
        PanelFocus::Attachments => {
            hints.push(("j/k", i18n::tui_hint_nav()));
            hints.push(("d", i18n::tui_hint_remove()));
            hints.push(("a", i18n::tui_hint_attach()));
            hints.push(("Tab", i18n::tui_hint_panel()));
            hints.push(("?", i18n::tui_hint_help()));
            hints.push(("q", i18n::tui_hint_quit()));
        }
        PanelFocus::Recipients | PanelFocus::Emails => {
            hints.push(("j/k", i18n::tui_hint_nav()));
            hints.push(("Enter", i18n::tui_hint_select()));
            hints.push(("r", i18n::tui_hint_refresh()));
            hints.push(("Tab", i18n::tui_hint_panel()));
            hints.push(("?", i18n::tui_hint_help()));
            hints.push(("q", i18n::tui_hint_quit()));
        }
        PanelFocus::Content => {
            hints.push(("j/k", i18n::tui_hint_scroll()));
            hints.push(("r", i18n::tui_hint_refresh()));
            hints.push(("Tab", i18n::tui_hint_panel()));
            hints.push(("?", i18n::tui_hint_help()));
            hints.push(("q", i18n::tui_hint_quit()));
        }
    }

    hints
}
