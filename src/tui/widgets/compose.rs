//! Compose form: four labeled fields and the send control.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::i18n;
use crate::model::compose::ComposeField;
use crate::tui::app::{App, PanelFocus};
use crate::tui::theme::{current_theme, Theme};

use super::{panel_block, truncate_str};

/// Width of the label column, including the trailing ": ".
const LABEL_WIDTH: usize = 10;

/// Render the compose panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();
    let focused = app.focus == PanelFocus::Compose;

    let block = panel_block(i18n::tui_compose_title(), focused, &theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 5 || inner.width < (LABEL_WIDTH as u16 + 4) {
        return;
    }

    // Single-line fields, body (flex), send control
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let value_width = (inner.width as usize).saturating_sub(LABEL_WIDTH + 1);

    for (i, field) in ComposeField::ALL.iter().take(3).enumerate() {
        let active = focused && app.compose_field == *field;
        let value = app.session.form.field(*field);
        // Keep the end of long values visible while typing
        let shown = if active {
            tail(value, value_width.saturating_sub(1))
        } else {
            truncate_str(value, value_width)
        };
        let mut spans = vec![
            label_span(*field, active, &theme),
            Span::styled(shown, theme.field_value),
        ];
        if active {
            spans.push(Span::styled("_", theme.prompt));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), rows[i]);
    }

    // Body: label on its own line, then wrapped text
    let body_active = focused && app.compose_field == ComposeField::Body;
    let mut lines = vec![Line::from(label_span(ComposeField::Body, body_active, &theme))];
    let body = &app.session.form.body;
    let mut body_lines: Vec<Line> = body
        .split('\n')
        .map(|l| Line::from(Span::styled(format!("  {l}"), theme.message_body)))
        .collect();
    if body_active {
        if let Some(last) = body_lines.last_mut() {
            last.spans.push(Span::styled("_", theme.prompt));
        }
    }
    lines.extend(body_lines);

    // Show the bottom of a long body
    let body_height = rows[3].height as usize;
    let scroll = lines.len().saturating_sub(body_height) as u16;
    let body_widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(body_widget, rows[3]);

    let (button, style) = if app.session.is_send_enabled() {
        (i18n::tui_send_ready(), theme.button)
    } else {
        (i18n::tui_send_busy(), theme.button_disabled)
    };
    let send_line = Line::from(vec![
        Span::styled(button, style),
        Span::styled("  ^S", theme.help_dim),
    ]);
    frame.render_widget(Paragraph::new(send_line), rows[4]);
}

fn label_span(field: ComposeField, active: bool, theme: &Theme) -> Span<'static> {
    let style = if active {
        theme.field_label_active
    } else {
        theme.field_label
    };
    let label = format!("{}: ", field.label());
    Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), style)
}

/// The last `max` characters of `s`.
fn tail(s: &str, max: usize) -> String {
    let count = s.chars().count();
    s.chars().skip(count.saturating_sub(max)).collect()
}
