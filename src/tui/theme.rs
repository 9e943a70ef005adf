//! Color theme definitions for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// A complete color theme for the TUI.
pub struct Theme {
    pub header_bar: Style,
    pub status_bar: Style,
    pub status_success: Style,
    pub status_error: Style,
    pub connected: Style,
    pub disconnected: Style,
    pub list_selected: Style,
    pub list_active: Style,
    pub list_normal: Style,
    pub list_count: Style,
    pub field_label: Style,
    pub field_label_active: Style,
    pub field_value: Style,
    pub message_body: Style,
    pub binary_content: Style,
    pub attachment: Style,
    pub button: Style,
    pub button_disabled: Style,
    pub border: Style,
    pub border_focused: Style,
    pub popup: Style,
    pub popup_title: Style,
    pub prompt: Style,
    pub help_dim: Style,
}

impl Theme {
    /// Dark theme (default).
    pub fn dark() -> Self {
        Self {
            header_bar: Style::default()
                .fg(Color::Rgb(200, 200, 220))
                .bg(Color::Rgb(30, 30, 46)),
            status_bar: Style::default()
                .fg(Color::Rgb(150, 150, 170))
                .bg(Color::Rgb(30, 30, 46)),
            status_success: Style::default()
                .fg(Color::Rgb(120, 220, 140))
                .bg(Color::Rgb(30, 30, 46)),
            status_error: Style::default()
                .fg(Color::Rgb(255, 120, 120))
                .bg(Color::Rgb(30, 30, 46))
                .add_modifier(Modifier::BOLD),
            connected: Style::default()
                .fg(Color::Rgb(120, 220, 140))
                .bg(Color::Rgb(30, 30, 46)),
            disconnected: Style::default()
                .fg(Color::Rgb(255, 120, 120))
                .bg(Color::Rgb(30, 30, 46)),
            list_selected: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(60, 60, 100)),
            list_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            list_normal: Style::default().fg(Color::Rgb(200, 200, 220)),
            list_count: Style::default().fg(Color::Rgb(120, 120, 140)),
            field_label: Style::default().fg(Color::Rgb(130, 170, 255)),
            field_label_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            field_value: Style::default().fg(Color::Rgb(220, 220, 230)),
            message_body: Style::default().fg(Color::Rgb(220, 220, 230)),
            // Placeholder text the server sends for binary files
            binary_content: Style::default().fg(Color::Rgb(102, 126, 234)),
            attachment: Style::default().fg(Color::Green),
            button: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            button_disabled: Style::default()
                .fg(Color::Rgb(100, 100, 120))
                .bg(Color::Rgb(40, 40, 60)),
            border: Style::default().fg(Color::Rgb(80, 80, 100)),
            border_focused: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            popup: Style::default()
                .fg(Color::Rgb(220, 220, 230))
                .bg(Color::Rgb(20, 20, 35)),
            popup_title: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            prompt: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            help_dim: Style::default().fg(Color::Rgb(110, 110, 130)),
        }
    }
}

/// Return the active theme.
pub fn current_theme() -> Theme {
    Theme::dark()
}
