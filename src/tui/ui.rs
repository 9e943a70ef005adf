//! Main render function that dispatches to widgets.

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use super::app::App;
use super::widgets;

/// Render the entire TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Vertical layout: header (1) + content (flex) + status (1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header bar
            Constraint::Min(8),    // content
            Constraint::Length(1), // status bar or attach prompt
        ])
        .split(size);

    widgets::header_bar::render(frame, app, vertical[0]);

    // Compose on the left, mailbox on the right
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(vertical[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(7)])
        .split(columns[0]);
    widgets::compose::render(frame, app, left[0]);
    widgets::attachments::render(frame, app, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(columns[1]);
    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(right[0]);
    widgets::recipient_list::render(frame, app, lists[0]);
    widgets::email_list::render(frame, app, lists[1]);
    widgets::content::render(frame, app, right[1]);

    if app.prompt.is_some() {
        widgets::prompt_bar::render(frame, app, vertical[2]);
    } else {
        widgets::status_bar::render(frame, app, vertical[2]);
    }

    // Popups (rendered on top of everything)
    if app.show_help {
        widgets::help_popup::render(frame);
    }
}
