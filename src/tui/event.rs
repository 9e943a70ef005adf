//! Keyboard and input event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, PanelFocus};
use crate::model::compose::ComposeField;

/// Process a key event and update the application state.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    if key.kind == KeyEventKind::Release {
        return Ok(());
    }

    // ── Attach prompt (captures all keys) ─────────────────
    if app.prompt.is_some() {
        handle_prompt_input(app, key);
        return Ok(());
    }

    // ── Help popup (captures all keys) ────────────────────
    if app.show_help {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1) => app.show_help = false,
            _ => {}
        }
        return Ok(());
    }

    // ── Always-available shortcuts ────────────────────────
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.should_quit = true,
            KeyCode::Char('s') => app.submit(),
            KeyCode::Char('l') => app.clear_form(),
            KeyCode::Char('o') => app.open_prompt(),
            KeyCode::Char('r') => app.refresh(),
            _ => {}
        }
        return Ok(());
    }

    match key.code {
        KeyCode::F(1) => {
            app.show_help = true;
            return Ok(());
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return Ok(());
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return Ok(());
        }
        _ => {}
    }

    // ── Panel-specific shortcuts ──────────────────────────
    match app.focus {
        PanelFocus::Compose => handle_compose_keys(app, key),
        PanelFocus::Attachments => handle_attachment_keys(app, key),
        PanelFocus::Recipients => handle_recipient_keys(app, key),
        PanelFocus::Emails => handle_email_keys(app, key),
        PanelFocus::Content => handle_content_keys(app, key),
    }

    Ok(())
}

/// Keys shared by the panels that do not take text input.
fn handle_common_keys(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('a') => app.open_prompt(),
        _ => return false,
    }
    true
}

/// Key handling when the compose form has focus: printable keys edit the active field.
fn handle_compose_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.compose_field = app.compose_field.prev(),
        KeyCode::Down => app.compose_field = app.compose_field.next(),
        KeyCode::Enter => {
            if app.compose_field == ComposeField::Body {
                app.type_char('\n');
            } else {
                app.compose_field = app.compose_field.next();
            }
        }
        KeyCode::Backspace => app.backspace(),
        KeyCode::Esc => app.focus = PanelFocus::Recipients,
        KeyCode::Char(c) => app.type_char(c),
        _ => {}
    }
}

fn handle_attachment_keys(app: &mut App, key: KeyEvent) {
    if handle_common_keys(app, key) {
        return;
    }
    let len = app.session.attachments().len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => App::move_cursor(&mut app.attachment_selected, 1, len),
        KeyCode::Char('k') | KeyCode::Up => App::move_cursor(&mut app.attachment_selected, -1, len),
        KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => {
            app.remove_selected_attachment();
        }
        KeyCode::Esc => app.focus = PanelFocus::Compose,
        _ => {}
    }
}

fn handle_recipient_keys(app: &mut App, key: KeyEvent) {
    if handle_common_keys(app, key) {
        return;
    }
    let len = app.session.recipients().map_or(0, |r| r.len());
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => App::move_cursor(&mut app.recipient_selected, 1, len),
        KeyCode::Char('k') | KeyCode::Up => App::move_cursor(&mut app.recipient_selected, -1, len),
        KeyCode::Char('g') | KeyCode::Home => app.recipient_selected = 0,
        KeyCode::Char('G') | KeyCode::End => app.recipient_selected = len.saturating_sub(1),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
            app.open_recipient();
            app.focus = PanelFocus::Emails;
        }
        _ => {}
    }
}

fn handle_email_keys(app: &mut App, key: KeyEvent) {
    if handle_common_keys(app, key) {
        return;
    }
    let len = app.session.emails().map_or(0, |l| l.entries.len());
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => App::move_cursor(&mut app.email_selected, 1, len),
        KeyCode::Char('k') | KeyCode::Up => App::move_cursor(&mut app.email_selected, -1, len),
        KeyCode::Char('g') | KeyCode::Home => app.email_selected = 0,
        KeyCode::Char('G') | KeyCode::End => app.email_selected = len.saturating_sub(1),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
            if len > 0 {
                app.open_email();
                app.focus = PanelFocus::Content;
            }
        }
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left => app.focus = PanelFocus::Recipients,
        _ => {}
    }
}

fn handle_content_keys(app: &mut App, key: KeyEvent) {
    if handle_common_keys(app, key) {
        return;
    }
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.content_scroll = app.content_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.content_scroll = app.content_scroll.saturating_sub(1);
        }
        KeyCode::PageDown | KeyCode::Char(' ') => {
            app.content_scroll = app.content_scroll.saturating_add(10);
        }
        KeyCode::PageUp => app.content_scroll = app.content_scroll.saturating_sub(10),
        KeyCode::Char('g') | KeyCode::Home => app.content_scroll = 0,
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left => app.focus = PanelFocus::Emails,
        _ => {}
    }
}

/// Attach prompt input: Enter stages the typed paths, Esc cancels.
fn handle_prompt_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.confirm_prompt(),
        KeyCode::Esc => app.prompt = None,
        KeyCode::Backspace => {
            if let Some(input) = app.prompt.as_mut() {
                input.pop();
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(input) = app.prompt.as_mut() {
                input.push(c);
            }
        }
        _ => {}
    }
}
