//! Global application state for the TUI (the "Model" in Elm architecture).

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::config::Config;
use crate::i18n;
use crate::model::compose::ComposeField;
use crate::runtime::ClientRuntime;
use crate::session::{AppEvent, Session, StatusKind};

/// Which panel currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    Compose,
    Attachments,
    Recipients,
    Emails,
    Content,
}

impl PanelFocus {
    const ORDER: [PanelFocus; 5] = [
        PanelFocus::Compose,
        PanelFocus::Attachments,
        PanelFocus::Recipients,
        PanelFocus::Emails,
        PanelFocus::Content,
    ];

    pub fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|p| *p == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ORDER.iter().position(|p| *p == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Complete TUI state.
pub struct App {
    // ── Data ──────────────────────────────────
    /// Client session: connection, mailbox lists and compose form.
    pub session: Session,
    runtime: ClientRuntime,
    events: mpsc::UnboundedReceiver<AppEvent>,
    /// Server URL, shown in the header.
    pub server_url: String,

    // ── Navigation ────────────────────────────
    pub focus: PanelFocus,
    /// Compose field receiving typed text.
    pub compose_field: ComposeField,
    /// Cursor row in the attachment list.
    pub attachment_selected: usize,
    /// Cursor row in the recipient list.
    pub recipient_selected: usize,
    /// Cursor row in the email list.
    pub email_selected: usize,
    /// Scroll offset for the content view.
    pub content_scroll: u16,

    // ── UI state ──────────────────────────────
    /// Attach prompt input, `Some` while the prompt is open.
    pub prompt: Option<String>,
    /// Help popup visible?
    pub show_help: bool,

    // ── Lifecycle ─────────────────────────────
    pub should_quit: bool,
    pub tick_rate: Duration,
}

impl App {
    /// Create the app around a runtime handle and the event channel it reports on.
    pub fn new(
        config: &Config,
        runtime: ClientRuntime,
        events: mpsc::UnboundedReceiver<AppEvent>,
    ) -> Self {
        let session = Session::new(config.timings())
            .with_default_sender(config.compose.default_sender.clone());

        Self {
            session,
            runtime,
            events,
            server_url: config.server.url.clone(),
            focus: PanelFocus::Compose,
            compose_field: ComposeField::Sender,
            attachment_selected: 0,
            recipient_selected: 0,
            email_selected: 0,
            content_scroll: 0,
            prompt: None,
            show_help: false,
            should_quit: false,
            tick_rate: Duration::from_millis(config.display.tick_rate_ms.max(10)),
        }
    }

    /// Open the first connection.
    pub fn start(&mut self) {
        self.session.start();
        self.flush_commands();
    }

    /// Called every tick: applies pending events, fires timers, forwards commands.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        while let Ok(event) = self.events.try_recv() {
            if let AppEvent::AttachmentLoaded(attachment) = &event {
                let text = format!("{}: {}", i18n::status_attached(), attachment.name);
                self.session.handle_event(now, event);
                self.session.set_status(now, text, StatusKind::Success);
            } else {
                self.session.handle_event(now, event);
            }
        }
        self.session.tick(now);
        self.clamp_cursors();
        self.flush_commands();
    }

    /// Hand every queued session command to the runtime.
    fn flush_commands(&mut self) {
        for command in self.session.take_commands() {
            if let Err(e) = self.runtime.execute(command) {
                tracing::error!(error = %e, "Runtime is gone, command dropped");
            }
        }
    }

    fn clamp_cursors(&mut self) {
        let attachments = self.session.attachments().len();
        self.attachment_selected = self.attachment_selected.min(attachments.saturating_sub(1));

        let recipients = self.session.recipients().map_or(0, |r| r.len());
        self.recipient_selected = self.recipient_selected.min(recipients.saturating_sub(1));

        let emails = self.session.emails().map_or(0, |l| l.entries.len());
        self.email_selected = self.email_selected.min(emails.saturating_sub(1));
    }

    // ── Compose ───────────────────────────────

    /// Append a character to the active compose field.
    pub fn type_char(&mut self, c: char) {
        self.session.form.field_mut(self.compose_field).push(c);
    }

    /// Delete the last character of the active compose field.
    pub fn backspace(&mut self) {
        self.session.form.field_mut(self.compose_field).pop();
    }

    pub fn submit(&mut self) {
        if self.session.submit(Instant::now()) {
            self.attachment_selected = 0;
        }
        self.flush_commands();
    }

    pub fn clear_form(&mut self) {
        self.session.clear_form();
        self.compose_field = ComposeField::Sender;
        self.attachment_selected = 0;
        self.session
            .set_status(Instant::now(), i18n::status_form_cleared(), StatusKind::Success);
    }

    // ── Attachments ───────────────────────────

    pub fn open_prompt(&mut self) {
        self.prompt = Some(String::new());
    }

    /// Stage the files typed in the prompt and close it.
    pub fn confirm_prompt(&mut self) {
        let Some(input) = self.prompt.take() else {
            return;
        };
        let paths = parse_paths(&input);
        tracing::debug!(count = paths.len(), "Staging files");
        self.session.stage_files(paths);
        self.flush_commands();
    }

    pub fn remove_selected_attachment(&mut self) {
        if let Some(removed) = self.session.remove_attachment(self.attachment_selected) {
            self.session.set_status(
                Instant::now(),
                format!("{}: {}", i18n::status_removed(), removed.name),
                StatusKind::Success,
            );
            self.clamp_cursors();
        }
    }

    // ── Mailbox ───────────────────────────────

    pub fn refresh(&mut self) {
        self.session.refresh_inbox();
        self.flush_commands();
    }

    /// Request the email list of the recipient under the cursor.
    pub fn open_recipient(&mut self) {
        let Some(name) = self
            .session
            .recipients()
            .and_then(|list| list.get(self.recipient_selected))
            .map(|r| r.name.clone())
        else {
            return;
        };
        self.session.select_recipient(Instant::now(), &name);
        self.email_selected = 0;
        self.content_scroll = 0;
        self.flush_commands();
    }

    /// Request the content of the email under the cursor.
    pub fn open_email(&mut self) {
        self.session.select_email(Instant::now(), self.email_selected);
        self.content_scroll = 0;
        self.flush_commands();
    }

    /// Move a list cursor by `delta`, staying inside `len` rows.
    pub fn move_cursor(cursor: &mut usize, delta: isize, len: usize) {
        if len == 0 {
            *cursor = 0;
            return;
        }
        let next = (*cursor as isize + delta).clamp(0, len as isize - 1);
        *cursor = next as usize;
    }
}

/// Split prompt input into paths: comma-separated, trimmed, `~` expanded.
pub fn parse_paths(input: &str) -> Vec<PathBuf> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(expand_home)
        .collect()
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::OutboundMessage;
    use crate::session::Command;

    type Harness = (
        App,
        mpsc::UnboundedReceiver<Command>,
        mpsc::UnboundedSender<AppEvent>,
    );

    fn test_app() -> Harness {
        let (runtime, commands) = ClientRuntime::with_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let app = App::new(&Config::default(), runtime, events_rx);
        (app, commands, events_tx)
    }

    #[test]
    fn test_focus_cycle() {
        assert_eq!(PanelFocus::Compose.next(), PanelFocus::Attachments);
        assert_eq!(PanelFocus::Content.next(), PanelFocus::Compose);
        assert_eq!(PanelFocus::Compose.prev(), PanelFocus::Content);
    }

    #[test]
    fn test_parse_paths() {
        let paths = parse_paths(" a.txt, ,/tmp/b.png ,");
        assert_eq!(paths, vec![PathBuf::from("a.txt"), PathBuf::from("/tmp/b.png")]);
        assert!(parse_paths("  ").is_empty());
    }

    #[test]
    fn test_move_cursor_clamps() {
        let mut cursor = 0;
        App::move_cursor(&mut cursor, -1, 3);
        assert_eq!(cursor, 0);
        App::move_cursor(&mut cursor, 5, 3);
        assert_eq!(cursor, 2);
        App::move_cursor(&mut cursor, 1, 0);
        assert_eq!(cursor, 0);
    }

    #[test]
    fn test_start_issues_connect() {
        let (mut app, mut commands, _events) = test_app();
        app.start();
        assert_eq!(commands.try_recv().ok(), Some(Command::Connect));
    }

    #[test]
    fn test_open_event_requests_recipients() {
        let (mut app, mut commands, events) = test_app();
        app.start();
        let _ = commands.try_recv();

        events.send(AppEvent::Opened).unwrap();
        app.tick();
        assert!(app.session.is_connected());
        assert_eq!(
            commands.try_recv().ok(),
            Some(Command::Send(OutboundMessage::GetRecipients))
        );
    }

    #[test]
    fn test_typing_edits_active_field() {
        let (mut app, _commands, _events) = test_app();
        app.compose_field = ComposeField::Subject;
        app.type_char('H');
        app.type_char('i');
        app.type_char('!');
        app.backspace();
        assert_eq!(app.session.form.subject, "Hi");
    }

    #[test]
    fn test_default_sender_survives_clear() {
        let (runtime, _commands) = ClientRuntime::with_channel();
        let (_tx, rx) = mpsc::unbounded_channel();
        let mut config = Config::default();
        config.compose.default_sender = Some("me@example.com".to_string());
        let mut app = App::new(&config, runtime, rx);

        assert_eq!(app.session.form.sender, "me@example.com");
        app.session.form.subject = "draft".to_string();
        app.clear_form();
        assert_eq!(app.session.form.sender, "me@example.com");
        assert!(app.session.form.subject.is_empty());
    }
}
