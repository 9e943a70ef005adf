//! Mailbox client session: connection state machine, message dispatch and
//! local state.
//!
//! The session never touches the network or the clock on its own. Callers
//! feed it [`AppEvent`]s and the current [`Instant`], and drain the
//! [`Command`]s it queues with [`Session::take_commands`]. Timers (reconnect
//! delay, send cooldown, status expiry) are deadlines checked by
//! [`Session::tick`].

pub mod status;

use std::path::PathBuf;
use std::time::Instant;

pub use status::{Status, StatusKind};

use crate::config::Timings;
use crate::i18n;
use crate::model::attachment::Attachment;
use crate::model::compose::ComposeForm;
use crate::model::recipient::{EmailContent, EmailList, RecipientSummary};
use crate::protocol::{InboundMessage, OutboundMessage};

/// Lifecycle of the single server connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Work the session asks the runtime to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a new connection, replacing any previous socket.
    Connect,
    /// Write one frame on the current socket.
    Send(OutboundMessage),
    /// Read files and stage them as attachments.
    LoadAttachments(Vec<PathBuf>),
}

/// Something that happened outside the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The socket opened.
    Opened,
    /// A text frame arrived.
    Frame(String),
    /// The transport reported an error. Always followed by [`AppEvent::Closed`].
    TransportError(String),
    /// The socket closed (or a connection attempt failed).
    Closed,
    /// A file finished reading.
    AttachmentLoaded(Attachment),
    /// A file could not be read.
    AttachmentFailed { path: PathBuf, error: String },
}

/// All client-side state for one run of the client.
pub struct Session {
    timings: Timings,

    // ── Connection ────────────────────────────
    connection: ConnectionState,
    reconnect_at: Option<Instant>,
    connect_attempts: u64,

    // ── Send control ──────────────────────────
    send_enabled: bool,
    send_reenable_at: Option<Instant>,

    // ── Compose ───────────────────────────────
    /// Compose form text, edited directly by the UI.
    pub form: ComposeForm,
    default_sender: Option<String>,
    attachments: Vec<Attachment>,

    // ── Mailbox browsing ──────────────────────
    recipients: Option<Vec<RecipientSummary>>,
    selected_recipient: Option<String>,
    emails: Option<EmailList>,
    selected_email: Option<String>,
    /// Mailbox the selected email was requested from.
    content_source: Option<String>,
    content: Option<EmailContent>,

    status: Option<Status>,
    outbox: Vec<Command>,
}

impl Session {
    pub fn new(timings: Timings) -> Self {
        Self {
            timings,
            connection: ConnectionState::Disconnected,
            reconnect_at: None,
            connect_attempts: 0,
            send_enabled: false,
            send_reenable_at: None,
            form: ComposeForm::default(),
            default_sender: None,
            attachments: Vec::new(),
            recipients: None,
            selected_recipient: None,
            emails: None,
            selected_email: None,
            content_source: None,
            content: None,
            status: None,
            outbox: Vec::new(),
        }
    }

    /// Prefill the sender field now and after every form clear.
    pub fn with_default_sender(mut self, sender: Option<String>) -> Self {
        self.default_sender = sender.filter(|s| !s.trim().is_empty());
        self.restore_sender();
        self
    }

    /// Begin the first connection attempt.
    pub fn start(&mut self) {
        self.begin_connect();
    }

    // ── Accessors ─────────────────────────────

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn is_connected(&self) -> bool {
        self.connection == ConnectionState::Connected
    }

    /// Number of connection attempts issued so far.
    pub fn connect_attempts(&self) -> u64 {
        self.connect_attempts
    }

    /// When the next automatic connection attempt is due, if one is pending.
    pub fn reconnect_at(&self) -> Option<Instant> {
        self.reconnect_at
    }

    pub fn is_send_enabled(&self) -> bool {
        self.send_enabled
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Last recipient list received, `None` until the first reply.
    pub fn recipients(&self) -> Option<&[RecipientSummary]> {
        self.recipients.as_deref()
    }

    pub fn selected_recipient(&self) -> Option<&str> {
        self.selected_recipient.as_deref()
    }

    /// Last email list received, with the recipient it belongs to.
    pub fn emails(&self) -> Option<&EmailList> {
        self.emails.as_ref()
    }

    pub fn selected_email(&self) -> Option<&str> {
        self.selected_email.as_deref()
    }

    /// Content of the selected email, `None` shows the placeholder.
    pub fn content(&self) -> Option<&EmailContent> {
        self.content.as_ref()
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// Drain the commands queued since the last call.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.outbox)
    }

    // ── Events ────────────────────────────────

    /// Apply one external event.
    pub fn handle_event(&mut self, now: Instant, event: AppEvent) {
        match event {
            AppEvent::Opened => self.on_open(now),
            AppEvent::Frame(text) => self.handle_frame(now, &text),
            AppEvent::TransportError(error) => self.on_transport_error(now, &error),
            AppEvent::Closed => self.on_close(now),
            AppEvent::AttachmentLoaded(attachment) => {
                tracing::debug!(name = %attachment.name, "Attachment staged");
                self.attachments.push(attachment);
            }
            AppEvent::AttachmentFailed { path, error } => {
                tracing::warn!(path = %path.display(), error = %error, "Attachment read failed");
                self.set_status(
                    now,
                    format!("{}: {}", i18n::err_attachment_read(), path.display()),
                    StatusKind::Error,
                );
            }
        }
    }

    /// Fire any timers due at `now`.
    pub fn tick(&mut self, now: Instant) {
        if self.reconnect_at.is_some_and(|at| now >= at) {
            self.reconnect_at = None;
            self.begin_connect();
        }

        if self.send_reenable_at.is_some_and(|at| now >= at) {
            self.send_reenable_at = None;
            self.send_enabled = true;
        }

        if self
            .status
            .as_ref()
            .is_some_and(|s| s.is_expired(now, self.timings.status_ttl))
        {
            self.status = None;
        }
    }

    fn begin_connect(&mut self) {
        self.connection = ConnectionState::Connecting;
        self.connect_attempts += 1;
        tracing::info!(attempt = self.connect_attempts, "Connecting");
        self.outbox.push(Command::Connect);
    }

    fn on_open(&mut self, now: Instant) {
        tracing::info!("Connected to server");
        self.connection = ConnectionState::Connected;
        self.reconnect_at = None;
        self.send_enabled = true;
        self.set_status(now, i18n::status_connected(), StatusKind::Success);
        self.refresh_inbox();
    }

    fn on_transport_error(&mut self, now: Instant, error: &str) {
        tracing::warn!(error = %error, "Connection error");
        self.connection = ConnectionState::Disconnected;
        self.send_enabled = false;
        self.set_status(now, i18n::status_connection_error(), StatusKind::Error);
    }

    fn on_close(&mut self, now: Instant) {
        tracing::info!(
            delay_ms = self.timings.reconnect_delay.as_millis() as u64,
            "Disconnected from server, scheduling reconnect"
        );
        self.connection = ConnectionState::Disconnected;
        self.send_enabled = false;
        self.set_status(now, i18n::status_disconnected(), StatusKind::Error);
        self.reconnect_at = Some(now + self.timings.reconnect_delay);
    }

    /// Decode a text frame and dispatch it. Undecodable frames are logged and dropped.
    pub fn handle_frame(&mut self, now: Instant, frame: &str) {
        match InboundMessage::parse(frame) {
            Ok(message) => self.dispatch(now, message),
            Err(e) => tracing::warn!(error = %e, "Ignoring undecodable frame"),
        }
    }

    /// Route one inbound message to its handler.
    pub fn dispatch(&mut self, now: Instant, message: InboundMessage) {
        tracing::debug!(kind = message.kind(), "Inbound message");
        match message {
            InboundMessage::Connected { message } => {
                tracing::info!(%message, "Server greeting");
            }
            InboundMessage::SendSuccess { message, .. } => {
                self.set_status(now, message, StatusKind::Success);
                self.clear_form();
                self.refresh_inbox();
            }
            InboundMessage::Recipients { data } => {
                self.recipients = Some(data);
            }
            InboundMessage::Emails { data, recipient } => {
                self.emails = Some(EmailList {
                    recipient,
                    entries: data,
                });
            }
            InboundMessage::EmailContent(content) => {
                if self.matches_selection(&content) {
                    self.content = Some(content);
                } else {
                    tracing::debug!(
                        recipient = ?content.recipient,
                        filename = ?content.filename,
                        "Dropping content reply for a stale selection"
                    );
                }
            }
            InboundMessage::InboxUpdated { .. } => {
                self.refresh_inbox();
            }
            InboundMessage::Error { message } => {
                tracing::warn!(%message, "Server reported an error");
                self.set_status(now, message, StatusKind::Error);
            }
            InboundMessage::Unknown => {}
        }
    }

    // ── User actions ──────────────────────────

    /// Re-request the recipient list. Skipped while disconnected.
    pub fn refresh_inbox(&mut self) {
        if self.is_connected() {
            self.outbox
                .push(Command::Send(OutboundMessage::GetRecipients));
        } else {
            tracing::debug!("Not connected, skipping inbox refresh");
        }
    }

    /// Select a recipient mailbox and request its email list.
    pub fn select_recipient(&mut self, now: Instant, recipient: &str) {
        self.selected_recipient = Some(recipient.to_string());
        self.selected_email = None;
        self.content_source = None;
        self.content = None;
        self.request(
            now,
            OutboundMessage::GetEmails {
                recipient: recipient.to_string(),
            },
        );
    }

    /// Select an entry of the displayed email list and request its content.
    ///
    /// The request names the recipient the list was returned for, not the
    /// current recipient selection, so a late reply never mixes mailboxes.
    pub fn select_email(&mut self, now: Instant, index: usize) {
        let Some(list) = &self.emails else {
            return;
        };
        let Some(entry) = list.entries.get(index) else {
            return;
        };
        let message = OutboundMessage::GetEmailContent {
            recipient: list.recipient.clone(),
            filename: entry.filename.clone(),
        };
        self.selected_email = Some(entry.filename.clone());
        self.content_source = Some(list.recipient.clone());
        self.request(now, message);
    }

    /// A content reply is shown only for the email currently selected.
    /// Fields the server does not echo are not compared.
    fn matches_selection(&self, content: &EmailContent) -> bool {
        let Some(selected) = &self.selected_email else {
            return false;
        };
        let same_file = content.filename.as_ref().is_none_or(|f| f == selected);
        let same_mailbox = match (&content.recipient, &self.content_source) {
            (Some(echoed), Some(source)) => echoed == source,
            _ => true,
        };
        same_file && same_mailbox
    }

    /// Validate the compose form and send it.
    ///
    /// Returns `true` if a `send_email` message was queued. After a send the
    /// send control stays disabled for the configured cooldown, whatever the
    /// server does.
    pub fn submit(&mut self, now: Instant) -> bool {
        if !self.send_enabled {
            tracing::debug!("Send control disabled, ignoring submit");
            return false;
        }

        let email = match self.form.validate(&self.attachments) {
            Ok(email) => email,
            Err(e) => {
                self.set_status(now, e.to_string(), StatusKind::Error);
                return false;
            }
        };

        if !self.is_connected() {
            self.set_status(now, i18n::err_not_connected(), StatusKind::Error);
            return false;
        }

        tracing::info!(
            recipients = email.recipients.len(),
            attachments = email.attachments.len(),
            "Sending email"
        );
        self.outbox
            .push(Command::Send(OutboundMessage::SendEmail(email)));
        self.send_enabled = false;
        self.send_reenable_at = Some(now + self.timings.send_cooldown);
        self.set_status(now, i18n::status_sending(), StatusKind::Info);
        true
    }

    /// Empty the compose form and drop all staged attachments.
    pub fn clear_form(&mut self) {
        self.form.clear();
        self.attachments.clear();
        self.restore_sender();
    }

    fn restore_sender(&mut self) {
        if let Some(sender) = &self.default_sender {
            self.form.sender = sender.clone();
        }
    }

    /// Ask the runtime to read `paths` and stage them as they complete.
    pub fn stage_files(&mut self, paths: Vec<PathBuf>) {
        if paths.is_empty() {
            return;
        }
        self.outbox.push(Command::LoadAttachments(paths));
    }

    /// Remove a staged attachment by position.
    pub fn remove_attachment(&mut self, index: usize) -> Option<Attachment> {
        if index < self.attachments.len() {
            Some(self.attachments.remove(index))
        } else {
            None
        }
    }

    /// Show a status message.
    pub fn set_status(&mut self, now: Instant, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(Status::new(text, kind, now));
    }

    fn request(&mut self, now: Instant, message: OutboundMessage) {
        if self.is_connected() {
            self.outbox.push(Command::Send(message));
        } else {
            tracing::debug!(kind = message.kind(), "Not connected, dropping request");
            self.set_status(now, i18n::err_not_connected(), StatusKind::Error);
        }
    }
}
