//! Async side of the client: network connections and file reads.
//!
//! The runtime executes the [`Command`]s a session queues and reports what
//! happened as [`AppEvent`]s on a single channel, so the UI thread remains
//! the only consumer of events and the only owner of session state.

pub mod connection;

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::model::attachment::Attachment;
use crate::protocol::OutboundMessage;
use crate::session::{AppEvent, Command};

/// Where and how to connect.
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub url: String,
    pub connect_timeout: Duration,
}

impl From<&Config> for RuntimeSettings {
    fn from(config: &Config) -> Self {
        Self {
            url: config.server.url.clone(),
            connect_timeout: Duration::from_millis(config.server.connect_timeout_ms),
        }
    }
}

/// Handle for submitting commands to the running command loop.
#[derive(Clone)]
pub struct ClientRuntime {
    commands: mpsc::UnboundedSender<Command>,
}

impl ClientRuntime {
    /// Start the command loop on `handle`.
    pub fn spawn(
        handle: &Handle,
        settings: RuntimeSettings,
        events: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let (runtime, rx) = Self::with_channel();
        handle.spawn(command_loop(settings, rx, events));
        runtime
    }

    /// A handle whose commands are delivered to the returned receiver
    /// instead of a command loop.
    pub fn with_channel() -> (Self, mpsc::UnboundedReceiver<Command>) {
        let (commands, rx) = mpsc::unbounded_channel();
        (Self { commands }, rx)
    }

    /// Queue one command.
    pub fn execute(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| ClientError::ChannelClosed)
    }
}

async fn command_loop(
    settings: RuntimeSettings,
    mut commands: mpsc::UnboundedReceiver<Command>,
    events: mpsc::UnboundedSender<AppEvent>,
) {
    // Writer for the newest connection. Replacing it drops the previous
    // sender, which makes the previous connection task close its socket.
    let mut socket: Option<mpsc::UnboundedSender<OutboundMessage>> = None;

    while let Some(command) = commands.recv().await {
        match command {
            Command::Connect => {
                let (tx, rx) = mpsc::unbounded_channel();
                if socket.replace(tx).is_some() {
                    tracing::debug!("Replacing previous socket");
                }
                tokio::spawn(connection::run(
                    settings.url.clone(),
                    settings.connect_timeout,
                    rx,
                    events.clone(),
                ));
            }
            Command::Send(message) => {
                let kind = message.kind();
                let queued = socket.as_ref().is_some_and(|tx| tx.send(message).is_ok());
                if !queued {
                    tracing::warn!(kind, "No open socket, dropping message");
                }
            }
            Command::LoadAttachments(paths) => {
                for path in paths {
                    let events = events.clone();
                    tokio::spawn(async move {
                        let event = match Attachment::load(&path).await {
                            Ok(attachment) => AppEvent::AttachmentLoaded(attachment),
                            Err(e) => AppEvent::AttachmentFailed {
                                path,
                                error: e.to_string(),
                            },
                        };
                        let _ = events.send(event);
                    });
                }
            }
        }
    }

    tracing::debug!("Command channel closed, runtime loop exiting");
}
