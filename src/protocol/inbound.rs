//! Replies and notifications sent from the server to the client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::model::recipient::{EmailContent, EmailEntry, RecipientSummary};

/// A server frame, tagged by `type`.
///
/// Types this client does not know decode to [`InboundMessage::Unknown`]
/// and are ignored by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Greeting sent right after the socket opens.
    Connected {
        #[serde(default)]
        message: String,
    },
    /// The email handed to `send_email` was delivered.
    SendSuccess {
        #[serde(default)]
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },
    /// Reply to `get_recipients`.
    Recipients { data: Vec<RecipientSummary> },
    /// Reply to `get_emails`.
    Emails {
        data: Vec<EmailEntry>,
        recipient: String,
    },
    /// Reply to `get_email_content`.
    EmailContent(EmailContent),
    /// Some client delivered mail; recipient lists are stale.
    InboxUpdated {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// A request failed on the server.
    Error {
        #[serde(default)]
        message: String,
    },
    #[serde(other)]
    Unknown,
}

impl InboundMessage {
    /// Decode a text frame.
    ///
    /// Valid JSON without a string `type` is treated as an unknown message.
    /// A known type with a malformed payload is an error.
    pub fn parse(frame: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(frame)?;
        if value.get("type").and_then(Value::as_str).is_none() {
            return Ok(Self::Unknown);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::SendSuccess { .. } => "send_success",
            Self::Recipients { .. } => "recipients",
            Self::Emails { .. } => "emails",
            Self::EmailContent(_) => "email_content",
            Self::InboxUpdated { .. } => "inbox_updated",
            Self::Error { .. } => "error",
            Self::Unknown => "unknown",
        }
    }
}
