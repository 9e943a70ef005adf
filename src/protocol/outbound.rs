//! Requests sent from the client to the server.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::compose::OutgoingEmail;

/// A request frame, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Submit an email for delivery.
    SendEmail(OutgoingEmail),
    /// List recipient mailboxes.
    GetRecipients,
    /// List the files in one recipient mailbox.
    GetEmails { recipient: String },
    /// Fetch one file from a recipient mailbox.
    GetEmailContent { recipient: String, filename: String },
}

impl OutboundMessage {
    /// The `type` tag of this message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SendEmail(_) => "send_email",
            Self::GetRecipients => "get_recipients",
            Self::GetEmails { .. } => "get_emails",
            Self::GetEmailContent { .. } => "get_email_content",
        }
    }

    /// Encode as a JSON text frame.
    pub fn to_frame(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
