//! The compose form and its validation.

use thiserror::Error;

use super::attachment::Attachment;
use crate::i18n;

/// The four editable fields of the compose form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeField {
    Sender,
    Recipients,
    Subject,
    Body,
}

impl ComposeField {
    pub const ALL: [ComposeField; 4] = [
        ComposeField::Sender,
        ComposeField::Recipients,
        ComposeField::Subject,
        ComposeField::Body,
    ];

    /// Next field in tab order (wraps around).
    pub fn next(self) -> Self {
        match self {
            Self::Sender => Self::Recipients,
            Self::Recipients => Self::Subject,
            Self::Subject => Self::Body,
            Self::Body => Self::Sender,
        }
    }

    /// Previous field in tab order (wraps around).
    pub fn prev(self) -> Self {
        match self {
            Self::Sender => Self::Body,
            Self::Recipients => Self::Sender,
            Self::Subject => Self::Recipients,
            Self::Body => Self::Subject,
        }
    }

    /// Localized label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sender => i18n::tui_field_sender(),
            Self::Recipients => i18n::tui_field_recipients(),
            Self::Subject => i18n::tui_field_subject(),
            Self::Body => i18n::tui_field_body(),
        }
    }
}

/// Why a compose form could not be sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// Sender or the raw recipients text is blank.
    #[error("{}", i18n::err_sender_and_recipients_required())]
    MissingSenderOrRecipients,

    /// The recipients text contained only separators and whitespace.
    #[error("{}", i18n::err_recipient_required())]
    NoRecipients,
}

/// A validated email, ready to go on the wire.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OutgoingEmail {
    pub sender: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<Attachment>,
}

/// Raw text of the compose form as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeForm {
    pub sender: String,
    pub recipients: String,
    pub subject: String,
    pub body: String,
}

impl ComposeForm {
    /// Mutable access to one field.
    pub fn field_mut(&mut self, field: ComposeField) -> &mut String {
        match field {
            ComposeField::Sender => &mut self.sender,
            ComposeField::Recipients => &mut self.recipients,
            ComposeField::Subject => &mut self.subject,
            ComposeField::Body => &mut self.body,
        }
    }

    /// Read access to one field.
    pub fn field(&self, field: ComposeField) -> &str {
        match field {
            ComposeField::Sender => &self.sender,
            ComposeField::Recipients => &self.recipients,
            ComposeField::Subject => &self.subject,
            ComposeField::Body => &self.body,
        }
    }

    /// Reset every field to the empty string.
    pub fn clear(&mut self) {
        self.sender.clear();
        self.recipients.clear();
        self.subject.clear();
        self.body.clear();
    }

    /// `true` if every field is empty.
    pub fn is_empty(&self) -> bool {
        ComposeField::ALL.iter().all(|&f| self.field(f).is_empty())
    }

    /// Validate the form and build the outgoing email.
    ///
    /// All fields are trimmed. Subject and body may be empty.
    pub fn validate(&self, attachments: &[Attachment]) -> Result<OutgoingEmail, ComposeError> {
        let sender = self.sender.trim();
        let recipients_text = self.recipients.trim();

        if sender.is_empty() || recipients_text.is_empty() {
            return Err(ComposeError::MissingSenderOrRecipients);
        }

        let recipients = parse_recipients(recipients_text);
        if recipients.is_empty() {
            return Err(ComposeError::NoRecipients);
        }

        Ok(OutgoingEmail {
            sender: sender.to_string(),
            recipients,
            subject: self.subject.trim().to_string(),
            body: self.body.trim().to_string(),
            attachments: attachments.to_vec(),
        })
    }
}

/// Split a comma-separated recipient list, trimming entries and dropping empties.
pub fn parse_recipients(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(sender: &str, recipients: &str) -> ComposeForm {
        ComposeForm {
            sender: sender.to_string(),
            recipients: recipients.to_string(),
            subject: "  Hi  ".to_string(),
            body: "\nBody text\n".to_string(),
        }
    }

    #[test]
    fn test_parse_recipients_trims_and_drops_empties() {
        assert_eq!(
            parse_recipients(" a@b.com , , c@d.com "),
            vec!["a@b.com", "c@d.com"]
        );
        assert!(parse_recipients(" , ,, ").is_empty());
    }

    #[test]
    fn test_validate_builds_trimmed_email() {
        let att = Attachment::from_bytes("a.txt", b"x");
        let email = form(" me@x.org ", "a@b.com,c@d.com")
            .validate(std::slice::from_ref(&att))
            .unwrap();
        assert_eq!(email.sender, "me@x.org");
        assert_eq!(email.recipients, vec!["a@b.com", "c@d.com"]);
        assert_eq!(email.subject, "Hi");
        assert_eq!(email.body, "Body text");
        assert_eq!(email.attachments, vec![att]);
    }

    #[test]
    fn test_validate_requires_sender() {
        assert_eq!(
            form("   ", "a@b.com").validate(&[]),
            Err(ComposeError::MissingSenderOrRecipients)
        );
    }

    #[test]
    fn test_validate_requires_recipient_text() {
        assert_eq!(
            form("me@x.org", "  ").validate(&[]),
            Err(ComposeError::MissingSenderOrRecipients)
        );
    }

    #[test]
    fn test_validate_rejects_separator_only_recipients() {
        assert_eq!(
            form("me@x.org", " , , ").validate(&[]),
            Err(ComposeError::NoRecipients)
        );
    }

    #[test]
    fn test_subject_and_body_default_to_empty() {
        let f = ComposeForm {
            sender: "me@x.org".into(),
            recipients: "a@b.com".into(),
            ..Default::default()
        };
        let email = f.validate(&[]).unwrap();
        assert_eq!(email.subject, "");
        assert_eq!(email.body, "");
    }

    #[test]
    fn test_field_cycle_wraps() {
        let mut f = ComposeField::Sender;
        for _ in 0..4 {
            f = f.next();
        }
        assert_eq!(f, ComposeField::Sender);
        assert_eq!(ComposeField::Sender.prev(), ComposeField::Body);
    }

    #[test]
    fn test_clear_empties_all_fields() {
        let mut f = form("a", "b");
        f.clear();
        assert!(f.is_empty());
    }
}
