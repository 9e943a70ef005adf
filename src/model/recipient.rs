//! Recipient mailboxes and the emails filed under them.

use chrono::NaiveDateTime;

/// Convert a recipient mailbox identifier back into an address for display.
///
/// The server files mail under identifiers where `@` is written as `_at_`
/// and `.` as `_`. `_at_` must be replaced first, otherwise its underscores
/// would be turned into dots.
pub fn display_name(identifier: &str) -> String {
    identifier.replace("_at_", "@").replace('_', ".")
}

/// One recipient mailbox as listed by the server.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecipientSummary {
    /// Mailbox identifier (escaped form).
    pub name: String,
    /// Number of emails filed for this recipient.
    #[serde(default)]
    pub count: u64,
}

impl RecipientSummary {
    /// Human-readable address for this mailbox.
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }
}

/// One file in a recipient mailbox: a stored email or a saved attachment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmailEntry {
    /// Filename on the server, used to request the content.
    pub filename: String,
    /// Label to show in the list.
    #[serde(default)]
    pub display: String,
    /// `true` for a saved attachment rather than an email body.
    #[serde(rename = "isAttachment", default)]
    pub is_attachment: bool,
}

impl EmailEntry {
    /// Label to show, falling back to the filename.
    pub fn label(&self) -> &str {
        if self.display.is_empty() {
            &self.filename
        } else {
            &self.display
        }
    }
}

/// The email list the server returned for one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailList {
    /// Recipient the list belongs to, as echoed by the server.
    pub recipient: String,
    pub entries: Vec<EmailEntry>,
}

/// Content of one file from a mailbox.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmailContent {
    /// Decoded text, or a server-written placeholder when the file is binary.
    pub content: String,
    #[serde(default)]
    pub is_binary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Parse the `timestamp` the server attaches to `send_success`.
///
/// The server emits local ISO-8601 without an offset, with or without
/// fractional seconds.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_unescapes_address() {
        assert_eq!(display_name("alice_at_example_com"), "alice@example.com");
        assert_eq!(display_name("bob_smith_at_mail_co_uk"), "bob.smith@mail.co.uk");
    }

    #[test]
    fn test_display_name_without_markers_is_unchanged() {
        assert_eq!(display_name("postmaster"), "postmaster");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn test_email_entry_uses_camel_case_flag() {
        let entry: EmailEntry = serde_json::from_str(
            r#"{"filename":"photo.png","display":"photo.png","isAttachment":true}"#,
        )
        .unwrap();
        assert!(entry.is_attachment);
        assert_eq!(entry.label(), "photo.png");
    }

    #[test]
    fn test_label_falls_back_to_filename() {
        let entry = EmailEntry {
            filename: "mail_1.txt".to_string(),
            display: String::new(),
            is_attachment: false,
        };
        assert_eq!(entry.label(), "mail_1.txt");
    }

    #[test]
    fn test_parse_timestamp_with_and_without_fraction() {
        let ts = parse_timestamp("2024-03-05T14:07:09.123456").unwrap();
        assert_eq!(ts.format("%H:%M:%S").to_string(), "14:07:09");
        assert!(parse_timestamp("2024-03-05T14:07:09").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
