//! Attachments staged client-side before sending.
//!
//! A staged attachment is self-contained: the file content travels inside a
//! base64 data URL, so nothing on disk is referenced once it has been read.

use std::path::Path;

use base64::Engine as _;

use crate::error::{ClientError, Result};

/// MIME type used when the extension is unknown.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// A file staged for the outgoing email.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Attachment {
    /// Filename shown to the user and used by the server for the MIME part.
    pub name: String,
    /// `data:<mime>;base64,<payload>` URL holding the whole file.
    pub data: String,
}

impl Attachment {
    /// Build an attachment from raw bytes, guessing the MIME type from `name`.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Self {
        let name = name.into();
        let mime = mime_type_for(&name);
        let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self {
            data: format!("data:{mime};base64,{payload}"),
            name,
        }
    }

    /// Read a file from disk and stage it.
    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ClientError::io(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read attachment");
        Ok(Self::from_bytes(name, &bytes))
    }

    /// The MIME type embedded in the data URL.
    pub fn mime_type(&self) -> &str {
        self.data
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .filter(|m| !m.is_empty())
            .unwrap_or(FALLBACK_MIME)
    }

    /// Size of the decoded file content in bytes.
    pub fn byte_len(&self) -> u64 {
        let payload = match self.data.split_once(',') {
            Some((_, p)) => p,
            None => return 0,
        };
        let padding = payload.bytes().rev().take_while(|&b| b == b'=').count();
        ((payload.len() / 4) * 3).saturating_sub(padding) as u64
    }
}

/// Guess a MIME type from a filename extension.
pub fn mime_type_for(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
