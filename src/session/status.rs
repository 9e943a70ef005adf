//! Transient status line.

use std::time::{Duration, Instant};

/// Severity of a status message. Only success and error messages expire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// A status message and the instant it was shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
    pub set_at: Instant,
}

impl Status {
    pub fn new(text: impl Into<String>, kind: StatusKind, now: Instant) -> Self {
        Self {
            text: text.into(),
            kind,
            set_at: now,
        }
    }

    /// Whether this message should be cleared at `now`.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        match self.kind {
            StatusKind::Info => false,
            StatusKind::Success | StatusKind::Error => {
                now.saturating_duration_since(self.set_at) >= ttl
            }
        }
    }
}
