//! Core data model types for recipients, emails, attachments and the compose form.

pub mod attachment;
pub mod compose;
pub mod recipient;
