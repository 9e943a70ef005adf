//! JSON wire protocol spoken with the mail web server.
//!
//! Every frame is a UTF-8 JSON object whose `type` field selects the
//! message kind. Outbound messages are requests from this client, inbound
//! messages are replies and notifications from the server.

pub mod inbound;
pub mod outbound;

pub use inbound::InboundMessage;
pub use outbound::OutboundMessage;
