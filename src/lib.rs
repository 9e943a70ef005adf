//! `inboxShell`: a terminal client for a WebSocket mail server.
//!
//! This crate provides the wire protocol, the client session state machine
//! (connection, reconnect, dispatch, compose), the async runtime that talks
//! to the server, and the terminal UI built on top of them.

pub mod cli;
pub mod config;
pub mod error;
pub mod i18n;
pub mod model;
pub mod protocol;
pub mod runtime;
pub mod session;
pub mod tui;
