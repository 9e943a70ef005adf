//! One WebSocket connection to the mail server.
//!
//! [`Connection`] is a thin request/reply wrapper used directly by the
//! headless commands. [`run`] drives a connection for the interactive
//! client: it reports open/close/error and inbound frames as [`AppEvent`]s
//! and writes whatever arrives on its outgoing channel.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::{ClientError, Result};
use crate::protocol::{InboundMessage, OutboundMessage};
use crate::session::AppEvent;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Reject URLs that are not WebSocket endpoints before dialing.
pub fn validate_url(url: &str) -> Result<()> {
    let rest = url
        .strip_prefix("ws://")
        .or_else(|| url.strip_prefix("wss://"))
        .ok_or_else(|| ClientError::InvalidUrl(url.to_string()))?;
    if rest.is_empty() || rest.starts_with('/') {
        return Err(ClientError::InvalidUrl(url.to_string()));
    }
    Ok(())
}

/// An open connection.
pub struct Connection {
    stream: WsStream,
}

impl Connection {
    /// Dial `url`, failing if the handshake takes longer than `connect_timeout`.
    pub async fn open(url: &str, connect_timeout: Duration) -> Result<Self> {
        validate_url(url)?;
        let (stream, _) = tokio::time::timeout(connect_timeout, connect_async(url))
            .await
            .map_err(|_| ClientError::Timeout(connect_timeout.as_millis() as u64))??;
        tracing::debug!(%url, "WebSocket handshake complete");
        Ok(Self { stream })
    }

    /// Write one request frame.
    pub async fn send(&mut self, message: &OutboundMessage) -> Result<()> {
        let frame = message.to_frame()?;
        self.stream.send(Message::text(frame)).await?;
        Ok(())
    }

    /// Wait for the next decodable message. `None` once the server closes.
    pub async fn recv(&mut self) -> Result<Option<InboundMessage>> {
        while let Some(next) = self.stream.next().await {
            match next? {
                Message::Text(text) => match InboundMessage::parse(text.as_str()) {
                    Ok(message) => return Ok(Some(message)),
                    Err(e) => tracing::warn!(error = %e, "Ignoring undecodable frame"),
                },
                Message::Close(_) => return Ok(None),
                _ => {}
            }
        }
        Ok(None)
    }

    /// Send `message` and wait for the first reply that `select` accepts.
    ///
    /// Server `error` messages end the wait with [`ClientError::Server`].
    /// Other messages `select` rejects (greetings, inbox notifications) are
    /// skipped.
    pub async fn request<T>(
        &mut self,
        message: &OutboundMessage,
        reply_timeout: Duration,
        mut select: impl FnMut(InboundMessage) -> Option<T>,
    ) -> Result<T> {
        self.send(message).await?;
        tokio::time::timeout(reply_timeout, self.await_reply(&mut select))
            .await
            .map_err(|_| ClientError::Timeout(reply_timeout.as_millis() as u64))?
    }

    async fn await_reply<T>(
        &mut self,
        select: &mut impl FnMut(InboundMessage) -> Option<T>,
    ) -> Result<T> {
        loop {
            match self.recv().await? {
                None => return Err(ClientError::ConnectionClosed),
                Some(InboundMessage::Error { message }) => return Err(ClientError::Server(message)),
                Some(other) => {
                    let kind = other.kind();
                    if let Some(value) = select(other) {
                        return Ok(value);
                    }
                    tracing::debug!(kind, "Skipping unrelated message");
                }
            }
        }
    }

    /// Close the socket politely.
    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}

/// Drive one connection until it closes or is superseded.
///
/// A failed dial is reported as `TransportError` then `Closed`. When the
/// `outgoing` sender is dropped the socket is closed quietly, without a
/// `Closed` event, because a newer connection has taken over.
pub async fn run(
    url: String,
    connect_timeout: Duration,
    mut outgoing: mpsc::UnboundedReceiver<OutboundMessage>,
    events: mpsc::UnboundedSender<AppEvent>,
) {
    let connection = match Connection::open(&url, connect_timeout).await {
        Ok(connection) => connection,
        Err(e) => {
            tracing::warn!(%url, error = %e, "Connection attempt failed");
            let _ = events.send(AppEvent::TransportError(e.to_string()));
            let _ = events.send(AppEvent::Closed);
            return;
        }
    };

    tracing::info!(%url, "Connection open");
    let _ = events.send(AppEvent::Opened);

    let (mut sink, mut stream) = connection.stream.split();

    loop {
        tokio::select! {
            next = outgoing.recv() => match next {
                Some(message) => {
                    let frame = match message.to_frame() {
                        Ok(frame) => frame,
                        Err(e) => {
                            tracing::warn!(kind = message.kind(), error = %e, "Failed to encode frame");
                            continue;
                        }
                    };
                    tracing::debug!(kind = message.kind(), "Outbound message");
                    if let Err(e) = sink.send(Message::text(frame)).await {
                        let _ = events.send(AppEvent::TransportError(e.to_string()));
                        break;
                    }
                }
                None => {
                    tracing::debug!("Connection superseded, closing");
                    let _ = sink.close().await;
                    return;
                }
            },
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    let _ = events.send(AppEvent::Frame(text.as_str().to_string()));
                }
                Some(Ok(Message::Close(frame))) => {
                    tracing::info!(?frame, "Server closed the connection");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "Read failed");
                    let _ = events.send(AppEvent::TransportError(e.to_string()));
                    break;
                }
                None => break,
            },
        }
    }

    let _ = events.send(AppEvent::Closed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("ws://localhost:8787").is_ok());
        assert!(validate_url("wss://mail.example.com/socket").is_ok());
        assert!(matches!(
            validate_url("http://localhost:8787"),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(validate_url("ws://").is_err());
        assert!(validate_url("localhost:8787").is_err());
    }
}
