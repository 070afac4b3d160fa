//! Abstraction over the message-framed duplex connection.
//!
//! The runtime assumes an ordered, reliable channel carrying UTF-8 text
//! frames in both directions (a websocket in production). Implementations
//! live with the code that owns the concrete connection; tests use scripted
//! in-memory transports.
use async_trait::async_trait;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to establish connection")]
    Connect(#[source] BoxError),

    #[error("failed to send frame")]
    Send(#[source] BoxError),

    #[error("failed to receive frame")]
    Recv(#[source] BoxError),
}

impl TransportError {
    pub fn connect(source: impl Into<BoxError>) -> Self {
        Self::Connect(source.into())
    }

    pub fn send(source: impl Into<BoxError>) -> Self {
        Self::Send(source.into())
    }

    pub fn recv(source: impl Into<BoxError>) -> Self {
        Self::Recv(source.into())
    }
}

/// One ordered, reliable, message-framed duplex connection.
#[async_trait]
pub trait Transport: Send {
    /// Writes one text frame. Fire-and-forget with respect to the session
    /// flow: there is no reply correlation.
    async fn send(&mut self, frame: String) -> std::result::Result<(), TransportError>;

    /// Awaits the next inbound text frame. `Ok(None)` signals a graceful
    /// close; any fault surfaces as an error.
    async fn recv(&mut self) -> std::result::Result<Option<String>, TransportError>;
}
