//! Unified error type surfaced by the session runtime.
//!
//! Wraps failures from the codec, the transport, and the reducer so callers
//! can bubble them up with consistent context.
use thiserror::Error;

use crate::protocol::ProtocolError;
use crate::reducer::ReduceError;
use crate::transport::TransportError;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Reduce(#[from] ReduceError),

    #[error("decision policy failed: {reason}")]
    Policy { reason: String },
}

impl SessionError {
    /// Convenience constructor for policy implementations.
    pub fn policy(reason: impl Into<String>) -> Self {
        Self::Policy {
            reason: reason.into(),
        }
    }
}
