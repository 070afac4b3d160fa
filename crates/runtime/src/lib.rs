//! Session runtime for the territory client.
//!
//! This crate owns the protocol layer between the wire and the local mirror:
//! decoding inbound JSON frames into typed messages, applying them to
//! [`game_core::SessionState`] through the reducer, and emitting player
//! commands back over the transport. The [`SessionDriver`] ties these
//! together into the receive/reduce/decide loop that a [`DecisionPolicy`]
//! plugs into.
//!
//! Modules are organized by responsibility:
//! - [`protocol`] defines the inbound/outbound message shapes and codec
//! - [`reducer`] applies one decoded message to the session mirror
//! - [`command`] encodes player intents and writes them to the transport
//! - [`transport`] abstracts the message-framed duplex connection
//! - [`driver`] runs the cooperative receive/decide alternation
pub mod command;
pub mod driver;
pub mod error;
pub mod protocol;
pub mod reducer;
pub mod transport;

pub use command::CommandEmitter;
pub use driver::{DecisionPolicy, IdlePolicy, SessionDriver, SessionReport};
pub use error::{Result, SessionError};
pub use protocol::{ClientCommand, ProtocolError, ServerMessage};
pub use reducer::{Applied, ReduceError};
pub use transport::{Transport, TransportError};
