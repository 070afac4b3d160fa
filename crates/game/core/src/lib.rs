//! Pure data models for the territory match mirror.
//!
//! `game-core` defines the value types that describe one match as seen from
//! the client: the tile board, the purchase cost table, the bounded attack
//! history, and the [`SessionState`] aggregate that ties them together. All
//! types here are plain data with no I/O; the `runtime` crate owns the wire
//! protocol and is the only writer of [`SessionState`].
pub mod board;
pub mod costs;
pub mod history;
pub mod session;

pub use board::{Board, Coord, Tile, TileStats};
pub use costs::{Cost, Costs};
pub use history::{ATTACK_LOG_CAPACITY, AttackEvent, AttackLog};
pub use session::{PlayerIdentity, Roster, SessionState, Stage, user_mark};
