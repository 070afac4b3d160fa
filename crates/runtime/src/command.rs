//! Encodes player intents and writes them to the transport.
//!
//! Each method is a pure encode step followed by one send. No affordability,
//! ownership, or range validation happens here; rejection or correction, if
//! any, arrives later as independent `changed`/`energy` messages and is
//! reconciled by the reducer.
use game_core::Coord;

use crate::error::Result;
use crate::protocol::ClientCommand;
use crate::transport::Transport;

/// Fire-and-forget command interface handed to decision policies.
pub struct CommandEmitter<'a> {
    transport: &'a mut (dyn Transport + 'a),
}

impl<'a> CommandEmitter<'a> {
    pub fn new(transport: &'a mut (dyn Transport + 'a)) -> Self {
        Self { transport }
    }

    /// Requests the full session snapshot. Sent once at session start.
    pub async fn request_load(&mut self) -> Result<()> {
        self.send(ClientCommand::Load).await
    }

    /// Acquires the unowned tile at `(y, x)`.
    pub async fn acquire_tile(&mut self, y: usize, x: usize) -> Result<()> {
        self.send(ClientCommand::New { y, x }).await
    }

    pub async fn upgrade_defence(&mut self, y: usize, x: usize) -> Result<()> {
        self.send(ClientCommand::DefenceUp { y, x }).await
    }

    pub async fn upgrade_offence(&mut self, y: usize, x: usize) -> Result<()> {
        self.send(ClientCommand::OffenceUp { y, x }).await
    }

    pub async fn upgrade_productivity(&mut self, y: usize, x: usize) -> Result<()> {
        self.send(ClientCommand::ProductivityUp { y, x }).await
    }

    pub async fn upgrade_attack_range(&mut self, y: usize, x: usize) -> Result<()> {
        self.send(ClientCommand::AttackRangeUp { y, x }).await
    }

    /// Attacks from `(from_y, from_x)` to `(to_y, to_x)`.
    pub async fn attack(
        &mut self,
        from_y: usize,
        from_x: usize,
        to_y: usize,
        to_x: usize,
    ) -> Result<()> {
        self.send(ClientCommand::Attack {
            from: Coord::new(from_y, from_x),
            to: Coord::new(to_y, to_x),
        })
        .await
    }

    async fn send(&mut self, command: ClientCommand) -> Result<()> {
        let frame = command.encode()?;
        tracing::debug!(command = command.kind(), "sending command");
        self.transport.send(frame).await?;
        Ok(())
    }
}
