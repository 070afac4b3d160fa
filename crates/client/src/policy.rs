//! Sample decision policy.
use async_trait::async_trait;

use game_core::SessionState;
use runtime::{CommandEmitter, DecisionPolicy, Result};

/// Buys the first unowned tile it finds, scanning from the bottom-right
/// corner, one acquisition per turn. Deliberately naive: it exists to
/// exercise the session loop, not to win matches.
pub struct ExpanderPolicy;

#[async_trait]
impl DecisionPolicy for ExpanderPolicy {
    async fn decide(
        &mut self,
        state: &SessionState,
        commands: &mut CommandEmitter<'_>,
    ) -> Result<()> {
        println!("{state}");

        if !state.board.is_loaded() {
            return Ok(());
        }

        for y in (0..state.board.height()).rev() {
            for x in (0..state.board.width()).rev() {
                if !state.board.tile(y, x).is_owned() {
                    commands.acquire_tile(y, x).await?;
                    return Ok(());
                }
            }
        }

        Ok(())
    }
}
