//! The cooperative session loop.
//!
//! One logical task alternates between two phases: waiting for the next
//! inbound message, and running the decision policy. A message is always
//! fully applied before the policy runs, and the policy always returns
//! before the next message is received, so the policy never observes the
//! mirror mid-mutation. That alternation is the sole ordering guarantee the
//! runtime provides.
use async_trait::async_trait;

use game_core::{SessionState, Stage};

use crate::command::CommandEmitter;
use crate::error::Result;
use crate::protocol;
use crate::reducer::{self, Applied};
use crate::transport::Transport;

/// Player intent source, invoked between message applications.
///
/// The policy holds the mirror by shared reference and may issue zero or
/// more commands through the emitter before yielding back to the driver.
#[async_trait]
pub trait DecisionPolicy: Send {
    async fn decide(
        &mut self,
        state: &SessionState,
        commands: &mut CommandEmitter<'_>,
    ) -> Result<()>;
}

/// A policy that never issues commands. Useful for observers and tests.
pub struct IdlePolicy;

#[async_trait]
impl DecisionPolicy for IdlePolicy {
    async fn decide(
        &mut self,
        _state: &SessionState,
        _commands: &mut CommandEmitter<'_>,
    ) -> Result<()> {
        Ok(())
    }
}

/// What the session looked like when the connection went away.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionReport {
    pub stage: Stage,
    /// Final score from the `end` message, if one was seen before the close.
    pub final_score: Option<serde_json::Value>,
}

/// Owns the transport, the session mirror, and the decision policy, and runs
/// the receive/reduce/decide loop until the connection closes.
pub struct SessionDriver<T, P> {
    transport: T,
    state: SessionState,
    policy: P,
    final_score: Option<serde_json::Value>,
}

impl<T, P> SessionDriver<T, P>
where
    T: Transport,
    P: DecisionPolicy,
{
    pub fn new(transport: T, policy: P) -> Self {
        Self {
            transport,
            state: SessionState::new(),
            policy,
            final_score: None,
        }
    }

    /// Read access to the mirror, mainly for tests and diagnostics.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Runs the session to completion.
    ///
    /// Sends the load request, then loops: receive one frame, decode it,
    /// apply it, hand control to the policy. Returns a [`SessionReport`] on
    /// graceful close; a transport fault or structural protocol violation
    /// surfaces as [`SessionError`] with no retry.
    pub async fn run(mut self) -> Result<SessionReport> {
        CommandEmitter::new(&mut self.transport)
            .request_load()
            .await?;

        loop {
            let Some(frame) = self.transport.recv().await? else {
                tracing::info!("connection closed by server");
                return Ok(SessionReport {
                    stage: self.state.stage,
                    final_score: self.final_score,
                });
            };

            let message = protocol::decode(&frame)?;
            match reducer::apply(&mut self.state, message)? {
                Applied::Ended { score } => self.final_score = Some(score),
                Applied::Continue | Applied::Ignored => {}
            }

            let mut commands = CommandEmitter::new(&mut self.transport);
            self.policy.decide(&self.state, &mut commands).await?;
        }
    }
}
