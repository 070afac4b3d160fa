//! Applies one decoded inbound message to the session mirror.
//!
//! The reducer is the only writer of [`SessionState`]. Each call applies
//! exactly one transition; a structural problem (sync against a board that
//! was never loaded, coordinates outside the matrix) aborts the message
//! before any part of it is applied.
use thiserror::Error;

use game_core::{AttackEvent, Board, PlayerIdentity, SessionState, Stage, Tile, TileStats};

use crate::protocol::{LoadPayload, ServerMessage, TileSync};

#[derive(Debug, Error)]
pub enum ReduceError {
    #[error("tile sync arrived before the board was loaded")]
    BoardNotLoaded,

    #[error("tile sync targets ({y}, {x}) outside the {height}x{width} board")]
    TileOutOfBounds {
        y: usize,
        x: usize,
        height: usize,
        width: usize,
    },
}

/// Outcome of applying one message.
#[derive(Clone, Debug, PartialEq)]
pub enum Applied {
    /// State was mutated (or the message was an applied no-op); the session
    /// continues.
    Continue,
    /// Terminal `end` message; the final score is forwarded uninterpreted.
    Ended { score: serde_json::Value },
    /// Unrecognized message type; state is untouched.
    Ignored,
}

/// Applies `message` to `state`, returning what happened.
///
/// Messages arriving after the stage reached `Ended` are still applied (the
/// live protocol does not define them, and ignoring them silently could hide
/// server bugs); they are logged at DEBUG.
pub fn apply(
    state: &mut SessionState,
    message: ServerMessage,
) -> std::result::Result<Applied, ReduceError> {
    if state.stage.is_terminal() && !matches!(message, ServerMessage::End { .. }) {
        tracing::debug!(?message, "message received after end, applying anyway");
    }

    match message {
        ServerMessage::Enter { newbie } => {
            tracing::debug!(index = newbie.index, color = %newbie.color, "user entered");
            state.roster.insert(newbie.index, newbie.color);
            Ok(Applied::Continue)
        }
        ServerMessage::Leave { leaver } => {
            if state.roster.remove(leaver.index).is_none() {
                tracing::warn!(index = leaver.index, "leave for a user not in the roster");
            }
            Ok(Applied::Continue)
        }
        ServerMessage::Load(payload) => {
            apply_load(state, *payload);
            Ok(Applied::Continue)
        }
        ServerMessage::Stage { stage, age, energy } => {
            tracing::info!(%stage, age, energy, "stage update");
            state.stage = stage;
            state.age = age;
            state.energy = energy;
            Ok(Applied::Continue)
        }
        ServerMessage::Changed { data } => {
            apply_changed(state, data)?;
            Ok(Applied::Continue)
        }
        ServerMessage::Energy { value } => {
            state.energy = value;
            Ok(Applied::Continue)
        }
        ServerMessage::Attack { from, to, value } => {
            state.attacks.record(AttackEvent { from, to, value });
            Ok(Applied::Continue)
        }
        ServerMessage::End { score } => {
            tracing::info!(%score, "match ended");
            state.stage = Stage::Ended;
            Ok(Applied::Ended { score })
        }
        ServerMessage::Unknown { kind } => {
            tracing::warn!(%kind, "ignoring unrecognized message type");
            Ok(Applied::Ignored)
        }
    }
}

fn apply_load(state: &mut SessionState, payload: LoadPayload) {
    for user in payload.users {
        state.roster.insert(user.index, user.color);
    }

    let rows = payload
        .board
        .into_iter()
        .enumerate()
        .map(|(y, row)| {
            row.into_iter()
                .enumerate()
                .map(|(x, cell)| {
                    Tile::new(
                        y,
                        x,
                        TileStats {
                            owner: cell.owner,
                            defence: cell.defence,
                            offence: cell.offence,
                            productivity: cell.productivity,
                            attack_range: cell.attack_range,
                        },
                    )
                })
                .collect()
        })
        .collect();
    state.board = Board::from_rows(rows);

    state.costs = payload.costs;
    state.me = PlayerIdentity {
        index: payload.me.index,
        color: payload.me.color,
    };
    state.energy = payload.energy;
    state.stage = payload.stage;
    state.age = payload.age;

    tracing::info!(
        height = state.board.height(),
        width = state.board.width(),
        users = state.roster.len(),
        me = state.me.index,
        stage = %state.stage,
        "session loaded"
    );
}

fn apply_changed(
    state: &mut SessionState,
    data: Vec<TileSync>,
) -> std::result::Result<(), ReduceError> {
    if !state.board.is_loaded() {
        return Err(ReduceError::BoardNotLoaded);
    }

    // Validate the whole batch up front so a bad entry never leaves the
    // board partially synced.
    for sync in &data {
        if state.board.get(sync.y, sync.x).is_none() {
            return Err(ReduceError::TileOutOfBounds {
                y: sync.y,
                x: sync.x,
                height: state.board.height(),
                width: state.board.width(),
            });
        }
    }

    for sync in data {
        state.board.replace(
            sync.y,
            sync.x,
            TileStats {
                owner: sync.owner,
                defence: sync.defence,
                offence: sync.offence,
                productivity: sync.productivity,
                attack_range: sync.attack_range,
            },
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::decode;
    use game_core::Coord;

    fn load_frame() -> String {
        let cell = serde_json::json!({
            "i": 0, "defence": 1, "offence": 1, "productivity": 1, "attackRange": 1
        });
        serde_json::json!({
            "type": "load",
            "users": [
                {"index": 1, "color": "#ff0000"},
                {"index": 2, "color": "#0000ff"}
            ],
            "board": [[cell.clone(), cell.clone()], [cell.clone(), cell]],
            "costs": {
                "newTile": {"base": 15, "multiply": 0},
                "defence": {"base": 5, "multiply": 0},
                "offence": {"base": 20, "multiply": 1},
                "productivity": {"base": 10, "multiply": 1},
                "attackRange": {"base": 25, "multiply": 5},
                "attack": {"base": 4, "multiply": 1}
            },
            "me": {"index": 1, "color": "#ff0000"},
            "energy": 100,
            "stage": "running",
            "age": 0
        })
        .to_string()
    }

    fn loaded_state() -> SessionState {
        let mut state = SessionState::new();
        let message = decode(&load_frame()).unwrap();
        apply(&mut state, message).unwrap();
        state
    }

    #[test]
    fn load_populates_the_whole_mirror() {
        let state = loaded_state();

        assert_eq!(state.board.height(), 2);
        assert_eq!(state.board.width(), 2);
        for y in 0..2 {
            for x in 0..2 {
                let tile = state.board.tile(y, x);
                assert_eq!((tile.y, tile.x), (y, x));
                assert_eq!(tile.owner, 0);
                assert_eq!(tile.defence, 1);
            }
        }

        assert_eq!(state.roster.len(), 2);
        assert_eq!(state.roster.color(1), Some("#ff0000"));
        assert_eq!(state.me.index, 1);
        assert_eq!(state.me.color, "#ff0000");
        assert_eq!(state.energy, 100);
        assert_eq!(state.stage, Stage::Running);
        assert_eq!(state.age, 0);
        assert_eq!(state.costs, game_core::Costs::default());
    }

    #[test]
    fn changed_replaces_only_the_targeted_tile() {
        let mut state = loaded_state();
        let message = decode(
            r#"{"type":"changed","data":[{"y":0,"x":0,"i":1,"defence":3,"offence":1,"productivity":2,"attackRange":1}]}"#,
        )
        .unwrap();

        assert_eq!(apply(&mut state, message).unwrap(), Applied::Continue);

        let tile = state.board.tile(0, 0);
        assert_eq!(tile.owner, 1);
        assert_eq!(tile.defence, 3);
        assert_eq!(tile.offence, 1);
        assert_eq!(tile.productivity, 2);
        assert_eq!(tile.attack_range, 1);

        // Every other tile is untouched.
        for (y, x) in [(0, 1), (1, 0), (1, 1)] {
            let other = state.board.tile(y, x);
            assert_eq!(other.owner, 0);
            assert_eq!(other.defence, 1);
        }
    }

    #[test]
    fn changed_before_load_fails_fast() {
        let mut state = SessionState::new();
        let message = decode(
            r#"{"type":"changed","data":[{"y":0,"x":0,"i":1,"defence":1,"offence":1,"productivity":1,"attackRange":1}]}"#,
        )
        .unwrap();

        assert!(matches!(
            apply(&mut state, message),
            Err(ReduceError::BoardNotLoaded)
        ));
    }

    #[test]
    fn changed_batch_with_bad_coordinates_applies_nothing() {
        let mut state = loaded_state();
        let message = decode(
            r#"{"type":"changed","data":[
                {"y":0,"x":0,"i":2,"defence":9,"offence":9,"productivity":9,"attackRange":9},
                {"y":5,"x":5,"i":2,"defence":9,"offence":9,"productivity":9,"attackRange":9}
            ]}"#,
        )
        .unwrap();

        assert!(matches!(
            apply(&mut state, message),
            Err(ReduceError::TileOutOfBounds { y: 5, x: 5, .. })
        ));

        // The valid leading entry must not have been applied.
        assert_eq!(state.board.tile(0, 0).owner, 0);
        assert_eq!(state.board.tile(0, 0).defence, 1);
    }

    #[test]
    fn enter_then_leave_nets_out() {
        let mut state = SessionState::new();

        let enter = decode(r#"{"type":"enter","newbie":{"index":5,"color":"red"}}"#).unwrap();
        apply(&mut state, enter).unwrap();
        assert!(state.roster.contains(5));

        let leave = decode(r#"{"type":"leave","leaver":{"index":5}}"#).unwrap();
        apply(&mut state, leave).unwrap();
        assert!(!state.roster.contains(5));
    }

    #[test]
    fn leave_of_absent_index_is_a_noop() {
        let mut state = SessionState::new();
        let leave = decode(r#"{"type":"leave","leaver":{"index":9}}"#).unwrap();
        assert_eq!(apply(&mut state, leave).unwrap(), Applied::Continue);
        assert!(state.roster.is_empty());
    }

    #[test]
    fn stage_overwrites_stage_age_and_energy() {
        let mut state = loaded_state();
        let message = decode(r#"{"type":"stage","stage":"running","age":12,"energy":55}"#).unwrap();
        apply(&mut state, message).unwrap();

        assert_eq!(state.stage, Stage::Running);
        assert_eq!(state.age, 12);
        assert_eq!(state.energy, 55);
    }

    #[test]
    fn energy_overwrites_energy_only() {
        let mut state = loaded_state();
        let message = decode(r#"{"type":"energy","value":7}"#).unwrap();
        apply(&mut state, message).unwrap();

        assert_eq!(state.energy, 7);
        assert_eq!(state.stage, Stage::Running);
        assert_eq!(state.age, 0);
    }

    #[test]
    fn attacks_are_ring_buffered() {
        let mut state = loaded_state();
        for value in 1..=11 {
            let frame = format!(
                r#"{{"type":"attack","from":{{"y":0,"x":0}},"to":{{"y":1,"x":1}},"value":{value}}}"#
            );
            apply(&mut state, decode(&frame).unwrap()).unwrap();
        }

        let values: Vec<i64> = state.attacks.iter().map(|e| e.value).collect();
        assert_eq!(values, (2..=11).rev().collect::<Vec<i64>>());
        assert_eq!(
            state.attacks.latest().map(|e| e.to),
            Some(Coord::new(1, 1))
        );
    }

    #[test]
    fn end_is_terminal_and_surfaces_the_score() {
        let mut state = loaded_state();
        let message = decode(r#"{"type":"end","score":{"1":{"tile":4,"power":9}}}"#).unwrap();

        let applied = apply(&mut state, message).unwrap();
        let Applied::Ended { score } = applied else {
            panic!("expected Ended");
        };
        assert_eq!(score["1"]["tile"], 4);
        assert_eq!(state.stage, Stage::Ended);
    }

    #[test]
    fn messages_after_end_are_still_applied() {
        let mut state = loaded_state();
        apply(
            &mut state,
            decode(r#"{"type":"end","score":0}"#).unwrap(),
        )
        .unwrap();

        apply(&mut state, decode(r#"{"type":"energy","value":3}"#).unwrap()).unwrap();
        assert_eq!(state.energy, 3);
        assert_eq!(state.stage, Stage::Ended);
    }

    #[test]
    fn unknown_message_leaves_state_untouched() {
        let mut state = loaded_state();
        let before = state.clone();

        let applied = apply(
            &mut state,
            decode(r#"{"type":"taunt","by":2}"#).unwrap(),
        )
        .unwrap();

        assert_eq!(applied, Applied::Ignored);
        assert_eq!(state, before);
    }
}
