//! The aggregate session mirror.
//!
//! [`SessionState`] is the single local mirror of server-owned match state.
//! It is created once per match with empty sub-models and mutated exclusively
//! by the runtime's reducer; decision policies only ever see it by shared
//! reference.
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::costs::Costs;
use crate::history::AttackLog;

/// Match lifecycle phase. One-directional: once `Ended` is reached no
/// transition back is defined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    #[default]
    #[serde(rename = "wait")]
    Waiting,
    #[serde(rename = "running")]
    Running,
    #[serde(rename = "end")]
    Ended,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        self == Stage::Ended
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Waiting => "wait",
            Stage::Running => "running",
            Stage::Ended => "end",
        };
        write!(f, "{label}")
    }
}

/// Single-character display mark for a user index, blank when unowned.
pub fn user_mark(index: i32) -> char {
    const MARKS: &[u8] = b" @#%$*&";
    if index <= 0 {
        return ' ';
    }
    MARKS.get(index as usize).map_or('?', |&b| b as char)
}

/// Mapping from user index to display color.
///
/// Entries come and go with enter/leave events; tiles referencing a departed
/// index are expected and left unresolved at this layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    users: HashMap<i32, String>,
}

impl Roster {
    /// Inserts or overwrites an entry, returning the replaced color if any.
    pub fn insert(&mut self, index: i32, color: String) -> Option<String> {
        self.users.insert(index, color)
    }

    pub fn remove(&mut self, index: i32) -> Option<String> {
        self.users.remove(&index)
    }

    pub fn color(&self, index: i32) -> Option<&str> {
        self.users.get(&index).map(String::as_str)
    }

    pub fn contains(&self, index: i32) -> bool {
        self.users.contains_key(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, &str)> {
        self.users.iter().map(|(&index, color)| (index, color.as_str()))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// The local player's identity as assigned by the server on load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub index: i32,
    pub color: String,
}

impl Default for PlayerIdentity {
    fn default() -> Self {
        // -1 until the load message assigns a real index; 0 would collide
        // with the unowned-tile sentinel.
        Self {
            index: -1,
            color: String::new(),
        }
    }
}

/// Aggregate root mirroring the server's view of one match.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub board: Board,
    pub costs: Costs,
    pub roster: Roster,
    pub me: PlayerIdentity,
    pub energy: i64,
    pub stage: Stage,
    /// Server-supplied age counter, monotonically non-decreasing.
    pub age: u64,
    pub attacks: AttackLog,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "[{}: {}] [me: {}({}) energy: {}]",
            self.stage,
            self.age,
            user_mark(self.me.index),
            self.me.index,
            self.energy
        )?;
        write!(f, "{}", self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_reflects_net_enter_leave_effect() {
        let mut roster = Roster::default();
        roster.insert(5, "red".to_owned());
        assert!(roster.contains(5));
        assert_eq!(roster.color(5), Some("red"));

        roster.remove(5);
        assert!(!roster.contains(5));
        assert!(roster.is_empty());
    }

    #[test]
    fn user_marks() {
        assert_eq!(user_mark(-1), ' ');
        assert_eq!(user_mark(0), ' ');
        assert_eq!(user_mark(1), '@');
        assert_eq!(user_mark(6), '&');
        assert_eq!(user_mark(7), '?');
    }

    #[test]
    fn stage_wire_labels() {
        assert_eq!(Stage::Waiting.to_string(), "wait");
        assert_eq!(Stage::Running.to_string(), "running");
        assert_eq!(Stage::Ended.to_string(), "end");
        assert!(Stage::Ended.is_terminal());
        assert!(!Stage::Running.is_terminal());
    }

    #[test]
    fn fresh_session_defaults() {
        let state = SessionState::new();
        assert_eq!(state.stage, Stage::Waiting);
        assert_eq!(state.me.index, -1);
        assert_eq!(state.energy, 0);
        assert!(!state.board.is_loaded());
        assert!(state.attacks.is_empty());
    }
}
