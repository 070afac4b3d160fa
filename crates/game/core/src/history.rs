//! Bounded recency buffer of combat events.
use std::collections::VecDeque;

use crate::board::Coord;

/// Maximum number of attack events kept for inspection.
pub const ATTACK_LOG_CAPACITY: usize = 10;

/// One observed attack: source, destination, and damage value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackEvent {
    pub from: Coord,
    pub to: Coord,
    pub value: i64,
}

/// Fixed-capacity log of the most recent attacks, newest first.
///
/// A pure capped log: insertion at the front evicts the oldest entry once
/// capacity is exceeded. Not deduplicated, not keyed, no removal by identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttackLog {
    events: VecDeque<AttackEvent>,
}

impl AttackLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends an event, dropping the oldest beyond [`ATTACK_LOG_CAPACITY`].
    pub fn record(&mut self, event: AttackEvent) {
        self.events.push_front(event);
        self.events.truncate(ATTACK_LOG_CAPACITY);
    }

    /// Events ordered most-recent-first.
    pub fn iter(&self) -> impl Iterator<Item = &AttackEvent> {
        self.events.iter()
    }

    pub fn latest(&self) -> Option<&AttackEvent> {
        self.events.front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
