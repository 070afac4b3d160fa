//! Tile board mirror.
//!
//! The board is a rectangular matrix of [`Tile`]s whose dimensions are fixed
//! by the initial load and never change afterwards. Tiles carry an owner
//! index plus four stat values; a sync always replaces the owner and all four
//! stats together, so no partial-update path exists.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::session::user_mark;

/// Discrete board position in (row, column) order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub y: usize,
    pub x: usize,
}

impl Coord {
    pub fn new(y: usize, x: usize) -> Self {
        Self { y, x }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.y, self.x)
    }
}

/// Owner and stat values that travel together on every tile sync.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileStats {
    pub owner: i32,
    pub defence: i32,
    pub offence: i32,
    pub productivity: i32,
    pub attack_range: i32,
}

/// One grid cell. `y`/`x` identify the position and never change after
/// creation; the owner index and stats are replaced wholesale on each sync.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    /// Owning user index. Zero or negative means unowned (the server uses -1
    /// for freshly vacated cells).
    pub owner: i32,
    pub y: usize,
    pub x: usize,
    pub defence: i32,
    pub offence: i32,
    pub productivity: i32,
    pub attack_range: i32,
}

impl Tile {
    pub fn new(y: usize, x: usize, stats: TileStats) -> Self {
        Self {
            owner: stats.owner,
            y,
            x,
            defence: stats.defence,
            offence: stats.offence,
            productivity: stats.productivity,
            attack_range: stats.attack_range,
        }
    }

    /// Returns true if a live user owns this tile.
    pub fn is_owned(&self) -> bool {
        self.owner > 0
    }

    fn apply(&mut self, stats: TileStats) {
        self.owner = stats.owner;
        self.defence = stats.defence;
        self.offence = stats.offence;
        self.productivity = stats.productivity;
        self.attack_range = stats.attack_range;
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {:2}/{:2}/{:2}/{:2}]",
            user_mark(self.owner),
            self.defence,
            self.offence,
            self.productivity,
            self.attack_range
        )
    }
}

/// Rectangular matrix of tiles, row-major. Empty until the load message
/// arrives, then fixed in size for the rest of the match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    tiles: Vec<Vec<Tile>>,
}

impl Board {
    /// Builds a board from pre-populated rows. Callers are trusted to supply
    /// a rectangular matrix with tile coordinates matching their slots.
    pub fn from_rows(tiles: Vec<Vec<Tile>>) -> Self {
        Self { tiles }
    }

    /// True once the initial load has populated the matrix.
    pub fn is_loaded(&self) -> bool {
        !self.tiles.is_empty()
    }

    pub fn height(&self) -> usize {
        self.tiles.len()
    }

    pub fn width(&self) -> usize {
        self.tiles.first().map_or(0, Vec::len)
    }

    pub fn get(&self, y: usize, x: usize) -> Option<&Tile> {
        self.tiles.get(y)?.get(x)
    }

    /// Direct access for callers that already know the position is valid.
    ///
    /// # Panics
    ///
    /// Panics if `(y, x)` lies outside the loaded matrix; an out-of-bounds
    /// lookup here is a programming error, not a recoverable condition.
    pub fn tile(&self, y: usize, x: usize) -> &Tile {
        &self.tiles[y][x]
    }

    /// Overwrites the owner and all four stats of one tile atomically.
    /// Returns false if the position is outside the matrix.
    pub fn replace(&mut self, y: usize, x: usize, stats: TileStats) -> bool {
        match self.tiles.get_mut(y).and_then(|row| row.get_mut(x)) {
            Some(tile) => {
                tile.apply(stats);
                true
            }
            None => false,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.iter().map(Vec::as_slice)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.tiles.iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for tile in row {
                write!(f, "{tile}")?;
            }
        }
        Ok(())
    }
}
