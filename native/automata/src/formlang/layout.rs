//! Display coordinates carried alongside an automaton.
//!
//! Coordinates have no meaning for the algorithms; they are kept so that a
//! decoded document can be written back with its layout intact.

use crate::formlang::state::StateId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const GRID_ORIGIN: i64 = 100;
const GRID_SPACING: i64 = 40;
const GRID_COLUMNS: i64 = 10;

/// A point on the drawing canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Per-state coordinates, ordered by state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    positions: BTreeMap<StateId, Position>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid slot for `state`: rows of ten, 40 units apart, starting at (100, 100).
    pub fn default_position(state: StateId) -> Position {
        let index = i64::from(state);
        Position::new(
            GRID_ORIGIN + GRID_SPACING * (index % GRID_COLUMNS),
            GRID_ORIGIN + GRID_SPACING * (index / GRID_COLUMNS),
        )
    }

    pub fn insert(&mut self, state: StateId, position: Position) -> Option<Position> {
        self.positions.insert(state, position)
    }

    pub fn get(&self, state: StateId) -> Option<Position> {
        self.positions.get(&state).copied()
    }

    /// The stored position of `state`, or its grid slot.
    pub fn position_or_default(&self, state: StateId) -> Position {
        self.get(state)
            .unwrap_or_else(|| Self::default_position(state))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateId, Position)> + '_ {
        self.positions.iter().map(|(&state, &position)| (state, position))
    }
}

impl FromIterator<(StateId, Position)> for Layout {
    fn from_iter<I: IntoIterator<Item = (StateId, Position)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        assert_eq!(Layout::default_position(0), Position::new(100, 100));
        assert_eq!(Layout::default_position(1), Position::new(140, 100));
        assert_eq!(Layout::default_position(9), Position::new(460, 100));
        assert_eq!(Layout::default_position(10), Position::new(100, 140));
        assert_eq!(Layout::default_position(99), Position::new(460, 460));
        assert_eq!(Layout::default_position(100), Position::new(100, 500));
    }

    #[test]
    fn test_stored_position_wins() {
        let mut layout = Layout::new();
        layout.insert(3, Position::new(-5, 7));

        assert_eq!(layout.position_or_default(3), Position::new(-5, 7));
        assert_eq!(layout.position_or_default(4), Position::new(260, 100));
        assert_eq!(layout.len(), 1);
    }
}
