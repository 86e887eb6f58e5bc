//! Board positions.

use super::{Cell, GameType, Marker};

/// An ordered sequence of cells whose length matches its game type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardPosition {
    game_type: GameType,
    cells: Vec<Cell>,
}

/// Error returned when a cell sequence does not fit the declared game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{game_type} board requires {expected} cells, got {actual}")]
pub struct BoardSizeMismatch {
    pub game_type: GameType,
    pub expected: usize,
    pub actual: usize,
}

impl BoardPosition {
    /// Creates a position, enforcing the game type's board size.
    pub fn new(game_type: GameType, cells: Vec<Cell>) -> Result<Self, BoardSizeMismatch> {
        let expected = game_type.board_size();
        if cells.len() != expected {
            return Err(BoardSizeMismatch {
                game_type,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { game_type, cells })
    }

    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cell at `index`, or `None` when out of bounds.
    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Iterates over the board one row at a time.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.game_type.side_len())
    }

    /// Counts the cells held by `marker`.
    pub fn count(&self, marker: Marker) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.marker() == Some(marker))
            .count()
    }
}
