//! Supported game types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A board game the arbiter knows how to encode.
///
/// Each variant fixes the board geometry; cells are indexed row-major from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    /// 3x3 tic-tac-toe.
    TicTacToe,
    /// 8x8 reversi (othello).
    Reversi,
}

impl GameType {
    /// Number of cells on a row or column.
    pub fn side_len(self) -> usize {
        match self {
            GameType::TicTacToe => 3,
            GameType::Reversi => 8,
        }
    }

    /// Total number of cells on the board.
    pub fn board_size(self) -> usize {
        self.side_len() * self.side_len()
    }

    /// Wire identifier (`tictactoe`, `reversi`).
    pub fn as_str(self) -> &'static str {
        match self {
            GameType::TicTacToe => "tictactoe",
            GameType::Reversi => "reversi",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognized game identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported game type '{0}'")]
pub struct UnknownGameType(pub String);

impl FromStr for GameType {
    type Err = UnknownGameType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tictactoe" => Ok(GameType::TicTacToe),
            "reversi" => Ok(GameType::Reversi),
            other => Err(UnknownGameType(other.to_string())),
        }
    }
}
