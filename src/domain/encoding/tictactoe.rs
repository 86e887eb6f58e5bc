//! Tic-tac-toe instructions: a 3x3 grid that labels empty cells with their
//! index, followed by a win/block/center/corner/side priority policy.

use super::PositionEncoder;
use crate::domain::arbitration::LegalMoves;
use crate::domain::game::{BoardPosition, Cell, GameType, Marker};

/// Encodes 3x3 tic-tac-toe positions.
///
/// Empty cells are rendered as their own index so the provider can name
/// moves directly from the picture.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToeEncoder;

impl TicTacToeEncoder {
    fn render_board(position: &BoardPosition) -> String {
        let mut offset = 0;
        position
            .rows()
            .map(|row| {
                let line = row
                    .iter()
                    .enumerate()
                    .map(|(col, cell)| match cell {
                        Cell::Occupied(marker) => marker.symbol().to_string(),
                        Cell::Empty => (offset + col).to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(" | ");
                offset += row.len();
                format!(" {line}")
            })
            .collect::<Vec<_>>()
            .join("\n---+---+---\n")
    }
}

impl PositionEncoder for TicTacToeEncoder {
    fn game_type(&self) -> GameType {
        GameType::TicTacToe
    }

    fn describe(
        &self,
        position: &BoardPosition,
        role: Marker,
        legal_moves: &LegalMoves,
    ) -> String {
        let opponent = role.opponent();
        let board = Self::render_board(position);

        format!(
            "You are an expert Tic-Tac-Toe player. You are playing as {role}.
The opponent is playing as {opponent}.

Current board (empty cells show their index, 0-8):

{board}

Legal moves (indices): {legal_moves}

Goal: win the game or force a draw. Do NOT lose.

Strategy, in strict order of priority:
1. WIN: if you ({role}) have two in a row, column or diagonal and the third cell is open, take it immediately.
2. BLOCK: if the opponent ({opponent}) has two in a row, column or diagonal and the third cell is open, take that cell.
3. CENTER: if the center (4) is open, take it.
4. CORNER: if a corner (0, 2, 6, 8) is open, take it.
5. SIDE: take any open side (1, 3, 5, 7).

Always check rule 1 before rule 2: if you can win, do it. Only choose from the legal moves.
"
        )
    }
}
