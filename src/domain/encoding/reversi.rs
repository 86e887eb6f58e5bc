//! Reversi instructions: an 8x8 coordinate grid, disc counts and a
//! corner-first policy that warns about squares next to empty corners.

use super::PositionEncoder;
use crate::domain::arbitration::LegalMoves;
use crate::domain::game::{BoardPosition, Cell, GameType, Marker};

const SIDE: usize = 8;

/// Corner indices with the squares that become dangerous while each corner
/// is still empty: the diagonal X-square first, then the two C-squares.
const CORNER_NEIGHBOURS: [(usize, [usize; 3]); 4] = [
    (0, [9, 1, 8]),
    (7, [14, 6, 15]),
    (56, [49, 48, 57]),
    (63, [54, 55, 62]),
];

/// Encodes 8x8 reversi positions.
///
/// Legal squares are rendered as their index, other empty squares as `.`,
/// so the provider can read moves straight off the grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReversiEncoder;

impl ReversiEncoder {
    fn render_board(position: &BoardPosition, legal_moves: &LegalMoves) -> String {
        let header: String = (0..SIDE).map(|col| format!("{:>4}", format!("c{col}"))).collect();
        let mut lines = vec![format!("    {header}")];

        for (row, cells) in position.rows().enumerate() {
            let rendered: String = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let index = row * SIDE + col;
                    let label = match cell {
                        Cell::Occupied(marker) => marker.symbol().to_string(),
                        Cell::Empty if legal_moves.contains(index as i64) => index.to_string(),
                        Cell::Empty => ".".to_string(),
                    };
                    format!("{label:>4}")
                })
                .collect();
            lines.push(format!("r{row}  {rendered}"));
        }

        lines.join("\n")
    }

    /// Squares next to a still-empty corner, in ascending order.
    fn risky_squares(position: &BoardPosition) -> Vec<usize> {
        let mut risky: Vec<usize> = CORNER_NEIGHBOURS
            .iter()
            .filter(|(corner, _)| position.cell(*corner).is_some_and(|cell| cell.is_empty()))
            .flat_map(|(_, neighbours)| neighbours.iter().copied())
            .collect();
        risky.sort_unstable();
        risky
    }
}

impl PositionEncoder for ReversiEncoder {
    fn game_type(&self) -> GameType {
        GameType::Reversi
    }

    fn describe(
        &self,
        position: &BoardPosition,
        role: Marker,
        legal_moves: &LegalMoves,
    ) -> String {
        let opponent = role.opponent();
        let board = Self::render_board(position, legal_moves);
        let risky = LegalMoves::new(Self::risky_squares(position));
        let own = position.count(role);
        let theirs = position.count(opponent);

        format!(
            "You are an expert Reversi (Othello) player. You are playing as {role}.
The opponent is playing as {opponent}.

Current board (8x8, index = row * 8 + column; legal squares show their index, other empty squares show '.'):

{board}

Discs: {role} {own}, {opponent} {theirs}

Legal moves (indices): {legal_moves}

Goal: finish with more discs than the opponent.

Strategy, in strict order of priority:
1. CORNER: if a corner (0, 7, 56, 63) is legal, take it.
2. AVOID: do not play next to an empty corner unless nothing else is legal. Squares to avoid now: {risky}
3. EDGE: prefer squares on the outer edge.
4. MOBILITY: among the remaining moves, prefer the one that flips discs while leaving the opponent the fewest replies.
5. ANY: otherwise play any legal move.

Only choose from the legal moves.
"
        )
    }
}
