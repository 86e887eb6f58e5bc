//! Position encoding: turns a validated request into provider instructions.
//!
//! Each game type has one [`PositionEncoder`]. Adding a game means adding an
//! encoder and a match arm in [`encoder_for`]; dispatch and validation do not
//! change.
//!
//! Encoding is deterministic: the same request always yields byte-identical
//! instructions.

mod reversi;
mod tictactoe;

pub use reversi::ReversiEncoder;
pub use tictactoe::TicTacToeEncoder;

use crate::domain::arbitration::{LegalMoves, ValidatedMoveRequest, MOVE_FIELD, RATIONALE_FIELD};
use crate::domain::game::{BoardPosition, GameType, Marker};

/// Instructions for the reasoning provider, plus the legal-move set they
/// were built from.
///
/// The legal-move set travels alongside the prose so the response can be
/// checked mechanically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPosition {
    instructions: String,
    legal_moves: LegalMoves,
}

impl EncodedPosition {
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn legal_moves(&self) -> &LegalMoves {
        &self.legal_moves
    }
}

/// Game-specific board rendering and strategy instructions.
pub trait PositionEncoder: Send + Sync {
    /// The game this encoder handles.
    fn game_type(&self) -> GameType;

    /// Describes the position, the acting side and the priority policy.
    fn describe(&self, position: &BoardPosition, role: Marker, legal_moves: &LegalMoves)
        -> String;

    /// Builds the full instruction payload, including the answer contract.
    fn encode(&self, request: &ValidatedMoveRequest) -> EncodedPosition {
        let mut instructions =
            self.describe(request.position(), request.role(), request.legal_moves());
        instructions.push('\n');
        instructions.push_str(&answer_contract(request.legal_moves()));

        EncodedPosition {
            instructions,
            legal_moves: request.legal_moves().clone(),
        }
    }
}

/// Returns the encoder for a game type.
pub fn encoder_for(game_type: GameType) -> &'static dyn PositionEncoder {
    match game_type {
        GameType::TicTacToe => &TicTacToeEncoder,
        GameType::Reversi => &ReversiEncoder,
    }
}

/// The structured two-field answer every encoder demands.
fn answer_contract(legal_moves: &LegalMoves) -> String {
    let example = legal_moves.iter().next().unwrap_or_default();
    format!(
        "Your response must be a valid JSON object with exactly two fields:\n\
         1. \"{MOVE_FIELD}\": the index of the move you want to make. It MUST be one of {legal_moves}.\n\
         2. \"{RATIONALE_FIELD}\": a concise explanation of your choice (e.g. \"Blocking the opponent at {example}\").\n\
         \n\
         Example response:\n\
         {{\"{MOVE_FIELD}\": {example}, \"{RATIONALE_FIELD}\": \"Blocking the opponent at {example}.\"}}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoder_for_matches_game_type() {
        for game in [GameType::TicTacToe, GameType::Reversi] {
            assert_eq!(encoder_for(game).game_type(), game);
        }
    }

    #[test]
    fn answer_contract_names_fields_and_legal_set() {
        let contract = answer_contract(&LegalMoves::new([6, 2, 7]));
        assert!(contract.contains("\"move\""));
        assert!(contract.contains("\"rationale\""));
        assert!(contract.contains("It MUST be one of [2, 6, 7]."));
        assert!(contract.contains("{\"move\": 2, \"rationale\":"));
    }
}
