//! Request validation.
//!
//! Runs before any provider is contacted, so a malformed request never costs
//! an outbound call.

use secrecy::ExposeSecret;

use super::errors::ArbitrationError;
use super::request::{
    LegalMoves, MoveRequest, ProviderName, ResolvedProvider, ValidatedMoveRequest,
};
use crate::domain::game::{BoardPosition, Cell, GameType, Marker};

impl MoveRequest {
    /// Checks that the request is well-formed.
    ///
    /// # Errors
    ///
    /// Returns an `INVALID_REQUEST` error when the provider or game type is
    /// unrecognized, the model or credential is blank, the board length does
    /// not match the game, a cell holds an unknown symbol, the legal-move set
    /// is empty or reaches outside the board, or the role is not a marker.
    pub fn validate(self) -> Result<ValidatedMoveRequest, ArbitrationError> {
        let provider = resolve_provider(&self)?;

        let game_type = self
            .game_type
            .parse::<GameType>()
            .map_err(|e| ArbitrationError::invalid_request(e.to_string()))?;

        let cells = self
            .position
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                Cell::parse(raw.as_deref()).map_err(|e| {
                    ArbitrationError::invalid_request(format!("cell {index}: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let position = BoardPosition::new(game_type, cells)
            .map_err(|e| ArbitrationError::invalid_request(e.to_string()))?;

        let legal_moves = legal_moves_within(&self.legal_moves, position.len())?;

        let role = self.role_to_move.parse::<Marker>().map_err(|e| {
            ArbitrationError::invalid_request(format!("role to move: {e}"))
        })?;

        Ok(ValidatedMoveRequest {
            provider,
            position,
            legal_moves,
            role,
        })
    }
}

fn resolve_provider(request: &MoveRequest) -> Result<ResolvedProvider, ArbitrationError> {
    let config = &request.provider;

    let name = config
        .provider_name
        .parse::<ProviderName>()
        .map_err(|e| ArbitrationError::invalid_request(e.to_string()))?;

    let model = config.model.trim();
    if model.is_empty() {
        return Err(ArbitrationError::invalid_request(
            "model identifier cannot be empty",
        ));
    }

    if config.credential().expose_secret().trim().is_empty() {
        return Err(ArbitrationError::invalid_request("credential cannot be empty"));
    }

    Ok(ResolvedProvider {
        name,
        model: model.to_string(),
        credential: config.credential().clone(),
    })
}

fn legal_moves_within(raw: &[i64], board_len: usize) -> Result<LegalMoves, ArbitrationError> {
    if raw.is_empty() {
        return Err(ArbitrationError::invalid_request(
            "legal-move set cannot be empty",
        ));
    }

    let indices = raw
        .iter()
        .map(|&index| {
            usize::try_from(index)
                .ok()
                .filter(|&index| index < board_len)
                .ok_or_else(|| {
                    ArbitrationError::invalid_request(format!(
                        "legal move {index} is outside the board [0, {board_len})"
                    ))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LegalMoves::new(indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::arbitration::{ErrorKind, ProviderConfig};
    use proptest::prelude::*;
    use secrecy::SecretString;

    fn tictactoe_request() -> MoveRequest {
        MoveRequest {
            provider: ProviderConfig::new(
                "openai",
                "gpt-4o",
                SecretString::new("sk-test".to_string()),
            ),
            game_type: "tictactoe".to_string(),
            position: vec![
                Some("X".to_string()),
                Some("X".to_string()),
                None,
                Some("O".to_string()),
                Some("O".to_string()),
                None,
                None,
                None,
                None,
            ],
            legal_moves: vec![2, 5, 6, 7, 8],
            role_to_move: "X".to_string(),
        }
    }

    fn assert_invalid(request: MoveRequest) {
        let err = request.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest, "{err}");
    }

    #[test]
    fn accepts_well_formed_request() {
        let validated = tictactoe_request().validate().unwrap();

        assert_eq!(validated.game_type(), GameType::TicTacToe);
        assert_eq!(validated.role(), Marker::X);
        assert_eq!(validated.legal_moves().to_vec(), vec![2, 5, 6, 7, 8]);
        assert_eq!(validated.provider().name, ProviderName::OpenAI);
        assert_eq!(validated.provider().model, "gpt-4o");
        assert_eq!(
            validated.position().cell(0),
            Some(Cell::Occupied(Marker::X))
        );
    }

    #[test]
    fn rejects_board_length_mismatch() {
        let mut request = tictactoe_request();
        request.position.pop();
        assert_invalid(request);
    }

    #[test]
    fn rejects_empty_legal_moves() {
        let mut request = tictactoe_request();
        request.legal_moves.clear();
        assert_invalid(request);
    }

    #[test]
    fn rejects_out_of_bounds_legal_move() {
        let mut request = tictactoe_request();
        request.legal_moves.push(9);
        assert_invalid(request);
    }

    #[test]
    fn rejects_negative_legal_move() {
        let mut request = tictactoe_request();
        request.legal_moves.push(-1);
        assert_invalid(request);
    }

    #[test]
    fn rejects_unknown_role() {
        let mut request = tictactoe_request();
        request.role_to_move = "Z".to_string();
        assert_invalid(request);
    }

    #[test]
    fn rejects_unknown_provider() {
        let mut request = tictactoe_request();
        request.provider.provider_name = "mistral".to_string();
        assert_invalid(request);
    }

    #[test]
    fn rejects_unknown_game_type() {
        let mut request = tictactoe_request();
        request.game_type = "chess".to_string();
        assert_invalid(request);
    }

    #[test]
    fn rejects_blank_model_and_credential() {
        let mut request = tictactoe_request();
        request.provider.model = "  ".to_string();
        assert_invalid(request);

        let mut request = tictactoe_request();
        request.provider =
            ProviderConfig::new("openai", "gpt-4o", SecretString::new(String::new()));
        assert_invalid(request);
    }

    #[test]
    fn rejects_unknown_cell_symbol() {
        let mut request = tictactoe_request();
        request.position[2] = Some("Q".to_string());
        assert_invalid(request);
    }

    #[test]
    fn occupied_legal_move_is_not_second_guessed() {
        let mut request = tictactoe_request();
        request.legal_moves = vec![0];
        assert!(request.validate().is_ok());
    }

    #[test]
    fn duplicate_legal_moves_collapse() {
        let mut request = tictactoe_request();
        request.legal_moves = vec![5, 2, 5];
        let validated = request.validate().unwrap();
        assert_eq!(validated.legal_moves().to_vec(), vec![2, 5]);
    }

    proptest! {
        #[test]
        fn any_index_outside_board_is_rejected(
            mut moves in proptest::collection::vec(0i64..9, 0..6),
            outside in prop_oneof![i64::MIN..0, 9i64..i64::MAX],
            position in 0usize..6,
        ) {
            let at = position.min(moves.len());
            moves.insert(at, outside);
            let mut request = tictactoe_request();
            request.legal_moves = moves;
            let err = request.validate().unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        }

        #[test]
        fn any_in_bounds_subset_is_accepted(
            moves in proptest::collection::vec(0i64..9, 1..9),
        ) {
            let mut request = tictactoe_request();
            request.legal_moves = moves.clone();
            let validated = request.validate().unwrap();
            for index in moves {
                prop_assert!(validated.legal_moves().contains(index));
            }
        }
    }
}
