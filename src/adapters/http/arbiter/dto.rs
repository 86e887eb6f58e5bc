//! Request and response DTOs for the move endpoint.
//!
//! Field names follow the public wire format used by game clients.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::DecideMoveCommand;
use crate::domain::arbitration::{ArbitrationError, MoveDecision, MoveRequest, ProviderConfig};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Provider selection sent by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerConfigDto {
    pub provider: String,
    pub model: String,
    pub api_key: SecretString,
}

/// Request body for `POST /api/move`.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveRequestDto {
    pub player_config: PlayerConfigDto,
    pub game_type: String,
    /// `"X"`, `"O"` or `null` per cell.
    pub board_state: Vec<Option<String>>,
    pub valid_moves: Vec<i64>,
    pub role: String,
    /// Optional provider deadline override, in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl MoveRequestDto {
    pub fn into_command(self) -> DecideMoveCommand {
        let request = MoveRequest {
            provider: ProviderConfig::new(
                self.player_config.provider,
                self.player_config.model,
                self.player_config.api_key,
            ),
            game_type: self.game_type,
            position: self.board_state,
            legal_moves: self.valid_moves,
            role_to_move: self.role,
        };

        let command = DecideMoveCommand::new(request);
        match self.timeout_ms {
            Some(ms) => command.with_timeout(Duration::from_millis(ms)),
            None => command,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response body for a decided move.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoveResponseDto {
    #[serde(rename = "move")]
    pub chosen_move: usize,
    pub reasoning: String,
}

impl From<MoveDecision> for MoveResponseDto {
    fn from(decision: MoveDecision) -> Self {
        Self {
            chosen_move: decision.chosen_move(),
            reasoning: decision.rationale().to_string(),
        }
    }
}

/// Error body for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error_code: String,
    pub message: String,
}

impl From<&ArbitrationError> for ErrorResponse {
    fn from(err: &ArbitrationError) -> Self {
        Self {
            error_code: err.kind().code().to_string(),
            message: err.message().to_string(),
        }
    }
}
