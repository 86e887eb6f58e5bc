//! HTTP handlers for the move endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::application::DecideMoveHandler;
use crate::domain::arbitration::ArbitrationError;

use super::dto::{ErrorResponse, MoveRequestDto, MoveResponseDto};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Shared state for arbiter routes.
#[derive(Clone)]
pub struct ArbiterAppState {
    pub decide_move: Arc<DecideMoveHandler>,
}

impl ArbiterAppState {
    pub fn new(decide_move: Arc<DecideMoveHandler>) -> Self {
        Self { decide_move }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

/// Arbitration failure rendered as `{error_code, message}` with its class status.
#[derive(Debug)]
pub struct ArbiterApiError(pub ArbitrationError);

impl From<ArbitrationError> for ArbiterApiError {
    fn from(err: ArbitrationError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ArbiterApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ArbitrationError::invalid_request(rejection.body_text()))
    }
}

impl IntoResponse for ArbiterApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_class().http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/move - Decide the next move
pub async fn decide_move(
    State(state): State<ArbiterAppState>,
    payload: Result<Json<MoveRequestDto>, JsonRejection>,
) -> Result<Json<MoveResponseDto>, ArbiterApiError> {
    let Json(dto) = payload?;
    let decision = state.decide_move.handle(dto.into_command()).await?;
    Ok(Json(decision.into()))
}

/// GET /health - Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_map_to_class_statuses() {
        let cases = [
            (ArbitrationError::invalid_request("x"), StatusCode::BAD_REQUEST),
            (ArbitrationError::auth("x"), StatusCode::UNAUTHORIZED),
            (ArbitrationError::provider_not_found("x"), StatusCode::NOT_FOUND),
            (ArbitrationError::rate_limit("x"), StatusCode::TOO_MANY_REQUESTS),
            (ArbitrationError::illegal_move("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (ArbitrationError::malformed_response("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (ArbitrationError::transport("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (ArbitrationError::unknown("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ArbiterApiError(err).into_response().status(), expected);
        }
    }
}
