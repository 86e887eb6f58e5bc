//! Route configuration for arbiter endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{decide_move, health, ArbiterAppState};

/// Creates the arbiter router.
///
/// Routes:
/// - `POST /api/move` - Decide the next move
/// - `GET /health` - Liveness probe
pub fn arbiter_router() -> Router<ArbiterAppState> {
    Router::new()
        .route("/api/move", post(decide_move))
        .route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockReasoningProvider;
    use crate::application::DecideMoveHandler;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn app(mock: MockReasoningProvider) -> Router {
        let handler = DecideMoveHandler::new(Arc::new(mock), Duration::from_secs(5));
        arbiter_router().with_state(ArbiterAppState::new(Arc::new(handler)))
    }

    fn move_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/move")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn scenario_body() -> Value {
        json!({
            "player_config": {"provider": "openai", "model": "gpt-4o", "api_key": "sk-test"},
            "game_type": "tictactoe",
            "board_state": ["X", "X", null, "O", "O", null, null, null, null],
            "valid_moves": [2, 5, 6, 7, 8],
            "role": "X"
        })
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = app(MockReasoningProvider::new())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn move_returns_decision() {
        let mock = MockReasoningProvider::new()
            .with_payload(r#"{"move": 2, "rationale": "Completes the top row."}"#);

        let response = app(mock).oneshot(move_request(scenario_body())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"move": 2, "reasoning": "Completes the top row."})
        );
    }

    #[tokio::test]
    async fn illegal_answer_is_server_error() {
        let mock = MockReasoningProvider::new().with_payload(r#"{"move": 9, "rationale": "?"}"#);

        let response = app(mock).oneshot(move_request(scenario_body())).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error_code"], "ILLEGAL_MOVE");
    }

    #[tokio::test]
    async fn invalid_request_is_bad_request() {
        let mut body = scenario_body();
        body["valid_moves"] = json!([]);
        let mock = MockReasoningProvider::new();

        let response = app(mock.clone()).oneshot(move_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error_code"], "INVALID_REQUEST");
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/move")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app(MockReasoningProvider::new()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error_code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let mut body = scenario_body();
        body.as_object_mut().unwrap().remove("role");

        let response = app(MockReasoningProvider::new())
            .oneshot(move_request(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
