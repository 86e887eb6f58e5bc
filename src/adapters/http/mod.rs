//! HTTP adapters - REST API implementations.
//!
//! [`app_router`] assembles the arbiter routes with the cross-cutting
//! tower-http layers configured from [`ServerConfig`].

pub mod arbiter;

pub use arbiter::{arbiter_router, ArbiterApiError, ArbiterAppState};

use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::domain::arbitration::ArbitrationError;

/// Builds the full application router.
pub fn app_router(state: ArbiterAppState, server: &ServerConfig) -> Router {
    arbiter_router()
        .with_state(state)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(map_response(transport_on_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(server))
}

/// The timeout layer answers with an empty 408; callers get the
/// `TRANSPORT` error body instead.
async fn transport_on_timeout(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }
    tracing::warn!("Request exceeded the server timeout");
    ArbiterApiError(ArbitrationError::transport(
        "request exceeded the server timeout",
    ))
    .into_response()
}

/// Any origin when none are configured; otherwise only the listed ones.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}
