//! Shared reqwest plumbing for the provider adapters.

use reqwest::{Client, RequestBuilder};
use std::time::Duration;

use crate::ports::ProviderFailure;

/// Builds a client with a connect timeout only.
///
/// The overall call deadline is enforced by the dispatcher so that one
/// timeout governs every provider.
pub(super) fn build_client(connect_timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().connect_timeout(connect_timeout).build()
}

/// Sends a request and returns the body of a successful response.
///
/// Non-success statuses become failures carrying the status and body text.
pub(super) async fn send(request: RequestBuilder) -> Result<String, ProviderFailure> {
    let response = request.send().await.map_err(describe_send_error)?;
    let status = response.status();

    let body = response.text().await.map_err(|e| {
        ProviderFailure::with_status(
            status.as_u16(),
            format!("failed to read provider response: {e}"),
        )
    })?;

    if status.is_success() {
        return Ok(body);
    }

    let message = if body.trim().is_empty() {
        status.to_string()
    } else {
        body
    };
    Err(ProviderFailure::with_status(status.as_u16(), message))
}

fn describe_send_error(e: reqwest::Error) -> ProviderFailure {
    if e.is_timeout() {
        ProviderFailure::new(format!("provider request timed out: {e}"))
    } else if e.is_connect() {
        ProviderFailure::new(format!("connection failed: {e}"))
    } else {
        ProviderFailure::new(format!("network error: {e}"))
    }
}
