//! Move Arbiter HTTP server.

use std::error::Error;
use std::sync::Arc;

use move_arbiter::adapters::ai::RoutingProvider;
use move_arbiter::adapters::http::{app_router, ArbiterAppState};
use move_arbiter::application::DecideMoveHandler;
use move_arbiter::config::AppConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let provider = RoutingProvider::from_config(&config.providers)?;
    let handler = DecideMoveHandler::new(Arc::new(provider), config.providers.provider_timeout())
        .with_max_timeout(config.server.request_timeout());
    let app = app_router(ArbiterAppState::new(Arc::new(handler)), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        provider_timeout_secs = config.providers.provider_timeout_secs,
        "Move arbiter listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Move arbiter shut down");
    Ok(())
}

/// `RUST_LOG` wins over the configured filter; production logs are JSON.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
