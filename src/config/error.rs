//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid socket address")]
    InvalidSocketAddress,

    #[error("Invalid provider timeout")]
    InvalidProviderTimeout,

    #[error("Provider timeout must be shorter than the server request timeout")]
    ProviderTimeoutExceedsRequestTimeout,

    #[error("Invalid base URL for {0}")]
    InvalidBaseUrl(&'static str),

    #[error("Anthropic max_tokens must be greater than zero")]
    InvalidMaxTokens,
}
