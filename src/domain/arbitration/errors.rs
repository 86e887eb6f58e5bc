//! Arbitration error taxonomy.
//!
//! Every failure in the decide-move pipeline is reported as an
//! [`ArbitrationError`] carrying one stable [`ErrorKind`].
//!
//! # Status Mapping
//!
//! | Kind | Status class | HTTP |
//! |------|--------------|------|
//! | InvalidRequest | ClientInput | 400 |
//! | Auth | Credential | 401 |
//! | ProviderNotFound | Configuration | 404 |
//! | RateLimit | RetryLater | 429 |
//! | IllegalMove | ProviderDefect | 500 |
//! | MalformedResponse | ProviderDefect | 500 |
//! | Transport | Transient | 500 |
//! | Unknown | Transient | 500 |

use serde::Serialize;
use std::fmt;

/// Stable classification of an arbitration failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// The request is not well-formed; no provider call was made.
    InvalidRequest,
    /// The provider rejected the credential.
    Auth,
    /// The provider signalled throttling or quota exhaustion.
    RateLimit,
    /// The provider does not know the requested model.
    ProviderNotFound,
    /// The provider answer could not be parsed into a move decision.
    MalformedResponse,
    /// The provider chose a move outside the legal-move set.
    IllegalMove,
    /// The provider was unreachable or the call timed out.
    Transport,
    /// Anything the classifier could not place.
    Unknown,
}

impl ErrorKind {
    /// Machine-readable error code.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::InvalidRequest => "INVALID_REQUEST",
            ErrorKind::Auth => "AUTH",
            ErrorKind::RateLimit => "RATE_LIMIT",
            ErrorKind::ProviderNotFound => "PROVIDER_NOT_FOUND",
            ErrorKind::MalformedResponse => "MALFORMED_RESPONSE",
            ErrorKind::IllegalMove => "ILLEGAL_MOVE",
            ErrorKind::Transport => "TRANSPORT",
            ErrorKind::Unknown => "UNKNOWN",
        }
    }

    /// Caller-facing status class for this kind.
    pub fn status_class(self) -> StatusClass {
        match self {
            ErrorKind::InvalidRequest => StatusClass::ClientInput,
            ErrorKind::Auth => StatusClass::Credential,
            ErrorKind::ProviderNotFound => StatusClass::Configuration,
            ErrorKind::RateLimit => StatusClass::RetryLater,
            ErrorKind::IllegalMove | ErrorKind::MalformedResponse => StatusClass::ProviderDefect,
            ErrorKind::Transport | ErrorKind::Unknown => StatusClass::Transient,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// What the caller should do about a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    /// Fix the request; it cannot succeed as given.
    ClientInput,
    /// Supply a different credential.
    Credential,
    /// Choose a different provider or model.
    Configuration,
    /// Retry later.
    RetryLater,
    /// The provider answered, but the answer was unusable.
    ProviderDefect,
    /// Transient or server-side failure.
    Transient,
}

impl StatusClass {
    /// HTTP status code representing this class.
    pub fn http_status(self) -> u16 {
        match self {
            StatusClass::ClientInput => 400,
            StatusClass::Credential => 401,
            StatusClass::Configuration => 404,
            StatusClass::RetryLater => 429,
            StatusClass::ProviderDefect | StatusClass::Transient => 500,
        }
    }
}

/// A classified arbitration failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ArbitrationError {
    kind: ErrorKind,
    message: String,
}

impl ArbitrationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Auth, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimit, message)
    }

    pub fn provider_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ProviderNotFound, message)
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedResponse, message)
    }

    pub fn illegal_move(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IllegalMove, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_class(&self) -> StatusClass {
        self.kind.status_class()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_is_stable() {
        let expected = [
            (ErrorKind::InvalidRequest, 400),
            (ErrorKind::Auth, 401),
            (ErrorKind::ProviderNotFound, 404),
            (ErrorKind::RateLimit, 429),
            (ErrorKind::IllegalMove, 500),
            (ErrorKind::MalformedResponse, 500),
            (ErrorKind::Transport, 500),
            (ErrorKind::Unknown, 500),
        ];
        for (kind, status) in expected {
            assert_eq!(kind.status_class().http_status(), status, "{kind}");
        }
    }

    #[test]
    fn provider_defects_are_distinct_from_transient_failures() {
        assert_eq!(
            ErrorKind::IllegalMove.status_class(),
            StatusClass::ProviderDefect
        );
        assert_eq!(ErrorKind::Transport.status_class(), StatusClass::Transient);
    }

    #[test]
    fn constructors_set_kind_and_message() {
        let err = ArbitrationError::illegal_move("move 9 is not legal");
        assert_eq!(err.kind(), ErrorKind::IllegalMove);
        assert_eq!(err.message(), "move 9 is not legal");
        assert_eq!(err.to_string(), "ILLEGAL_MOVE: move 9 is not legal");
    }

    #[test]
    fn kind_serializes_as_code() {
        let json = serde_json::to_string(&ErrorKind::ProviderNotFound).unwrap();
        assert_eq!(json, "\"PROVIDER_NOT_FOUND\"");
    }
}
