//! Provider failure classification.
//!
//! Provider failure types are outside our control, so classification works
//! from the signal every failure can carry: an optional upstream status code
//! and descriptive text. Status codes win; text patterns are the fallback.

use super::errors::{ArbitrationError, ErrorKind};

/// Text patterns per kind, checked in order against lowercased text.
const TEXT_PATTERNS: &[(ErrorKind, &[&str])] = &[
    (
        ErrorKind::Auth,
        &[
            "authenticationerror",
            "authentication",
            "unauthorized",
            "invalid api key",
            "incorrect api key",
            "invalid x-api-key",
            "api key not valid",
            "api_key_invalid",
            "permission denied",
            "permission_denied",
        ],
    ),
    (
        ErrorKind::RateLimit,
        &[
            "ratelimiterror",
            "rate limit",
            "rate_limit",
            "too many requests",
            "quota",
            "resource_exhausted",
            "overloaded",
        ],
    ),
    (
        ErrorKind::ProviderNotFound,
        &[
            "notfounderror",
            "model_not_found",
            "not_found",
            "not found",
            "does not exist",
            "unknown model",
        ],
    ),
    (
        ErrorKind::Transport,
        &[
            "timed out",
            "timeout",
            "connection",
            "unreachable",
            "dns error",
            "network",
            "service unavailable",
            "bad gateway",
        ],
    ),
];

/// Maps an upstream status code to a kind, when the code is unambiguous.
fn kind_for_status(status: u16) -> Option<ErrorKind> {
    match status {
        401 | 403 => Some(ErrorKind::Auth),
        404 => Some(ErrorKind::ProviderNotFound),
        429 | 529 => Some(ErrorKind::RateLimit),
        408 | 502 | 503 | 504 => Some(ErrorKind::Transport),
        _ => None,
    }
}

fn kind_for_text(description: &str) -> Option<ErrorKind> {
    let lowered = description.to_lowercase();
    TEXT_PATTERNS
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|p| lowered.contains(p)))
        .map(|(kind, _)| *kind)
}

/// Classifies a provider failure into the arbitration taxonomy.
///
/// Never yields `INVALID_REQUEST`, `MALFORMED_RESPONSE` or `ILLEGAL_MOVE`;
/// those are raised by the validators, not by the provider call.
pub fn classify_failure(status: Option<u16>, description: &str) -> ArbitrationError {
    let kind = status
        .and_then(kind_for_status)
        .or_else(|| kind_for_text(description))
        .unwrap_or(ErrorKind::Unknown);

    ArbitrationError::new(kind, description)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(status: Option<u16>, text: &str) -> ErrorKind {
        classify_failure(status, text).kind()
    }

    #[test]
    fn status_codes_take_precedence() {
        assert_eq!(kind(Some(401), "something odd"), ErrorKind::Auth);
        assert_eq!(kind(Some(403), ""), ErrorKind::Auth);
        assert_eq!(kind(Some(404), ""), ErrorKind::ProviderNotFound);
        assert_eq!(kind(Some(429), "connection reset"), ErrorKind::RateLimit);
        assert_eq!(kind(Some(529), ""), ErrorKind::RateLimit);
        assert_eq!(kind(Some(504), ""), ErrorKind::Transport);
    }

    #[test]
    fn text_classifies_when_status_is_ambiguous() {
        assert_eq!(
            kind(Some(400), r#"{"error":{"message":"API key not valid. Please pass a valid API key."}}"#),
            ErrorKind::Auth
        );
        assert_eq!(
            kind(Some(400), "The model `gpt-9` does not exist"),
            ErrorKind::ProviderNotFound
        );
        assert_eq!(kind(Some(500), "internal error"), ErrorKind::Unknown);
    }

    #[test]
    fn text_only_signals() {
        assert_eq!(kind(None, "AuthenticationError: bad key"), ErrorKind::Auth);
        assert_eq!(kind(None, "RateLimitError: slow down"), ErrorKind::RateLimit);
        assert_eq!(kind(None, "You exceeded your current quota"), ErrorKind::RateLimit);
        assert_eq!(kind(None, "NotFoundError: model"), ErrorKind::ProviderNotFound);
        assert_eq!(kind(None, "request timed out after 30s"), ErrorKind::Transport);
        assert_eq!(kind(None, "connection refused"), ErrorKind::Transport);
        assert_eq!(kind(None, "something else entirely"), ErrorKind::Unknown);
    }

    #[test]
    fn never_yields_validation_kinds() {
        for status in [None, Some(400), Some(422), Some(500)] {
            let k = kind(status, "invalid request: illegal move, malformed");
            assert!(!matches!(
                k,
                ErrorKind::InvalidRequest | ErrorKind::IllegalMove | ErrorKind::MalformedResponse
            ));
        }
    }

    #[test]
    fn keeps_description_as_message() {
        let err = classify_failure(Some(401), "provider returned 401: invalid key");
        assert_eq!(err.message(), "provider returned 401: invalid key");
    }
}
