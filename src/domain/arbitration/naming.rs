//! Model naming quirks per provider.
//!
//! The completion capability routes on a single model string. Some providers
//! expect that string to carry a provider prefix (`gemini/gemini-2.5-flash`).
//! This is a pure naming transform, so it is a lookup table rather than
//! per-provider types.

use super::request::ProviderName;

/// Routing prefix required by each provider, if any.
const MODEL_PREFIXES: &[(ProviderName, Option<&str>)] = &[
    (ProviderName::OpenAI, None),
    (ProviderName::Anthropic, None),
    (ProviderName::Gemini, Some("gemini/")),
];

fn prefix_for(provider: ProviderName) -> Option<&'static str> {
    MODEL_PREFIXES
        .iter()
        .find(|(name, _)| *name == provider)
        .and_then(|(_, prefix)| *prefix)
}

/// Builds the routing identifier the completion capability expects.
///
/// Already-prefixed models are passed through unchanged.
pub fn routing_identifier(provider: ProviderName, model: &str) -> String {
    match prefix_for(provider) {
        Some(prefix) if !model.starts_with(prefix) => format!("{prefix}{model}"),
        _ => model.to_string(),
    }
}

/// Recovers the provider-native model name from a routing identifier.
pub fn native_model(provider: ProviderName, routing_identifier: &str) -> &str {
    prefix_for(provider)
        .and_then(|prefix| routing_identifier.strip_prefix(prefix))
        .unwrap_or(routing_identifier)
}
