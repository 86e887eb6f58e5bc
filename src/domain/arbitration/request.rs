//! Move requests as received from callers, and their validated form.

use secrecy::SecretString;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::domain::game::{BoardPosition, GameType, Marker};

/// External reasoning providers the arbiter can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderName {
    OpenAI,
    Anthropic,
    Gemini,
}

impl ProviderName {
    pub const ALL: [ProviderName; 3] = [
        ProviderName::OpenAI,
        ProviderName::Anthropic,
        ProviderName::Gemini,
    ];

    /// Wire identifier (`openai`, `anthropic`, `gemini`).
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderName::OpenAI => "openai",
            ProviderName::Anthropic => "anthropic",
            ProviderName::Gemini => "gemini",
        }
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognized provider identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported provider '{0}'")]
pub struct UnknownProvider(pub String);

impl FromStr for ProviderName {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderName::ALL
            .into_iter()
            .find(|provider| provider.as_str() == s)
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}

/// Caller-supplied provider selection, scoped to a single request.
///
/// The credential is wrapped in a [`SecretString`] so that `Debug` output and
/// tracing fields never reveal it.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider identifier as supplied by the caller.
    pub provider_name: String,
    /// Model identifier as supplied by the caller.
    pub model: String,
    credential: SecretString,
}

impl ProviderConfig {
    pub fn new(
        provider_name: impl Into<String>,
        model: impl Into<String>,
        credential: SecretString,
    ) -> Self {
        Self {
            provider_name: provider_name.into(),
            model: model.into(),
            credential,
        }
    }

    pub fn credential(&self) -> &SecretString {
        &self.credential
    }
}

/// An unvalidated request for the next move.
///
/// Field values mirror the wire format; [`MoveRequest::validate`] turns them
/// into a [`ValidatedMoveRequest`].
#[derive(Debug, Clone)]
pub struct MoveRequest {
    pub provider: ProviderConfig,
    /// Game identifier, e.g. `tictactoe`.
    pub game_type: String,
    /// Board cells; `None` is empty, otherwise a marker symbol.
    pub position: Vec<Option<String>>,
    /// Indices the external rules engine deems playable.
    pub legal_moves: Vec<i64>,
    /// Marker symbol of the side to move.
    pub role_to_move: String,
}

/// The finite, ordered set of playable board indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalMoves(BTreeSet<usize>);

impl LegalMoves {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self(indices.into_iter().collect())
    }

    /// Membership check against an untrusted, possibly negative index.
    pub fn contains(&self, index: i64) -> bool {
        usize::try_from(index).is_ok_and(|index| self.0.contains(&index))
    }

    /// Iterates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Display for LegalMoves {
    /// Renders as `[2, 5, 6]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, index) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{index}")?;
        }
        f.write_str("]")
    }
}

/// Provider selection after its name has been recognized.
#[derive(Debug, Clone)]
pub struct ResolvedProvider {
    pub name: ProviderName,
    pub model: String,
    pub credential: SecretString,
}

/// A move request that passed validation.
///
/// Only [`MoveRequest::validate`] constructs this type, so every instance
/// satisfies: board length matches the game, the legal-move set is non-empty
/// and within board bounds, and the role is a valid marker.
#[derive(Debug, Clone)]
pub struct ValidatedMoveRequest {
    pub(super) provider: ResolvedProvider,
    pub(super) position: BoardPosition,
    pub(super) legal_moves: LegalMoves,
    pub(super) role: Marker,
}

impl ValidatedMoveRequest {
    pub fn provider(&self) -> &ResolvedProvider {
        &self.provider
    }

    pub fn game_type(&self) -> GameType {
        self.position.game_type()
    }

    pub fn position(&self) -> &BoardPosition {
        &self.position
    }

    pub fn legal_moves(&self) -> &LegalMoves {
        &self.legal_moves
    }

    pub fn role(&self) -> Marker {
        self.role
    }
}
