use serde::{Serialize, Serializer};
use std::fmt;

const UNKNOWN_TOKEN: &str = "unknown";
const UNASSIGNED_TOKEN: &str = "unspecified";
const UNASSIGNED_TRANSITIVE_TOKEN: &str = "transitive_unspecified";
const NEEDS_ATTENTION_TOKEN: &str = "attention_needed";

/// Owner of a library: a concrete team or one of the unresolved sentinels
///
/// Team tokens are kept verbatim (`:api_platform`, `core`, ...). Only the
/// sentinels are normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Owner {
    Known(String),
    Unknown,
    Unassigned,
    UnassignedTransitive,
    NeedsAttention,
}

impl Owner {
    /// Parses an owner token. Empty tokens parse to `Unknown`.
    ///
    /// Sentinels may carry a leading `:` (symbol notation in Gemfiles) and
    /// use either `-` or `_` between words.
    pub fn parse(token: &str) -> Self {
        let trimmed = token.trim();
        let sentinel = trimmed.trim_start_matches(':').replace('-', "_");
        match sentinel.as_str() {
            "" | UNKNOWN_TOKEN => Owner::Unknown,
            UNASSIGNED_TOKEN => Owner::Unassigned,
            UNASSIGNED_TRANSITIVE_TOKEN => Owner::UnassignedTransitive,
            NEEDS_ATTENTION_TOKEN => Owner::NeedsAttention,
            _ => Owner::Known(trimmed.to_string()),
        }
    }

    /// True for every variant except `Known`
    pub fn is_unresolved(&self) -> bool {
        !matches!(self, Owner::Known(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Owner::Known(team) => team,
            Owner::Unknown => UNKNOWN_TOKEN,
            Owner::Unassigned => UNASSIGNED_TOKEN,
            Owner::UnassignedTransitive => UNASSIGNED_TRANSITIVE_TOKEN,
            Owner::NeedsAttention => NEEDS_ATTENTION_TOKEN,
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Owner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Why a record carries its owner
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OwnerReason {
    /// Declared in the ecosystem's ownership table
    Assigned,
    /// Set by a special-case entry in the configuration
    Configured,
    /// Inherited from the named ancestor
    Ancestor(String),
}

impl OwnerReason {
    pub fn as_str(&self) -> &str {
        match self {
            OwnerReason::Assigned => "assigned",
            OwnerReason::Configured => "configured",
            OwnerReason::Ancestor(name) => name,
        }
    }
}

impl fmt::Display for OwnerReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for OwnerReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
