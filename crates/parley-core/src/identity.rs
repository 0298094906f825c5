//! Validated agent identifiers.
//!
//! Agent identities are used as lookup keys by the roster and compared by
//! the selection and termination strategies, so they are modeled as a
//! validated newtype rather than bare strings. Validation follows the
//! parse-don't-validate pattern: `AgentName::parse` returns a `Result`
//! instead of panicking on bad input.
//!
//! # Validation Rules
//!
//! - Non-empty (minimum 1 character)
//! - Maximum 128 characters
//! - No leading or trailing whitespace
//! - Only alphanumeric characters, hyphens (`-`), underscores (`_`), and dots (`.`)
//! - No path traversal sequences (`..`)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of an agent name in characters.
const MAX_NAME_LEN: usize = 128;

/// Reserved author name for messages seeded by the caller.
pub const USER_AUTHOR: &str = "user";

/// Error returned when an agent name fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAgentName {
    /// The name was empty.
    #[error("agent name must not be empty")]
    Empty,

    /// The name exceeded the maximum length.
    #[error("agent name exceeds {MAX_NAME_LEN} characters (got {length})")]
    TooLong {
        /// Actual length of the rejected name
        length: usize,
    },

    /// The name had leading or trailing whitespace.
    #[error("agent name must not have surrounding whitespace: '{name}'")]
    SurroundingWhitespace {
        /// The rejected name
        name: String,
    },

    /// The name contained a character outside the allowed set.
    #[error("agent name '{name}' contains invalid character '{character}'")]
    InvalidCharacter {
        /// The rejected name
        name: String,
        /// First offending character
        character: char,
    },

    /// The name contained a path traversal sequence.
    #[error("agent name '{name}' contains a traversal sequence")]
    Traversal {
        /// The rejected name
        name: String,
    },
}

/// Unique identifier for a chat participant.
///
/// Shared by the roster, the selection strategy, and the termination
/// strategy so that participants are never compared as raw strings.
/// The reserved name [`USER_AUTHOR`] attributes caller-seeded messages.
///
/// # Examples
///
/// ```rust
/// use parley_core::AgentName;
///
/// let name = AgentName::parse("SYSTEM_ARCHITECT").unwrap();
/// assert_eq!(name.as_str(), "SYSTEM_ARCHITECT");
///
/// assert!(AgentName::parse("").is_err());
/// assert!(AgentName::parse("agent/path").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentName(String);

impl AgentName {
    /// Parse and validate an agent name from a string.
    pub fn parse(name: impl AsRef<str>) -> Result<Self, InvalidAgentName> {
        let name = name.as_ref();
        if name.is_empty() {
            return Err(InvalidAgentName::Empty);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(InvalidAgentName::TooLong {
                length: name.chars().count(),
            });
        }
        if name.trim() != name {
            return Err(InvalidAgentName::SurroundingWhitespace {
                name: name.to_string(),
            });
        }
        if name.contains("..") {
            return Err(InvalidAgentName::Traversal {
                name: name.to_string(),
            });
        }
        if let Some(character) = name
            .chars()
            .find(|c| !(c.is_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(InvalidAgentName::InvalidCharacter {
                name: name.to_string(),
                character,
            });
        }
        Ok(Self(name.to_string()))
    }

    /// The reserved identity attributed to caller-seeded messages.
    pub fn user() -> Self {
        Self(USER_AUTHOR.to_string())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create a name without validation.
    ///
    /// Only use this in tests or for inputs guaranteed valid. All user
    /// input must go through [`AgentName::parse`].
    #[doc(hidden)]
    pub fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AgentName {
    type Err = InvalidAgentName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AgentName {
    type Error = InvalidAgentName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<AgentName> for String {
    fn from(name: AgentName) -> Self {
        name.0
    }
}

impl AsRef<str> for AgentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_names() {
        for name in ["SYSTEM_ARCHITECT", "agent-1", "a", "agent.v2"] {
            assert!(AgentName::parse(name).is_ok(), "expected '{name}' valid");
        }
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(AgentName::parse(""), Err(InvalidAgentName::Empty));
    }

    #[test]
    fn test_parse_rejects_whitespace() {
        assert!(matches!(
            AgentName::parse("  agent  "),
            Err(InvalidAgentName::SurroundingWhitespace { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_invalid_characters() {
        assert!(matches!(
            AgentName::parse("agent/path"),
            Err(InvalidAgentName::InvalidCharacter { character: '/', .. })
        ));
        assert!(matches!(
            AgentName::parse("two words"),
            Err(InvalidAgentName::InvalidCharacter { character: ' ', .. })
        ));
    }

    #[test]
    fn test_parse_rejects_traversal() {
        assert!(matches!(
            AgentName::parse("..secret"),
            Err(InvalidAgentName::Traversal { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_too_long() {
        let long = "a".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            AgentName::parse(&long),
            Err(InvalidAgentName::TooLong { .. })
        ));
    }

    #[test]
    fn test_user_author_is_reserved_name() {
        assert_eq!(AgentName::user().as_str(), USER_AUTHOR);
    }

    #[test]
    fn test_from_str_round_trip() {
        let name: AgentName = "DOMAIN_ARCHITECT".parse().unwrap();
        assert_eq!(String::from(name), "DOMAIN_ARCHITECT");
    }

    #[test]
    fn test_serde_rejects_invalid() {
        let err = serde_json::from_str::<AgentName>("\"bad name\"");
        assert!(err.is_err());
    }
}
