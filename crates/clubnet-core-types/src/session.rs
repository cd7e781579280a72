//! Session token type
//!
//! A session token identifies one login of one user. Tokens are opaque to
//! callers and never reused.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for a logged-in session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a new random token using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_generation() {
        let t1 = SessionToken::new();
        let t2 = SessionToken::new();

        assert_ne!(t1, t2);
        assert!(!t1.as_str().is_empty());
    }

    #[test]
    fn test_token_display() {
        let token = SessionToken::new();
        assert_eq!(format!("{}", token), token.as_str());
    }

    #[test]
    fn test_serialization() {
        let token = SessionToken::new();
        let json = serde_json::to_string(&token).unwrap();
        let back: SessionToken = serde_json::from_str(&json).unwrap();
        assert_eq!(token, back);
    }
}
