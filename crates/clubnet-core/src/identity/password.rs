use clubnet_core_types::Sensitive;
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of a raw password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn of(raw: &Sensitive<String>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(raw.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Wrap a digest read back from storage
    pub fn from_stored(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Digest-to-digest comparison that does not stop at the first mismatch
    pub fn matches(&self, other: &PasswordDigest) -> bool {
        let (a, b) = (self.0.as_bytes(), other.0.as_bytes());
        a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        let digest = PasswordDigest::of(&Sensitive::from("password"));
        assert_eq!(
            digest.as_str(),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    #[test]
    fn test_digest_is_deterministic_and_distinct() {
        let a = PasswordDigest::of(&Sensitive::from("s3cret"));
        let b = PasswordDigest::of(&Sensitive::from("s3cret"));
        let c = PasswordDigest::of(&Sensitive::from("s3cret!"));
        assert!(a.matches(&b));
        assert!(!a.matches(&c));
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn test_digest_never_contains_raw() {
        let digest = PasswordDigest::of(&Sensitive::from("plaintext"));
        assert!(!digest.as_str().contains("plaintext"));
        assert!(!format!("{:?}", digest).contains("plaintext"));
    }

    #[test]
    fn test_from_stored_matches() {
        let fresh = PasswordDigest::of(&Sensitive::from("pw"));
        let stored = PasswordDigest::from_stored(fresh.as_str().to_string());
        assert!(stored.matches(&fresh));
    }
}
