//! Document keys: caller-supplied logical keys and their namespaced storage form.

use std::fmt;

use crate::error::{KeeperError, Result};
use crate::store::{KEY_NAMESPACE, MAX_KEY_LENGTH, MIN_KEY_LENGTH};

/// A validated logical key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey(String);

impl DocumentKey {
    /// Validates a key for writing: non-empty and within the length bounds.
    pub fn for_write(raw: &str) -> Result<Self> {
        let key = Self::for_lookup(raw)?;
        let length = raw.chars().count();
        if length < MIN_KEY_LENGTH {
            return Err(KeeperError::Validation(format!(
                "key must be at least {} characters",
                MIN_KEY_LENGTH
            )));
        }
        if length > MAX_KEY_LENGTH {
            return Err(KeeperError::Validation(format!(
                "key must be {} characters or less",
                MAX_KEY_LENGTH
            )));
        }
        Ok(key)
    }

    /// Validates a key for reading or deleting: only emptiness is rejected.
    pub fn for_lookup(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(KeeperError::Validation("key cannot be empty".to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The namespaced key used against the backing engine.
    pub fn storage_key(&self) -> String {
        format!("{}{}", KEY_NAMESPACE, self.0)
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_is_namespaced() {
        let key = DocumentKey::for_write("hero1").unwrap();
        assert_eq!(key.as_str(), "hero1");
        assert_eq!(key.storage_key(), "user_save:hero1");
    }

    #[test]
    fn test_write_key_bounds() {
        assert!(DocumentKey::for_write("abc").is_ok());
        assert!(DocumentKey::for_write(&"x".repeat(50)).is_ok());

        assert!(matches!(
            DocumentKey::for_write(""),
            Err(KeeperError::Validation(msg)) if msg == "key cannot be empty"
        ));
        assert!(matches!(
            DocumentKey::for_write("ab"),
            Err(KeeperError::Validation(msg)) if msg == "key must be at least 3 characters"
        ));
        assert!(matches!(
            DocumentKey::for_write(&"x".repeat(51)),
            Err(KeeperError::Validation(msg)) if msg == "key must be 50 characters or less"
        ));
    }

    #[test]
    fn test_write_key_counts_characters_not_bytes() {
        // 50 two-byte characters
        assert!(DocumentKey::for_write(&"é".repeat(50)).is_ok());
        assert!(DocumentKey::for_write("éé").is_err());
    }

    #[test]
    fn test_lookup_key_only_rejects_empty() {
        assert!(DocumentKey::for_lookup("a").is_ok());
        assert!(DocumentKey::for_lookup(&"x".repeat(80)).is_ok());
        assert!(DocumentKey::for_lookup("").is_err());
    }
}
