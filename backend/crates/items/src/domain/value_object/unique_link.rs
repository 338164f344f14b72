//! UniqueLink Value Object
//!
//! Public slug identifying an item in client-facing URLs, used in lieu
//! of the internal id. Shaped `{email local part}-{nanoid}` so links
//! stay human-readable while the nanoid keeps collisions negligible.
//! The database unique index is the backstop: a collision surfaces as a
//! creation failure, never an overwrite.

use kernel::email::Email;
use kernel::error::app_error::{AppError, AppResult};
use nid::Nanoid;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum link length (64-char local part + separator + 21-char nanoid
/// leaves headroom)
const LINK_MAX_LENGTH: usize = 96;

/// Public item slug
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UniqueLink(String);

impl UniqueLink {
    /// Generate a fresh link from the contact email
    pub fn generate(email: &Email) -> Self {
        let slug = slugify(email.local_part());
        let nano: Nanoid = Nanoid::new();
        Self(format!("{}-{}", slug, nano))
    }

    /// Parse a link from untrusted wire input (path segment)
    pub fn parse(link: impl Into<String>) -> AppResult<Self> {
        let link = link.into();

        if link.is_empty() || link.len() > LINK_MAX_LENGTH {
            return Err(AppError::bad_request("Invalid item link"));
        }

        if !link
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(AppError::bad_request("Invalid item link"));
        }

        Ok(Self(link))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(link: impl Into<String>) -> Self {
        Self(link.into())
    }

    /// Get the link as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }
}

/// Reduce an email local part to a lowercase ascii slug
fn slugify(local_part: &str) -> String {
    let slug: String = local_part
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug.trim_matches('-').to_string();

    if slug.is_empty() {
        "item".to_string()
    } else {
        slug
    }
}

impl FromStr for UniqueLink {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        UniqueLink::parse(s)
    }
}

impl fmt::Display for UniqueLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UniqueLink {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_keeps_local_part_prefix() {
        let email = Email::new("a@uni.edu").unwrap();
        let link = UniqueLink::generate(&email);
        assert!(link.as_str().starts_with("a-"), "{}", link);
    }

    #[test]
    fn test_generate_is_collision_resistant() {
        let email = Email::new("alice@uni.edu").unwrap();
        let a = UniqueLink::generate(&email);
        let b = UniqueLink::generate(&email);
        assert_ne!(a, b);
    }

    #[test]
    fn test_generated_links_parse_back() {
        let email = Email::new("alice.smith+lost@uni.edu").unwrap();
        let link = UniqueLink::generate(&email);
        assert_eq!(UniqueLink::parse(link.as_str()).unwrap(), link);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("alice"), "alice");
        assert_eq!(slugify("Alice.Smith"), "alice-smith");
        assert_eq!(slugify("a+b"), "a-b");
        assert_eq!(slugify("..."), "item");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(UniqueLink::parse("").is_err());
        assert!(UniqueLink::parse("has space").is_err());
        assert!(UniqueLink::parse("path/traversal").is_err());
        assert!(UniqueLink::parse("a".repeat(200)).is_err());
    }
}
