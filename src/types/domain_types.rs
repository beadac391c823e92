// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API key for Notion API authentication
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key with validation
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();

        if key.is_empty() {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot be empty".to_string(),
            });
        }

        if !key.starts_with("secret_") && !key.starts_with("ntn_") {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key must start with 'secret_' or 'ntn_'".to_string(),
            });
        }

        if key.len() < 20 {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key is too short".to_string(),
            });
        }

        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}...", &self.0[..10])
    }
}

// Never print the full secret, not even in debug logs.
impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self)
    }
}

/// The name of a property on a Notion page or database.
///
/// Property names are human-language labels chosen in the Notion UI, so they
/// always come from configuration rather than code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyName(String);

impl PropertyName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::borrow::Borrow<str> for PropertyName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PropertyName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque resume token handed out by the store for paginated listings.
///
/// Only meaningful for the traversal that produced it; pass it back untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
