use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Strongly typed Notion identifier, stored in its 32-character lowercase form.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

// Manual impl so `T` itself does not need to be `Clone`.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::from_normalized(self.value.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatabaseMarker;

pub type PageId = Id<PageMarker>;
pub type BlockId = Id<BlockMarker>;
pub type DatabaseId = Id<DatabaseMarker>;

impl<T> Id<T> {
    /// Parse a dashed UUID, a bare 32-character hex ID, or a Notion URL ending in an ID.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = normalize_notion_id(input)?;
        Ok(Self::from_normalized(normalized))
    }

    fn from_normalized(value: String) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    /// Create a new random v4 UUID ID
    pub fn new_v4() -> Self {
        Self::from_normalized(Uuid::new_v4().as_simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Get the ID with dashes for API calls
    pub fn to_dashed(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            &self.value[0..8],
            &self.value[8..12],
            &self.value[12..16],
            &self.value[16..20],
            &self.value[20..32]
        )
    }

    /// Reinterpret the same identifier as another kind of object.
    ///
    /// Notion pages are blocks too: a page's content is listed through the
    /// block-children endpoint using the page's own ID.
    pub fn cast<U>(&self) -> Id<U> {
        Id::from_normalized(self.value.clone())
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

fn normalize_notion_id(input: &str) -> Result<String, ValidationError> {
    let input = input.trim();

    if input.starts_with("http://") || input.starts_with("https://") {
        if let Some(id) = extract_id_from_url(input) {
            return normalize_notion_id(id);
        }
        return Err(ValidationError::InvalidId(format!(
            "Could not extract ID from URL: {}",
            input
        )));
    }

    if let Ok(uuid) = Uuid::parse_str(input) {
        return Ok(uuid.as_simple().to_string());
    }

    let normalized = input.replace('-', "");
    if normalized.len() != 32 {
        return Err(ValidationError::InvalidId(format!(
            "Invalid ID length: expected 32 characters, got {}",
            normalized.len()
        )));
    }

    if !normalized.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidId(
            "ID must contain only hexadecimal characters".to_string(),
        ));
    }

    Ok(normalized.to_lowercase())
}

fn extract_id_from_url(url: &str) -> Option<&str> {
    let url = url.split(['?', '#']).next().unwrap_or(url);
    let url = url.trim_end_matches('/');

    // https://www.notion.so/[workspace]/[title]-[id]
    if let Some(pos) = url.rfind('-') {
        let potential_id = &url[pos + 1..];
        if potential_id.len() == 32 {
            return Some(potential_id);
        }
    }

    // https://www.notion.so/[id]
    if let Some(pos) = url.rfind('/') {
        let potential_id = &url[pos + 1..];
        if potential_id.len() == 32 || (potential_id.len() == 36 && potential_id.contains('-')) {
            return Some(potential_id);
        }
    }

    None
}
