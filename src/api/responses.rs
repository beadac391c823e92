// src/api/responses.rs
//! Wire types for Notion API responses.
//!
//! Records and schemas are kept close to the JSON the store returns; mapping
//! them onto `Post` / `Portfolio` happens in the query layer, where a missing
//! or mistyped property can be reported against the configured name.

use crate::model::{FileObject, RichText};
use crate::types::{BlockId, Cursor, DatabaseId, PageId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Generic paginated response wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<Cursor>,
    #[serde(default)]
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// The cursor to resume from, if the store says more results follow.
    pub fn continuation(&self) -> Option<&Cursor> {
        if self.has_more {
            self.next_cursor.as_ref()
        } else {
            None
        }
    }
}

/// A database record (a Notion page inside a database).
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage {
    pub id: PageId,
    pub created_time: DateTime<Utc>,
    pub last_edited_time: DateTime<Utc>,
    #[serde(default)]
    pub cover: Option<FileObject>,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

/// A property value on a record. Kinds the pipeline never reads collapse into `Other`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title { title: Vec<RichText> },
    RichText { rich_text: Vec<RichText> },
    MultiSelect { multi_select: Vec<SelectOption> },
    Select { select: Option<SelectOption> },
    Checkbox { checkbox: bool },
    Url { url: Option<String> },
    CreatedTime { created_time: DateTime<Utc> },
    LastEditedTime { last_edited_time: DateTime<Utc> },
    #[serde(other)]
    Other,
}

impl PropertyValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Title { .. } => "title",
            Self::RichText { .. } => "rich_text",
            Self::MultiSelect { .. } => "multi_select",
            Self::Select { .. } => "select",
            Self::Checkbox { .. } => "checkbox",
            Self::Url { .. } => "url",
            Self::CreatedTime { .. } => "created_time",
            Self::LastEditedTime { .. } => "last_edited_time",
            Self::Other => "an unsupported property type",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// A database's schema: its property definitions.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDatabase {
    pub id: DatabaseId,
    #[serde(default)]
    pub properties: HashMap<String, SchemaProperty>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaProperty {
    MultiSelect { multi_select: SelectOptions },
    Select { select: SelectOptions },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectOptions {
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

/// A block as listed by the children endpoint, payload still untyped.
///
/// The payload sits under a key named after the block type; it is picked out
/// and typed by `adapter::convert_block`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBlock {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Error body returned by the Notion API.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionError {
    pub status: u16,
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_query_response_page() {
        let json = r#"{
            "object": "list",
            "results": [{
                "object": "page",
                "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
                "created_time": "2024-03-01T10:00:00.000Z",
                "last_edited_time": "2024-03-02T10:00:00.000Z",
                "cover": {"type": "external", "external": {"url": "https://img.example/c.png"}},
                "properties": {
                    "태그": {"id": "a", "type": "multi_select",
                             "multi_select": [{"id": "x", "name": "rust", "color": "red"}]},
                    "블로그 게시": {"id": "b", "type": "checkbox", "checkbox": true},
                    "작성자": {"id": "c", "type": "people", "people": []}
                }
            }],
            "next_cursor": "abc",
            "has_more": true,
            "type": "page_or_database"
        }"#;
        let response: PaginatedResponse<RawPage> = serde_json::from_str(json).unwrap();
        assert_eq!(response.continuation(), Some(&Cursor::new("abc")));

        let page = &response.results[0];
        assert_eq!(page.id.as_str(), "598337872cf94fdf8782e53db20768a5");
        assert_eq!(page.properties["블로그 게시"], PropertyValue::Checkbox { checkbox: true });
        assert_eq!(page.properties["작성자"], PropertyValue::Other);
        assert_eq!(page.cover.as_ref().map(FileObject::url), Some("https://img.example/c.png"));
    }

    #[test]
    fn cursor_is_ignored_when_has_more_is_false() {
        let response: PaginatedResponse<RawBlock> =
            serde_json::from_str(r#"{"results": [], "next_cursor": "stale", "has_more": false}"#)
                .unwrap();
        assert!(response.continuation().is_none());
    }

    #[test]
    fn raw_block_keeps_its_payload_under_the_type_key() {
        let block: RawBlock = serde_json::from_str(
            r#"{"object": "block", "id": "c02fc1d3-db8b-45c5-a222-27595b15aea7",
                "type": "divider", "has_children": false, "divider": {}}"#,
        )
        .unwrap();
        assert_eq!(block.block_type, "divider");
        assert!(block.fields.contains_key("divider"));
    }
}
