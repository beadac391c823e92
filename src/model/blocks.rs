//! Per-variant block payloads.
//!
//! Each payload deserializes from the object the store nests under the
//! block's type key (`"paragraph": {...}`) and serializes flat next to the
//! block's common fields.

use super::rich_text::{default_color, RichText};
use crate::types::{BlockId, DatabaseId, PageId};
use serde::{Deserialize, Serialize};

/// Payload of blocks that carry nothing but their position in the tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Empty {}

/// Styled text with a block color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default = "default_color")]
    pub color: String,
}

impl TextContent {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            rich_text: vec![RichText::plain(text)],
            color: default_color(),
        }
    }
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            rich_text: Vec::new(),
            color: default_color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToDoContent {
    #[serde(flatten)]
    pub text: TextContent,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalloutContent {
    #[serde(flatten)]
    pub text: TextContent,
    #[serde(default)]
    pub icon: Option<Icon>,
}

/// Icon types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Icon {
    Emoji { emoji: String },
    External { external: ExternalFile },
    File { file: HostedFile },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeContent {
    #[serde(flatten)]
    pub text: TextContent,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub caption: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EquationContent {
    #[serde(default)]
    pub expression: String,
}

/// Where a file lives, as the store reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileObject {
    External { external: ExternalFile },
    File { file: HostedFile },
}

impl FileObject {
    /// The effective URL: the external URL, or the store-hosted file URL.
    pub fn url(&self) -> &str {
        match self {
            Self::External { external } => &external.url,
            Self::File { file } => &file.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostedFile {
    pub url: String,
    #[serde(default)]
    pub expiry_time: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOrigin {
    External,
    File,
}

/// A file reference flattened for output.
///
/// The store's tagged `{"type": "external", "external": {...}}` form would
/// clash with the block's own `type` key once flattened, so the origin is
/// carried in a separate field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FileObject")]
pub struct FileSource {
    pub origin: FileOrigin,
    pub url: String,
}

impl From<FileObject> for FileSource {
    fn from(file: FileObject) -> Self {
        let origin = match &file {
            FileObject::External { .. } => FileOrigin::External,
            FileObject::File { .. } => FileOrigin::File,
        };
        Self {
            url: file.url().to_string(),
            origin,
        }
    }
}

/// Video, pdf, file and audio blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaContent {
    #[serde(flatten)]
    pub source: FileSource,
    #[serde(default)]
    pub caption: Vec<RichText>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageContent {
    #[serde(flatten)]
    pub source: FileSource,
    #[serde(default)]
    pub caption: Vec<RichText>,
    /// Intrinsic size, filled in by normalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,
    /// `data:` URL of a tiny preview, filled in by normalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl ImageContent {
    pub fn external(url: impl Into<String>) -> Self {
        Self {
            source: FileSource {
                origin: FileOrigin::External,
                url: url.into(),
            },
            caption: Vec::new(),
            size: None,
            placeholder: None,
        }
    }
}

/// Bookmark, embed and link preview blocks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinkContent {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub caption: Vec<RichText>,
}

/// Child page and child database blocks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TitleContent {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinkToPageContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<PageId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_id: Option<DatabaseId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableContent {
    #[serde(default)]
    pub table_width: u32,
    #[serde(default)]
    pub has_column_header: bool,
    #[serde(default)]
    pub has_row_header: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableRowContent {
    #[serde(default)]
    pub cells: Vec<Vec<RichText>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SyncedContent {
    #[serde(default)]
    pub synced_from: Option<SyncedFrom>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncedFrom {
    pub block_id: BlockId,
}

/// A block type this crate does not model; keeps the store's type name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UnsupportedContent {
    #[serde(default)]
    pub block_type: String,
}
