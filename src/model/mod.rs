//! Domain model: the records the site lists and the block trees it renders.

mod block;
pub mod blocks;
pub mod common;
pub mod rich_text;

pub use block::{Block, ListKind};
pub use blocks::*;
pub use common::*;
pub use rich_text::{plain_text, Annotations, RichText};

use crate::types::{Cursor, PageId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A published blog post, projected from one database record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PageId,
    pub created_at: DateTime<Utc>,
    pub last_edited_at: DateTime<Utc>,
    pub cover_image: Option<String>,
    pub tags: Vec<String>,
    pub title: String,
    pub description: String,
    pub slug: String,
}

/// A portfolio entry, projected from one database record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: PageId,
    pub title: String,
    pub cover_image: Option<String>,
    pub categories: Vec<String>,
    pub technologies: Vec<String>,
    pub demo_url: Option<String>,
    pub github_url: Option<String>,
}

/// A post together with its rendered content tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub content: Vec<Block>,
}

/// A portfolio entry together with its rendered content tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioDetail {
    #[serde(flatten)]
    pub portfolio: Portfolio,
    pub content: Vec<Block>,
}

/// One page of posts and, in cursor mode, where the next page starts.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub posts: Vec<Post>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<Cursor>,
}
