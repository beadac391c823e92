// src/lib.rs
//! notion-folio library: the content pipeline behind a Notion-backed blog
//! and portfolio site.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `NotionErrorCode`, `ValidationError`
//! - **Configuration**: `SiteConfig`, `StoreSchema`, `CommandLineInput`
//! - **Domain model**: `Post`, `Portfolio`, `Block`, etc.
//! - **Content store**: `ContentStore`, `NotionHttpClient`, `InMemoryStore`
//! - **Content trees**: `TreeFetcher`, `BlockNormalizer`, `group_list_items`
//! - **Queries**: `PostsService`, `PortfolioService`, `QueryCriteria`

pub mod api;
pub mod config;
pub mod constants;
pub mod content;
pub mod error;
pub mod model;
pub mod query;
pub mod site;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{
    Command, CommandLineInput, PortfolioSchema, PostSchema, SiteConfig, StoreSchema, StoreSource,
};

// --- Domain Model ---
pub use crate::model::{
    Block, BlockCommon, BlockNode, ImageContent, ImageSize, ListKind, Portfolio, PortfolioDetail,
    Post, PostDetail, PostPage, RichText,
};

// --- Domain Types ---
pub use crate::types::{ApiKey, BlockId, Cursor, DatabaseId, PageId, PropertyName};

// --- Content Store ---
pub use crate::api::{ContentStore, InMemoryStore, NotionHttpClient};

// --- Content Trees ---
pub use crate::content::{
    group_list_items, BlockNormalizer, HttpImageFetcher, ImageFetcher, PreviewError, TreeFetcher,
};

// --- Queries ---
pub use crate::query::{
    PortfolioFilter, PortfolioService, PostsService, QueryCriteria, SortOrder,
};
pub use crate::site::Site;
