// src/api/mod.rs
//! Content store access: the ability to read records, schemas and block
//! children from a Notion workspace.
//!
//! Business logic depends on [`ContentStore`], never on HTTP details.

pub mod adapter;
pub mod client;
pub mod filter;
pub mod memory;
pub mod pagination;
pub mod parser;
pub mod responses;

use crate::error::AppError;
use crate::types::{BlockId, Cursor, DatabaseId, PageId};

pub use client::NotionHttpClient;
pub use filter::{Direction, Filter, QueryRequest, Sort, TextMatcher};
pub use memory::InMemoryStore;
pub use responses::{
    PaginatedResponse, PropertyValue, RawBlock, RawDatabase, RawPage, SchemaProperty,
    SelectOption,
};

/// The ability to retrieve content from a Notion workspace.
#[async_trait::async_trait]
pub trait ContentStore: Send + Sync {
    /// Runs one page of a filtered, sorted database query.
    async fn query_database(
        &self,
        database: &DatabaseId,
        request: &QueryRequest,
    ) -> Result<PaginatedResponse<RawPage>, AppError>;

    async fn retrieve_page(&self, id: &PageId) -> Result<RawPage, AppError>;

    /// Reads a database's schema (its property definitions).
    async fn retrieve_database(&self, id: &DatabaseId) -> Result<RawDatabase, AppError>;

    /// Lists one page of a block's direct children.
    async fn list_children(
        &self,
        parent: &BlockId,
        cursor: Option<&Cursor>,
    ) -> Result<PaginatedResponse<RawBlock>, AppError>;
}
