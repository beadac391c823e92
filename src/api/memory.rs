// src/api/memory.rs
//! An in-process content store.
//!
//! Serves records, schemas and block children from memory with the same
//! pagination contract as the HTTP store. Used for fixtures and tests.

use super::filter::{Direction, QueryRequest, Sort};
use super::responses::{PaginatedResponse, PropertyValue, RawBlock, RawDatabase, RawPage};
use super::ContentStore;
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::{AppError, NotionErrorCode};
use crate::model::plain_text;
use crate::types::{BlockId, Cursor, DatabaseId, PageId};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    databases: HashMap<DatabaseId, MemoryDatabase>,
    pages: HashMap<PageId, RawPage>,
    children: HashMap<BlockId, Vec<RawBlock>>,
    children_page_size: Option<usize>,
    queries: AtomicUsize,
    children_requests: AtomicUsize,
}

#[derive(Debug)]
struct MemoryDatabase {
    schema: RawDatabase,
    records: Vec<PageId>,
}

/// On-disk layout accepted by [`InMemoryStore::from_fixture`].
#[derive(Debug, Deserialize)]
struct Fixture {
    #[serde(default)]
    databases: Vec<FixtureDatabase>,
    #[serde(default)]
    children: HashMap<String, Vec<RawBlock>>,
}

#[derive(Debug, Deserialize)]
struct FixtureDatabase {
    schema: RawDatabase,
    #[serde(default)]
    records: Vec<RawPage>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads databases and block children from a JSON fixture file.
    pub fn from_fixture(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)?;
        let fixture: Fixture = serde_json::from_str(&text).map_err(|e| {
            AppError::MalformedResponse(format!("Fixture {}: {}", path.display(), e))
        })?;

        let mut store = Self::new();
        for database in fixture.databases {
            store = store.with_database(database.schema, database.records);
        }
        for (parent, blocks) in fixture.children {
            store = store.with_children(BlockId::parse(&parent)?, blocks);
        }
        log::info!(
            "Loaded fixture {} ({} databases, {} records)",
            path.display(),
            store.databases.len(),
            store.pages.len()
        );
        Ok(store)
    }

    /// Adds a database with its records, in store order.
    pub fn with_database(mut self, schema: RawDatabase, records: Vec<RawPage>) -> Self {
        let ids = records.iter().map(|r| r.id.clone()).collect();
        for record in records {
            self.pages.insert(record.id.clone(), record);
        }
        self.databases.insert(
            schema.id.clone(),
            MemoryDatabase {
                schema,
                records: ids,
            },
        );
        self
    }

    /// Sets the children listed under a block (or page).
    pub fn with_children(mut self, parent: BlockId, blocks: Vec<RawBlock>) -> Self {
        self.children.insert(parent, blocks);
        self
    }

    /// Caps how many children one listing request returns.
    pub fn with_children_page_size(mut self, size: usize) -> Self {
        self.children_page_size = Some(size.max(1));
        self
    }

    /// Number of database queries served so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(AtomicOrdering::SeqCst)
    }

    /// Number of children listing requests served so far.
    pub fn children_request_count(&self) -> usize {
        self.children_requests.load(AtomicOrdering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ContentStore for InMemoryStore {
    async fn query_database(
        &self,
        database: &DatabaseId,
        request: &QueryRequest,
    ) -> Result<PaginatedResponse<RawPage>, AppError> {
        self.queries.fetch_add(1, AtomicOrdering::SeqCst);
        let db = self
            .databases
            .get(database)
            .ok_or_else(|| not_found("database", database))?;

        let mut records: Vec<&RawPage> = db
            .records
            .iter()
            .filter_map(|id| self.pages.get(id))
            .filter(|page| {
                request
                    .filter
                    .as_ref()
                    .map_or(true, |f| f.matches(&page.properties))
            })
            .collect();

        // Stable sorts applied last-key-first give a lexicographic order.
        for sort in request.sorts.iter().rev() {
            records.sort_by(|a, b| compare(a, b, sort));
        }

        let page_size = request
            .page_size
            .unwrap_or(NOTION_API_PAGE_SIZE)
            .min(NOTION_API_PAGE_SIZE) as usize;
        paginate(
            records.into_iter().cloned().collect(),
            request.start_cursor.as_ref(),
            page_size,
        )
    }

    async fn retrieve_page(&self, id: &PageId) -> Result<RawPage, AppError> {
        self.pages
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("page", id))
    }

    async fn retrieve_database(&self, id: &DatabaseId) -> Result<RawDatabase, AppError> {
        self.databases
            .get(id)
            .map(|db| db.schema.clone())
            .ok_or_else(|| not_found("database", id))
    }

    async fn list_children(
        &self,
        parent: &BlockId,
        cursor: Option<&Cursor>,
    ) -> Result<PaginatedResponse<RawBlock>, AppError> {
        self.children_requests.fetch_add(1, AtomicOrdering::SeqCst);
        let blocks = self.children.get(parent).cloned().unwrap_or_default();
        let page_size = self
            .children_page_size
            .unwrap_or(NOTION_API_PAGE_SIZE as usize);
        paginate(blocks, cursor, page_size)
    }
}

fn not_found(kind: &str, id: impl std::fmt::Display) -> AppError {
    AppError::NotionService {
        code: NotionErrorCode::ObjectNotFound,
        message: format!("Could not find {} with ID: {}", kind, id),
        status: 404,
    }
}

/// Cursors issued here are decimal offsets into the result list.
fn paginate<T>(
    items: Vec<T>,
    cursor: Option<&Cursor>,
    page_size: usize,
) -> Result<PaginatedResponse<T>, AppError> {
    let start = match cursor {
        None => 0,
        Some(cursor) => cursor.as_str().parse::<usize>().map_err(|_| {
            AppError::NotionService {
                code: NotionErrorCode::ValidationFailed,
                message: format!("start_cursor should be a valid cursor, got '{}'", cursor),
                status: 400,
            }
        })?,
    };

    let total = items.len();
    let end = start.saturating_add(page_size).min(total);
    let results: Vec<T> = items.into_iter().skip(start).take(end.saturating_sub(start)).collect();
    let has_more = end < total;

    Ok(PaginatedResponse {
        results,
        next_cursor: has_more.then(|| Cursor::new(end.to_string())),
        has_more,
    })
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Missing,
    Flag(bool),
    Time(DateTime<Utc>),
    Text(String),
}

fn sort_key(page: &RawPage, sort: &Sort) -> SortKey {
    match page.properties.get(sort.property.as_str()) {
        Some(PropertyValue::CreatedTime { created_time }) => SortKey::Time(*created_time),
        Some(PropertyValue::LastEditedTime { last_edited_time }) => {
            SortKey::Time(*last_edited_time)
        }
        Some(PropertyValue::Title { title }) => SortKey::Text(plain_text(title)),
        Some(PropertyValue::RichText { rich_text }) => SortKey::Text(plain_text(rich_text)),
        Some(PropertyValue::Checkbox { checkbox }) => SortKey::Flag(*checkbox),
        _ => SortKey::Missing,
    }
}

fn compare(a: &RawPage, b: &RawPage, sort: &Sort) -> Ordering {
    let ordering = sort_key(a, sort).cmp(&sort_key(b, sort));
    match sort.direction {
        Direction::Ascending => ordering,
        Direction::Descending => ordering.reverse(),
    }
}
