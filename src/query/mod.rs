//! Query services: filtered, sorted, paginated reads of posts and portfolios.

mod criteria;
pub mod filters;
pub mod mapping;
mod portfolio;
mod posts;

pub use criteria::{Pagination, QueryCriteria, SortOrder};
pub use filters::PortfolioFilter;
pub use portfolio::PortfolioService;
pub use posts::PostsService;

use crate::api::pagination::collect_all_pages;
use crate::api::{
    ContentStore, Filter, PaginatedResponse, QueryRequest, RawPage, SchemaProperty, Sort,
};
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;
use crate::types::{Cursor, DatabaseId, PageId, PropertyName};
use std::sync::Arc;

/// One database in the store, seen through the query endpoints.
#[derive(Clone)]
pub(crate) struct RecordSource {
    store: Arc<dyn ContentStore>,
    database: DatabaseId,
}

impl RecordSource {
    pub(crate) fn new(store: Arc<dyn ContentStore>, database: DatabaseId) -> Self {
        Self { store, database }
    }

    /// One page of records, starting at `cursor`.
    pub(crate) async fn page(
        &self,
        filter: &Filter,
        sort: Option<&Sort>,
        limit: u32,
        cursor: Option<Cursor>,
    ) -> Result<PaginatedResponse<RawPage>, AppError> {
        let mut request = QueryRequest::new(filter.clone())
            .page_size(limit)
            .starting_at(cursor);
        if let Some(sort) = sort {
            request = request.sorted_by(sort.clone());
        }
        self.store.query_database(&self.database, &request).await
    }

    /// Page `page` (1-based) of `limit` records, or nothing if the store runs
    /// out first. Walks every earlier page to get there.
    pub(crate) async fn nth_page(
        &self,
        filter: &Filter,
        sort: Option<&Sort>,
        page: u32,
        limit: u32,
    ) -> Result<Vec<RawPage>, AppError> {
        let mut cursor = None;
        for current in 1..=page {
            let response = self.page(filter, sort, limit, cursor.take()).await?;
            if current == page {
                return Ok(response.results);
            }
            match response.continuation() {
                Some(next) => cursor = Some(next.clone()),
                None => {
                    log::debug!("Store exhausted after page {} of {}", current, page);
                    break;
                }
            }
        }
        Ok(Vec::new())
    }

    /// Every matching record, following cursors until exhausted.
    pub(crate) async fn all(
        &self,
        filter: &Filter,
        sort: Option<&Sort>,
    ) -> Result<Vec<RawPage>, AppError> {
        collect_all_pages(|cursor| self.page(filter, sort, NOTION_API_PAGE_SIZE, cursor)).await
    }

    pub(crate) async fn retrieve(&self, id: &PageId) -> Result<RawPage, AppError> {
        self.store.retrieve_page(id).await
    }

    /// The configured option names of a multi-select property.
    pub(crate) async fn options(&self, property: &PropertyName) -> Result<Vec<String>, AppError> {
        let schema = self.store.retrieve_database(&self.database).await?;
        match schema.properties.get(property.as_str()) {
            Some(SchemaProperty::MultiSelect { multi_select }) => Ok(multi_select
                .options
                .iter()
                .map(|o| o.name.clone())
                .collect()),
            Some(_) => Err(AppError::malformed_record(
                &self.database,
                property,
                "expected a multi_select property",
            )),
            None => Err(AppError::malformed_record(
                &self.database,
                property,
                "property is missing from the database schema",
            )),
        }
    }
}
