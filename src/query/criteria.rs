//! Caller-supplied query criteria and how they select a pagination mode.

use crate::api::Direction;
use crate::constants::{DEFAULT_CURSOR_PAGE_SIZE, NOTION_API_PAGE_SIZE};
use crate::error::AppError;
use crate::types::Cursor;
use serde::{Deserialize, Serialize};

/// Creation-time ordering of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum SortOrder {
    #[serde(rename = "asc", alias = "ascending")]
    #[value(name = "asc", alias = "ascending")]
    Ascending,
    #[default]
    #[serde(rename = "desc", alias = "descending")]
    #[value(name = "desc", alias = "descending")]
    Descending,
}

impl From<SortOrder> for Direction {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Ascending => Direction::Ascending,
            SortOrder::Descending => Direction::Descending,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryCriteria {
    pub sort_order: SortOrder,
    pub limit: Option<u32>,
    pub tags: Vec<String>,
    pub search: Option<String>,
    pub cursor: Option<Cursor>,
    pub page: Option<u32>,
}

/// How one query call walks the store's results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pagination {
    /// Page `page` (1-based) of `limit` results, reached by walking cursors.
    Offset { page: u32, limit: u32 },
    /// `limit` results starting at `cursor`, plus the cursor that follows.
    Cursor { cursor: Option<Cursor>, limit: u32 },
    /// Every matching record.
    FullListing,
}

impl QueryCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn cursor(mut self, cursor: Option<Cursor>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Validates the criteria and picks the pagination mode.
    ///
    /// A page number without a limit is ignored. A cursor without a limit
    /// pages with the default cursor page size.
    pub fn pagination(&self) -> Result<Pagination, AppError> {
        if let Some(limit) = self.limit {
            check_limit(limit)?;
        }
        if self.page == Some(0) {
            return Err(AppError::InvalidCriteria(
                "page numbers start at 1".to_string(),
            ));
        }
        if self.page.is_some() && self.cursor.is_some() {
            return Err(AppError::InvalidCriteria(
                "page and cursor cannot be combined".to_string(),
            ));
        }

        Ok(match (self.page, self.limit, &self.cursor) {
            (Some(page), Some(limit), _) => Pagination::Offset { page, limit },
            (_, Some(limit), cursor) => Pagination::Cursor {
                cursor: cursor.clone(),
                limit,
            },
            (_, None, Some(cursor)) => Pagination::Cursor {
                cursor: Some(cursor.clone()),
                limit: DEFAULT_CURSOR_PAGE_SIZE,
            },
            (_, None, None) => Pagination::FullListing,
        })
    }

    /// Tags that constrain the query, blanks dropped.
    pub fn active_tags(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .map(String::as_str)
            .filter(|t| !t.trim().is_empty())
    }

    /// The search text, if it has any non-whitespace content.
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Rejects page sizes the store cannot serve in one response.
pub(crate) fn check_limit(limit: u32) -> Result<u32, AppError> {
    if limit == 0 || limit > NOTION_API_PAGE_SIZE {
        return Err(AppError::InvalidCriteria(format!(
            "limit must be between 1 and {}, got {}",
            NOTION_API_PAGE_SIZE, limit
        )));
    }
    Ok(limit)
}
