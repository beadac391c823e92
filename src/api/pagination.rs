// src/api/pagination.rs
//! Cursor-following pagination over any paginated store endpoint.

use super::responses::PaginatedResponse;
use crate::error::AppError;
use crate::types::Cursor;
use std::future::Future;

/// Fetches every page of a paginated listing, in order.
///
/// `fetch_page` receives the cursor to resume from (`None` for the first
/// page). Pages are requested strictly one after another; the next request
/// needs the previous response's cursor.
pub async fn collect_all_pages<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, AppError>
where
    F: FnMut(Option<Cursor>) -> Fut,
    Fut: Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        let response = fetch_page(cursor.take()).await?;
        pages_fetched += 1;

        let next = response.continuation().cloned();
        items.extend(response.results);

        match next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    if pages_fetched > 1 {
        log::debug!(
            "Collected {} items across {} pages",
            items.len(),
            pages_fetched
        );
    }

    Ok(items)
}
