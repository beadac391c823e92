use super::criteria::{Pagination, QueryCriteria, SortOrder};
use super::filters::{post_filter, slug_filter};
use super::mapping::map_post;
use super::RecordSource;
use crate::api::{ContentStore, Filter, RawPage, Sort};
use crate::config::PostSchema;
use crate::constants::DEFAULT_CURSOR_PAGE_SIZE;
use crate::content::TreeFetcher;
use crate::error::AppError;
use crate::model::{Post, PostDetail, PostPage};
use crate::types::DatabaseId;
use std::sync::Arc;

/// Reads published blog posts.
pub struct PostsService {
    records: RecordSource,
    schema: PostSchema,
    content: Arc<TreeFetcher>,
}

impl PostsService {
    pub fn new(
        store: Arc<dyn ContentStore>,
        database: DatabaseId,
        schema: PostSchema,
        content: Arc<TreeFetcher>,
    ) -> Self {
        Self {
            records: RecordSource::new(store, database),
            schema,
            content,
        }
    }

    /// Runs a post query in whichever pagination mode the criteria select.
    ///
    /// Only cursor mode returns a `next_cursor`.
    pub async fn query_posts(&self, criteria: &QueryCriteria) -> Result<PostPage, AppError> {
        let filter = post_filter(&self.schema, criteria);
        let sort = self.sort(criteria.sort_order);

        match criteria.pagination()? {
            Pagination::Offset { page, limit } => {
                let records = self.records.nth_page(&filter, Some(&sort), page, limit).await?;
                Ok(PostPage {
                    posts: self.map_all(&records)?,
                    next_cursor: None,
                })
            }
            Pagination::Cursor { cursor, limit } => {
                let response = self.records.page(&filter, Some(&sort), limit, cursor).await?;
                Ok(PostPage {
                    posts: self.map_all(&response.results)?,
                    next_cursor: response.continuation().cloned(),
                })
            }
            Pagination::FullListing => Ok(PostPage {
                posts: self.full_listing(&filter, criteria.sort_order).await?,
                next_cursor: None,
            }),
        }
    }

    /// One cursor-mode page, 12 posts unless the criteria say otherwise.
    ///
    /// A page number in the criteria is ignored.
    pub async fn posts_by_cursor(&self, criteria: &QueryCriteria) -> Result<PostPage, AppError> {
        let mut criteria = criteria.clone();
        criteria.page = None;
        criteria.limit.get_or_insert(DEFAULT_CURSOR_PAGE_SIZE);
        self.query_posts(&criteria).await
    }

    /// Every published post, ordered by creation time.
    pub async fn list_posts(&self, order: SortOrder) -> Result<Vec<Post>, AppError> {
        let filter = post_filter(&self.schema, &QueryCriteria::new());
        self.full_listing(&filter, order).await
    }

    /// The published post with this slug, with its content tree attached.
    pub async fn get_post(&self, slug: &str) -> Result<PostDetail, AppError> {
        let filter = slug_filter(&self.schema, slug);
        let response = self.records.page(&filter, None, 1, None).await?;
        let record = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound {
                kind: "post",
                key: slug.to_string(),
            })?;

        let post = map_post(&record, &self.schema)?;
        let content = self.content.fetch_tree(&post.id.cast()).await?;
        log::debug!("Post '{}' has {} top-level blocks", slug, content.len());
        Ok(PostDetail { post, content })
    }

    /// Every tag option configured on the post database, used or not.
    pub async fn get_all_tags(&self) -> Result<Vec<String>, AppError> {
        self.records.options(&self.schema.tags).await
    }

    fn sort(&self, order: SortOrder) -> Sort {
        Sort {
            property: self.schema.created.clone(),
            direction: order.into(),
        }
    }

    async fn full_listing(&self, filter: &Filter, order: SortOrder) -> Result<Vec<Post>, AppError> {
        let sort = self.sort(order);
        let records = self.records.all(filter, Some(&sort)).await?;
        let mut posts = self.map_all(&records)?;

        // Page boundaries are the store's; the final order is ours.
        posts.sort_by(|a, b| match order {
            SortOrder::Ascending => a.created_at.cmp(&b.created_at),
            SortOrder::Descending => b.created_at.cmp(&a.created_at),
        });
        Ok(posts)
    }

    fn map_all(&self, records: &[RawPage]) -> Result<Vec<Post>, AppError> {
        records
            .iter()
            .map(|record| map_post(record, &self.schema))
            .collect()
    }
}
