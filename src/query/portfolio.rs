use super::criteria::check_limit;
use super::filters::{portfolio_filter, PortfolioFilter};
use super::mapping::map_portfolio;
use super::RecordSource;
use crate::api::{ContentStore, RawPage};
use crate::config::PortfolioSchema;
use crate::content::TreeFetcher;
use crate::error::AppError;
use crate::model::{Portfolio, PortfolioDetail};
use crate::types::{DatabaseId, PageId};
use std::sync::Arc;

/// Reads published portfolio entries. Results keep the store's order.
pub struct PortfolioService {
    records: RecordSource,
    schema: PortfolioSchema,
    content: Arc<TreeFetcher>,
}

impl PortfolioService {
    pub fn new(
        store: Arc<dyn ContentStore>,
        database: DatabaseId,
        schema: PortfolioSchema,
        content: Arc<TreeFetcher>,
    ) -> Self {
        Self {
            records: RecordSource::new(store, database),
            schema,
            content,
        }
    }

    /// The first `limit` published entries, or all of them without a limit.
    pub async fn list_portfolios(&self, limit: Option<u32>) -> Result<Vec<Portfolio>, AppError> {
        let filter = portfolio_filter(&self.schema, &PortfolioFilter::default());
        let records = match limit {
            Some(limit) => {
                let limit = check_limit(limit)?;
                self.records.page(&filter, None, limit, None).await?.results
            }
            None => self.records.all(&filter, None).await?,
        };
        self.map_all(&records)
    }

    /// Every published entry matching the category and technology constraints.
    pub async fn query_portfolios(
        &self,
        filter: &PortfolioFilter,
    ) -> Result<Vec<Portfolio>, AppError> {
        if filter.is_empty() {
            return self.list_portfolios(None).await;
        }
        let records = self
            .records
            .all(&portfolio_filter(&self.schema, filter), None)
            .await?;
        self.map_all(&records)
    }

    /// One entry by id, with its content tree attached.
    pub async fn get_portfolio(&self, id: &PageId) -> Result<PortfolioDetail, AppError> {
        let record = self.records.retrieve(id).await.map_err(|err| {
            if err.is_not_found() {
                AppError::NotFound {
                    kind: "portfolio",
                    key: id.to_string(),
                }
            } else {
                err
            }
        })?;

        let portfolio = map_portfolio(&record, &self.schema)?;
        let content = self.content.fetch_tree(&id.cast()).await?;
        Ok(PortfolioDetail { portfolio, content })
    }

    pub async fn get_all_portfolio_categories(&self) -> Result<Vec<String>, AppError> {
        self.records.options(&self.schema.categories).await
    }

    pub async fn get_all_portfolio_technologies(&self) -> Result<Vec<String>, AppError> {
        self.records.options(&self.schema.technologies).await
    }

    fn map_all(&self, records: &[RawPage]) -> Result<Vec<Portfolio>, AppError> {
        records
            .iter()
            .map(|record| map_portfolio(record, &self.schema))
            .collect()
    }
}
