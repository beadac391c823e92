//! Wires the store client, image fetcher and query services together.

use crate::api::{ContentStore, InMemoryStore, NotionHttpClient};
use crate::config::{SiteConfig, StoreSource};
use crate::content::{BlockNormalizer, HttpImageFetcher, ImageFetcher, TreeFetcher};
use crate::error::AppError;
use crate::query::{PortfolioService, PostsService};
use std::sync::Arc;

pub struct Site {
    pub posts: PostsService,
    pub portfolio: PortfolioService,
}

impl Site {
    /// Builds the services over the store named by the configuration.
    pub fn connect(config: &SiteConfig) -> Result<Self, AppError> {
        let store: Arc<dyn ContentStore> = match &config.source {
            StoreSource::Notion(api_key) => Arc::new(NotionHttpClient::new(api_key)?),
            StoreSource::Fixture(path) => Arc::new(InMemoryStore::from_fixture(path)?),
        };
        let images: Arc<dyn ImageFetcher> = Arc::new(HttpImageFetcher::new()?);
        Ok(Self::assemble(store, images, config))
    }

    /// Builds the services over an already constructed store and image fetcher.
    pub fn assemble(
        store: Arc<dyn ContentStore>,
        images: Arc<dyn ImageFetcher>,
        config: &SiteConfig,
    ) -> Self {
        let normalizer = BlockNormalizer::new(images, config.image_timeout);
        let content = Arc::new(TreeFetcher::new(store.clone(), normalizer));

        Self {
            posts: PostsService::new(
                store.clone(),
                config.post_database.clone(),
                config.schema.posts.clone(),
                content.clone(),
            ),
            portfolio: PortfolioService::new(
                store,
                config.portfolio_database.clone(),
                config.schema.portfolio.clone(),
                content,
            ),
        }
    }
}
