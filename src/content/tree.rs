//! Recursive retrieval of a page's block tree.

use super::group::group_list_items;
use super::normalize::BlockNormalizer;
use crate::api::adapter::convert_block;
use crate::api::pagination::collect_all_pages;
use crate::api::ContentStore;
use crate::error::AppError;
use crate::model::Block;
use crate::types::BlockId;
use futures::future::{try_join_all, BoxFuture};
use futures::FutureExt;
use std::sync::Arc;

/// Builds the fully-resolved, normalized and grouped content tree under a
/// root block or page.
pub struct TreeFetcher {
    store: Arc<dyn ContentStore>,
    normalizer: BlockNormalizer,
}

impl TreeFetcher {
    pub fn new(store: Arc<dyn ContentStore>, normalizer: BlockNormalizer) -> Self {
        Self { store, normalizer }
    }

    /// Fetches every descendant of `root`.
    ///
    /// Sibling subtrees are resolved concurrently; the pages of one children
    /// listing are read in order. Any listing failure fails the whole tree.
    pub async fn fetch_tree(&self, root: &BlockId) -> Result<Vec<Block>, AppError> {
        let blocks = self.fetch_children(root.clone()).await?;
        log::debug!("Fetched {} top-level blocks under {}", blocks.len(), root);
        Ok(blocks)
    }

    fn fetch_children(&self, parent: BlockId) -> BoxFuture<'_, Result<Vec<Block>, AppError>> {
        async move {
            let blocks = self.list_all_children(&parent).await?;
            let resolved = try_join_all(blocks.into_iter().map(|block| self.resolve(block))).await?;
            Ok(group_list_items(resolved))
        }
        .boxed()
    }

    async fn resolve(&self, mut block: Block) -> Result<Block, AppError> {
        if block.may_descend() {
            let children = self.fetch_children(block.id().clone()).await?;
            block.set_children(children);
        }
        Ok(self.normalizer.normalize(block).await)
    }

    async fn list_all_children(&self, parent: &BlockId) -> Result<Vec<Block>, AppError> {
        let store = self.store.as_ref();
        let raw = collect_all_pages(|cursor| async move {
            store.list_children(parent, cursor.as_ref()).await
        })
        .await?;
        raw.into_iter().map(convert_block).collect()
    }
}
