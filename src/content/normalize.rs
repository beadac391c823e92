//! Per-block enrichment applied after a tree is fetched.
//!
//! Today only image blocks are touched: they gain intrinsic dimensions and,
//! when large enough, a blur placeholder. Failures are logged and replaced
//! by default dimensions; they never fail the tree.

use super::preview::{derive_preview, ImagePreview, PreviewError};
use crate::constants::{DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH};
use crate::error::AppError;
use crate::model::{Block, ImageContent, ImageSize};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// The ability to download image bytes.
#[async_trait::async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, PreviewError>;
}

/// Downloads images over plain HTTP(S), without store credentials.
#[derive(Clone)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            client: Client::builder().build()?,
        })
    }
}

#[async_trait::async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, PreviewError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PreviewError::Download(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PreviewError::Download(format!("HTTP {}", status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PreviewError::Download(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

pub struct BlockNormalizer {
    images: Arc<dyn ImageFetcher>,
    timeout: Duration,
}

impl BlockNormalizer {
    pub fn new(images: Arc<dyn ImageFetcher>, timeout: Duration) -> Self {
        Self { images, timeout }
    }

    /// Returns the block with its derived attributes filled in.
    pub async fn normalize(&self, block: Block) -> Block {
        match block {
            Block::Image(mut node) => {
                self.enrich_image(&mut node.payload).await;
                Block::Image(node)
            }
            // No other kind carries derived attributes.
            other => other,
        }
    }

    async fn enrich_image(&self, image: &mut ImageContent) {
        match self.preview(&image.source.url).await {
            Ok(preview) => {
                image.size = Some(preview.size);
                image.placeholder = preview.placeholder;
            }
            Err(err) => {
                log::warn!("Could not enrich image {}: {}", image.source.url, err);
                image.size = Some(ImageSize {
                    width: DEFAULT_IMAGE_WIDTH,
                    height: DEFAULT_IMAGE_HEIGHT,
                });
                image.placeholder = None;
            }
        }
    }

    async fn preview(&self, url: &str) -> Result<ImagePreview, PreviewError> {
        let bytes = tokio::time::timeout(self.timeout, self.images.fetch(url))
            .await
            .map_err(|_| PreviewError::Timeout(self.timeout))??;
        off_runtime(move || derive_preview(&bytes)).await
    }
}

/// Runs CPU-bound image work on the blocking pool.
async fn off_runtime<F>(work: F) -> Result<ImagePreview, PreviewError>
where
    F: FnOnce() -> Result<ImagePreview, PreviewError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| PreviewError::Worker(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::preview::tests::{png, tiff_header};
    use crate::model::{BlockCommon, BlockNode, TextContent};
    use crate::types::BlockId;

    struct StaticImages(Result<Vec<u8>, ()>);

    #[async_trait::async_trait]
    impl ImageFetcher for StaticImages {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, PreviewError> {
            self.0
                .clone()
                .map_err(|_| PreviewError::Download("HTTP 404 Not Found".to_string()))
        }
    }

    struct StalledImages;

    #[async_trait::async_trait]
    impl ImageFetcher for StalledImages {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, PreviewError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }
    }

    fn image_block() -> Block {
        Block::Image(BlockNode::new(
            BlockCommon::new(BlockId::new_v4()),
            ImageContent::external("https://img.example/photo.png"),
        ))
    }

    fn image_payload(block: Block) -> ImageContent {
        match block {
            Block::Image(node) => node.payload,
            other => panic!("expected an image, got {:?}", other),
        }
    }

    fn normalizer(images: impl ImageFetcher + 'static) -> BlockNormalizer {
        BlockNormalizer::new(Arc::new(images), Duration::from_millis(50))
    }

    #[tokio::test]
    async fn images_gain_size_and_placeholder() {
        let normalizer = normalizer(StaticImages(Ok(png(64, 48))));
        let image = image_payload(normalizer.normalize(image_block()).await);
        assert_eq!(
            image.size,
            Some(ImageSize {
                width: 64,
                height: 48
            })
        );
        assert!(image.placeholder.unwrap().starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn failed_downloads_fall_back_to_default_size() {
        let normalizer = normalizer(StaticImages(Err(())));
        let image = image_payload(normalizer.normalize(image_block()).await);
        assert_eq!(
            image.size,
            Some(ImageSize {
                width: 800,
                height: 500
            })
        );
        assert!(image.placeholder.is_none());
    }

    #[tokio::test]
    async fn slow_downloads_time_out() {
        let normalizer = normalizer(StalledImages);
        let image = image_payload(normalizer.normalize(image_block()).await);
        assert_eq!(image.size.map(|s| s.width), Some(800));
    }

    #[tokio::test]
    async fn undecodable_formats_keep_their_probed_size() {
        let normalizer = normalizer(StaticImages(Ok(tiff_header(1200, 900))));
        let image = image_payload(normalizer.normalize(image_block()).await);
        assert_eq!(
            image.size,
            Some(ImageSize {
                width: 1200,
                height: 900
            })
        );
        assert!(image.placeholder.is_none());
    }

    #[tokio::test]
    async fn a_panicking_worker_becomes_a_preview_error() {
        let result = off_runtime(|| panic!("decoder crashed")).await;
        assert!(matches!(result, Err(PreviewError::Worker(_))));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn sibling_images_are_enriched_on_a_single_threaded_runtime() {
        let normalizer = normalizer(StaticImages(Ok(png(400, 300))));
        let blocks =
            futures::future::join_all((0..8).map(|_| normalizer.normalize(image_block()))).await;
        for block in blocks {
            let image = image_payload(block);
            assert_eq!(image.size.map(|s| (s.width, s.height)), Some((400, 300)));
            assert!(image.placeholder.is_some());
        }
    }

    #[tokio::test]
    async fn other_blocks_pass_through_unchanged() {
        let normalizer = normalizer(StaticImages(Err(())));
        let block = Block::Paragraph(BlockNode::new(
            BlockCommon::new(BlockId::new_v4()),
            TextContent::plain("hello"),
        ));
        assert_eq!(normalizer.normalize(block.clone()).await, block);
    }
}
