// tests/content_tree.rs
//! Block tree retrieval, list grouping and image enrichment end to end.

mod common;

use common::*;
use notion_folio::api::InMemoryStore;
use notion_folio::content::TreeFetcher;
use notion_folio::{AppError, Block, BlockId, BlockNormalizer};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn fetcher(store: Arc<InMemoryStore>, images: Option<Vec<u8>>) -> TreeFetcher {
    let normalizer = BlockNormalizer::new(Arc::new(StaticImages(images)), Duration::from_millis(200));
    TreeFetcher::new(store, normalizer)
}

fn block_id(n: u32) -> BlockId {
    BlockId::parse(&id(n)).unwrap()
}

fn ids(blocks: &[Block]) -> Vec<String> {
    blocks.iter().map(|b| b.id().to_string()).collect()
}

#[tokio::test]
async fn paged_children_keep_their_order() {
    let children = (1..=7).map(|n| text_block(n, "paragraph", &n.to_string())).collect();
    let store = Arc::new(
        InMemoryStore::new()
            .with_children(block_id(100), children)
            .with_children_page_size(2),
    );

    let tree = fetcher(store.clone(), None)
        .fetch_tree(&block_id(100))
        .await
        .unwrap();
    assert_eq!(ids(&tree), (1..=7).map(id).collect::<Vec<_>>());
    assert_eq!(store.children_request_count(), 4);
}

#[tokio::test]
async fn nested_children_are_fetched_and_grouped() {
    let store = Arc::new(
        InMemoryStore::new()
            .with_children(
                block_id(100),
                vec![
                    block(1, "toggle", true, json!({"rich_text": [], "color": "default"})),
                    text_block(2, "paragraph", "after"),
                ],
            )
            .with_children(
                block_id(1),
                vec![
                    text_block(11, "bulleted_list_item", "a"),
                    text_block(12, "bulleted_list_item", "b"),
                    text_block(13, "numbered_list_item", "c"),
                ],
            ),
    );

    let tree = fetcher(store, None).fetch_tree(&block_id(100)).await.unwrap();
    assert_eq!(tree.len(), 2);

    let nested = tree[0].children();
    assert_eq!(nested.len(), 2);
    assert!(matches!(nested[0], Block::BulletedList(_)));
    assert_eq!(ids(nested[0].children()), vec![id(11), id(12)]);
    assert!(matches!(nested[1], Block::NumberedList(_)));
    assert_eq!(ids(nested[1].children()), vec![id(13)]);
}

#[tokio::test]
async fn child_pages_and_unsupported_blocks_are_left_closed() {
    let store = Arc::new(
        InMemoryStore::new()
            .with_children(
                block_id(100),
                vec![
                    block(1, "child_page", true, json!({"title": "Sub page"})),
                    block(2, "ai_block", true, json!({})),
                ],
            )
            .with_children(block_id(1), vec![text_block(10, "paragraph", "hidden")])
            .with_children(block_id(2), vec![text_block(20, "paragraph", "hidden")]),
    );

    let tree = fetcher(store.clone(), None)
        .fetch_tree(&block_id(100))
        .await
        .unwrap();
    assert!(matches!(tree[0], Block::ChildPage(_)));
    assert!(tree[0].children().is_empty());
    match &tree[1] {
        Block::Unsupported(node) => assert_eq!(node.payload.block_type, "ai_block"),
        other => panic!("expected an unsupported block, got {:?}", other),
    }
    assert_eq!(store.children_request_count(), 1);
}

#[tokio::test]
async fn malformed_payloads_fail_the_tree() {
    let store = Arc::new(InMemoryStore::new().with_children(
        block_id(100),
        vec![block(1, "image", false, json!({"type": "external"}))],
    ));

    let err = fetcher(store, None)
        .fetch_tree(&block_id(100))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::MalformedResponse(_)));
}

#[tokio::test]
async fn images_get_their_intrinsic_size_and_a_placeholder() {
    let store = Arc::new(InMemoryStore::new().with_children(
        block_id(100),
        vec![image_block(1, "https://img.example/photo.png")],
    ));

    let tree = fetcher(store, Some(png(120, 80)))
        .fetch_tree(&block_id(100))
        .await
        .unwrap();
    let Block::Image(image) = &tree[0] else {
        panic!("expected an image block");
    };
    let size = image.payload.size.expect("size");
    assert_eq!((size.width, size.height), (120, 80));
    let placeholder = image.payload.placeholder.as_deref().expect("placeholder");
    assert!(placeholder.starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn small_images_get_no_placeholder() {
    let store = Arc::new(InMemoryStore::new().with_children(
        block_id(100),
        vec![image_block(1, "https://img.example/icon.png")],
    ));

    let tree = fetcher(store, Some(png(40, 300)))
        .fetch_tree(&block_id(100))
        .await
        .unwrap();
    let Block::Image(image) = &tree[0] else {
        panic!("expected an image block");
    };
    let size = image.payload.size.expect("size");
    assert_eq!((size.width, size.height), (40, 300));
    assert_eq!(image.payload.placeholder, None);
}

#[tokio::test]
async fn undecodable_images_fall_back_to_the_default_size() {
    let store = Arc::new(InMemoryStore::new().with_children(
        block_id(100),
        vec![image_block(1, "https://img.example/page.html")],
    ));

    let tree = fetcher(store, Some(b"<html>not an image</html>".to_vec()))
        .fetch_tree(&block_id(100))
        .await
        .unwrap();
    let Block::Image(image) = &tree[0] else {
        panic!("expected an image block");
    };
    let size = image.payload.size.expect("size");
    assert_eq!((size.width, size.height), (800, 500));
    assert_eq!(image.payload.placeholder, None);
}

#[tokio::test]
async fn a_page_without_children_has_an_empty_tree() {
    let store = Arc::new(InMemoryStore::new());
    let tree = fetcher(store, None).fetch_tree(&block_id(100)).await.unwrap();
    assert!(tree.is_empty());
}
