// tests/fixture_site.rs
//! A site served from a JSON fixture file.

mod common;

use common::StaticImages;
use notion_folio::api::InMemoryStore;
use notion_folio::{Block, Site, SortOrder};
use pretty_assertions::assert_eq;
use std::path::Path;
use std::sync::Arc;

fn fixture_site() -> Site {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/site.json");
    let store = InMemoryStore::from_fixture(&path).unwrap();
    Site::assemble(Arc::new(store), Arc::new(StaticImages(None)), &common::config())
}

#[tokio::test]
async fn fixture_posts_are_listed_and_rendered() {
    let site = fixture_site();

    let posts = site.posts.list_posts(SortOrder::Descending).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Hello, fixtures");
    assert_eq!(posts[0].tags, vec!["rust"]);

    let detail = site.posts.get_post("hello").await.unwrap();
    assert_eq!(detail.content.len(), 2);
    assert!(matches!(detail.content[0], Block::Paragraph(_)));
    assert!(matches!(detail.content[1], Block::NumberedList(_)));

    assert_eq!(site.posts.get_all_tags().await.unwrap(), vec!["rust", "notion"]);
}

#[test]
fn a_missing_fixture_is_an_io_error() {
    let err = InMemoryStore::from_fixture(Path::new("tests/fixtures/absent.json")).unwrap_err();
    assert!(matches!(err, notion_folio::AppError::Io(_)));
}
