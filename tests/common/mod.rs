// tests/common/mod.rs
//! Builders for store records, schemas and blocks shared by the integration tests.

#![allow(dead_code)]

use notion_folio::api::{InMemoryStore, RawBlock, RawDatabase, RawPage};
use notion_folio::content::{ImageFetcher, PreviewError};
use notion_folio::{DatabaseId, Site, SiteConfig, StoreSchema, StoreSource};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const POSTS_DB: &str = "11111111111111111111111111111111";
pub const PORTFOLIO_DB: &str = "22222222222222222222222222222222";

pub fn id(n: u32) -> String {
    format!("{:032x}", n)
}

/// ISO timestamp `n` minutes after a fixed epoch.
pub fn minute(n: u32) -> String {
    format!("2024-05-{:02}T{:02}:{:02}:00.000Z", 1 + n / 1440, (n / 60) % 24, n % 60)
}

fn text(value: &str) -> Value {
    json!([{"type": "text", "plain_text": value, "href": null}])
}

fn options(names: &[&str]) -> Value {
    Value::Array(names.iter().map(|n| json!({"name": n})).collect())
}

/// A post record using the default property names.
pub fn post(n: u32, title: &str, tags: &[&str], created: &str, published: bool) -> RawPage {
    serde_json::from_value(json!({
        "object": "page",
        "id": id(n),
        "created_time": created,
        "last_edited_time": created,
        "cover": null,
        "properties": {
            "블로그 게시": {"type": "checkbox", "checkbox": published},
            "생성 일시": {"type": "created_time", "created_time": created},
            "태그": {"type": "multi_select", "multi_select": options(tags)},
            "이름": {"type": "title", "title": text(title)},
            "설명": {"type": "rich_text", "rich_text": text(&format!("About {}", title))},
            "slug": {"type": "rich_text", "rich_text": text(&format!("post-{}", n))}
        }
    }))
    .unwrap()
}

/// A portfolio record using the default property names.
pub fn portfolio(n: u32, title: &str, categories: &[&str], technologies: &[&str]) -> RawPage {
    serde_json::from_value(json!({
        "object": "page",
        "id": id(n),
        "created_time": minute(n),
        "last_edited_time": minute(n),
        "cover": {"type": "external", "external": {"url": format!("https://img.example/{}.png", n)}},
        "properties": {
            "블로그 게시": {"type": "checkbox", "checkbox": true},
            "이름": {"type": "title", "title": text(title)},
            "카테고리": {"type": "multi_select", "multi_select": options(categories)},
            "기술": {"type": "multi_select", "multi_select": options(technologies)},
            "프로젝트 URL": {"type": "url", "url": format!("https://demo.example/{}", n)},
            "Github URL": {"type": "url", "url": null}
        }
    }))
    .unwrap()
}

pub fn posts_schema(tags: &[&str]) -> RawDatabase {
    serde_json::from_value(json!({
        "object": "database",
        "id": POSTS_DB,
        "properties": {
            "태그": {"id": "t", "type": "multi_select", "multi_select": {"options": options(tags)}},
            "이름": {"id": "title", "type": "title", "title": {}}
        }
    }))
    .unwrap()
}

pub fn portfolio_schema(categories: &[&str]) -> RawDatabase {
    serde_json::from_value(json!({
        "object": "database",
        "id": PORTFOLIO_DB,
        "properties": {
            "카테고리": {"id": "c", "type": "multi_select", "multi_select": {"options": options(categories)}},
            "기술": {"id": "k", "type": "rich_text", "rich_text": {}}
        }
    }))
    .unwrap()
}

pub fn block(n: u32, kind: &str, has_children: bool, payload: Value) -> RawBlock {
    let mut value = json!({
        "object": "block",
        "id": id(n),
        "type": kind,
        "has_children": has_children,
    });
    value[kind] = payload;
    serde_json::from_value(value).unwrap()
}

pub fn text_block(n: u32, kind: &str, content: &str) -> RawBlock {
    block(n, kind, false, json!({"rich_text": text(content), "color": "default"}))
}

pub fn image_block(n: u32, url: &str) -> RawBlock {
    block(
        n,
        "image",
        false,
        json!({"caption": [], "type": "external", "external": {"url": url}}),
    )
}

/// Serves the same bytes (or the same failure) for every URL.
pub struct StaticImages(pub Option<Vec<u8>>);

#[async_trait::async_trait]
impl ImageFetcher for StaticImages {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, PreviewError> {
        self.0
            .clone()
            .ok_or_else(|| PreviewError::Download(format!("HTTP 404 for {}", url)))
    }
}

/// PNG bytes of a solid image with the given size.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let buffer = image::RgbImage::from_pixel(width, height, image::Rgb([10, 120, 200]));
    let mut bytes = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(buffer)
        .write_to(&mut bytes, image::ImageFormat::Png)
        .unwrap();
    bytes.into_inner()
}

pub fn config() -> SiteConfig {
    SiteConfig {
        source: StoreSource::Fixture(PathBuf::from("unused.json")),
        post_database: DatabaseId::parse(POSTS_DB).unwrap(),
        portfolio_database: DatabaseId::parse(PORTFOLIO_DB).unwrap(),
        schema: StoreSchema::default(),
        image_timeout: Duration::from_millis(200),
        verbose: false,
    }
}

pub fn site(store: Arc<InMemoryStore>, images: Option<Vec<u8>>) -> Site {
    Site::assemble(store, Arc::new(StaticImages(images)), &config())
}
