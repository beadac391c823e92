//! Projects raw database records onto `Post` and `Portfolio`.
//!
//! A property that is missing or has the wrong kind is reported as
//! [`AppError::MalformedRecord`]; records are never silently defaulted.

use crate::api::{PropertyValue, RawPage};
use crate::config::{PortfolioSchema, PostSchema};
use crate::error::AppError;
use crate::model::{plain_text, Portfolio, Post};
use crate::types::PropertyName;

pub fn map_post(page: &RawPage, schema: &PostSchema) -> Result<Post, AppError> {
    let record = RecordReader::new(page);
    Ok(Post {
        id: page.id.clone(),
        created_at: page.created_time,
        last_edited_at: page.last_edited_time,
        cover_image: record.cover(),
        tags: record.multi_select(&schema.tags)?,
        title: record.title(&schema.title)?,
        description: record.rich_text(&schema.description)?,
        slug: record.rich_text(&schema.slug)?,
    })
}

pub fn map_portfolio(page: &RawPage, schema: &PortfolioSchema) -> Result<Portfolio, AppError> {
    let record = RecordReader::new(page);
    Ok(Portfolio {
        id: page.id.clone(),
        title: record.title(&schema.title)?,
        cover_image: record.cover(),
        categories: record.multi_select(&schema.categories)?,
        technologies: record.multi_select(&schema.technologies)?,
        demo_url: record.url(&schema.demo_url)?,
        github_url: record.url(&schema.github_url)?,
    })
}

struct RecordReader<'a> {
    page: &'a RawPage,
}

impl<'a> RecordReader<'a> {
    fn new(page: &'a RawPage) -> Self {
        Self { page }
    }

    fn property(&self, name: &PropertyName) -> Result<&'a PropertyValue, AppError> {
        self.page
            .properties
            .get(name.as_str())
            .ok_or_else(|| AppError::malformed_record(&self.page.id, name, "property is missing"))
    }

    fn wrong_kind(&self, name: &PropertyName, expected: &str, found: &PropertyValue) -> AppError {
        AppError::malformed_record(
            &self.page.id,
            name,
            format!("expected {}, found {}", expected, found.kind()),
        )
    }

    fn title(&self, name: &PropertyName) -> Result<String, AppError> {
        match self.property(name)? {
            PropertyValue::Title { title } => Ok(plain_text(title)),
            other => Err(self.wrong_kind(name, "title", other)),
        }
    }

    fn rich_text(&self, name: &PropertyName) -> Result<String, AppError> {
        match self.property(name)? {
            PropertyValue::RichText { rich_text } => Ok(plain_text(rich_text)),
            other => Err(self.wrong_kind(name, "rich_text", other)),
        }
    }

    fn multi_select(&self, name: &PropertyName) -> Result<Vec<String>, AppError> {
        match self.property(name)? {
            PropertyValue::MultiSelect { multi_select } => {
                Ok(multi_select.iter().map(|o| o.name.clone()).collect())
            }
            other => Err(self.wrong_kind(name, "multi_select", other)),
        }
    }

    fn url(&self, name: &PropertyName) -> Result<Option<String>, AppError> {
        match self.property(name)? {
            PropertyValue::Url { url } => Ok(url.clone().filter(|u| !u.is_empty())),
            other => Err(self.wrong_kind(name, "url", other)),
        }
    }

    fn cover(&self) -> Option<String> {
        self.page.cover.as_ref().map(|c| c.url().to_string())
    }
}
