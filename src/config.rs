// src/config.rs
use crate::constants::IMAGE_FETCH_TIMEOUT;
use crate::error::AppError;
use crate::query::SortOrder;
use crate::types::{ApiKey, DatabaseId, PropertyName};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// ID or URL of the blog post database
    #[arg(long, env = "NOTION_POST_DATABASE_ID")]
    pub post_database: String,

    /// ID or URL of the portfolio database
    #[arg(long, env = "NOTION_PORTFOLIO_DATABASE_ID")]
    pub portfolio_database: String,

    /// JSON file overriding the database property names
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Serve content from a JSON fixture instead of the Notion API
    #[arg(long)]
    pub fixture: Option<PathBuf>,

    /// Seconds allowed for downloading one image during enrichment
    #[arg(long, default_value_t = IMAGE_FETCH_TIMEOUT.as_secs())]
    pub image_timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List published posts
    Posts {
        #[arg(long, value_enum, default_value_t = SortOrder::Descending)]
        order: SortOrder,
        /// Page size; omit to list everything
        #[arg(long)]
        limit: Option<u32>,
        /// 1-based page number (requires --limit)
        #[arg(long, conflicts_with = "cursor")]
        page: Option<u32>,
        /// Resume token from a previous page
        #[arg(long)]
        cursor: Option<String>,
        /// Only posts carrying this tag (repeatable; all must match)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Text searched in titles and descriptions (ignored with --tag)
        #[arg(long)]
        search: Option<String>,
    },
    /// List every tag option of the post database
    Tags,
    /// Show one post and its content by slug
    Post { slug: String },
    /// List published portfolio entries
    Portfolios {
        #[arg(long = "category")]
        categories: Vec<String>,
        #[arg(long = "technology")]
        technologies: Vec<String>,
        /// Only applies to the unfiltered listing
        #[arg(long, conflicts_with_all = ["categories", "technologies"])]
        limit: Option<u32>,
    },
    /// Show one portfolio entry and its content by ID
    Portfolio { id: String },
    /// List every portfolio category option
    Categories,
    /// List every portfolio technology option
    Technologies,
}

/// Property names of the post database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostSchema {
    pub published: PropertyName,
    pub created: PropertyName,
    pub tags: PropertyName,
    pub title: PropertyName,
    pub description: PropertyName,
    pub slug: PropertyName,
}

impl Default for PostSchema {
    fn default() -> Self {
        Self {
            published: "블로그 게시".into(),
            created: "생성 일시".into(),
            tags: "태그".into(),
            title: "이름".into(),
            description: "설명".into(),
            slug: "slug".into(),
        }
    }
}

/// Property names of the portfolio database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortfolioSchema {
    pub published: PropertyName,
    pub title: PropertyName,
    pub categories: PropertyName,
    pub technologies: PropertyName,
    pub demo_url: PropertyName,
    pub github_url: PropertyName,
}

impl Default for PortfolioSchema {
    fn default() -> Self {
        Self {
            published: "블로그 게시".into(),
            title: "이름".into(),
            categories: "카테고리".into(),
            technologies: "기술".into(),
            demo_url: "프로젝트 URL".into(),
            github_url: "Github URL".into(),
        }
    }
}

/// Property names for both databases; every name may be overridden.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSchema {
    pub posts: PostSchema,
    pub portfolio: PortfolioSchema,
}

impl StoreSchema {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| {
            AppError::MissingConfiguration(format!("Invalid schema file {}: {}", path.display(), e))
        })
    }
}

/// Where records and blocks are read from.
#[derive(Debug, Clone)]
pub enum StoreSource {
    Notion(ApiKey),
    Fixture(PathBuf),
}

/// Resolved site configuration, validated and ready to build the services.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub source: StoreSource,
    pub post_database: DatabaseId,
    pub portfolio_database: DatabaseId,
    pub schema: StoreSchema,
    pub image_timeout: Duration,
    pub verbose: bool,
}

impl SiteConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, AppError> {
        let source = match &cli.fixture {
            Some(path) => StoreSource::Fixture(path.clone()),
            None => {
                let api_key_str = std::env::var("NOTION_API_KEY").map_err(|_| {
                    AppError::MissingConfiguration(
                        "NOTION_API_KEY environment variable not set".to_string(),
                    )
                })?;
                StoreSource::Notion(ApiKey::new(api_key_str)?)
            }
        };

        let schema = match &cli.schema {
            Some(path) => StoreSchema::load(path)?,
            None => StoreSchema::default(),
        };

        Ok(SiteConfig {
            source,
            post_database: DatabaseId::parse(&cli.post_database)?,
            portfolio_database: DatabaseId::parse(&cli.portfolio_database)?,
            schema,
            image_timeout: Duration::from_secs(cli.image_timeout),
            verbose: cli.verbose,
        })
    }
}
