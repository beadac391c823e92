// src/main.rs
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_folio::{
    AppError, Command, CommandLineInput, Cursor, PageId, PortfolioFilter, QueryCriteria, Site,
    SiteConfig,
};
use serde::Serialize;
use std::fs;

/// Sets up logging configuration.
///
/// Console output goes to stderr; stdout carries the JSON result.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_folio.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(console_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Runs one subcommand against the site and prints its result.
async fn execute(site: &Site, command: Command) -> Result<(), AppError> {
    match command {
        Command::Posts {
            order,
            limit,
            page,
            cursor,
            tags,
            search,
        } => {
            let criteria = QueryCriteria {
                sort_order: order,
                limit,
                tags,
                search,
                cursor: cursor.map(Cursor::new),
                page,
            };
            print_json(&site.posts.query_posts(&criteria).await?)
        }
        Command::Tags => print_json(&site.posts.get_all_tags().await?),
        Command::Post { slug } => print_json(&site.posts.get_post(&slug).await?),
        Command::Portfolios {
            categories,
            technologies,
            limit,
        } => {
            let filter = PortfolioFilter {
                categories,
                technologies,
            };
            let portfolios = if filter.is_empty() {
                site.portfolio.list_portfolios(limit).await?
            } else {
                site.portfolio.query_portfolios(&filter).await?
            };
            print_json(&portfolios)
        }
        Command::Portfolio { id } => {
            let id = PageId::parse(&id)?;
            print_json(&site.portfolio.get_portfolio(&id).await?)
        }
        Command::Categories => print_json(&site.portfolio.get_all_portfolio_categories().await?),
        Command::Technologies => {
            print_json(&site.portfolio.get_all_portfolio_technologies().await?)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();
    setup_logging(cli.verbose)?;

    let config = SiteConfig::resolve(&cli)?;
    log::debug!(
        "Posts database {}, portfolio database {}",
        config.post_database,
        config.portfolio_database
    );

    let site = Site::connect(&config)?;
    if let Err(err) = execute(&site, cli.command).await {
        log::error!("{}", err);
        return Err(err.into());
    }
    Ok(())
}
