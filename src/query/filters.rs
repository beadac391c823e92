//! Filter expressions for post and portfolio queries.

use crate::api::{Filter, TextMatcher};
use crate::config::{PortfolioSchema, PostSchema};
use crate::query::QueryCriteria;
use serde::{Deserialize, Serialize};

/// Category and technology constraints for portfolio listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioFilter {
    pub categories: Vec<String>,
    pub technologies: Vec<String>,
}

impl PortfolioFilter {
    pub fn is_empty(&self) -> bool {
        non_blank(&self.categories).next().is_none()
            && non_blank(&self.technologies).next().is_none()
    }
}

fn non_blank(values: &[String]) -> impl Iterator<Item = &str> {
    values
        .iter()
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}

/// Published posts matching the criteria's tags or, failing that, its search text.
pub fn post_filter(schema: &PostSchema, criteria: &QueryCriteria) -> Filter {
    let published = Filter::checkbox(&schema.published, true);

    let tag_clauses: Vec<Filter> = criteria
        .active_tags()
        .map(|tag| Filter::multi_select_contains(&schema.tags, tag))
        .collect();

    let content_clause = if !tag_clauses.is_empty() {
        Some(Filter::and(tag_clauses))
    } else {
        criteria.search_text().map(|_| {
            // The untrimmed text goes to the store.
            let text = criteria.search.clone().unwrap_or_default();
            Filter::or(vec![
                Filter::title(&schema.title, TextMatcher::Contains(text.clone())),
                Filter::rich_text(&schema.description, TextMatcher::Contains(text)),
            ])
        })
    };

    match content_clause {
        Some(clause) => Filter::and(vec![published, clause]),
        None => published,
    }
}

/// The published post with exactly this slug.
pub fn slug_filter(schema: &PostSchema, slug: &str) -> Filter {
    Filter::and(vec![
        Filter::checkbox(&schema.published, true),
        Filter::rich_text(&schema.slug, TextMatcher::Equals(slug.to_string())),
    ])
}

/// Published entries in any of the categories and using any of the technologies.
pub fn portfolio_filter(schema: &PortfolioSchema, filter: &PortfolioFilter) -> Filter {
    let mut clauses = vec![Filter::checkbox(&schema.published, true)];

    let categories: Vec<Filter> = non_blank(&filter.categories)
        .map(|c| Filter::multi_select_contains(&schema.categories, c))
        .collect();
    if !categories.is_empty() {
        clauses.push(Filter::or(categories));
    }

    let technologies: Vec<Filter> = non_blank(&filter.technologies)
        .map(|t| Filter::multi_select_contains(&schema.technologies, t))
        .collect();
    if !technologies.is_empty() {
        clauses.push(Filter::or(technologies));
    }

    if clauses.len() == 1 {
        clauses.remove(0)
    } else {
        Filter::and(clauses)
    }
}
