//! Filter and sort expressions for database queries.
//!
//! Expressions serialize to the Notion query JSON. [`Filter::matches`]
//! evaluates the same expression in-process for the in-memory store.

use super::responses::PropertyValue;
use crate::model::plain_text;
use crate::types::{Cursor, PropertyName};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Filter {
    And { and: Vec<Filter> },
    Or { or: Vec<Filter> },
    Property(PropertyFilter),
}

/// One `{property, <kind>: {<matcher>}}` clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyFilter {
    pub property: PropertyName,
    #[serde(flatten)]
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Checkbox(CheckboxMatcher),
    MultiSelect(SelectMatcher),
    Title(TextMatcher),
    RichText(TextMatcher),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckboxMatcher {
    pub equals: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectMatcher {
    Contains(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMatcher {
    Equals(String),
    Contains(String),
}

impl TextMatcher {
    // The store compares text case-insensitively.
    fn test(&self, text: &str) -> bool {
        match self {
            Self::Equals(expected) => text == expected,
            Self::Contains(needle) => text.to_lowercase().contains(&needle.to_lowercase()),
        }
    }
}

impl Filter {
    pub fn and(clauses: Vec<Filter>) -> Self {
        Self::And { and: clauses }
    }

    pub fn or(clauses: Vec<Filter>) -> Self {
        Self::Or { or: clauses }
    }

    fn property(property: &PropertyName, condition: Condition) -> Self {
        Self::Property(PropertyFilter {
            property: property.clone(),
            condition,
        })
    }

    pub fn checkbox(property: &PropertyName, equals: bool) -> Self {
        Self::property(property, Condition::Checkbox(CheckboxMatcher { equals }))
    }

    pub fn multi_select_contains(property: &PropertyName, option: impl Into<String>) -> Self {
        Self::property(
            property,
            Condition::MultiSelect(SelectMatcher::Contains(option.into())),
        )
    }

    pub fn title(property: &PropertyName, matcher: TextMatcher) -> Self {
        Self::property(property, Condition::Title(matcher))
    }

    pub fn rich_text(property: &PropertyName, matcher: TextMatcher) -> Self {
        Self::property(property, Condition::RichText(matcher))
    }

    /// Evaluates the filter against a record's properties.
    ///
    /// A clause on a missing property, or on a property of another kind,
    /// does not match.
    pub fn matches(&self, properties: &HashMap<String, PropertyValue>) -> bool {
        match self {
            Self::And { and } => and.iter().all(|f| f.matches(properties)),
            Self::Or { or } => or.iter().any(|f| f.matches(properties)),
            Self::Property(clause) => {
                let Some(value) = properties.get(clause.property.as_str()) else {
                    return false;
                };
                match (&clause.condition, value) {
                    (Condition::Checkbox(m), PropertyValue::Checkbox { checkbox }) => {
                        *checkbox == m.equals
                    }
                    (
                        Condition::MultiSelect(SelectMatcher::Contains(option)),
                        PropertyValue::MultiSelect { multi_select },
                    ) => multi_select.iter().any(|o| &o.name == option),
                    (Condition::Title(m), PropertyValue::Title { title }) => {
                        m.test(&plain_text(title))
                    }
                    (Condition::RichText(m), PropertyValue::RichText { rich_text }) => {
                        m.test(&plain_text(rich_text))
                    }
                    _ => false,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sort {
    pub property: PropertyName,
    pub direction: Direction,
}

/// Body of a database query request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<Cursor>,
}

impl QueryRequest {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter: Some(filter),
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn starting_at(mut self, cursor: Option<Cursor>) -> Self {
        self.start_cursor = cursor;
        self
    }
}
