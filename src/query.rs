// src/query.rs
//! Pure request normalization: limit clamping, defaults, and blank-field
//! scrubbing applied before anything reaches a backend. No I/O here.

use thiserror::Error;

pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT: u32 = 100;
pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_HEADLINE_COUNTRY: &str = "us";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("topic must not be empty")]
    EmptyTopic,
}

/// Free-text news search. Optional fields are `None` when absent or blank;
/// they are never forwarded as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub query: Option<String>,
    pub category: Option<String>,
    pub country: Option<String>,
    pub language: String,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineQuery {
    pub category: Option<String>,
    pub country: String,
    pub limit: u32,
}

/// Topic search input. Folded into a [`NewsQuery`] before reaching a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicQuery {
    pub topic: String,
    pub country: Option<String>,
    pub language: String,
    pub limit: u32,
}

impl TopicQuery {
    pub fn into_news_query(self) -> NewsQuery {
        NewsQuery {
            query: Some(self.topic),
            category: None,
            country: self.country,
            language: self.language,
            limit: self.limit,
        }
    }
}

pub fn news_query(
    query: Option<String>,
    category: Option<String>,
    country: Option<String>,
    language: Option<String>,
    limit: Option<u32>,
) -> NewsQuery {
    NewsQuery {
        query: scrub(query),
        category: scrub(category),
        country: scrub(country),
        language: scrub(language).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        limit: clamp_limit(limit),
    }
}

pub fn headline_query(
    category: Option<String>,
    country: Option<String>,
    limit: Option<u32>,
) -> HeadlineQuery {
    HeadlineQuery {
        category: scrub(category),
        country: scrub(country).unwrap_or_else(|| DEFAULT_HEADLINE_COUNTRY.to_string()),
        limit: clamp_limit(limit),
    }
}

pub fn topic_query(
    topic: &str,
    country: Option<String>,
    language: Option<String>,
    limit: Option<u32>,
) -> Result<TopicQuery, ValidationError> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(ValidationError::EmptyTopic);
    }
    Ok(TopicQuery {
        topic: topic.to_string(),
        country: scrub(country),
        language: scrub(language).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        limit: clamp_limit(limit),
    })
}

/// Clamp to [MIN_LIMIT, MAX_LIMIT]; absent means DEFAULT_LIMIT.
fn clamp_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(MIN_LIMIT, MAX_LIMIT)
}

/// Trim; blank becomes `None`.
fn scrub(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let t = s.trim();
        if t.is_empty() {
            None
        } else {
            Some(t.to_string())
        }
    })
}
