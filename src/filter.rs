//! Strict post-aggregation date-range filter.
//!
//! An article is kept only when its first non-blank date field parses to a day inside the
//! window.
//! A window that cannot be built from the request leaves the batch untouched.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::dates::parse_loose;
use crate::model::{DateRange, DateWindow, ResolvedArticle};

/// Field names searched for a date, in order.
pub const DATE_FIELDS: [&str; 6] = [
    "publishDate",
    "date",
    "published",
    "publishedAt",
    "datePublished",
    "pub_date",
];

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%dT%H:%M:%S",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"];

/// Something with named date fields.
pub trait DateFields {
    /// Non-blank value of the named field, if the record has it.
    fn date_field(&self, name: &str) -> Option<&str>;
}

impl DateFields for ResolvedArticle {
    fn date_field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "publishDate" => &self.publish_date,
            "date" => &self.raw_date,
            _ => return None,
        };
        Some(value.as_str()).filter(|v| !v.trim().is_empty())
    }
}

impl DateFields for Value {
    fn date_field(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(Value::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

/// Calendar day of the first non-blank date field. Later fields are not consulted when
/// that value fails to parse.
pub fn article_day(article: &impl DateFields) -> Option<NaiveDate> {
    DATE_FIELDS
        .iter()
        .find_map(|name| article.date_field(name))
        .and_then(parse_day)
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
        .or_else(|| parse_loose(s).map(|dt| dt.date_naive()))
}

/// Keep articles dated inside `window`. Undated or unparseable articles are dropped.
pub fn retain_in_window<T: DateFields>(articles: Vec<T>, window: &DateWindow) -> Vec<T> {
    let before = articles.len();
    let kept: Vec<T> = articles
        .into_iter()
        .filter(|article| match article_day(article) {
            Some(day) => window.contains(day),
            None => {
                debug!("dropping article without a parseable date");
                false
            }
        })
        .collect();
    info!(before, after = kept.len(), from = %window.from, to = %window.to, "date filter applied");
    kept
}

/// Apply the caller's date range. No range (or an incomplete one) passes everything through,
/// and so does a range that fails to parse.
pub fn apply_date_range<T: DateFields>(articles: Vec<T>, range: Option<&DateRange>) -> Vec<T> {
    let Some(range) = range else {
        return articles;
    };
    match range.window() {
        Ok(Some(window)) => retain_in_window(articles, &window),
        Ok(None) => articles,
        Err(e) => {
            warn!(error = %e, "date filter failed, returning unfiltered results");
            articles
        }
    }
}
