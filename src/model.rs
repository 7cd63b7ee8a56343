//! Request, article and result types shared by every pipeline stage.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_COUNTRY: &str = "us";
const UNKNOWN_SOURCE: &str = "Unknown";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub entity: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

impl SearchRequest {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            description: None,
            country: default_country(),
            tags: Vec::new(),
            date_range: None,
        }
    }

    /// ISO-2 country code, lowercased. Blank falls back to the default.
    pub fn country_code(&self) -> String {
        let code = self.country.trim().to_lowercase();
        if code.is_empty() {
            default_country()
        } else {
            code
        }
    }
}

/// Caller-supplied date bounds as received. Only a range with both ends set is applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid date bound '{value}': expected YYYY-MM-DD")]
pub struct WindowError {
    pub value: String,
}

impl DateRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from_date: Some(from.into()),
            to_date: Some(to.into()),
        }
    }

    /// `Ok(None)` when either bound is missing or blank.
    pub fn window(&self) -> Result<Option<DateWindow>, WindowError> {
        fn bound(v: &Option<String>) -> Option<&str> {
            v.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }
        let (Some(from), Some(to)) = (bound(&self.from_date), bound(&self.to_date)) else {
            return Ok(None);
        };
        let parse = |s: &str| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| WindowError {
                value: s.to_string(),
            })
        };
        Ok(Some(DateWindow {
            from: parse(from)?,
            to: parse(to)?,
        }))
    }
}

/// Inclusive calendar window. An inverted window matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// One record from the news search provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawNewsItem {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub snippet: String,
    /// Relative ("2 hours ago") or absolute, possibly missing.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
}

/// Provider fields may be sent as explicit `null`.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl RawNewsItem {
    pub fn source_or_unknown(&self) -> String {
        self.source
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SOURCE)
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedArticle {
    pub title: String,
    pub url: String,
    pub source: String,
    pub snippet: String,
    /// Either the provider snippet or the full extracted page text.
    pub content: String,
    /// UTC timestamp ending in `Z`.
    pub publish_date: String,
    /// The provider's date string as received.
    #[serde(rename = "date")]
    pub raw_date: String,
}

impl ResolvedArticle {
    /// Content for analysis: the article body, falling back to the snippet.
    pub fn analysis_text(&self) -> &str {
        if self.content.trim().is_empty() {
            &self.snippet
        } else {
            &self.content
        }
    }

    pub fn identity(&self) -> ArticleIdentity {
        ArticleIdentity {
            original_title: self.title.clone(),
            url: self.url.clone(),
            source: self.source.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    /// Unknown labels map to neutral.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

/// Fields every result carries so callers can correlate it with its article.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleIdentity {
    pub original_title: String,
    pub url: String,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleAnalysis {
    pub subject_match_score: u8,
    pub matched_details: Vec<String>,
    pub tags: Vec<String>,
    pub sentiment: Sentiment,
    pub crime_related: bool,
    pub unethical_related: bool,
    pub confidence: u8,
    pub summary: String,
    pub catchy_title: String,
    pub publish_date: String,
    pub is_paywalled: bool,
    #[serde(flatten)]
    pub identity: ArticleIdentity,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ArticleFailure {
    pub error: String,
    #[serde(flatten)]
    pub identity: ArticleIdentity,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum EnrichedArticle {
    Analyzed(ArticleAnalysis),
    Failed(ArticleFailure),
}

impl EnrichedArticle {
    pub fn identity(&self) -> &ArticleIdentity {
        match self {
            EnrichedArticle::Analyzed(a) => &a.identity,
            EnrichedArticle::Failed(f) => &f.identity,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, EnrichedArticle::Failed(_))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NumberedResult {
    #[serde(flatten)]
    pub article: EnrichedArticle,
    /// 1-based position in the result list.
    #[serde(rename = "S.No")]
    pub serial: usize,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SearchResponse {
    pub results: Vec<NumberedResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
