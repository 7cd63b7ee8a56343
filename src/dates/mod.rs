//! Publish-date resolution for search results.
//!
//! The resolver walks [`CHAIN`] in order and stops at the first step that yields a date:
//!
//! 1. the provider's date string (relative like "2 hours ago", else absolute),
//! 2. a date embedded in the URL path or the title,
//! 3. a date mined from the full extracted page text.
//!
//! If every step comes up empty the article is dated "yesterday". Only step 3 replaces
//! the provider snippet with the extracted page text as the article body.

mod parse;
mod patterns;
mod relative;

pub use parse::{parse_loose, start_of_day, to_timestamp};
pub use patterns::{from_content, from_url_or_title};
pub use relative::parse_relative;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::fetch::{PageText, text_or_empty};
use crate::model::RawNewsItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ProviderDate,
    UrlOrTitle,
    PageContent,
}

pub const CHAIN: [Step; 3] = [Step::ProviderDate, Step::UrlOrTitle, Step::PageContent];

/// Which text becomes the article's `content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleBody {
    Snippet,
    Extracted(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub published: DateTime<Utc>,
    pub body: ArticleBody,
    /// `None` when the yesterday fallback was used.
    pub step: Option<Step>,
}

impl Resolution {
    pub fn timestamp(&self) -> String {
        to_timestamp(self.published)
    }

    fn from_step(step: Step, published: DateTime<Utc>) -> Self {
        Self {
            published,
            body: ArticleBody::Snippet,
            step: Some(step),
        }
    }
}

/// Estimate for undated news.
pub fn yesterday(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(1)
}

pub async fn resolve(pages: &impl PageText, item: &RawNewsItem, now: DateTime<Utc>) -> Resolution {
    for step in CHAIN {
        if let Some(resolution) = attempt(step, pages, item, now).await {
            debug!(url = %item.link, ?step, date = %resolution.timestamp(), "date resolved");
            return resolution;
        }
    }
    debug!(url = %item.link, "no date found, using yesterday");
    Resolution {
        published: yesterday(now),
        body: ArticleBody::Snippet,
        step: None,
    }
}

async fn attempt(
    step: Step,
    pages: &impl PageText,
    item: &RawNewsItem,
    now: DateTime<Utc>,
) -> Option<Resolution> {
    match step {
        Step::ProviderDate => {
            parse_relative(&item.date, now).map(|dt| Resolution::from_step(step, dt))
        }
        Step::UrlOrTitle => from_url_or_title(&item.link, &item.title)
            .map(|date| Resolution::from_step(step, start_of_day(date))),
        Step::PageContent => {
            let text = text_or_empty(pages, &item.link).await;
            let date = from_content(&text)?;
            Some(Resolution {
                published: start_of_day(date),
                body: ArticleBody::Extracted(text),
                step: Some(step),
            })
        }
    }
}
