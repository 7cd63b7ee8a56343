use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::lang::SearchLang;
use crate::dates::{self, ArticleBody};
use crate::fetch::PageText;
use crate::model::{DateWindow, RawNewsItem, ResolvedArticle};
use crate::serper::{NewsQuery, NewsSearch};

/// Input to [`aggregate`].
#[derive(Debug, Clone, Copy)]
pub struct AggregateRequest<'a> {
    pub variants: &'a [String],
    pub country: &'a str,
    /// Provider-side hint only; strict filtering happens afterwards.
    pub window: Option<&'a DateWindow>,
}

/// Issue every (variant, language) provider call and collect dated, URL-deduplicated articles.
///
/// Calls run one after another, and so do the page fetches that date resolution may need.
/// This keeps the request rate against the provider low. A failed call is logged and skipped.
pub async fn aggregate(
    search: &impl NewsSearch,
    pages: &impl PageText,
    request: AggregateRequest<'_>,
    now: DateTime<Utc>,
) -> Vec<ResolvedArticle> {
    let mut seen = HashSet::new();
    let mut articles = Vec::new();

    for variant in request.variants {
        for lang in SearchLang::ALL {
            let query = NewsQuery {
                query: variant,
                language: lang.as_param(),
                country: request.country,
                window: request.window,
            };
            let items = match search.search(&query).await {
                Ok(items) => items,
                Err(e) => {
                    warn!(query = %variant, lang = lang.as_param(), error = %e, "news search failed");
                    continue;
                }
            };
            debug!(query = %variant, lang = lang.as_param(), count = items.len(), "news results");

            for item in items {
                if !seen.insert(item.link.clone()) {
                    continue;
                }
                articles.push(resolve_item(pages, item, now).await);
            }
        }
    }

    info!(count = articles.len(), "aggregated articles");
    articles
}

async fn resolve_item(
    pages: &impl PageText,
    item: RawNewsItem,
    now: DateTime<Utc>,
) -> ResolvedArticle {
    let resolution = dates::resolve(pages, &item, now).await;
    let publish_date = resolution.timestamp();
    let source = item.source_or_unknown();
    let content = match resolution.body {
        ArticleBody::Extracted(text) => text,
        ArticleBody::Snippet => item.snippet.clone(),
    };

    ResolvedArticle {
        title: item.title,
        url: item.link,
        source,
        snippet: item.snippet,
        content,
        publish_date,
        raw_date: item.date,
    }
}
