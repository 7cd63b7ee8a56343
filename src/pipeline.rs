//! The exposed `search` operation: expand, aggregate, filter, then enrich in parallel.

use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use reqwest::Client;
use tracing::info;

use crate::config::Config;
use crate::enrich::enrich_article;
use crate::fetch::{ContentExtractor, PageText};
use crate::filter::apply_date_range;
use crate::llm::{AzureOpenAiClient, ChatClient};
use crate::model::{NumberedResult, ResolvedArticle, SearchRequest, SearchResponse};
use crate::search::{AggregateRequest, aggregate, expand_queries};
use crate::serper::{NewsSearch, SerperClient};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_REDIRECTS: usize = 10;
pub const EMPTY_RANGE_MESSAGE: &str = "No articles found within the specified date range";

/// Enrich every article concurrently and number the results in input order, starting at 1.
pub async fn assemble(
    llm: &impl ChatClient,
    entity: &str,
    description: Option<&str>,
    articles: &[ResolvedArticle],
    now: DateTime<Utc>,
) -> Vec<NumberedResult> {
    let tasks = articles
        .iter()
        .map(|article| enrich_article(llm, entity, description, article, now));

    join_all(tasks)
        .await
        .into_iter()
        .enumerate()
        .map(|(i, article)| NumberedResult {
            article,
            serial: i + 1,
        })
        .collect()
}

/// The three external collaborators a search needs.
pub struct Pipeline<S, C, P> {
    search: S,
    llm: C,
    pages: P,
}

impl Pipeline<SerperClient, AzureOpenAiClient, ContentExtractor> {
    /// Production wiring over one shared HTTP client.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self::new(
            SerperClient::new(http.clone(), &config.serper),
            AzureOpenAiClient::new(http.clone(), &config.azure),
            ContentExtractor::new(http),
        ))
    }
}

impl<S: NewsSearch, C: ChatClient, P: PageText> Pipeline<S, C, P> {
    pub fn new(search: S, llm: C, pages: P) -> Self {
        Self { search, llm, pages }
    }

    /// Run one request end to end. Nothing here is fatal: an empty result is a valid answer.
    pub async fn search(&self, request: &SearchRequest) -> SearchResponse {
        self.search_at(request, Utc::now()).await
    }

    async fn search_at(&self, request: &SearchRequest, now: DateTime<Utc>) -> SearchResponse {
        let country = request.country_code();
        info!(entity = %request.entity, country = %country, tags = request.tags.len(), "search started");

        let variants = expand_queries(&self.llm, &request.entity, &request.tags, &country).await;
        // An unusable range only matters to the filter, which fails open on it.
        let window = request
            .date_range
            .as_ref()
            .and_then(|range| range.window().ok().flatten());

        let articles = aggregate(
            &self.search,
            &self.pages,
            AggregateRequest {
                variants: &variants,
                country: &country,
                window: window.as_ref(),
            },
            now,
        )
        .await;
        if articles.is_empty() {
            info!("no articles found");
            return SearchResponse::default();
        }

        let articles = apply_date_range(articles, request.date_range.as_ref());
        if articles.is_empty() {
            return SearchResponse {
                results: Vec::new(),
                message: Some(EMPTY_RANGE_MESSAGE.to_string()),
            };
        }

        let results = assemble(
            &self.llm,
            &request.entity,
            request.description.as_deref(),
            &articles,
            now,
        )
        .await;
        let failed = results.iter().filter(|r| r.article.is_failure()).count();
        info!(results = results.len(), failed, "search finished");
        SearchResponse {
            results,
            message: None,
        }
    }
}
