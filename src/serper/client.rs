use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use super::types::{ErrorBody, NewsRequest, NewsResponse};
use crate::config::{ApiKey, SerperConfig};
use crate::model::{DateWindow, RawNewsItem};

/// Overall budget for one provider call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(100);
const WINDOW_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, thiserror::Error)]
pub enum SerperError {
    #[error("search provider rate limit exceeded")]
    RateLimited,

    #[error("search provider error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// One provider call: a query variant in one language for one country.
#[derive(Debug, Clone, Copy)]
pub struct NewsQuery<'a> {
    pub query: &'a str,
    pub language: &'a str,
    pub country: &'a str,
    /// Forwarded as a provider hint only; results are not guaranteed to respect it.
    pub window: Option<&'a DateWindow>,
}

/// News search provider. `SerperClient` in production, scripted mocks in tests.
#[allow(async_fn_in_trait)]
pub trait NewsSearch {
    async fn search(&self, query: &NewsQuery<'_>) -> Result<Vec<RawNewsItem>, SerperError>;
}

#[derive(Clone)]
pub struct SerperClient {
    http: Client,
    api_key: ApiKey,
    url: String,
    result_count: u32,
}

impl SerperClient {
    pub fn new(http: Client, config: &SerperConfig) -> Self {
        Self {
            http,
            api_key: config.api_key.clone(),
            url: config.url.clone(),
            result_count: config.result_count,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, url: &str) -> Self {
        Self {
            http,
            api_key: ApiKey::new("test-key"),
            url: url.to_string(),
            result_count: 100,
        }
    }

    fn build_request(&self, query: &NewsQuery<'_>) -> NewsRequest {
        let (published_after, published_before) = match query.window {
            Some(w) => (
                Some(w.from.format(WINDOW_FORMAT).to_string()),
                Some(w.to.format(WINDOW_FORMAT).to_string()),
            ),
            None => (None, None),
        };
        NewsRequest {
            q: query.query.to_string(),
            hl: query.language.to_string(),
            gl: query.country.to_string(),
            num: self.result_count,
            published_after,
            published_before,
        }
    }
}

impl NewsSearch for SerperClient {
    async fn search(&self, query: &NewsQuery<'_>) -> Result<Vec<RawNewsItem>, SerperError> {
        let request = self.build_request(query);

        let response = self
            .http
            .post(&self.url)
            .header("X-API-KEY", self.api_key.expose())
            .header("User-Agent", crate::USER_AGENT)
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("search provider rate limited");
            return Err(SerperError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("HTTP {status}: {}", crate::body_snippet(&text)));
            return Err(SerperError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let body: NewsResponse = response.json().await?;
        debug!(
            query = %query.query,
            hl = %query.language,
            items = body.news.len(),
            "news search complete"
        );
        Ok(body.news)
    }
}
