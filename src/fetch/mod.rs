//! Full-page content extraction: download a URL and keep its main-body plain text.

mod extractor;
#[cfg(test)]
pub(crate) mod mock;

use std::time::Duration;

use extractor::{ExtractError, extract_text};
use reqwest::Client;
use tracing::debug;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(20);
const MAX_RESPONSE_BYTES: usize = 10_000_000;
/// Shorter extractions are treated as navigation shells or consent walls.
const MIN_EXTRACTED_CHARS: usize = 250;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid URL: must be HTTP(S)")]
    InvalidScheme,

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("fetch failed: status {0}")]
    Status(u16),

    #[error("response too large (>{} bytes)", MAX_RESPONSE_BYTES)]
    TooLarge,

    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("extraction timed out after {}s", EXTRACTION_TIMEOUT.as_secs())]
    Timeout,

    #[error("extracted text too short ({0} chars)")]
    TooShort(usize),
}

/// Source of main-body article text for a URL.
#[allow(async_fn_in_trait)]
pub trait PageText {
    async fn extract(&self, url: &str) -> Result<String, FetchError>;
}

/// Downloads pages over the shared HTTP client and extracts readable text.
#[derive(Clone)]
pub struct ContentExtractor {
    http: Client,
}

impl ContentExtractor {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

/// Boundary form of [`PageText::extract`]: any failure is logged and becomes empty text.
pub async fn text_or_empty(pages: &impl PageText, url: &str) -> String {
    pages.extract(url).await.unwrap_or_else(|e| {
        debug!(url, error = %e, "content extraction failed");
        String::new()
    })
}

impl PageText for ContentExtractor {
    async fn extract(&self, url: &str) -> Result<String, FetchError> {
        validate_url(url)?;
        let (final_url, html) = download(&self.http, url).await?;

        let extraction =
            tokio::task::spawn_blocking(move || extract_text(&html, &final_url));
        let text = match tokio::time::timeout(EXTRACTION_TIMEOUT, extraction).await {
            Ok(Ok(result)) => result?,
            Ok(Err(join)) => {
                return Err(ExtractError::Readability(join.to_string()).into());
            }
            Err(_) => return Err(FetchError::Timeout),
        };

        let chars = text.chars().count();
        if chars < MIN_EXTRACTED_CHARS {
            return Err(FetchError::TooShort(chars));
        }
        debug!(url, chars, "content extracted");
        Ok(text)
    }
}

fn validate_url(raw: &str) -> Result<(), FetchError> {
    let parsed = url::Url::parse(raw)?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(FetchError::InvalidScheme),
    }
}

async fn download(client: &Client, url: &str) -> Result<(String, String), FetchError> {
    let response = client
        .get(url)
        .header("User-Agent", crate::USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let final_url = response.url().to_string();

    if let Some(len) = response.content_length()
        && len as usize > MAX_RESPONSE_BYTES
    {
        return Err(FetchError::TooLarge);
    }

    let mut body = Vec::new();
    let mut stream = response;
    while let Some(chunk) = stream.chunk().await? {
        body.extend_from_slice(&chunk);
        if body.len() > MAX_RESPONSE_BYTES {
            return Err(FetchError::TooLarge);
        }
    }
    let html = String::from_utf8_lossy(&body).into_owned();
    Ok((final_url, html))
}
