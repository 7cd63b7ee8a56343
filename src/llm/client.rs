use std::time::Duration;

use reqwest::Client;
use tracing::warn;

use super::retry::Backoff;
use super::types::{ApiError, ChatRequest, ChatResponse};
use crate::config::{ApiKey, AzureConfig};

/// 429 and 5xx replies are retried.
const RETRY: Backoff = Backoff {
    attempts: 3,
    base: Duration::from_secs(1),
};

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("model API rate limit exceeded")]
    RateLimited,

    #[error("model API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("model returned no content")]
    EmptyResponse,
}

/// Chat-completion model. Implemented by `AzureOpenAiClient`; tests use scripted mocks.
#[allow(async_fn_in_trait)]
pub trait ChatClient {
    /// Returns the content string of the first choice.
    async fn complete(&self, request: &ChatRequest, timeout: Duration) -> Result<String, LlmError>;
}

#[derive(Clone)]
pub struct AzureOpenAiClient {
    http: Client,
    api_key: ApiKey,
    url: String,
}

impl AzureOpenAiClient {
    pub fn new(http: Client, config: &AzureConfig) -> Self {
        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            config.endpoint, config.deployment, config.api_version
        );
        Self {
            http,
            api_key: config.api_key.clone(),
            url,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self::new(
            http,
            &AzureConfig {
                endpoint: base_url.to_string(),
                api_key: ApiKey::new("test-key"),
                deployment: "gpt-4o-mini".to_string(),
                api_version: "2024-12-01-preview".to_string(),
            },
        )
    }

    async fn chat(&self, request: &ChatRequest, timeout: Duration) -> Result<String, LlmError> {
        let response = self
            .http
            .post(&self.url)
            .header("api-key", self.api_key.expose())
            .header("User-Agent", crate::USER_AGENT)
            .json(request)
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("model API rate limited");
            return Err(LlmError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if let Ok(body) = serde_json::from_str::<ChatResponse>(&text)
                && let Some(err) = &body.error
            {
                return Err(classify_api_error(status.as_u16(), err));
            }
            warn!(status = %status, "model API error (no structured body)");
            return Err(LlmError::Api {
                code: status.as_u16(),
                message: format!("HTTP {status}: {}", crate::body_snippet(&text)),
            });
        }

        let body: ChatResponse = response.json().await?;
        if let Some(err) = &body.error {
            return Err(classify_api_error(status.as_u16(), err));
        }

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)
    }
}

impl ChatClient for AzureOpenAiClient {
    async fn complete(&self, request: &ChatRequest, timeout: Duration) -> Result<String, LlmError> {
        RETRY
            .run(is_retriable, || self.chat(request, timeout))
            .await
    }
}

fn is_retriable(e: &LlmError) -> bool {
    matches!(
        e,
        LlmError::RateLimited
            | LlmError::Api {
                code: 500..=599,
                ..
            }
    )
}

fn classify_api_error(status: u16, err: &ApiError) -> LlmError {
    let message = err
        .message
        .clone()
        .unwrap_or_else(|| "Unknown error".to_string());
    // Azure reports `code` as a string ("429", "content_filter"), OpenAI as a number.
    let code = match &err.code {
        Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Some(serde_json::Value::String(s)) => s.parse().ok(),
        _ => None,
    }
    .unwrap_or(status);

    match code {
        429 => LlmError::RateLimited,
        code => LlmError::Api { code, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(code: serde_json::Value) -> ApiError {
        ApiError {
            code: Some(code),
            message: Some("boom".into()),
        }
    }

    #[test]
    fn string_429_code_is_rate_limited() {
        let err = classify_api_error(400, &api_error(serde_json::json!("429")));
        assert!(matches!(err, LlmError::RateLimited));
    }

    #[test]
    fn non_numeric_code_falls_back_to_status() {
        let err = classify_api_error(400, &api_error(serde_json::json!("content_filter")));
        match err {
            LlmError::Api { code, message } => {
                assert_eq!(code, 400);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Api error, got: {other:?}"),
        }
    }

    #[test]
    fn server_errors_are_retriable() {
        assert!(is_retriable(&LlmError::RateLimited));
        assert!(is_retriable(&LlmError::Api {
            code: 503,
            message: String::new()
        }));
        assert!(!is_retriable(&LlmError::Api {
            code: 401,
            message: String::new()
        }));
        assert!(!is_retriable(&LlmError::EmptyResponse));
    }
}
