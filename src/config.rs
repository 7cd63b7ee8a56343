use std::env;

use tracing::info;

const DEFAULT_SERPER_URL: &str = "https://google.serper.dev/news";
const DEFAULT_DEPLOYMENT: &str = "gpt-4o-mini";
const DEFAULT_API_VERSION: &str = "2024-12-01-preview";
const DEFAULT_RESULT_COUNT: u32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("{name} is not a valid number: {value}")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Debug, Clone)]
pub struct SerperConfig {
    pub api_key: ApiKey,
    pub url: String,
    /// Results requested per provider call.
    pub result_count: u32,
}

#[derive(Debug, Clone)]
pub struct AzureConfig {
    pub endpoint: String,
    pub api_key: ApiKey,
    pub deployment: String,
    pub api_version: String,
}

/// Process-wide settings, read once at startup and handed to each client.
#[derive(Debug, Clone)]
pub struct Config {
    pub serper: SerperConfig,
    pub azure: AzureConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from any key lookup. Blank values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let result_count = match get("SERPER_RESULT_COUNT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidNumber {
                name: "SERPER_RESULT_COUNT",
                value: raw,
            })?,
            None => DEFAULT_RESULT_COUNT,
        };

        let config = Self {
            serper: SerperConfig {
                api_key: ApiKey::new(require("SERPER_API_KEY")?),
                url: get("SERPER_API_URL").unwrap_or_else(|| DEFAULT_SERPER_URL.to_string()),
                result_count,
            },
            azure: AzureConfig {
                endpoint: require("AZURE_OPENAI_ENDPOINT")?
                    .trim_end_matches('/')
                    .to_string(),
                api_key: ApiKey::new(require("OPENAI_API_KEY")?),
                deployment: get("AZURE_OPENAI_DEPLOYMENT")
                    .unwrap_or_else(|| DEFAULT_DEPLOYMENT.to_string()),
                api_version: get("AZURE_OPENAI_API_VERSION")
                    .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            },
        };

        info!(
            serper_url = %config.serper.url,
            endpoint = %config.azure.endpoint,
            deployment = %config.azure.deployment,
            "config loaded"
        );
        Ok(config)
    }
}
