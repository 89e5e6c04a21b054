//! API client configuration
//!
//! The base address every endpoint path is appended to, and the request
//! deadline applied to each call.

use std::time::Duration;

use thiserror::Error;

/// Default base address of the backend API
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Default per-request deadline
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base address, without a trailing slash
    pub base_url: String,
    /// Deadline for one request/response exchange. `None` disables it.
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl ApiConfig {
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    /// Read `DOCCHAT_API_URL` and `DOCCHAT_API_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();
        if let Ok(url) = std::env::var("DOCCHAT_API_URL") {
            builder = builder.base_url(url);
        }
        if let Ok(raw) = std::env::var("DOCCHAT_API_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DOCCHAT_API_TIMEOUT_SECS", raw.clone()))?;
            builder = builder.timeout(if secs == 0 {
                None
            } else {
                Some(Duration::from_secs(secs))
            });
        }
        builder.build()
    }

    /// Full request target for an endpoint path
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

/// Builder for [`ApiConfig`]
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Option<Duration>>,
}

impl ApiConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let base_url = match self.base_url {
            Some(url) => {
                let url = url.trim().trim_end_matches('/').to_string();
                match reqwest::Url::parse(&url) {
                    Ok(parsed)
                        if matches!(parsed.scheme(), "http" | "https")
                            && parsed.host_str().is_some_and(|host| !host.is_empty()) =>
                    {
                        url
                    }
                    _ => return Err(ConfigError::InvalidUrl(url)),
                }
            }
            None => DEFAULT_API_URL.to_string(),
        };
        Ok(ApiConfig {
            base_url,
            timeout: self.timeout.unwrap_or(Some(DEFAULT_TIMEOUT)),
        })
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
