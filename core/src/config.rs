//! Client configuration.
//!
//! The API token is always supplied by the caller, either directly or via
//! `IEX_TOKEN`. It is never logged and `Debug` output redacts it.

use std::fmt;
use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://cloud.iexapis.com/stable";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const TOKEN_ENV: &str = "IEX_TOKEN";
pub const BASE_URL_ENV: &str = "IEX_BASE_URL";
pub const TIMEOUT_ENV: &str = "IEX_TIMEOUT_SECS";

#[derive(Clone)]
pub struct ClientConfig {
    base_url: String,
    token: String,
    timeout: Duration,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Point the client at another deployment (sandbox, mock server).
    /// A trailing slash is stripped. Paths are appended to the base, so it
    /// may not carry a query or fragment.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                message: "base URL must not carry a query or fragment".to_string(),
            });
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build from `IEX_TOKEN`, `IEX_BASE_URL` and `IEX_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup(TOKEN_ENV).ok_or(ConfigError::MissingToken)?;
        let mut config = Self::new(token)?;
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            config = config.with_base_url(&base_url)?;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: TIMEOUT_ENV,
                value: raw.clone(),
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
