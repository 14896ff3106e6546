//! Request URL construction for the quote service.
//!
//! Pure: no I/O, no clock. Ticker syntax is not validated beyond what keeps
//! the URL well formed; unknown symbols are the service's to reject.

use reqwest::Url;

use crate::config::ClientConfig;
use crate::error::EndpointError;

/// Builds the three API URLs, each carrying the access token exactly once.
#[derive(Clone)]
pub struct Endpoints {
    base_url: String,
    token: String,
}

impl Endpoints {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url().trim_end_matches('/').to_string(),
            token: config.token().to_string(),
        }
    }

    /// `GET {base}/stock/{symbol}/quote?token=...`
    pub fn quote_url(&self, symbol: &str) -> Result<Url, EndpointError> {
        let symbol = checked_symbol(symbol)?;
        self.with_token(format!("{}/stock/{symbol}/quote", self.base_url))
    }

    /// `GET {base}/ref-data/symbols?token=...`
    pub fn directory_url(&self) -> Result<Url, EndpointError> {
        self.with_token(format!("{}/ref-data/symbols", self.base_url))
    }

    /// `GET {base}/stock/{symbol}/logo?token=...`
    pub fn logo_meta_url(&self, symbol: &str) -> Result<Url, EndpointError> {
        let symbol = checked_symbol(symbol)?;
        self.with_token(format!("{}/stock/{symbol}/logo", self.base_url))
    }

    fn with_token(&self, raw: String) -> Result<Url, EndpointError> {
        let mut url = Url::parse(&raw).map_err(|e| EndpointError::MalformedUrl {
            url: raw.clone(),
            message: e.to_string(),
        })?;
        url.query_pairs_mut().append_pair("token", &self.token);
        Ok(url)
    }
}

/// Symbols are inserted into a single path segment, so only characters that
/// would split that segment or end the path are refused. Everything else is
/// left for the service to accept or reject.
fn checked_symbol(symbol: &str) -> Result<&str, EndpointError> {
    if symbol.is_empty() {
        return Err(EndpointError::EmptySymbol);
    }
    let breaks_path = |c: char| {
        matches!(c, '/' | '?' | '#' | '%' | '\\')
            || c.is_whitespace()
            || c.is_control()
            || !c.is_ascii()
    };
    if symbol.chars().any(breaks_path) || symbol.chars().all(|c| c == '.') {
        return Err(EndpointError::InvalidSymbol(symbol.to_string()));
    }
    Ok(symbol)
}

/// Copy of `url` with the token query value masked, for logging.
pub(crate) fn redacted(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "token" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    if pairs.is_empty() {
        return masked.to_string();
    }
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}
