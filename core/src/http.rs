//! HTTP transport for the quote client.
//!
//! # Design
//! Requests and responses are plain data. The `Transport` trait is the only
//! place network I/O happens: one GET per call, no retries, and every HTTP
//! status (including 4xx/5xx) comes back as `Ok(HttpResponse)`. Redirects are
//! followed the way reqwest does by default; a 3xx only surfaces when the
//! policy gives up. Only a failure
//! to obtain a response at all is a `TransportError`.
//!
//! `ReqwestTransport` is the production implementation. Tests substitute their
//! own `Transport` to script responses.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Url};

use crate::config::ClientConfig;
use crate::error::{TransportError, TransportErrorKind};

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: Url,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Request against a JSON API endpoint.
    pub fn json(url: Url) -> Self {
        Self {
            url,
            headers: vec![(ACCEPT.as_str().to_string(), "application/json".to_string())],
        }
    }

    /// Plain GET with no extra headers, used for image downloads.
    pub fn plain(url: Url) -> Self {
        Self {
            url,
            headers: Vec::new(),
        }
    }
}

/// A complete HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Issues exactly one HTTP GET per call.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `Transport` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        // Default redirect policy: up to ten hops.
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TransportError::new(TransportErrorKind::Other, e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.get(request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let headers = header_pairs(response.headers());
        let body = response.bytes().await.map_err(transport_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

fn transport_error(err: reqwest::Error) -> TransportError {
    let kind = if err.is_timeout() {
        TransportErrorKind::Timeout
    } else if err.is_connect() {
        TransportErrorKind::Connect
    } else if err.is_body() || err.is_decode() {
        TransportErrorKind::Body
    } else {
        TransportErrorKind::Other
    };
    // Strip the URL so the token never ends up in a log line.
    TransportError::new(kind, err.without_url().to_string())
}

fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

/// Content type of a response, if the server sent one.
pub(crate) fn content_type(response: &HttpResponse) -> Option<String> {
    response.header(CONTENT_TYPE.as_str()).map(str::to_string)
}
