//! Error types for the quote service client.
//!
//! # Design
//! Callers branch on exactly one type, [`ClassifiedError`]. It is payload-free
//! and `Copy`. The richer error types below (`EndpointError`, `TransportError`,
//! `DecodeError`) exist inside the pipeline for diagnostics and are folded into
//! a `ClassifiedError` by the orchestrator before anything reaches the caller.

use thiserror::Error;

/// The four coarse failure buckets a caller of `QuoteClient` can act on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassifiedError {
    /// The request never produced an HTTP response (DNS, TLS, refused, reset, timeout).
    #[error("no connection to the quote service")]
    NoConnection,

    /// The service answered with a 5xx status.
    #[error("quote service unavailable")]
    ServerUnavailable,

    /// The service answered with a 4xx status, or a 200 whose body was unusable.
    #[error("bad request")]
    BadRequest,

    /// Anything else, e.g. an unexpected 1xx/2xx/3xx status.
    #[error("unhandled error")]
    Unhandled,
}

impl ClassifiedError {
    /// Short sentence suitable for an alert shown to an end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            ClassifiedError::NoConnection => "Check your internet connection and try again.",
            ClassifiedError::ServerUnavailable => {
                "The quote service is temporarily unavailable. Try again later."
            }
            ClassifiedError::BadRequest => "The request could not be completed for this company.",
            ClassifiedError::Unhandled => "Something went wrong. Try again.",
        }
    }
}

/// A request URL could not be constructed. Raised before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    #[error("symbol must not be empty")]
    EmptySymbol,

    #[error("symbol {0:?} contains characters that are not allowed in a URL path")]
    InvalidSymbol(String),

    #[error("malformed URL {url:?}: {message}")]
    MalformedUrl { url: String, message: String },
}

/// Broad cause of a transport failure. Logged only; classification ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Connect,
    Timeout,
    Body,
    Other,
}

/// The transport could not produce an HTTP response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("transport failed ({kind:?}): {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// A 200 response body did not have the expected shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid JSON payload: {0}")]
    Json(String),

    #[error("logo reference {url:?} is not a valid URL: {message}")]
    InvalidLogoUrl { url: String, message: String },
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Json(err.to_string())
    }
}

/// Client configuration is incomplete or malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("an API token is required (set IEX_TOKEN)")]
    MissingToken,

    #[error("invalid base URL {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("invalid value {value:?} for {name}")]
    InvalidValue { name: &'static str, value: String },
}
