//! Async orchestrator for the quote service.
//!
//! # Design
//! `QuoteClient` holds the endpoint builder and a `Transport` and nothing
//! else; there is no cache and no shared mutable state, so concurrent
//! operations never interact. Every operation follows the same pipeline:
//! build URL, fetch once, accept only status 200, decode. Any failure along
//! the way is folded into a single `ClassifiedError` and returned; nothing is
//! retried and no partial value is ever produced.

use tracing::{debug, instrument, warn};

use crate::classify::classify;
use crate::config::ClientConfig;
use crate::decode::{decode_directory, decode_logo_reference, decode_quote};
use crate::endpoint::{redacted, Endpoints};
use crate::error::{ClassifiedError, DecodeError, EndpointError, TransportError};
use crate::http::{content_type, HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::types::{CompanyDirectory, LogoImage, LogoReference, Quote};

const SUCCESS: u16 = 200;

#[derive(Clone)]
pub struct QuoteClient<T = ReqwestTransport> {
    endpoints: Endpoints,
    transport: T,
}

impl QuoteClient<ReqwestTransport> {
    /// Client using `reqwest` with the configured timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        Ok(Self::with_transport(config, ReqwestTransport::new(config)?))
    }
}

impl<T: Transport> QuoteClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            endpoints: Endpoints::new(config),
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[instrument(skip(self))]
    pub async fn get_quote(&self, symbol: &str) -> Result<Quote, ClassifiedError> {
        let url = self.endpoints.quote_url(symbol).map_err(rejected)?;
        let response = self.exchange(HttpRequest::json(url)).await?;
        let quote = decode_quote(&response.body).map_err(unusable)?;
        debug!(price = quote.price(), change = quote.price_change(), "quote decoded");
        Ok(quote)
    }

    /// Fetch the full symbol directory. The caller replaces whatever
    /// directory it held with the returned value.
    #[instrument(skip(self))]
    pub async fn list_companies(&self) -> Result<CompanyDirectory, ClassifiedError> {
        let url = self.endpoints.directory_url().map_err(rejected)?;
        let response = self.exchange(HttpRequest::json(url)).await?;
        let directory = decode_directory(&response.body).map_err(unusable)?;
        debug!(companies = directory.len(), "directory decoded");
        Ok(directory)
    }

    /// Resolve where a company's logo lives without downloading it.
    #[instrument(skip(self))]
    pub async fn get_logo_reference(&self, symbol: &str) -> Result<LogoReference, ClassifiedError> {
        let url = self.endpoints.logo_meta_url(symbol).map_err(rejected)?;
        let response = self.exchange(HttpRequest::json(url)).await?;
        decode_logo_reference(&response.body).map_err(unusable)
    }

    /// Two sequential fetches: the logo metadata, then the image it points
    /// to. The image fetch is never attempted if the first step fails, and a
    /// failed image fetch reports its own classification.
    #[instrument(skip(self))]
    pub async fn get_logo_image(&self, symbol: &str) -> Result<LogoImage, ClassifiedError> {
        let reference = self.get_logo_reference(symbol).await?;
        let response = self.exchange(HttpRequest::plain(reference.url().clone())).await?;
        debug!(bytes = response.body.len(), "logo downloaded");
        Ok(LogoImage {
            content_type: content_type(&response),
            bytes: response.body,
        })
    }

    /// Run `get_quote` and `get_logo_image` concurrently. The two outcomes
    /// are independent; a failed logo does not discard a good quote.
    pub async fn get_quote_with_logo(
        &self,
        symbol: &str,
    ) -> (Result<Quote, ClassifiedError>, Result<LogoImage, ClassifiedError>) {
        tokio::join!(self.get_quote(symbol), self.get_logo_image(symbol))
    }

    async fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, ClassifiedError> {
        debug!(url = %redacted(&request.url), "sending request");
        match self.transport.fetch(&request).await {
            Ok(response) if response.status == SUCCESS => Ok(response),
            Ok(response) => {
                let classified = classify(Some(response.status), None);
                warn!(status = response.status, error = ?classified, "request failed");
                Err(classified)
            }
            Err(err) => {
                let classified = classify(None, Some(&err));
                warn!(cause = %err, error = ?classified, "request failed");
                Err(classified)
            }
        }
    }
}

fn rejected(err: EndpointError) -> ClassifiedError {
    warn!(cause = %err, "request not sent");
    ClassifiedError::BadRequest
}

fn unusable(err: DecodeError) -> ClassifiedError {
    warn!(cause = %err, "response body unusable");
    ClassifiedError::BadRequest
}
