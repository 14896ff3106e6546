//! Async client core for the IEX Cloud quote service.
//!
//! # Overview
//! Fetches a company quote, the list of tradable symbols, and a company logo.
//! Every operation returns either a domain value or one `ClassifiedError`
//! that callers branch on.
//!
//! # Design
//! - `Endpoints` builds URLs; pure, carries the token supplied by configuration.
//! - `Transport` performs one GET per call; `ReqwestTransport` is the default.
//! - `classify` maps status / transport failure to `ClassifiedError`, shared
//!   by all operations.
//! - `decode_*` turn JSON bodies into `Quote`, `CompanyDirectory` and
//!   `LogoReference`, all-or-nothing.
//! - `QuoteClient` composes the above with sequential awaits and holds no
//!   mutable state.

pub mod classify;
pub mod client;
pub mod config;
pub mod decode;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod types;

pub use classify::classify;
pub use client::QuoteClient;
pub use config::ClientConfig;
pub use decode::{decode_directory, decode_logo_reference, decode_quote};
pub use endpoint::Endpoints;
pub use error::{ClassifiedError, ConfigError, DecodeError, EndpointError, TransportError, TransportErrorKind};
pub use http::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use types::{CompanyDirectory, LogoImage, LogoReference, PriceDirection, Quote};
