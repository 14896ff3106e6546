use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::debug;

pub const DEFAULT_TOKEN: &str = "test-token";

/// PNG bytes served for every known logo.
pub const PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    pub company_name: String,
    pub symbol: String,
    pub latest_price: f64,
    pub change: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub name: String,
    pub symbol: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogoRecord {
    pub url: String,
}

#[derive(Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

/// Canned data served by the mock. Read-only once the router is built.
#[derive(Clone, Debug)]
pub struct Fixture {
    token: String,
    quotes: HashMap<String, Value>,
    symbols: Vec<SymbolRecord>,
    logos: HashMap<String, Vec<u8>>,
    unavailable: HashSet<String>,
    broken_images: HashSet<String>,
    moved_images: HashSet<String>,
}

impl Fixture {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            quotes: HashMap::new(),
            symbols: Vec::new(),
            logos: HashMap::new(),
            unavailable: HashSet::new(),
            broken_images: HashSet::new(),
            moved_images: HashSet::new(),
        }
    }

    /// AAPL, MSFT, GOOGL and IBM with logos, plus a few failure cases:
    /// `DOWN` answers 503 on every API route, `IBM` resolves a logo whose
    /// image host answers 503, `GOOGL` resolves a logo URL that answers 308
    /// to the real image, and `BAD` returns a quote missing `latestPrice`.
    pub fn sample(token: &str) -> Self {
        let companies = [
            ("Apple Inc.", "AAPL", 150.25, -1.5),
            ("Microsoft Corporation", "MSFT", 310.1, 2.35),
            ("Alphabet Inc.", "GOOGL", 128.4, 0.0),
            ("International Business Machines Corporation", "IBM", 140.0, 0.5),
        ];
        let mut fixture = Self::new(token);
        for (name, symbol, price, change) in companies {
            fixture = fixture
                .with_quote(QuoteRecord {
                    company_name: name.to_string(),
                    symbol: symbol.to_string(),
                    latest_price: price,
                    change,
                })
                .with_company(name, symbol)
                .with_logo(symbol, PIXEL_PNG.to_vec());
        }
        fixture
            .with_raw_quote("BAD", serde_json::json!({"companyName": "Bad Data Corp", "symbol": "BAD", "change": 1.0}))
            .with_unavailable("DOWN")
            .with_broken_image("IBM")
            .with_moved_image("GOOGL")
    }

    pub fn with_quote(mut self, quote: QuoteRecord) -> Self {
        let value = serde_json::to_value(&quote).unwrap_or(Value::Null);
        self.quotes.insert(quote.symbol, value);
        self
    }

    pub fn with_raw_quote(mut self, symbol: &str, body: Value) -> Self {
        self.quotes.insert(symbol.to_string(), body);
        self
    }

    pub fn with_company(mut self, name: &str, symbol: &str) -> Self {
        self.symbols.push(SymbolRecord {
            name: name.to_string(),
            symbol: symbol.to_string(),
        });
        self
    }

    pub fn with_logo(mut self, symbol: &str, image: Vec<u8>) -> Self {
        self.logos.insert(symbol.to_string(), image);
        self
    }

    pub fn with_unavailable(mut self, symbol: &str) -> Self {
        self.unavailable.insert(symbol.to_string());
        self
    }

    pub fn with_broken_image(mut self, symbol: &str) -> Self {
        self.broken_images.insert(symbol.to_string());
        self
    }

    /// Logo metadata for `symbol` points at `/moved/`, which redirects to `/logos/`.
    pub fn with_moved_image(mut self, symbol: &str) -> Self {
        self.moved_images.insert(symbol.to_string());
        self
    }

    fn authorize(&self, query: &TokenQuery) -> Result<(), StatusCode> {
        match query.token.as_deref() {
            Some(token) if token == self.token => Ok(()),
            _ => Err(StatusCode::FORBIDDEN),
        }
    }

    fn available(&self, symbol: &str) -> Result<(), StatusCode> {
        if self.unavailable.contains(symbol) {
            Err(StatusCode::SERVICE_UNAVAILABLE)
        } else {
            Ok(())
        }
    }
}

pub type Shared = Arc<Fixture>;

pub fn app(fixture: Fixture) -> Router {
    Router::new()
        .route("/stock/{symbol}/quote", get(get_quote))
        .route("/stock/{symbol}/logo", get(get_logo))
        .route("/ref-data/symbols", get(list_symbols))
        .route("/logos/{file}", get(get_logo_image))
        .route("/moved/{file}", get(moved_logo_image))
        .with_state(Arc::new(fixture))
}

pub async fn run(listener: TcpListener, fixture: Fixture) -> Result<(), std::io::Error> {
    axum::serve(listener, app(fixture)).await
}

async fn get_quote(
    State(fixture): State<Shared>,
    Path(symbol): Path<String>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<Value>, StatusCode> {
    fixture.authorize(&query)?;
    fixture.available(&symbol)?;
    debug!(%symbol, "quote");
    fixture.quotes.get(&symbol).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn list_symbols(
    State(fixture): State<Shared>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<Vec<SymbolRecord>>, StatusCode> {
    fixture.authorize(&query)?;
    Ok(Json(fixture.symbols.clone()))
}

async fn get_logo(
    State(fixture): State<Shared>,
    Path(symbol): Path<String>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
) -> Result<Json<LogoRecord>, StatusCode> {
    fixture.authorize(&query)?;
    fixture.available(&symbol)?;
    if !fixture.logos.contains_key(&symbol) {
        return Err(StatusCode::NOT_FOUND);
    }
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    let dir = if fixture.moved_images.contains(&symbol) { "moved" } else { "logos" };
    Ok(Json(LogoRecord {
        url: format!("http://{host}/{dir}/{symbol}.png"),
    }))
}

async fn get_logo_image(State(fixture): State<Shared>, Path(file): Path<String>) -> Response {
    let Some(symbol) = file.strip_suffix(".png") else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if fixture.broken_images.contains(symbol) {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    match fixture.logos.get(symbol) {
        Some(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn moved_logo_image(Path(file): Path<String>) -> Redirect {
    Redirect::permanent(&format!("/logos/{file}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_record_serializes_to_iex_shape() {
        let quote = QuoteRecord {
            company_name: "Apple Inc.".to_string(),
            symbol: "AAPL".to_string(),
            latest_price: 150.25,
            change: -1.5,
        };
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["companyName"], "Apple Inc.");
        assert_eq!(json["symbol"], "AAPL");
        assert_eq!(json["latestPrice"], 150.25);
        assert_eq!(json["change"], -1.5);
    }

    #[test]
    fn sample_fixture_contents() {
        let fixture = Fixture::sample(DEFAULT_TOKEN);
        assert_eq!(fixture.symbols.len(), 4);
        assert!(fixture.quotes.contains_key("AAPL"));
        assert!(fixture.quotes["BAD"].get("latestPrice").is_none());
        assert!(fixture.unavailable.contains("DOWN"));
        assert!(fixture.broken_images.contains("IBM"));
        assert!(fixture.moved_images.contains("GOOGL"));
    }

    #[test]
    fn authorize_requires_matching_token() {
        let fixture = Fixture::new("secret");
        let ok = TokenQuery { token: Some("secret".to_string()) };
        let wrong = TokenQuery { token: Some("nope".to_string()) };
        let missing = TokenQuery { token: None };
        assert!(fixture.authorize(&ok).is_ok());
        assert_eq!(fixture.authorize(&wrong), Err(StatusCode::FORBIDDEN));
        assert_eq!(fixture.authorize(&missing), Err(StatusCode::FORBIDDEN));
    }

    #[test]
    fn symbol_record_rejects_missing_symbol() {
        let result: Result<SymbolRecord, _> = serde_json::from_str(r#"{"name":"Apple"}"#);
        assert!(result.is_err());
    }
}
