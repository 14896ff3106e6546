use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Fixture, LogoRecord, QuoteRecord, SymbolRecord, DEFAULT_TOKEN, PIXEL_PNG};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

async fn send(uri: &str) -> axum::response::Response {
    app(Fixture::sample(DEFAULT_TOKEN)).oneshot(get(uri)).await.unwrap()
}

// --- quote ---

#[tokio::test]
async fn quote_returns_iex_shape() {
    let resp = send("/stock/AAPL/quote?token=test-token").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let quote: QuoteRecord = body_json(resp).await;
    assert_eq!(quote.company_name, "Apple Inc.");
    assert_eq!(quote.symbol, "AAPL");
    assert_eq!(quote.latest_price, 150.25);
    assert_eq!(quote.change, -1.5);
}

#[tokio::test]
async fn quote_unknown_symbol_returns_404() {
    let resp = send("/stock/ZZZZ/quote?token=test-token").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn quote_unavailable_symbol_returns_503() {
    let resp = send("/stock/DOWN/quote?token=test-token").await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn quote_bad_payload_is_missing_price() {
    let resp = send("/stock/BAD/quote?token=test-token").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body.get("latestPrice").is_none());
}

// --- token ---

#[tokio::test]
async fn missing_token_returns_403() {
    for uri in ["/stock/AAPL/quote", "/ref-data/symbols", "/stock/AAPL/logo"] {
        let resp = send(uri).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{uri}");
    }
}

#[tokio::test]
async fn wrong_token_returns_403() {
    let resp = send("/stock/AAPL/quote?token=other").await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// --- symbols ---

#[tokio::test]
async fn symbols_lists_every_company() {
    let resp = send("/ref-data/symbols?token=test-token").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let symbols: Vec<SymbolRecord> = body_json(resp).await;
    assert_eq!(symbols.len(), 4);
    assert!(symbols.iter().any(|s| s.name == "Apple Inc." && s.symbol == "AAPL"));
}

#[tokio::test]
async fn empty_fixture_lists_no_symbols() {
    let resp = app(Fixture::new("t"))
        .oneshot(get("/ref-data/symbols?token=t"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let symbols: Vec<SymbolRecord> = body_json(resp).await;
    assert!(symbols.is_empty());
}

// --- logo ---

#[tokio::test]
async fn logo_url_uses_request_host() {
    let request = Request::builder()
        .uri("/stock/MSFT/logo?token=test-token")
        .header(header::HOST, "127.0.0.1:4567")
        .body(String::new())
        .unwrap();
    let resp = app(Fixture::sample(DEFAULT_TOKEN)).oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let logo: LogoRecord = body_json(resp).await;
    assert_eq!(logo.url, "http://127.0.0.1:4567/logos/MSFT.png");
}

#[tokio::test]
async fn logo_unknown_symbol_returns_404() {
    let resp = send("/stock/ZZZZ/logo?token=test-token").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn logo_image_is_served_without_token() {
    let resp = send("/logos/AAPL.png").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/png");
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], PIXEL_PNG);
}

#[tokio::test]
async fn broken_logo_image_returns_503() {
    let resp = send("/logos/IBM.png").await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn moved_logo_points_at_redirect() {
    let request = Request::builder()
        .uri("/stock/GOOGL/logo?token=test-token")
        .header(header::HOST, "127.0.0.1:4567")
        .body(String::new())
        .unwrap();
    let resp = app(Fixture::sample(DEFAULT_TOKEN)).oneshot(request).await.unwrap();
    let logo: LogoRecord = body_json(resp).await;
    assert_eq!(logo.url, "http://127.0.0.1:4567/moved/GOOGL.png");

    let resp = send("/moved/GOOGL.png").await;
    assert_eq!(resp.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(resp.headers()[header::LOCATION], "/logos/GOOGL.png");
}

#[tokio::test]
async fn logo_image_wrong_extension_returns_404() {
    let resp = send("/logos/AAPL.gif").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
