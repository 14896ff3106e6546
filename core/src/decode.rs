//! JSON payload decoding.
//!
//! Each entry point is pure and all-or-nothing: a missing or mistyped field
//! anywhere fails the whole decode. Unknown fields are ignored, the service
//! returns far more than is mapped here.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::error::DecodeError;
use crate::types::{CompanyDirectory, LogoReference, Quote};

/// Body of `/stock/{symbol}/quote`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuotePayload {
    company_name: String,
    symbol: String,
    latest_price: f64,
    change: f64,
}

/// One element of `/ref-data/symbols`.
#[derive(Debug, Deserialize)]
struct SymbolEntry {
    name: String,
    symbol: String,
}

/// Body of `/stock/{symbol}/logo`.
#[derive(Debug, Deserialize)]
struct LogoPayload {
    url: String,
}

pub fn decode_quote(bytes: &[u8]) -> Result<Quote, DecodeError> {
    let payload: QuotePayload = serde_json::from_slice(bytes)?;
    Ok(Quote::new(
        payload.company_name,
        payload.symbol,
        payload.latest_price,
        payload.change,
    ))
}

/// Later entries with an already seen name replace the earlier symbol.
pub fn decode_directory(bytes: &[u8]) -> Result<CompanyDirectory, DecodeError> {
    let entries: Vec<SymbolEntry> = serde_json::from_slice(bytes)?;
    let mut map = BTreeMap::new();
    for entry in entries {
        match map.entry(entry.name) {
            Entry::Vacant(slot) => {
                slot.insert(entry.symbol);
            }
            Entry::Occupied(mut slot) => {
                debug!(
                    name = %slot.key(),
                    previous = %slot.get(),
                    replacement = %entry.symbol,
                    "duplicate company name in directory"
                );
                slot.insert(entry.symbol);
            }
        }
    }
    Ok(CompanyDirectory::from_map(map))
}

pub fn decode_logo_reference(bytes: &[u8]) -> Result<LogoReference, DecodeError> {
    let payload: LogoPayload = serde_json::from_slice(bytes)?;
    let url = Url::parse(&payload.url).map_err(|e| DecodeError::InvalidLogoUrl {
        url: payload.url.clone(),
        message: e.to_string(),
    })?;
    Ok(LogoReference::new(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_quote_maps_fields() {
        let body = serde_json::json!({
            "companyName": "Apple Inc.",
            "symbol": "AAPL",
            "latestPrice": 150.25,
            "change": -1.5,
        });
        let quote = decode_quote(body.to_string().as_bytes()).unwrap();
        assert_eq!(quote.company_name(), "Apple Inc.");
        assert_eq!(quote.company_symbol(), "AAPL");
        assert_eq!(quote.price(), 150.25);
        assert_eq!(quote.price_change(), -1.5);
    }

    #[test]
    fn decode_quote_ignores_extra_fields_and_accepts_integers() {
        let body = br#"{"companyName":"X","symbol":"X","latestPrice":10,"change":0,"volume":123,"peRatio":null}"#;
        let quote = decode_quote(body).unwrap();
        assert_eq!(quote.price(), 10.0);
        assert_eq!(quote.price_change(), 0.0);
    }

    #[test]
    fn decode_quote_rejects_mistyped_price() {
        let body = br#"{"companyName":"Apple","symbol":"AAPL","latestPrice":"oops","change":0}"#;
        assert!(matches!(decode_quote(body), Err(DecodeError::Json(_))));
    }

    #[test]
    fn decode_quote_rejects_each_missing_field() {
        let full = serde_json::json!({
            "companyName": "Apple Inc.",
            "symbol": "AAPL",
            "latestPrice": 150.25,
            "change": -1.5,
        });
        for field in ["companyName", "symbol", "latestPrice", "change"] {
            let mut body = full.clone();
            body.as_object_mut().unwrap().remove(field);
            assert!(decode_quote(body.to_string().as_bytes()).is_err(), "{field}");
        }
    }

    #[test]
    fn decode_quote_rejects_null_price() {
        let body = br#"{"companyName":"A","symbol":"A","latestPrice":null,"change":0}"#;
        assert!(decode_quote(body).is_err());
    }

    #[test]
    fn decode_quote_rejects_non_object() {
        assert!(decode_quote(b"[]").is_err());
        assert!(decode_quote(b"not json").is_err());
        assert!(decode_quote(b"").is_err());
    }

    #[test]
    fn decode_directory_last_duplicate_wins() {
        let body = br#"[{"name":"Apple","symbol":"AAPL"},{"name":"Apple","symbol":"AAPL2"}]"#;
        let dir = decode_directory(body).unwrap();
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.symbol_for("Apple"), Some("AAPL2"));
    }

    #[test]
    fn decode_directory_fails_on_any_bad_element() {
        let body = br#"[{"name":"Apple","symbol":"AAPL"},{"name":"Microsoft"}]"#;
        assert!(decode_directory(body).is_err());

        let body = br#"[{"name":"Apple","symbol":7}]"#;
        assert!(decode_directory(body).is_err());
    }

    #[test]
    fn decode_directory_rejects_object_root() {
        assert!(decode_directory(br#"{"name":"Apple","symbol":"AAPL"}"#).is_err());
    }

    #[test]
    fn decode_directory_empty_array() {
        assert!(decode_directory(b"[]").unwrap().is_empty());
    }

    #[test]
    fn decode_logo_reference_parses_url() {
        let body = br#"{"url":"https://storage.googleapis.com/iexcloud-hl37opg/api/logos/AAPL.png"}"#;
        let logo = decode_logo_reference(body).unwrap();
        assert_eq!(logo.url().host_str(), Some("storage.googleapis.com"));
        assert!(logo.as_str().ends_with("/AAPL.png"));
    }

    #[test]
    fn decode_logo_reference_rejects_invalid_url() {
        let err = decode_logo_reference(br#"{"url":"not a url"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidLogoUrl { .. }));

        let err = decode_logo_reference(br#"{"url":""}"#).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidLogoUrl { .. }));
    }

    #[test]
    fn decode_logo_reference_rejects_missing_url() {
        assert!(matches!(decode_logo_reference(b"{}"), Err(DecodeError::Json(_))));
        assert!(matches!(decode_logo_reference(br#"{"url":5}"#), Err(DecodeError::Json(_))));
    }
}
