//! Domain values produced by the decoder.
//!
//! # Design
//! None of these types expose a mutating method. A newer quote or directory
//! replaces the old value wholesale. `Quote` and `LogoReference` can only be
//! built inside the crate, so every instance a caller holds came from a
//! successful decode.

use std::collections::BTreeMap;

use reqwest::Url;
use serde::Serialize;

/// Snapshot of a company's current trading price.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    company_name: String,
    company_symbol: String,
    price: f64,
    price_change: f64,
}

impl Quote {
    pub(crate) fn new(company_name: String, company_symbol: String, price: f64, price_change: f64) -> Self {
        Self {
            company_name,
            company_symbol,
            price,
            price_change,
        }
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn company_symbol(&self) -> &str {
        &self.company_symbol
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn price_change(&self) -> f64 {
        self.price_change
    }

    pub fn direction(&self) -> PriceDirection {
        PriceDirection::from_change(self.price_change)
    }
}

/// Sign of a quote's price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceDirection {
    Up,
    Down,
    Unchanged,
}

impl PriceDirection {
    fn from_change(change: f64) -> Self {
        if change > 0.0 {
            PriceDirection::Up
        } else if change < 0.0 {
            PriceDirection::Down
        } else {
            // zero, negative zero and NaN
            PriceDirection::Unchanged
        }
    }
}

/// Company name to ticker symbol, ordered by company name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompanyDirectory {
    entries: BTreeMap<String, String>,
}

impl CompanyDirectory {
    pub(crate) fn from_map(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn symbol_for(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Company names in listing order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(name, symbol)` pairs in listing order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s.as_str()))
    }
}

/// Absolute URL of a company logo, resolved from the logo metadata endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoReference {
    url: Url,
}

impl LogoReference {
    pub(crate) fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

/// Raw image bytes of a company logo, exactly as served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}
