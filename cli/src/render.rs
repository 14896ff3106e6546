//! Plain-text rendering of client results.

use stocks_core::{CompanyDirectory, PriceDirection, Quote};

pub fn quote_line(quote: &Quote) -> String {
    let arrow = match quote.direction() {
        PriceDirection::Up => "▲",
        PriceDirection::Down => "▼",
        PriceDirection::Unchanged => "=",
    };
    format!(
        "{:<8} {:<40} {:>10.2} {} {:+.2}",
        quote.company_symbol(),
        quote.company_name(),
        quote.price(),
        arrow,
        quote.price_change()
    )
}

/// `(name, symbol)` rows whose name contains `filter`, ignoring case.
pub fn company_rows<'a>(directory: &'a CompanyDirectory, filter: Option<&str>) -> Vec<(&'a str, &'a str)> {
    let needle = filter.map(str::to_lowercase);
    directory
        .iter()
        .filter(|(name, _)| match &needle {
            Some(n) => name.to_lowercase().contains(n.as_str()),
            None => true,
        })
        .collect()
}
