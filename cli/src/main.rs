//! `stocks`: command-line front end for the quote client.
//!
//! Usage example:
//! ```bash
//! IEX_TOKEN=pk_... stocks quote AAPL MSFT
//! stocks --base-url http://127.0.0.1:3000 --token test-token show AAPL --logo-output aapl.png
//! ```
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG=stocks_core=debug`
//! to see every request.

mod args;
mod render;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use stocks_core::{ClassifiedError, LogoImage, QuoteClient};
use tokio::task::JoinSet;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();
    let config = args.client_config().context("invalid configuration")?;
    let client = QuoteClient::new(&config).context("could not create HTTP client")?;
    info!(base_url = config.base_url(), "client ready");

    match args.command {
        Command::Quote { symbols } => quote(&client, symbols, args.json).await,
        Command::Companies { filter } => companies(&client, filter.as_deref(), args.json).await,
        Command::Logo { symbol, output } => {
            let logo = client
                .get_logo_image(&symbol)
                .await
                .map_err(|e| failure(&format!("logo for {symbol}"), e))?;
            save_logo(&logo, &output).await
        }
        Command::Show { symbol, logo_output } => show(&client, &symbol, logo_output.as_deref(), args.json).await,
    }
}

fn init_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

fn failure(what: &str, err: ClassifiedError) -> anyhow::Error {
    anyhow::anyhow!("{what}: {err}. {}", err.user_message())
}

async fn quote(client: &QuoteClient, symbols: Vec<String>, json: bool) -> Result<()> {
    let mut tasks = JoinSet::new();
    for (index, symbol) in symbols.into_iter().enumerate() {
        let client = client.clone();
        tasks.spawn(async move {
            let result = client.get_quote(&symbol).await;
            (index, symbol, result)
        });
    }

    let mut results = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        results.push(joined.context("quote task panicked")?);
    }
    results.sort_by_key(|(index, _, _)| *index);

    let mut failed = 0;
    for (_, symbol, result) in results {
        match result {
            Ok(quote) if json => println!("{}", serde_json::to_string(&quote)?),
            Ok(quote) => println!("{}", render::quote_line(&quote)),
            Err(err) => {
                failed += 1;
                eprintln!("{}", failure(&format!("quote for {symbol}"), err));
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} quote(s) could not be fetched");
    }
    Ok(())
}

async fn companies(client: &QuoteClient, filter: Option<&str>, json: bool) -> Result<()> {
    let directory = client
        .list_companies()
        .await
        .map_err(|e| failure("company list", e))?;
    let rows = render::company_rows(&directory, filter);
    if json {
        let object: serde_json::Map<String, serde_json::Value> = rows
            .into_iter()
            .map(|(name, symbol)| (name.to_string(), symbol.into()))
            .collect();
        println!("{}", serde_json::Value::Object(object));
    } else {
        for (name, symbol) in rows {
            println!("{symbol:<8} {name}");
        }
    }
    Ok(())
}

async fn show(client: &QuoteClient, symbol: &str, logo_output: Option<&Path>, json: bool) -> Result<()> {
    let (quote, logo) = client.get_quote_with_logo(symbol).await;
    let quote = quote.map_err(|e| failure(&format!("quote for {symbol}"), e))?;
    if json {
        println!("{}", serde_json::to_string(&quote)?);
    } else {
        println!("{}", render::quote_line(&quote));
    }

    match (logo, logo_output) {
        (Ok(logo), Some(path)) => save_logo(&logo, path).await?,
        (Ok(logo), None) => info!(bytes = logo.bytes.len(), "logo fetched, not saved"),
        (Err(err), _) => eprintln!("{}", failure(&format!("logo for {symbol}"), err)),
    }
    Ok(())
}

async fn save_logo(logo: &LogoImage, path: &Path) -> Result<()> {
    tokio::fs::write(path, &logo.bytes)
        .await
        .with_context(|| format!("could not write {}", path.display()))?;
    println!(
        "saved {} bytes ({}) to {}",
        logo.bytes.len(),
        logo.content_type.as_deref().unwrap_or("unknown type"),
        path.display()
    );
    Ok(())
}
