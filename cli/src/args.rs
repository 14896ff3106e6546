//! Command-line arguments for `stocks`.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use stocks_core::config::{BASE_URL_ENV, DEFAULT_BASE_URL, TOKEN_ENV};
use stocks_core::{ClientConfig, ConfigError};

/// Look up stock quotes, company symbols and logos from IEX Cloud.
#[derive(Debug, Parser)]
#[command(name = "stocks", version)]
pub struct Args {
    /// API access token
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    pub token: String,

    /// Base URL of the quote service
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Transport timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Current quote for one or more symbols, fetched concurrently
    Quote {
        #[arg(required = true)]
        symbols: Vec<String>,
    },
    /// List tradable companies, optionally filtered by name
    Companies {
        /// Case-insensitive substring of the company name
        #[arg(long)]
        filter: Option<String>,
    },
    /// Download a company logo
    Logo {
        symbol: String,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Quote and logo for one symbol, fetched concurrently
    Show {
        symbol: String,
        /// Where to save the logo; skipped when absent
        #[arg(long)]
        logo_output: Option<PathBuf>,
    },
}

impl Args {
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        Ok(ClientConfig::new(self.token.as_str())?
            .with_base_url(&self.base_url)?
            .with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}
