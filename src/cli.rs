//! Command-line interface definitions for the GRC News Assistant.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The NewsData.io API key is usually supplied via the environment.

use clap::Parser;

/// Command-line arguments for the GRC News Assistant.
///
/// Defaults reproduce the conventional file layout: keywords in
/// `keywords.csv` next to the binary, outputs written to the working
/// directory.
///
/// # Examples
///
/// ```sh
/// # Basic usage with the default file layout
/// grc_news_assistant
///
/// # Custom keyword file and a wider result cap
/// grc_news_assistant -k ./watchlist.csv --max-results 200
///
/// # API key via flag instead of the environment
/// grc_news_assistant --api-key YOUR_KEY
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Keyword file, one search term per row (percent-encoding allowed)
    #[arg(short, long, default_value = "keywords.csv")]
    pub keywords: String,

    /// Raw-results CSV file (appended across runs)
    #[arg(long, default_value = "grcdata.csv")]
    pub raw_output: String,

    /// URL-list file (overwritten each run)
    #[arg(long, default_value = "urls.csv")]
    pub urls_output: String,

    /// Rated-results CSV file (overwritten each run)
    #[arg(long, default_value = "grcdata_rated.csv")]
    pub rated_output: String,

    /// NewsData.io API key
    #[arg(long, env = "NEWSDATA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Search language code
    #[arg(long, default_value = "en")]
    pub language: String,

    /// Search category
    #[arg(long, default_value = "technology")]
    pub category: String,

    /// Per-keyword result cap across pagination
    #[arg(long, default_value_t = 100)]
    pub max_results: usize,

    /// Fabric analysis pattern
    #[arg(long, default_value = "label_and_rate")]
    pub pattern: String,

    /// Timeout in seconds for one fabric invocation
    #[arg(long, default_value_t = 15)]
    pub fabric_timeout: u64,
}
