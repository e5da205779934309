//! # GRC News Assistant
//!
//! Automates collection and AI-assisted triage of news articles for a
//! governance/risk/compliance audience. Each run queries the NewsData.io
//! search API for a list of user-supplied keywords, records the hits to a
//! raw-results CSV, extracts the main text of every article, and pipes it
//! through the externally-installed `fabric` AI CLI to obtain a label set
//! and tier rating, recorded to a rated-results CSV.
//!
//! ## Usage
//!
//! ```sh
//! export NEWSDATA_API_KEY='your_api_key_here'
//! grc_news_assistant -k keywords.csv
//! ```
//!
//! ## Architecture
//!
//! A single linear pipeline, one invocation per run:
//! 1. **Load**: read search terms from the keyword file
//! 2. **Search**: one paginated API query per keyword
//! 3. **Record**: write the raw-results CSV and the URL list
//! 4. **Extract**: fetch each URL and pull out the main article text
//! 5. **Rate**: pipe the text through `fabric -p label_and_rate`
//! 6. **Record**: write the rated-results CSV
//!
//! Processing is strictly sequential, one request at a time. Item-level
//! failures (one search, one fetch, one rating) are logged and skipped;
//! setup failures (missing API key, keyword file, or clipboard utility)
//! abort the run before any output file is touched.

use std::error::Error;
use std::time::Duration;

use clap::Parser;
use futures::stream::{self, StreamExt};
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod clipboard;
mod extract;
mod keywords;
mod models;
mod newsdata;
mod outputs;
mod rating;
mod utils;

use cli::Cli;
use clipboard::ClipboardBridge;
use models::RatedArticle;
use newsdata::{NewsDataClient, API_KEY_HELP};
use rating::FabricInvoker;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("grc_news_assistant starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.keywords, ?args.raw_output, ?args.rated_output, "Parsed CLI arguments");

    // --- Setup checks: fail before any network call or output write ---
    let Some(api_key) = args.api_key.clone().filter(|k| !k.is_empty()) else {
        error!("{API_KEY_HELP}");
        return Err("NEWSDATA_API_KEY is not set".into());
    };

    let clipboard = match ClipboardBridge::detect().await {
        Ok(bridge) => bridge,
        Err(e) => {
            error!(error = %e, "Clipboard utility unavailable");
            return Err(e);
        }
    };

    let keywords = match keywords::load_keywords(&args.keywords) {
        Ok(keywords) => keywords,
        Err(e) => {
            error!(path = %args.keywords, error = %e, "Failed to read keyword file");
            return Err(e);
        }
    };
    if keywords.is_empty() {
        error!(path = %args.keywords, "No keywords found");
        return Err("keyword file is empty".into());
    }

    // ---- Search, one keyword at a time ----
    let search = NewsDataClient::new(api_key, args.language.clone(), args.category.clone());
    let mut records = Vec::new();
    for keyword in &keywords {
        info!(keyword, "Searching for articles");
        match search.search(keyword, args.max_results).await {
            Ok(hits) if hits.is_empty() => warn!(keyword, "No articles found"),
            Ok(hits) => {
                info!(keyword, count = hits.len(), "Collected articles");
                records.extend(hits);
            }
            Err(e) => error!(keyword, error = %e, "Search failed; skipping keyword"),
        }
    }
    if records.is_empty() {
        error!("No articles found for any keyword");
        return Err("no articles found".into());
    }

    // ---- Raw outputs ----
    let rows = outputs::raw::append_records(&args.raw_output, &records)?;
    let url_count = outputs::urls::write_url_list(&args.urls_output, &records)?;
    info!(rows, urls = url_count, "Saved search results");

    // ---- Extract and rate, one URL at a time ----
    let http = extract::build_client();
    let invoker = FabricInvoker::new(
        clipboard,
        args.pattern.clone(),
        Duration::from_secs(args.fabric_timeout),
    );

    let total = records.len();
    info!(total, "Processing articles for AI analysis");

    let rated: Vec<RatedArticle> = stream::iter(records)
        .then(|record| {
            let http = &http;
            let invoker = &invoker;
            async move {
                info!(url = %record.url, "Processing article");

                let extracted = match extract::fetch_and_extract(http, &record.url).await {
                    Ok(extracted) => extracted,
                    Err(e) => {
                        error!(url = %record.url, error = %e, "Extraction failed; skipping URL");
                        return None;
                    }
                };

                match invoker.rate(&extracted).await {
                    Ok(analysis) => Some(RatedArticle { record, analysis }),
                    Err(e) => {
                        error!(url = %record.url, error = %e, "AI analysis failed; skipping URL");
                        None
                    }
                }
            }
        })
        .filter_map(std::future::ready)
        .collect()
        .await;

    let rated_count = rated.len();
    let failed = total - rated_count;
    info!(total, rated = rated_count, failed, "Completed article triage");

    outputs::rated::write_rated(&args.rated_output, &rated)?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
