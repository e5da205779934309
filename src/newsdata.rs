//! NewsData.io search client.
//!
//! Issues one query per keyword against the NewsData.io `latest news`
//! endpoint and follows the response's `nextPage` cursor until the result
//! set is exhausted or a per-keyword cap is reached. Hits are mapped into
//! [`ArticleRecord`]s; hits missing a title, link, or description are
//! dropped.
//!
//! The API reports failures in-band: a 200 response whose envelope carries
//! `"status": "error"` and a message object in `results`. Both transport
//! failures and in-band failures surface as [`NewsDataError`].

use std::fmt::Write as _;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::ArticleRecord;
use crate::utils::today_string;

const BASE_URL: &str = "https://newsdata.io/api/1/news";
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Guidance printed when no API key is configured.
pub const API_KEY_HELP: &str = "\
NewsData.io API key not found!

Set it as an environment variable before running:

    export NEWSDATA_API_KEY='your_api_key_here'     # macOS/Linux
    set NEWSDATA_API_KEY=your_api_key_here          # Windows (cmd)
    $env:NEWSDATA_API_KEY='your_api_key_here'       # Windows (PowerShell)

Add the export to your shell startup file to make it permanent.";

pub type Result<T> = std::result::Result<T, NewsDataError>;

/// Failures surfaced by the search client.
#[derive(Debug, Error)]
pub enum NewsDataError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One page of search results.
#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    results: Vec<SearchHit>,
    #[serde(rename = "nextPage", default)]
    next_page: Option<String>,
}

/// A single article hit as returned by the API.
#[derive(Debug, Deserialize)]
struct SearchHit {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

impl SearchHit {
    /// Map a hit onto an [`ArticleRecord`], or `None` if any required field
    /// is missing. `pubDate` arrives as `YYYY-MM-DD HH:MM:SS`; only the date
    /// part is kept, with the run date as fallback.
    fn into_record(self, keyword: &str) -> Option<ArticleRecord> {
        let title = self.title.filter(|t| !t.is_empty())?;
        let url = self.link.filter(|l| !l.is_empty())?;
        let description = self.description.filter(|d| !d.is_empty())?;
        let date = self
            .pub_date
            .as_deref()
            .and_then(|d| d.split_whitespace().next())
            .map(str::to_string)
            .unwrap_or_else(today_string);

        Some(ArticleRecord {
            date,
            keyword: keyword.to_string(),
            title,
            description,
            url,
        })
    }
}

/// Client for the NewsData.io news-search API.
pub struct NewsDataClient {
    client: reqwest::Client,
    api_key: String,
    language: String,
    category: String,
}

impl NewsDataClient {
    pub fn new(api_key: String, language: String, category: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!("grc_news_assistant/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            api_key,
            language,
            category,
        }
    }

    /// Collect up to `max_results` records for one keyword, following the
    /// pagination cursor until the API stops returning one.
    #[instrument(level = "info", skip(self))]
    pub async fn search(&self, keyword: &str, max_results: usize) -> Result<Vec<ArticleRecord>> {
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self.fetch_page(keyword, cursor.as_deref()).await?;
            let page_hits = page.results.len();

            for hit in page.results {
                if records.len() >= max_results {
                    break;
                }
                match hit.into_record(keyword) {
                    Some(record) => records.push(record),
                    None => warn!(keyword, "Dropping hit with missing fields"),
                }
            }

            debug!(
                keyword,
                page_hits,
                collected = records.len(),
                has_next = page.next_page.is_some(),
                "Fetched search page"
            );

            match page.next_page {
                Some(next) if records.len() < max_results => cursor = Some(next),
                _ => break,
            }
        }

        Ok(records)
    }

    async fn fetch_page(&self, keyword: &str, cursor: Option<&str>) -> Result<SearchPage> {
        // The key rides in the query string; never log the full URL.
        let api_url = self.build_url(keyword, cursor);
        let resp = self.client.get(&api_url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NewsDataError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: serde_json::Value = resp.json().await?;
        parse_envelope(body, status.as_u16())
    }

    fn build_url(&self, keyword: &str, cursor: Option<&str>) -> String {
        let mut api_url = format!(
            "{BASE_URL}?apikey={}&q={}&language={}&category={}",
            self.api_key,
            urlencoding::encode(keyword),
            self.language,
            self.category
        );
        if let Some(cursor) = cursor {
            let _ = write!(api_url, "&page={cursor}");
        }
        api_url
    }
}

/// Check the `status` field of a response envelope and decode the page.
fn parse_envelope(body: serde_json::Value, http_status: u16) -> Result<SearchPage> {
    if body["status"] != "success" {
        let message = body["results"]["message"]
            .as_str()
            .unwrap_or("no error message")
            .to_string();
        return Err(NewsDataError::Api {
            status: http_status,
            message,
        });
    }
    Ok(serde_json::from_value(body)?)
}
