//! Article fetching and main-content extraction.
//!
//! Each collected URL is fetched over HTTP and run through a Readability
//! transform to isolate the main article text from navigation, ads, and
//! boilerplate. The page headline is pulled out separately so the analysis
//! prompt can lead with it.

use std::error::Error;
use std::time::Duration;

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use spider_transformations::transformation::content::{
    transform_content_input, ReturnFormat, TransformConfig, TransformInput,
};
use tracing::{info, instrument};

use crate::models::ExtractedArticle;

const FETCH_TIMEOUT: Duration = Duration::from_secs(20);
// Some outlets reject the default reqwest User-Agent outright.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; grc-news-assistant/0.1)";

static OG_TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:title"]"#).unwrap());
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());

/// HTTP client used for article fetching.
pub fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Fetch a page and extract its headline and main article text.
///
/// # Errors
///
/// Fails on non-http(s) URLs, fetch errors, non-2xx responses, and pages
/// where Readability extraction yields no content. Callers log the failure
/// and skip the URL.
#[instrument(level = "info", skip(client))]
pub async fn fetch_and_extract(
    client: &reqwest::Client,
    url: &str,
) -> Result<ExtractedArticle, Box<dyn Error>> {
    let parsed = url::Url::parse(url)?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(format!("only http/https URLs are allowed, got: {}", parsed.scheme()).into());
    }

    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(format!("fetch returned status {status}").into());
    }
    let html = resp.text().await?;

    let title = page_title(&html).unwrap_or_else(|| "Not Found".to_string());
    let text = readability_text(&html, Some(&parsed));
    if text.trim().is_empty() {
        return Err("empty content after readability extraction".into());
    }

    info!(url, bytes = text.len(), "Extracted article content");
    Ok(ExtractedArticle {
        url: url.to_string(),
        title,
        text,
    })
}

/// Pull the headline out of raw HTML: `og:title` first, `<title>` second.
fn page_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    if let Some(meta) = document.select(&OG_TITLE_SELECTOR).next() {
        if let Some(content) = meta.value().attr("content") {
            let content = content.trim();
            if !content.is_empty() {
                return Some(content.to_string());
            }
        }
    }

    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|t| t.text().collect::<Vec<_>>().join(" ").trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Readability extraction of the main content, returned as Markdown.
fn readability_text(html: &str, url: Option<&url::Url>) -> String {
    let config = TransformConfig {
        readability: true,
        main_content: true,
        return_format: ReturnFormat::Markdown,
        filter_images: true,
        filter_svg: true,
        clean_html: true,
    };
    let input = TransformInput {
        url,
        content: html.as_bytes(),
        screenshot_bytes: None,
        encoding: None,
        selector_config: None,
        ignore_tags: None,
    };

    transform_content_input(input, &config)
}
