//! AI rating via the external `fabric` CLI.
//!
//! Extracted article text is formatted into a fixed prompt block, copied to
//! the system clipboard, then piped into `fabric -p label_and_rate` through
//! the platform paste utility. Fabric writes its JSON analysis to a temp
//! file, which is parsed into [`RatingAnalysis`].
//!
//! Invocations run under a timeout; a failed or timed-out run is an
//! item-level error and the caller skips the article.

use std::error::Error;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument, warn};

use crate::clipboard::ClipboardBridge;
use crate::models::{ExtractedArticle, RatingAnalysis};
use crate::utils::truncate_for_log;

/// Body text beyond this many bytes is trimmed from the prompt.
const MAX_PROMPT_BODY: usize = 12_000;

// CLI LLM tools often wrap their JSON in a Markdown code fence.
static FENCED_JSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json)?\s*(\{.*\})\s*```").unwrap());

/// Runs the `fabric` analysis pipeline for one article at a time.
pub struct FabricInvoker {
    clipboard: ClipboardBridge,
    pattern: String,
    timeout: Duration,
}

impl FabricInvoker {
    pub fn new(clipboard: ClipboardBridge, pattern: String, timeout: Duration) -> Self {
        Self {
            clipboard,
            pattern,
            timeout,
        }
    }

    /// Shuttle the formatted article through the clipboard into `fabric`
    /// and parse the resulting analysis document.
    #[instrument(level = "info", skip_all, fields(url = %article.url))]
    pub async fn rate(&self, article: &ExtractedArticle) -> Result<RatingAnalysis, Box<dyn Error>> {
        let prompt = format_for_analysis(article);
        self.clipboard.copy(&prompt).await?;

        // Fabric writes its output to a file we hold open until parsed.
        let output_file = tempfile::NamedTempFile::new()?;
        let output_path = output_file.path().to_string_lossy().into_owned();

        let pipeline = format!(
            "{} | fabric -p {} -o \"{}\"",
            self.clipboard.paste_pipeline(),
            self.pattern,
            output_path
        );
        debug!(pattern = %self.pattern, "Running fabric pipeline");

        let (shell, flag) = shell_command();
        let result = tokio::time::timeout(
            self.timeout,
            tokio::process::Command::new(shell)
                .arg(flag)
                .arg(&pipeline)
                .output(),
        )
        .await;

        let output = match result {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(format!("failed to run fabric: {e}").into()),
            Err(_) => {
                return Err(
                    format!("fabric timed out after {}s", self.timeout.as_secs()).into(),
                );
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("fabric exited with {}: {}", output.status, stderr.trim()).into());
        }

        let raw = tokio::fs::read_to_string(output_file.path()).await?;
        match parse_rating(&raw) {
            Ok(analysis) => Ok(analysis),
            Err(e) => {
                warn!(
                    error = %e,
                    response_preview = %truncate_for_log(&raw, 300),
                    "Fabric returned non-conforming JSON"
                );
                Err(e.into())
            }
        }
    }
}

/// Format an extracted article into the fixed analysis prompt block.
///
/// The body is capped so one giant page does not blow up the prompt.
pub fn format_for_analysis(article: &ExtractedArticle) -> String {
    let mut body = article.text.as_str();
    if body.len() > MAX_PROMPT_BODY {
        let mut cut = MAX_PROMPT_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body = &body[..cut];
    }

    format!("Title: {}\nURL: {}\n\n{}\n", article.title, article.url, body)
}

/// Parse fabric's output, tolerating a Markdown code fence around the JSON.
pub fn parse_rating(raw: &str) -> Result<RatingAnalysis, serde_json::Error> {
    let trimmed = raw.trim();
    if let Some(caps) = FENCED_JSON.captures(trimmed) {
        return serde_json::from_str(&caps[1]);
    }
    serde_json::from_str(trimmed)
}

fn shell_command() -> (&'static str, &'static str) {
    if cfg!(target_os = "windows") {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    }
}
