//! URL-list writer.

use std::error::Error;

use itertools::Itertools;
use tracing::{info, instrument};

use crate::models::ArticleRecord;

/// Overwrite the URL-list file with one URL per row, deduplicated in
/// first-seen order. Returns the number of URLs written.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub fn write_url_list(path: &str, records: &[ArticleRecord]) -> Result<usize, Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut written = 0usize;
    for url in records
        .iter()
        .map(|r| r.url.as_str())
        .filter(|u| !u.is_empty())
        .unique()
    {
        writer.write_record([url])?;
        written += 1;
    }
    writer.flush()?;

    info!(path, written, "Wrote URL list");
    Ok(written)
}
