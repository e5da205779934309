//! Raw-results CSV writer.
//!
//! Appends one row per collected article so repeated runs accumulate into a
//! single file. The header row is written only when the file is first
//! created.

use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::models::ArticleRecord;

/// Column headers for the raw-results file.
pub const RAW_HEADER: [&str; 5] = ["date", "keyword", "title", "description", "url"];

/// Append one row per complete record. Returns the number of rows written.
///
/// Records with any empty field are skipped rather than written as ragged
/// rows.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub fn append_records(path: &str, records: &[ArticleRecord]) -> Result<usize, Box<dyn Error>> {
    let new_file = !Path::new(path).exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if new_file {
        writer.write_record(RAW_HEADER)?;
    }

    let mut written = 0usize;
    for record in records {
        if !record.is_complete() {
            warn!(url = %record.url, "Skipping record with empty fields");
            continue;
        }
        writer.serialize(record)?;
        written += 1;
    }
    writer.flush()?;

    info!(path, written, "Wrote raw results");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str) -> ArticleRecord {
        ArticleRecord {
            date: "2026-08-06".to_string(),
            keyword: "grc".to_string(),
            title: "Title".to_string(),
            description: "Description".to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_header_written_once_across_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grcdata.csv");
        let path = path.to_str().unwrap();

        append_records(path, &[record("https://a.example")]).unwrap();
        append_records(path, &[record("https://b.example")]).unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "date,keyword,title,description,url");
        assert!(lines[1].ends_with("https://a.example"));
        assert!(lines[2].ends_with("https://b.example"));
    }

    #[test]
    fn test_one_row_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grcdata.csv");
        let path = path.to_str().unwrap();

        let records: Vec<ArticleRecord> = (0..5)
            .map(|i| record(&format!("https://example.com/{i}")))
            .collect();
        let written = append_records(path, &records).unwrap();
        assert_eq!(written, 5);

        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(contents.lines().count(), 6);
    }

    #[test]
    fn test_incomplete_record_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grcdata.csv");
        let path = path.to_str().unwrap();

        let mut incomplete = record("https://a.example");
        incomplete.title = String::new();
        let written = append_records(path, &[incomplete, record("https://b.example")]).unwrap();

        assert_eq!(written, 1);
        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
