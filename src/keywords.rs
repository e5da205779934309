//! Keyword-file loading.
//!
//! Search terms live in a user-edited single-column CSV file, one term per
//! row. Terms may be stored percent-encoded (handy for terms containing
//! commas or quotes); each is decoded and trimmed on load.

use std::error::Error;

use tracing::{info, instrument};

/// Read and decode the search terms driving the news query.
///
/// Blank rows are skipped. A missing or unreadable file is an error; an
/// empty result is valid here and rejected by the caller, which aborts the
/// run before any output file is touched.
#[instrument(level = "info")]
pub fn load_keywords(path: &str) -> Result<Vec<String>, Box<dyn Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut keywords = Vec::new();
    for row in reader.records() {
        let row = row?;
        let Some(raw) = row.get(0) else { continue };
        let decoded = urlencoding::decode(raw)?;
        let term = decoded.trim();
        if !term.is_empty() {
            keywords.push(term.to_string());
        }
    }

    info!(count = keywords.len(), path, "Loaded keywords");
    Ok(keywords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_load_keywords_decodes_and_trims() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "cyber%20insurance").unwrap();
        writeln!(file, "  SOC 2 compliance  ").unwrap();
        writeln!(file, "vendor risk").unwrap();

        let keywords = load_keywords(path.to_str().unwrap()).unwrap();
        assert_eq!(
            keywords,
            vec!["cyber insurance", "SOC 2 compliance", "vendor risk"]
        );
    }

    #[test]
    fn test_load_keywords_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.csv");
        std::fs::File::create(&path).unwrap();

        let keywords = load_keywords(path.to_str().unwrap()).unwrap();
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_load_keywords_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_file.csv");
        assert!(load_keywords(path.to_str().unwrap()).is_err());
    }
}
