//! Rated-results CSV writer.
//!
//! The final output of a run: article metadata joined with the AI analysis,
//! one row per successfully processed URL. Overwritten each run. URLs whose
//! extraction or analysis failed are absent by construction — only fully
//! rated articles reach this writer.

use std::error::Error;

use tracing::{info, instrument};

use crate::models::RatedArticle;

/// Column headers for the rated-results file.
pub const RATED_HEADER: [&str; 11] = [
    "date",
    "keyword",
    "title",
    "description",
    "url",
    "one-sentence-summary",
    "labels",
    "rating",
    "rating-explanation",
    "quality-score",
    "quality-score-explanation",
];

/// Overwrite the rated-results file with a header row plus one row per
/// rated article.
#[instrument(level = "info", skip_all, fields(path = %path, rows = rated.len()))]
pub fn write_rated(path: &str, rated: &[RatedArticle]) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(RATED_HEADER)?;

    for article in rated {
        writer.write_record(rated_row(article))?;
    }
    writer.flush()?;

    info!(path, rows = rated.len(), "Wrote rated results");
    Ok(())
}

fn rated_row(article: &RatedArticle) -> [String; 11] {
    let record = &article.record;
    let analysis = &article.analysis;
    [
        record.date.clone(),
        record.keyword.clone(),
        record.title.clone(),
        record.description.clone(),
        record.url.clone(),
        analysis.one_sentence_summary.clone(),
        analysis.labels.joined(),
        analysis.rating.clone(),
        analysis.rating_explanation.join("; "),
        analysis
            .quality_score
            .as_ref()
            .map(|s| s.as_cell())
            .unwrap_or_default(),
        analysis.quality_score_explanation.join("; "),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleRecord, LabelSet, QualityScore, RatingAnalysis};

    fn rated(url: &str) -> RatedArticle {
        RatedArticle {
            record: ArticleRecord {
                date: "2026-08-06".to_string(),
                keyword: "grc".to_string(),
                title: "Title".to_string(),
                description: "Description".to_string(),
                url: url.to_string(),
            },
            analysis: RatingAnalysis {
                one_sentence_summary: "Summary.".to_string(),
                labels: LabelSet::Many(vec!["security".to_string(), "audit".to_string()]),
                rating: "A Tier".to_string(),
                rating_explanation: vec!["Relevant".to_string(), "Timely".to_string()],
                quality_score: Some(QualityScore::Number(88)),
                quality_score_explanation: vec!["Well sourced".to_string()],
            },
        }
    }

    #[test]
    fn test_row_shape_and_joins() {
        let row = rated_row(&rated("https://a.example"));
        assert_eq!(row.len(), RATED_HEADER.len());
        assert_eq!(row[6], "security, audit");
        assert_eq!(row[7], "A Tier");
        assert_eq!(row[8], "Relevant; Timely");
        assert_eq!(row[9], "88");
    }

    #[test]
    fn test_one_row_per_rated_article() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grcdata_rated.csv");
        let path = path.to_str().unwrap();

        let articles = vec![rated("https://a.example"), rated("https://b.example")];
        write_rated(path, &articles).unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], RATED_HEADER.join(","));
    }

    #[test]
    fn test_empty_run_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grcdata_rated.csv");
        let path = path.to_str().unwrap();

        write_rated(path, &[]).unwrap();
        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }
}
