//! Data models for collected articles and their AI ratings.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`ArticleRecord`]: search-hit metadata as returned by the news API
//! - [`ExtractedArticle`]: main article text pulled from a fetched page
//! - [`RatingAnalysis`]: the JSON document produced by the `fabric` CLI
//! - [`RatedArticle`]: an [`ArticleRecord`] joined with its analysis
//!
//! [`RatingAnalysis`] field names mirror the kebab-case keys of the
//! `label_and_rate` output, hence the `#[serde(rename = ...)]` attributes.

use serde::{Deserialize, Serialize};

/// One search hit from the news API.
///
/// Created by the search client, immutable once collected. Each record
/// becomes exactly one row in the raw-results file.
///
/// # Fields
///
/// * `date` - Publication date (`YYYY-MM-DD`), falling back to the run date
/// * `keyword` - The search term that matched this article
/// * `title` - The article headline
/// * `description` - The short description returned by the API
/// * `url` - Link to the full article
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ArticleRecord {
    /// Publication date in `YYYY-MM-DD` format.
    pub date: String,
    /// The keyword that produced this hit.
    pub keyword: String,
    /// The article headline.
    pub title: String,
    /// Short description from the API response.
    pub description: String,
    /// The article URL.
    pub url: String,
}

impl ArticleRecord {
    /// Whether every field carries a value. Records with missing fields are
    /// dropped rather than written as ragged rows.
    pub fn is_complete(&self) -> bool {
        !self.date.is_empty()
            && !self.keyword.is_empty()
            && !self.title.is_empty()
            && !self.description.is_empty()
            && !self.url.is_empty()
    }
}

/// Main article text extracted from a fetched page, before AI analysis.
#[derive(Debug)]
pub struct ExtractedArticle {
    /// The source URL of the article.
    pub url: String,
    /// The page headline (from `og:title` or `<title>`).
    pub title: String,
    /// The extracted main content.
    pub text: String,
}

/// A label field that the AI tool may emit either as one comma-separated
/// string or as a JSON array.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum LabelSet {
    /// A single pre-joined label string.
    One(String),
    /// A list of individual labels.
    Many(Vec<String>),
}

impl LabelSet {
    /// Render the labels as one comma-separated cell value.
    pub fn joined(&self) -> String {
        match self {
            LabelSet::One(s) => s.clone(),
            LabelSet::Many(v) => v.join(", "),
        }
    }
}

impl Default for LabelSet {
    fn default() -> Self {
        LabelSet::One(String::new())
    }
}

/// A quality score that the AI tool may emit as a bare number or a string.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum QualityScore {
    /// Numeric score, the usual case.
    Number(u64),
    /// Score wrapped in a string.
    Text(String),
}

impl QualityScore {
    /// Render the score as a cell value.
    pub fn as_cell(&self) -> String {
        match self {
            QualityScore::Number(n) => n.to_string(),
            QualityScore::Text(s) => s.clone(),
        }
    }
}

/// The analysis document produced by `fabric -p label_and_rate`.
///
/// All fields default when absent so a sparse response still parses; rows
/// for such articles simply carry empty cells.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RatingAnalysis {
    /// One-sentence summary of the article.
    #[serde(rename = "one-sentence-summary", default)]
    pub one_sentence_summary: String,
    /// Topic labels assigned by the tool.
    #[serde(default)]
    pub labels: LabelSet,
    /// Tier rating (e.g. "S Tier", "A Tier") indicating importance.
    #[serde(default)]
    pub rating: String,
    /// Bullet points explaining the tier rating.
    #[serde(rename = "rating-explanation", default)]
    pub rating_explanation: Vec<String>,
    /// Numeric content-quality score.
    #[serde(rename = "quality-score", default)]
    pub quality_score: Option<QualityScore>,
    /// Bullet points explaining the quality score.
    #[serde(rename = "quality-score-explanation", default)]
    pub quality_score_explanation: Vec<String>,
}

/// An article record joined with its AI analysis. One of these becomes one
/// row in the rated-results file.
#[derive(Debug, Clone)]
pub struct RatedArticle {
    /// The original search-hit metadata.
    pub record: ArticleRecord,
    /// The analysis returned by the AI tool.
    pub analysis: RatingAnalysis,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ArticleRecord {
        ArticleRecord {
            date: "2026-08-06".to_string(),
            keyword: "third party risk".to_string(),
            title: "Vendor Breach Disclosed".to_string(),
            description: "A major vendor disclosed a breach.".to_string(),
            url: "https://example.com/breach".to_string(),
        }
    }

    #[test]
    fn test_record_is_complete() {
        assert!(record().is_complete());

        let mut missing = record();
        missing.description = String::new();
        assert!(!missing.is_complete());
    }

    #[test]
    fn test_record_serialization_field_order() {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(record()).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("date,keyword,title,description,url"));
        assert!(lines.next().unwrap().starts_with("2026-08-06,third party risk,"));
    }

    #[test]
    fn test_rating_analysis_full_document() {
        let json = r#"{
            "one-sentence-summary": "A vendor breach exposes customer data.",
            "labels": "security, third-party, breach",
            "rating": "A Tier",
            "rating-explanation": ["Direct GRC impact", "Named vendor"],
            "quality-score": 87,
            "quality-score-explanation": ["Primary sourcing"]
        }"#;

        let analysis: RatingAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.rating, "A Tier");
        assert_eq!(analysis.labels.joined(), "security, third-party, breach");
        assert_eq!(analysis.rating_explanation.len(), 2);
        assert_eq!(analysis.quality_score.unwrap(), QualityScore::Number(87));
    }

    #[test]
    fn test_rating_analysis_labels_as_array() {
        let json = r#"{
            "one-sentence-summary": "Summary.",
            "labels": ["security", "privacy"],
            "rating": "B Tier"
        }"#;

        let analysis: RatingAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.labels.joined(), "security, privacy");
        assert!(analysis.rating_explanation.is_empty());
        assert!(analysis.quality_score.is_none());
    }

    #[test]
    fn test_rating_analysis_quality_score_as_string() {
        let json = r#"{"rating": "C Tier", "quality-score": "62"}"#;
        let analysis: RatingAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.quality_score.unwrap().as_cell(), "62");
    }

    #[test]
    fn test_rating_analysis_empty_document_defaults() {
        let analysis: RatingAnalysis = serde_json::from_str("{}").unwrap();
        assert!(analysis.one_sentence_summary.is_empty());
        assert!(analysis.rating.is_empty());
        assert_eq!(analysis.labels.joined(), "");
    }
}
