//! Batch prediction over a CSV of articles
//!
//! Rows carry `title`, `abstract` and optionally `group` (the expected
//! domains) plus the bibliographic columns `journal`, `authors`,
//! `institution`, `year` and `doi`. Unknown columns are ignored.

use crate::batch::DomainCount;
use crate::export::{into_bytes, into_string};
use crate::PipelineError;
use medclassify_domain::{ClassificationInput, ClassificationResult, Domain, DomainScores, MetadataInput};
use serde::{Deserialize, Serialize};
use std::io;

/// Lowest score a secondary label can have
pub const LABEL_FLOOR: f64 = 0.15;

/// Share of the top score a secondary label must reach
pub const LABEL_RATIO: f64 = 0.3;

/// Simulated seconds per article reported in the batch totals
pub const SECONDS_PER_ARTICLE: f64 = 0.15;

/// Characters of the abstract kept in a prediction
pub const ABSTRACT_PREVIEW_CHARS: usize = 200;

/// One row of an article CSV
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArticleRecord {
    /// Article title
    #[serde(default)]
    pub title: String,
    /// Article abstract
    #[serde(default)]
    pub r#abstract: String,
    /// Expected domains, separated by `,`, `;` or `|`
    #[serde(default)]
    pub group: Option<String>,
    /// Journal name
    #[serde(default)]
    pub journal: String,
    /// Author list
    #[serde(default)]
    pub authors: String,
    /// Institution name
    #[serde(default)]
    pub institution: String,
    /// Publication year
    #[serde(default, alias = "publication_year")]
    pub year: String,
    /// Digital Object Identifier
    #[serde(default)]
    pub doi: String,
}

impl ArticleRecord {
    /// Record with only a title and abstract
    pub fn new(title: impl Into<String>, r#abstract: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            r#abstract: r#abstract.into(),
            ..Self::default()
        }
    }

    /// Attach expected domains
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// True when neither title nor abstract carries text
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.r#abstract.trim().is_empty()
    }

    /// Trimmed title and abstract for the scorer
    pub fn input(&self) -> ClassificationInput {
        ClassificationInput::new(self.title.trim(), self.r#abstract.trim())
    }

    /// Bibliographic columns as reliability metadata
    pub fn metadata(&self) -> MetadataInput {
        MetadataInput {
            journal: self.journal.clone(),
            authors: self.authors.clone(),
            institution: self.institution.clone(),
            publication_year: self.year.clone(),
            doi: self.doi.clone(),
        }
    }

    /// Recognised expected domains, `None` when the row has none
    pub fn labels(&self) -> Option<Vec<Domain>> {
        let labels = parse_labels(self.group.as_deref()?);
        (!labels.is_empty()).then_some(labels)
    }
}

/// Parse a `group` cell into domains, dropping unknown names and repeats
pub fn parse_labels(group: &str) -> Vec<Domain> {
    let mut labels = Vec::new();
    for domain in group.split([',', ';', '|']).filter_map(Domain::parse) {
        if !labels.contains(&domain) {
            labels.push(domain);
        }
    }
    labels
}

/// Read every row of an article CSV
///
/// Headers are trimmed. A file with neither a `title` nor an `abstract`
/// column is rejected before any row is read.
pub fn read_articles<R: io::Read>(reader: R) -> Result<Vec<ArticleRecord>, PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = reader.headers()?;
    if !headers.iter().any(|h| h == "title" || h == "abstract") {
        return Err(PipelineError::MissingColumns);
    }

    let records = reader.deserialize().collect::<Result<Vec<ArticleRecord>, _>>()?;
    Ok(records)
}

/// Domains reported for one article
///
/// Every domain scoring at least `max(0.15, 0.3 * top)` is a label. When
/// none does, the first top-scoring domain is the only label.
pub fn predicted_labels(scores: &DomainScores) -> Vec<Domain> {
    let ranked = scores.ranked();
    let (first, top) = ranked[0];
    let threshold = LABEL_FLOOR.max(top * LABEL_RATIO);

    let labels: Vec<Domain> = scores
        .entries()
        .iter()
        .filter(|(_, score)| *score >= threshold)
        .map(|(domain, _)| *domain)
        .collect();
    if labels.is_empty() {
        vec![first]
    } else {
        labels
    }
}

/// Classification of one CSV row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePrediction {
    /// One-based row number in the input file
    pub id: usize,
    /// Article title
    pub title: String,
    /// Abstract cut to 200 characters
    pub abstract_preview: String,
    /// Predicted domains in declaration order
    pub labels: Vec<Domain>,
    /// Scores, confidence and reliability
    pub result: ClassificationResult,
    /// Expected domains from the `group` column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<Vec<Domain>>,
}

impl ArticlePrediction {
    /// Build the prediction for row `id`
    pub fn new(id: usize, record: &ArticleRecord, result: ClassificationResult) -> Self {
        Self {
            id,
            title: record.title.trim().to_string(),
            abstract_preview: preview(record.r#abstract.trim()),
            labels: predicted_labels(&result.scores),
            expected: record.labels(),
            result,
        }
    }
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(ABSTRACT_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Totals over a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    /// Articles classified
    pub total_processed: usize,
    /// Rows without a title or abstract
    pub skipped: usize,
    /// Predicted label counts per domain, declaration order
    pub domain_distribution: Vec<DomainCount>,
    /// Articles with more than one label
    pub multi_label: usize,
    /// Mean confidence, rounded to three places
    pub average_confidence: f64,
    /// Simulated processing time
    pub processing_time: String,
}

impl BatchStats {
    /// Totals for `predictions`, with `skipped` blank rows
    pub fn new(predictions: &[ArticlePrediction], skipped: usize) -> Self {
        let total = predictions.len();
        let domain_distribution = Domain::ALL
            .iter()
            .map(|&domain| DomainCount {
                domain,
                articles: predictions.iter().filter(|p| p.labels.contains(&domain)).count() as u32,
            })
            .collect();
        let confidence: f64 = predictions.iter().map(|p| p.result.confidence).sum();
        let average_confidence = if total == 0 {
            0.0
        } else {
            (confidence / total as f64 * 1000.0).round() / 1000.0
        };

        Self {
            total_processed: total,
            skipped,
            domain_distribution,
            multi_label: predictions.iter().filter(|p| p.labels.len() > 1).count(),
            average_confidence,
            processing_time: format!("{:.2}s", total as f64 * SECONDS_PER_ARTICLE),
        }
    }

    /// Share of multi-label articles in [0, 1]
    pub fn multi_label_ratio(&self) -> f64 {
        if self.total_processed == 0 {
            0.0
        } else {
            self.multi_label as f64 / self.total_processed as f64
        }
    }
}

/// Every prediction of a batch with its totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchPrediction {
    /// Per-row predictions in file order
    pub predictions: Vec<ArticlePrediction>,
    /// Batch totals
    pub stats: BatchStats,
}

/// Predictions as CSV: labels joined with `;` and one `prob_<domain>` column each
pub fn predictions_csv(batch: &BatchPrediction) -> Result<String, PipelineError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut header = vec!["id".to_string(), "title".to_string(), "group".to_string()];
    header.push("predicted_labels".to_string());
    header.extend(Domain::ALL.iter().map(|d| format!("prob_{}", d.key())));
    header.extend(["confidence", "reliability"].map(String::from));
    writer.write_record(&header)?;

    for prediction in &batch.predictions {
        let expected = prediction
            .expected
            .as_deref()
            .map(join_labels)
            .unwrap_or_default();
        let mut row = vec![
            prediction.id.to_string(),
            prediction.title.clone(),
            expected,
            join_labels(&prediction.labels),
        ];
        row.extend(
            prediction
                .result
                .scores
                .entries()
                .iter()
                .map(|(_, score)| format!("{:.3}", score)),
        );
        row.push(format!("{:.3}", prediction.result.confidence));
        row.push(prediction.result.reliability.level.to_string());
        writer.write_record(&row)?;
    }
    into_string(into_bytes(writer)?)
}

fn join_labels(labels: &[Domain]) -> String {
    labels.iter().map(|d| d.key()).collect::<Vec<_>>().join(";")
}
