//! Error types for the pipeline

use medclassify_reliability::ReliabilityError;
use medclassify_scorer::ScorerError;
use thiserror::Error;

/// Errors that can occur while running a request through the pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Classification request without a title
    #[error("Title is required")]
    TitleRequired,

    /// Classification request without an abstract
    #[error("Abstract is required")]
    AbstractRequired,

    /// Summary request without text
    #[error("Text to summarize is required")]
    TextRequired,

    /// URL request without a URL
    #[error("URL is required")]
    UrlRequired,

    /// File with an extension the ingestion layer does not accept
    #[error("Unsupported file '{0}' (expected .csv, .pdf, .txt or .docx)")]
    UnsupportedFile(String),

    /// The form already has a request in flight
    #[error("A {0} request is already in progress")]
    Busy(&'static str),

    /// A newer request or a cancellation superseded this one
    #[error("Request {0} was superseded and its result discarded")]
    Stale(uuid::Uuid),

    /// Scorer construction error
    #[error("Scorer error: {0}")]
    Scorer(#[from] ScorerError),

    /// Reliability configuration error
    #[error("Reliability error: {0}")]
    Reliability(#[from] ReliabilityError),

    /// Invalid URL pattern
    #[error("Invalid URL pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Article CSV with neither a `title` nor an `abstract` column
    #[error("Article CSV needs a 'title' or 'abstract' column")]
    MissingColumns,

    /// Batch without a single row carrying a title or abstract
    #[error("No articles with a title or abstract to classify")]
    NoArticles,

    /// Evaluation data without a single recognised `group` label
    #[error("No articles carry a recognised 'group' label")]
    NoLabels,

    /// Export rendering error
    #[error("Export error: {0}")]
    Export(String),

    /// CSV read or write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<minijinja::Error> for PipelineError {
    fn from(e: minijinja::Error) -> Self {
        PipelineError::Export(e.to_string())
    }
}
