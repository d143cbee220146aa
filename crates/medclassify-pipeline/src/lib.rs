//! MedClassify Pipeline
//!
//! The simulated classification service that sits between the scoring core
//! and any front end.
//!
//! The pipeline provides:
//! - Input validation and simulated processing delays
//! - One in-flight request per form, with stale results discarded
//! - Canned ingestion of URLs and uploaded files, with step progress
//! - Extractive summaries and report insights
//! - Batch prediction over article CSVs, with multi-label evaluation
//! - CSV, JSON and HTML export
//!
//! # Examples
//!
//! ```no_run
//! use medclassify_pipeline::{ClassificationRequest, Classifier, PipelineConfig};
//!
//! # async fn run() -> Result<(), medclassify_pipeline::PipelineError> {
//! let classifier = Classifier::new(PipelineConfig::default())?;
//! let result = classifier
//!     .classify(ClassificationRequest::new("Coronary stenting", "Outcomes after PCI"))
//!     .await?;
//! println!("{}", result.confidence);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod batch;
mod classifier;
mod config;
mod error;
pub mod evaluation;
pub mod export;
pub mod extraction;
mod guard;
pub mod insights;
pub mod prediction;
mod random;
pub mod summarizer;

pub use batch::{BatchSummary, DomainCount};
pub use classifier::{
    ClassificationRequest, Classifier, ClassifierBuilder, Form, IngestionOutcome, Progress,
};
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use evaluation::{ClassMetrics, EvaluationReport};
pub use export::{ExportDocument, ExportFormat};
pub use extraction::MockExtractor;
pub use guard::{RequestSlot, Ticket};
pub use insights::{Insights, MethodologyAssessment, StudyRecommendation};
pub use prediction::{
    read_articles, ArticlePrediction, ArticleRecord, BatchPrediction, BatchStats,
};
pub use random::{FixedRandom, SeededRandom};
pub use summarizer::SummaryResult;
