//! The classification service
//!
//! Wraps the scorer, aggregator and assessor behind simulated latency. Each
//! form (classification, summary, ingestion) allows one request in flight.

use crate::extraction::{validate_source, FILE_STEPS, URL_STEPS};
use crate::evaluation::EvaluationReport;
use crate::guard::RequestSlot;
use crate::prediction::{ArticlePrediction, ArticleRecord, BatchPrediction, BatchStats};
use crate::summarizer::{self, SummaryResult, DIRECT_TEXT_SOURCE};
use crate::{BatchSummary, MockExtractor, PipelineConfig, PipelineError, SeededRandom};
use medclassify_domain::{
    ClassificationInput, ClassificationResult, ContentExtractor, ExtractedContent, MetadataInput,
    RandomSource, Source,
};
use medclassify_reliability::{ReliabilityAssessor, ReliabilityConfig};
use medclassify_scorer::{ConfidenceAggregator, DomainScorer, Lexicon};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

/// Title, abstract and optional metadata for one classification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    /// Article text
    #[serde(flatten)]
    pub input: ClassificationInput,
    /// Bibliographic metadata
    #[serde(default)]
    pub metadata: MetadataInput,
}

impl ClassificationRequest {
    /// Request without metadata
    pub fn new(title: impl Into<String>, r#abstract: impl Into<String>) -> Self {
        Self {
            input: ClassificationInput::new(title, r#abstract),
            metadata: MetadataInput::default(),
        }
    }

    /// Attach metadata
    pub fn with_metadata(mut self, metadata: MetadataInput) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Everything produced by ingesting a file or URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionOutcome {
    /// What was ingested
    pub source: Source,
    /// Extracted article
    pub content: ExtractedContent,
    /// Classification of the extracted article
    pub result: ClassificationResult,
    /// Totals for the run
    pub summary: BatchSummary,
}

/// Ingestion progress published to subscribers
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Completion percentage in [0, 100]
    pub percent: f64,
    /// Step being executed, `None` when idle or done
    pub step: Option<&'static str>,
}

impl Progress {
    fn idle() -> Self {
        Self {
            percent: 0.0,
            step: None,
        }
    }

    fn complete() -> Self {
        Self {
            percent: 100.0,
            step: None,
        }
    }
}

/// Forms that hold their own request slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    /// Title and abstract classification
    Classification,
    /// Text or URL summary
    Summary,
    /// File or URL ingestion
    Ingestion,
}

/// Simulated asynchronous classification service
pub struct Classifier<E = MockExtractor> {
    scorer: DomainScorer,
    aggregator: ConfidenceAggregator,
    assessor: ReliabilityAssessor,
    extractor: E,
    config: PipelineConfig,
    random: Mutex<Box<dyn RandomSource + Send>>,
    classification: RequestSlot<ClassificationResult>,
    summary: RequestSlot<SummaryResult>,
    ingestion: RequestSlot<IngestionOutcome>,
    progress: watch::Sender<Progress>,
}

impl Classifier<MockExtractor> {
    /// Default lexicon, default reliability rules, canned extraction and
    /// entropy-seeded randomness
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        Self::builder(config)
            .random(SeededRandom::from_entropy())
            .build(MockExtractor::new()?)
    }
}

impl<E> Classifier<E>
where
    E: ContentExtractor<Error = PipelineError>,
{
    /// Start configuring a classifier
    pub fn builder(config: PipelineConfig) -> ClassifierBuilder {
        ClassifierBuilder {
            config,
            lexicon: None,
            reliability: None,
            random: None,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Scorer in use
    pub fn scorer(&self) -> &DomainScorer {
        &self.scorer
    }

    fn draw(&self) -> f64 {
        let mut random = self.random.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        random.next_f64()
    }

    fn reliability(&self, metadata: &MetadataInput) -> medclassify_domain::ReliabilityResult {
        match self.config.reference_year {
            Some(year) => self.assessor.assess(metadata, year),
            None => self.assessor.assess_now(metadata),
        }
    }

    /// Classify immediately, without validation, delay or request guard
    pub fn evaluate(&self, input: &ClassificationInput, metadata: &MetadataInput) -> ClassificationResult {
        let scores = self.scorer.score(input);
        let mut confidence = self.aggregator.aggregate(&scores);
        if self.config.confidence_jitter > 0.0 {
            let offset = (self.draw() * 2.0 - 1.0) * self.config.confidence_jitter;
            confidence = ConfidenceAggregator::clamp(confidence + offset);
        }
        let seconds = self.config.processing_time_min_secs
            + self.draw() * self.config.processing_time_spread_secs;

        ClassificationResult {
            scores,
            confidence,
            processing_time: format!("{:.1}", seconds),
            reliability: self.reliability(metadata),
        }
    }

    /// Validate, wait the classification delay, then classify
    pub async fn classify(
        &self,
        request: ClassificationRequest,
    ) -> Result<ClassificationResult, PipelineError> {
        let input = ClassificationInput::new(
            request.input.title.trim(),
            request.input.r#abstract.trim(),
        );
        if input.title.is_empty() {
            return Err(PipelineError::TitleRequired);
        }
        if input.r#abstract.is_empty() {
            return Err(PipelineError::AbstractRequired);
        }

        let ticket = self.classification.begin()?;
        info!(request = %ticket.id(), "Classification started");
        tokio::time::sleep(self.config.classification_delay()).await;

        let result = self.evaluate(&input, &request.metadata);
        let (primary, score) = result.scores.primary();
        info!(
            request = %ticket.id(),
            primary = %primary,
            score,
            confidence = result.confidence,
            "Classification finished"
        );
        ticket.commit(result)
    }

    /// Summarize pasted text
    pub async fn summarize(&self, text: &str, source: Option<&str>) -> Result<SummaryResult, PipelineError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PipelineError::TextRequired);
        }
        self.run_summary(text, source.unwrap_or(DIRECT_TEXT_SOURCE)).await
    }

    /// Summarize the canned content of a URL
    pub async fn summarize_url(&self, url: &str) -> Result<SummaryResult, PipelineError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(PipelineError::UrlRequired);
        }
        let content = summarizer::url_content(url);
        self.run_summary(&content, url).await
    }

    async fn run_summary(&self, text: &str, source: &str) -> Result<SummaryResult, PipelineError> {
        let ticket = self.summary.begin()?;
        info!(request = %ticket.id(), source, "Summary started");
        tokio::time::sleep(self.config.summary_delay()).await;
        let summary = summarizer::summarize_text(text, source);
        debug!(request = %ticket.id(), chars = summary.summary.len(), "Summary finished");
        ticket.commit(summary)
    }

    /// Walk the ingestion steps, extract the article and classify it
    pub async fn ingest(
        &self,
        source: Source,
        metadata: MetadataInput,
    ) -> Result<IngestionOutcome, PipelineError> {
        validate_source(&source)?;
        let ticket = self.ingestion.begin()?;
        info!(request = %ticket.id(), source = source.label(), "Ingestion started");

        let (steps, delay): (&[&'static str], Duration) = match source {
            Source::Url(_) => (&URL_STEPS, self.config.url_step_delay()),
            Source::File { .. } => (&FILE_STEPS, self.config.file_step_delay()),
        };
        for (i, step) in steps.iter().enumerate() {
            self.progress.send_replace(Progress {
                percent: i as f64 / steps.len() as f64 * 100.0,
                step: Some(*step),
            });
            debug!(request = %ticket.id(), step, "Ingestion step");
            tokio::time::sleep(delay).await;
        }

        let content = match self.extractor.extract(&source) {
            Ok(content) => content,
            Err(e) => {
                self.progress.send_replace(Progress::idle());
                return Err(e);
            }
        };
        let input = ClassificationInput::from(content.clone());
        let result = self.evaluate(&input, &metadata);
        let summary = {
            let mut random = self.random.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            BatchSummary::new(&source, &result, random.as_mut())
        };
        self.progress.send_replace(Progress::complete());
        info!(
            request = %ticket.id(),
            articles = summary.total_articles,
            "Ingestion finished"
        );

        ticket.commit(IngestionOutcome {
            source,
            content,
            result,
            summary,
        })
    }

    /// Watch ingestion progress
    pub fn subscribe_progress(&self) -> watch::Receiver<Progress> {
        self.progress.subscribe()
    }

    /// Invalidate the in-flight request of `form`
    pub fn cancel(&self, form: Form) -> Option<Uuid> {
        match form {
            Form::Classification => self.classification.cancel(),
            Form::Summary => self.summary.cancel(),
            Form::Ingestion => self.ingestion.cancel(),
        }
    }

    /// Whether `form` has a request in flight
    pub fn is_busy(&self, form: Form) -> bool {
        match form {
            Form::Classification => self.classification.is_busy(),
            Form::Summary => self.summary.is_busy(),
            Form::Ingestion => self.ingestion.is_busy(),
        }
    }

    /// Last committed classification
    pub fn latest(&self) -> Option<ClassificationResult> {
        self.classification.latest()
    }

    /// Last committed summary
    pub fn latest_summary(&self) -> Option<SummaryResult> {
        self.summary.latest()
    }

    /// Last committed ingestion
    pub fn latest_ingestion(&self) -> Option<IngestionOutcome> {
        self.ingestion.latest()
    }

    /// Classify every row of an article CSV
    ///
    /// Rows without a title and abstract are skipped. Each remaining row is
    /// scored, aggregated and assessed like a single classification, without
    /// the simulated delay.
    pub fn predict_batch(&self, records: &[ArticleRecord]) -> Result<BatchPrediction, PipelineError> {
        let mut predictions = Vec::with_capacity(records.len());
        let mut skipped = 0;
        for (i, record) in records.iter().enumerate() {
            if record.is_blank() {
                debug!(row = i + 1, "Skipping row without title or abstract");
                skipped += 1;
                continue;
            }
            let result = self.evaluate(&record.input(), &record.metadata());
            predictions.push(ArticlePrediction::new(i + 1, record, result));
        }
        if predictions.is_empty() {
            return Err(PipelineError::NoArticles);
        }

        let stats = BatchStats::new(&predictions, skipped);
        info!(
            processed = stats.total_processed,
            skipped,
            multi_label = stats.multi_label,
            average_confidence = stats.average_confidence,
            "Batch prediction finished"
        );
        Ok(BatchPrediction { predictions, stats })
    }

    /// Predict a labelled CSV and score the predictions against its `group` column
    pub fn evaluate_labelled(&self, records: &[ArticleRecord]) -> Result<EvaluationReport, PipelineError> {
        let batch = self.predict_batch(records)?;
        let report = EvaluationReport::from_predictions(&batch.predictions, batch.stats.skipped)?;
        info!(
            samples = report.samples,
            skipped = report.skipped,
            weighted_f1 = report.weighted_f1,
            "Evaluation finished"
        );
        Ok(report)
    }
}

/// Builder for [`Classifier`]
pub struct ClassifierBuilder {
    config: PipelineConfig,
    lexicon: Option<Lexicon>,
    reliability: Option<ReliabilityConfig>,
    random: Option<Box<dyn RandomSource + Send>>,
}

impl ClassifierBuilder {
    /// Replace the default lexicon
    pub fn lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = Some(lexicon);
        self
    }

    /// Replace the default reliability rules
    pub fn reliability(mut self, config: ReliabilityConfig) -> Self {
        self.reliability = Some(config);
        self
    }

    /// Use `random` for every randomized field
    pub fn random(mut self, random: impl RandomSource + Send + 'static) -> Self {
        self.random = Some(Box::new(random));
        self
    }

    /// Finish with the given extractor
    pub fn build<E>(self, extractor: E) -> Result<Classifier<E>, PipelineError>
    where
        E: ContentExtractor<Error = PipelineError>,
    {
        self.config.validate()?;
        let scorer = DomainScorer::new(self.lexicon.unwrap_or_default())?;
        let assessor = ReliabilityAssessor::new(self.reliability.unwrap_or_default())?;
        let random = self
            .random
            .unwrap_or_else(|| Box::new(SeededRandom::from_entropy()));
        let (progress, _) = watch::channel(Progress::idle());

        debug!(config = ?self.config, "Classifier built");
        Ok(Classifier {
            scorer,
            aggregator: ConfidenceAggregator,
            assessor,
            extractor,
            config: self.config,
            random: Mutex::new(random),
            classification: RequestSlot::new("classification"),
            summary: RequestSlot::new("summary"),
            ingestion: RequestSlot::new("ingestion"),
            progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedRandom;

    fn classifier(r: f64) -> Classifier {
        Classifier::<MockExtractor>::builder(PipelineConfig::instant())
            .random(FixedRandom(r))
            .build(MockExtractor::new().unwrap())
            .unwrap()
    }

    #[test]
    fn test_processing_time_format() {
        let c = classifier(0.0);
        let input = ClassificationInput::new("Heart failure", "Cardiac outcomes");
        assert_eq!(c.evaluate(&input, &MetadataInput::default()).processing_time, "2.5");
        let c = classifier(0.2);
        assert_eq!(c.evaluate(&input, &MetadataInput::default()).processing_time, "2.8");
    }

    #[test]
    fn test_jitter_stays_clamped() {
        let config = PipelineConfig {
            confidence_jitter: 0.5,
            ..PipelineConfig::instant()
        };
        let high = Classifier::<MockExtractor>::builder(config.clone())
            .random(FixedRandom(0.999))
            .build(MockExtractor::new().unwrap())
            .unwrap();
        let low = Classifier::<MockExtractor>::builder(config)
            .random(FixedRandom(0.0))
            .build(MockExtractor::new().unwrap())
            .unwrap();
        let input = ClassificationInput::new("Heart failure", "Cardiac outcomes");
        assert_eq!(high.evaluate(&input, &MetadataInput::default()).confidence, 0.98);
        assert_eq!(low.evaluate(&input, &MetadataInput::default()).confidence, 0.6);
    }

    #[test]
    fn test_request_deserializes_flat() {
        let request: ClassificationRequest =
            serde_json::from_str(r#"{"title":"T","abstract":"A","metadata":{"journal":"Nature"}}"#)
                .unwrap();
        assert_eq!(request.input.title, "T");
        assert_eq!(request.metadata.journal, "Nature");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PipelineConfig {
            confidence_jitter: 2.0,
            ..PipelineConfig::instant()
        };
        let err = Classifier::<MockExtractor>::builder(config)
            .build(MockExtractor::new().unwrap())
            .err()
            .expect("expected config error");
        assert!(matches!(err, PipelineError::Config(_)));
    }
}
