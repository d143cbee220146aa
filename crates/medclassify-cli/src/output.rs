//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use medclassify_domain::{ClassificationResult, ReliabilityLevel, ReliabilityResult};
use medclassify_pipeline::{
    BatchPrediction, EvaluationReport, IngestionOutcome, Insights, SummaryResult,
};
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

#[derive(Serialize)]
struct ClassificationOutput<'a> {
    #[serde(flatten)]
    result: &'a ClassificationResult,
    insights: &'a Insights,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a classification with its insights.
    pub fn format_classification(
        &self,
        result: &ClassificationResult,
        insights: &Insights,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&ClassificationOutput {
                result,
                insights,
            })?),
            OutputFormat::Quiet => Ok(insights.primary_domain.key().to_string()),
            OutputFormat::Table => Ok(self.classification_table(result, insights)),
        }
    }

    fn scores_table(&self, result: &ClassificationResult, insights: &Insights) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Domain", "Score", "Percentage", ""]);
        for (domain, score) in result.scores.entries() {
            let marker = if domain == insights.primary_domain {
                "primary"
            } else if insights.secondary_domains.contains(&domain) {
                "secondary"
            } else {
                ""
            };
            builder.push_record([
                domain.display_name().to_string(),
                format!("{:.3}", score),
                format!("{:.1}%", score * 100.0),
                marker.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    fn classification_table(&self, result: &ClassificationResult, insights: &Insights) -> String {
        let mut out = Vec::new();
        out.push(self.scores_table(result, insights));
        out.push(format!(
            "Confidence: {:.1}%   Processing time: {}s",
            result.confidence * 100.0,
            result.processing_time
        ));
        out.push(self.reliability_table(&result.reliability));
        out.push(self.colorize(&insights.executive_summary, "cyan"));
        out.push(format!("Key terms: {}", insights.key_terms.join(", ")));
        out.push(format!("Clinical relevance: {}", insights.clinical_relevance));
        out.push(format!("Methodology: {}", insights.methodology.description()));

        let mut studies = Builder::default();
        studies.push_record(["Related study", "Journal", "Impact"]);
        for study in &insights.related_studies {
            studies.push_record([study.title.as_str(), study.journal.as_str(), study.impact.as_str()]);
        }
        let mut studies = studies.build();
        studies.with(Style::rounded());
        out.push(studies.to_string());

        out.join("\n")
    }

    /// Format a reliability assessment.
    pub fn format_reliability(&self, reliability: &ReliabilityResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(reliability)?),
            OutputFormat::Quiet => Ok(reliability.level.to_string()),
            OutputFormat::Table => Ok(self.reliability_table(reliability)),
        }
    }

    fn reliability_table(&self, reliability: &ReliabilityResult) -> String {
        let color = match reliability.level {
            ReliabilityLevel::High => "green",
            ReliabilityLevel::Medium => "yellow",
            ReliabilityLevel::Low => "red",
        };
        let headline = self.colorize(
            &format!(
                "Reliability: {} ({:.0}%)",
                reliability.level,
                reliability.score * 100.0
            ),
            color,
        );
        if reliability.factors.is_empty() {
            return format!("{}\nNo reliability factors applied.", headline);
        }

        let mut builder = Builder::default();
        builder.push_record(["Factor", "Contribution"]);
        for factor in &reliability.factors {
            builder.push_record([factor.factor.as_str(), factor.score.as_str()]);
        }
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        format!("{}\n{}", headline, table)
    }

    /// Format an ingestion outcome.
    pub fn format_ingestion(&self, outcome: &IngestionOutcome, insights: &Insights) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
            OutputFormat::Quiet => Ok(insights.primary_domain.key().to_string()),
            OutputFormat::Table => {
                let summary = &outcome.summary;
                let mut counts = Builder::default();
                counts.push_record(["Domain", "Articles"]);
                for count in &summary.classified {
                    counts.push_record([
                        count.domain.display_name().to_string(),
                        count.articles.to_string(),
                    ]);
                }
                let mut counts = counts.build();
                counts.with(Style::rounded());

                Ok([
                    self.success(&summary.headline()),
                    format!("Title: {}", outcome.content.title),
                    counts.to_string(),
                    self.classification_table(&outcome.result, insights),
                ]
                .join("\n"))
            }
        }
    }

    /// Format a summary.
    pub fn format_summary(&self, summary: &SummaryResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
            OutputFormat::Quiet => Ok(summary.summary.clone()),
            OutputFormat::Table => {
                let mut out = vec![
                    self.colorize(&format!("Source: {}", summary.source), "cyan"),
                    summary.summary.clone(),
                    "Key findings:".to_string(),
                ];
                out.extend(summary.key_findings.iter().map(|f| format!("  • {}", f)));
                out.push("Related studies:".to_string());
                out.extend(summary.related_studies.iter().map(|s| format!("  • {}", s)));
                Ok(out.join("\n"))
            }
        }
    }

    /// Format a batch of predictions.
    pub fn format_batch(&self, batch: &BatchPrediction) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(batch)?),
            OutputFormat::Quiet => Ok(batch
                .predictions
                .iter()
                .map(|p| {
                    let labels: Vec<&str> = p.labels.iter().map(|d| d.key()).collect();
                    format!("{}\t{}", p.id, labels.join(";"))
                })
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut rows = Builder::default();
                rows.push_record(["#", "Title", "Predicted", "Confidence", "Reliability"]);
                for p in &batch.predictions {
                    let labels: Vec<&str> = p.labels.iter().map(|d| d.display_name()).collect();
                    rows.push_record([
                        p.id.to_string(),
                        p.title.clone(),
                        labels.join(", "),
                        format!("{:.1}%", p.result.confidence * 100.0),
                        p.result.reliability.level.to_string(),
                    ]);
                }
                let mut rows = rows.build();
                rows.with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                let stats = &batch.stats;
                let mut counts = Builder::default();
                counts.push_record(["Domain", "Articles"]);
                for count in &stats.domain_distribution {
                    counts.push_record([
                        count.domain.display_name().to_string(),
                        count.articles.to_string(),
                    ]);
                }
                let mut counts = counts.build();
                counts.with(Style::rounded());

                let mut out = vec![
                    rows.to_string(),
                    counts.to_string(),
                    self.success(&format!(
                        "{} articles classified in {}",
                        stats.total_processed, stats.processing_time
                    )),
                    format!(
                        "Multi-label: {} ({:.1}%)   Average confidence: {:.1}%",
                        stats.multi_label,
                        stats.multi_label_ratio() * 100.0,
                        stats.average_confidence * 100.0
                    ),
                ];
                if stats.skipped > 0 {
                    out.push(self.warning(&format!(
                        "{} rows without title or abstract skipped",
                        stats.skipped
                    )));
                }
                Ok(out.join("\n"))
            }
        }
    }

    /// Format evaluation metrics.
    pub fn format_evaluation(&self, report: &EvaluationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(format!("{:.4}", report.weighted_f1)),
            OutputFormat::Table => {
                let mut metrics = Builder::default();
                metrics.push_record(["Metric", "Value"]);
                for (name, value) in [
                    ("Weighted F1", report.weighted_f1),
                    ("Macro F1", report.macro_f1),
                    ("Micro F1", report.micro_f1),
                    ("Weighted precision", report.weighted_precision),
                    ("Weighted recall", report.weighted_recall),
                    ("Hamming loss", report.hamming_loss),
                    ("Exact match ratio", report.exact_match_ratio),
                ] {
                    metrics.push_record([name.to_string(), format!("{:.4}", value)]);
                }
                let mut metrics = metrics.build();
                metrics
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                let mut classes = Builder::default();
                classes.push_record(["Domain", "Precision", "Recall", "F1", "Support"]);
                for class in &report.per_class {
                    classes.push_record([
                        class.domain.display_name().to_string(),
                        format!("{:.3}", class.precision),
                        format!("{:.3}", class.recall),
                        format!("{:.3}", class.f1),
                        class.support.to_string(),
                    ]);
                }
                let mut classes = classes.build();
                classes.with(Style::rounded());

                let mut out = vec![
                    self.colorize(&format!("Evaluated {} labelled articles", report.samples), "cyan"),
                    metrics.to_string(),
                    classes.to_string(),
                ];
                if report.skipped > 0 {
                    out.push(self.warning(&format!(
                        "{} rows without text or a recognised group skipped",
                        report.skipped
                    )));
                }
                Ok(out.join("\n"))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
