//! CSV, JSON and HTML renderings of a classification

use crate::{Insights, IngestionOutcome, PipelineError};
use chrono::{DateTime, Utc};
use medclassify_domain::{ClassificationInput, ClassificationResult, Domain};
use minijinja::Environment;
use serde::{Deserialize, Serialize};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values
    Csv,
    /// Pretty-printed JSON document
    Json,
    /// Printable HTML report
    Html,
}

impl ExportFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Html => "html",
        }
    }

    /// Default file name for an export taken at `at`
    pub fn file_name(&self, at: DateTime<Utc>) -> String {
        format!("medical_classification_{}.{}", at.timestamp_millis(), self.extension())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "html" => Ok(ExportFormat::Html),
            other => Err(PipelineError::Export(format!("Unknown export format: {}", other))),
        }
    }
}

/// Confidence of one domain, as listed in exports
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainConfidence {
    /// Domain
    pub domain: Domain,
    /// Score
    pub confidence: f64,
}

/// Self-describing record of one classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// Article title
    pub title: String,
    /// Article abstract
    pub r#abstract: String,
    /// Per-domain confidence in declaration order
    pub classification: Vec<DomainConfidence>,
    /// Full classification result
    pub result: ClassificationResult,
    /// Highest-scoring domain
    pub primary_domain: Domain,
    /// Domains above the secondary threshold
    pub secondary_domains: Vec<Domain>,
    /// Report content
    pub insights: Insights,
    /// When the export was produced
    pub timestamp: DateTime<Utc>,
}

impl ExportDocument {
    /// Assemble a document stamped with the current time
    pub fn new(input: &ClassificationInput, result: &ClassificationResult) -> Self {
        Self::at(input, result, Utc::now())
    }

    /// Assemble a document with an explicit timestamp
    pub fn at(input: &ClassificationInput, result: &ClassificationResult, timestamp: DateTime<Utc>) -> Self {
        let insights = Insights::derive(input, result);
        Self {
            title: input.title.clone(),
            r#abstract: input.r#abstract.clone(),
            classification: result
                .scores
                .entries()
                .iter()
                .map(|&(domain, confidence)| DomainConfidence { domain, confidence })
                .collect(),
            result: result.clone(),
            primary_domain: insights.primary_domain,
            secondary_domains: insights.secondary_domains.clone(),
            insights,
            timestamp,
        }
    }

    /// Render in the requested format
    pub fn render(&self, format: ExportFormat) -> Result<String, PipelineError> {
        match format {
            ExportFormat::Csv => classification_csv(&self.result),
            ExportFormat::Json => self.to_json(),
            ExportFormat::Html => html_report(self),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String, PipelineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document written by [`ExportDocument::to_json`]
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }
}

pub(crate) fn into_bytes(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, PipelineError> {
    writer
        .into_inner()
        .map_err(|e| PipelineError::Export(e.to_string()))
}

pub(crate) fn into_string(bytes: Vec<u8>) -> Result<String, PipelineError> {
    String::from_utf8(bytes).map_err(|e| PipelineError::Export(e.to_string()))
}

/// Score table followed by a blank line and the headline figures
pub fn classification_csv(result: &ClassificationResult) -> Result<String, PipelineError> {
    let mut table = csv::Writer::from_writer(Vec::new());
    table.write_record(["Domain", "Score", "Percentage"])?;
    for (domain, score) in result.scores.entries() {
        table.write_record([
            domain.display_name().to_string(),
            format!("{:.3}", score),
            format!("{:.1}%", score * 100.0),
        ])?;
    }
    let mut bytes = into_bytes(table)?;
    bytes.push(b'\n');

    let mut totals = csv::Writer::from_writer(bytes);
    let (primary, _) = result.scores.primary();
    totals.write_record(["Primary Domain", primary.display_name()])?;
    totals.write_record(["Confidence".to_string(), format!("{:.3}", result.confidence)])?;
    totals.write_record([
        "Reliability".to_string(),
        format!("{} ({:.2})", result.reliability.level, result.reliability.score),
    ])?;
    totals.write_record([
        "Processing Time".to_string(),
        format!("{}s", result.processing_time),
    ])?;
    into_string(into_bytes(totals)?)
}

/// One-row CSV describing an ingested article
pub fn ingestion_csv(outcome: &IngestionOutcome) -> Result<String, PipelineError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Title",
        "Abstract",
        "Cardiovascular",
        "Neurological",
        "Hepatorenal",
        "Oncological",
        "Primary_Domain",
        "Confidence",
        "Source",
        "Reliability_Level",
        "Processing_Time",
    ])?;

    let result = &outcome.result;
    let (primary, _) = result.scores.primary();
    let mut row = vec![
        outcome.content.title.clone(),
        outcome.content.r#abstract.clone(),
    ];
    row.extend(result.scores.entries().iter().map(|(_, s)| format!("{:.3}", s)));
    row.extend([
        primary.display_name().to_string(),
        format!("{:.3}", result.confidence),
        outcome.source.label().to_string(),
        result.reliability.level.to_string(),
        result.processing_time.clone(),
    ]);
    writer.write_record(&row)?;
    into_string(into_bytes(writer)?)
}

const REPORT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Medical Classification Report</title>
<style>
body { font-family: sans-serif; margin: 2em; color: #222; }
table { border-collapse: collapse; margin: 1em 0; }
th, td { border: 1px solid #ccc; padding: 4px 10px; text-align: left; }
.muted { color: #666; }
</style>
</head>
<body>
<h1>Medical Classification Report</h1>
<p class="muted">Generated {{ generated }}</p>

<h2>Article</h2>
<h3>{{ title }}</h3>
<p>{{ abstract }}</p>

<h2>Classification</h2>
<table>
<tr><th>Domain</th><th>Score</th><th>Percentage</th></tr>
{% for row in domains %}<tr><td>{{ row.name }}{% if row.primary %} (primary){% endif %}</td><td>{{ row.score }}</td><td>{{ row.percentage }}</td></tr>
{% endfor %}</table>
<p>Confidence: {{ confidence }} &middot; Processing time: {{ processing_time }}s</p>

<h2>Source Reliability</h2>
<p>{{ reliability_level }} ({{ reliability_score }})</p>
{% if factors %}<table>
<tr><th>Factor</th><th>Contribution</th></tr>
{% for f in factors %}<tr><td>{{ f.factor }}</td><td>{{ f.score }}</td></tr>
{% endfor %}</table>{% endif %}

<h2>Insights</h2>
<p>{{ insights.executive_summary }}</p>
<ul>
{% for finding in insights.key_findings %}<li>{{ finding }}</li>
{% endfor %}</ul>
<p><strong>Clinical relevance:</strong> {{ insights.clinical_relevance }}</p>
<p><strong>Methodology:</strong> {{ methodology }}</p>

<h2>Related Studies</h2>
<ul>
{% for study in insights.related_studies %}<li><a href="{{ study.url }}">{{ study.title }}</a>, {{ study.journal }} ({{ study.impact }} impact): {{ study.relevance }}</li>
{% endfor %}</ul>
</body>
</html>
"#;

#[derive(Serialize)]
struct DomainRow {
    name: &'static str,
    score: String,
    percentage: String,
    primary: bool,
}

#[derive(Serialize)]
struct ReportView<'a> {
    generated: String,
    title: &'a str,
    r#abstract: &'a str,
    domains: Vec<DomainRow>,
    confidence: String,
    processing_time: &'a str,
    reliability_level: &'static str,
    reliability_score: String,
    factors: &'a [medclassify_domain::ReliabilityFactor],
    insights: &'a Insights,
    methodology: &'static str,
}

/// Self-contained HTML report; title, abstract and all text are escaped
pub fn html_report(doc: &ExportDocument) -> Result<String, PipelineError> {
    let mut env = Environment::new();
    env.add_template("report.html", REPORT_TEMPLATE)?;
    let template = env.get_template("report.html")?;

    let result = &doc.result;
    let view = ReportView {
        generated: doc.timestamp.to_rfc3339(),
        title: &doc.title,
        r#abstract: &doc.r#abstract,
        domains: result
            .scores
            .entries()
            .iter()
            .map(|&(domain, score)| DomainRow {
                name: domain.display_name(),
                score: format!("{:.3}", score),
                percentage: format!("{:.1}%", score * 100.0),
                primary: domain == doc.primary_domain,
            })
            .collect(),
        confidence: format!("{:.1}%", result.confidence * 100.0),
        processing_time: &result.processing_time,
        reliability_level: result.reliability.level.as_str(),
        reliability_score: format!("{:.2}", result.reliability.score),
        factors: &result.reliability.factors,
        insights: &doc.insights,
        methodology: doc.insights.methodology.description(),
    };
    Ok(template.render(&view)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use medclassify_domain::{DomainScores, ReliabilityFactor, ReliabilityLevel, ReliabilityResult};

    fn sample() -> (ClassificationInput, ClassificationResult) {
        let input = ClassificationInput::new(
            "Heart <failure> & outcomes",
            "A randomized controlled trial of cardiac patients.",
        );
        let result = ClassificationResult {
            scores: DomainScores {
                cardiovascular: 0.9,
                neurological: 0.05,
                hepatorenal: 0.05,
                oncological: 0.05,
            },
            confidence: 0.95,
            processing_time: "3.1".to_string(),
            reliability: ReliabilityResult {
                score: 0.8,
                level: ReliabilityLevel::High,
                factors: vec![ReliabilityFactor::new("High-Impact Journal", 0.3)],
            },
        };
        (input, result)
    }

    #[test]
    fn test_classification_csv_layout() {
        let (_, result) = sample();
        let csv = classification_csv(&result).unwrap();
        let expected = "Domain,Score,Percentage\n\
                        Cardiovascular,0.900,90.0%\n\
                        Neurological,0.050,5.0%\n\
                        Hepatorenal,0.050,5.0%\n\
                        Oncological,0.050,5.0%\n\
                        \n\
                        Primary Domain,Cardiovascular\n\
                        Confidence,0.950\n\
                        Reliability,High (0.80)\n\
                        Processing Time,3.1s\n";
        assert_eq!(csv, expected);
    }

    #[test]
    fn test_json_round_trip() {
        let (input, result) = sample();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let doc = ExportDocument::at(&input, &result, at);
        let json = doc.to_json().unwrap();
        assert!(json.contains("\"abstract\""));
        assert!(json.contains("\"primaryDomain\": \"cardiovascular\""));
        assert!(json.contains("2024-05-01T12:00:00Z"));
        assert_eq!(ExportDocument::from_json(&json).unwrap(), doc);
    }

    #[test]
    fn test_html_escapes_input() {
        let (input, result) = sample();
        let doc = ExportDocument::new(&input, &result);
        let html = doc.render(ExportFormat::Html).unwrap();
        assert!(html.contains("Heart &lt;failure&gt; &amp; outcomes"));
        assert!(!html.contains("<failure>"));
        assert!(html.contains("Cardiovascular (primary)"));
        assert!(html.contains("High-Impact Journal"));
        assert!(html.contains("Randomized controlled trial - Robust evidence"));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("pdf".parse::<ExportFormat>().is_err());
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        assert_eq!(ExportFormat::Csv.file_name(at), "medical_classification_1700000000000.csv");
    }
}
