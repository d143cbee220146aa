//! Summary of an ingestion run

use medclassify_domain::{ClassificationResult, Domain, RandomSource, ReliabilityResult, Source};
use serde::{Deserialize, Serialize};

/// Articles assumed in a CSV upload
pub const CSV_ARTICLES: u32 = 150;

/// Articles assumed in a single-document upload (PDF, DOCX)
pub const DOCUMENT_ARTICLES: u32 = 1;

/// Articles assumed for any other accepted file
pub const DEFAULT_ARTICLES: u32 = 5;

/// Upper bound of the random count added per domain for file uploads
pub fn count_jitter(domain: Domain) -> u32 {
    match domain {
        Domain::Cardiovascular => 10,
        Domain::Neurological => 8,
        Domain::Hepatorenal => 6,
        Domain::Oncological => 12,
    }
}

/// Number of articles attributed to one domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCount {
    /// Domain
    pub domain: Domain,
    /// Article count
    pub articles: u32,
}

/// Totals shown after a file or URL has been processed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Where the articles came from
    pub source: Source,
    /// Upper-cased file extension, absent for URLs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    /// Articles found in the source
    pub total_articles: u32,
    /// Per-domain counts in declaration order
    pub classified: Vec<DomainCount>,
    /// Aggregate confidence of the classification
    pub average_confidence: f64,
    /// Simulated processing time in seconds
    pub processing_time: String,
    /// Reliability of the source
    pub reliability: ReliabilityResult,
}

impl BatchSummary {
    /// Build the summary for `result`, drawing file-count jitter from `rng`
    pub fn new(source: &Source, result: &ClassificationResult, rng: &mut dyn RandomSource) -> Self {
        let (total_articles, classified) = match source {
            // a URL yields one article; counts are the scores as percentages
            Source::Url(_) => {
                let classified = result
                    .scores
                    .entries()
                    .iter()
                    .map(|&(domain, score)| DomainCount {
                        domain,
                        articles: (score * 100.0).floor() as u32,
                    })
                    .collect();
                (1, classified)
            }
            Source::File { .. } => {
                let total = match source.extension().as_deref() {
                    Some("csv") => CSV_ARTICLES,
                    Some("pdf") | Some("docx") => DOCUMENT_ARTICLES,
                    _ => DEFAULT_ARTICLES,
                };
                let classified = result
                    .scores
                    .entries()
                    .iter()
                    .map(|&(domain, score)| {
                        let base = (f64::from(total) * score).floor() as u32;
                        let jitter = (rng.next_f64() * f64::from(count_jitter(domain))).floor() as u32;
                        DomainCount {
                            domain,
                            articles: base + jitter,
                        }
                    })
                    .collect();
                (total, classified)
            }
        };

        Self {
            source: source.clone(),
            file_type: source.extension().map(|ext| ext.to_uppercase()),
            total_articles,
            classified,
            average_confidence: result.confidence,
            processing_time: result.processing_time.clone(),
            reliability: result.reliability.clone(),
        }
    }

    /// Count for one domain
    pub fn count(&self, domain: Domain) -> u32 {
        self.classified
            .iter()
            .find(|c| c.domain == domain)
            .map(|c| c.articles)
            .unwrap_or(0)
    }

    /// One-line description of the run
    pub fn headline(&self) -> String {
        match self.source {
            Source::Url(_) => format!(
                "Extracted and processed {} article(s) in {}s with average confidence {:.1}%",
                self.total_articles,
                self.processing_time,
                self.average_confidence * 100.0
            ),
            Source::File { .. } => format!(
                "Processed {} articles in {}s with average confidence {:.1}%",
                self.total_articles,
                self.processing_time,
                self.average_confidence * 100.0
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedRandom;
    use medclassify_domain::{DomainScores, ReliabilityLevel};

    fn result() -> ClassificationResult {
        ClassificationResult {
            scores: DomainScores {
                cardiovascular: 0.8,
                neurological: 0.05,
                hepatorenal: 0.1,
                oncological: 0.05,
            },
            confidence: 0.9,
            processing_time: "3.0".to_string(),
            reliability: ReliabilityResult {
                score: 0.5,
                level: ReliabilityLevel::Low,
                factors: vec![],
            },
        }
    }

    #[test]
    fn test_csv_counts_with_jitter() {
        let source = Source::File {
            name: "batch.csv".to_string(),
        };
        let summary = BatchSummary::new(&source, &result(), &mut FixedRandom(0.5));
        assert_eq!(summary.total_articles, 150);
        assert_eq!(summary.file_type.as_deref(), Some("CSV"));
        // floor(150 * 0.8) + floor(0.5 * 10)
        assert_eq!(summary.count(Domain::Cardiovascular), 125);
        // floor(150 * 0.05) + floor(0.5 * 8)
        assert_eq!(summary.count(Domain::Neurological), 11);
        assert_eq!(summary.count(Domain::Hepatorenal), 18);
        assert_eq!(summary.count(Domain::Oncological), 13);
    }

    #[test]
    fn test_document_and_default_totals() {
        let pdf = Source::File {
            name: "a.pdf".to_string(),
        };
        let txt = Source::File {
            name: "a.txt".to_string(),
        };
        assert_eq!(BatchSummary::new(&pdf, &result(), &mut FixedRandom(0.0)).total_articles, 1);
        assert_eq!(BatchSummary::new(&txt, &result(), &mut FixedRandom(0.0)).total_articles, 5);
    }

    #[test]
    fn test_url_percentages() {
        let source = Source::Url("https://example.org".to_string());
        let summary = BatchSummary::new(&source, &result(), &mut FixedRandom(0.99));
        assert_eq!(summary.total_articles, 1);
        assert!(summary.file_type.is_none());
        assert_eq!(summary.count(Domain::Cardiovascular), 80);
        assert_eq!(summary.count(Domain::Neurological), 5);
        assert!(summary.headline().starts_with("Extracted and processed 1 article(s)"));
    }
}
