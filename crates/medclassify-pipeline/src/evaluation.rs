//! Multi-label metrics of predicted domains against expected ones
//!
//! Averages follow the usual conventions: `macro` is the unweighted mean
//! over the four domains, `weighted` weights each domain by its support,
//! `micro` pools every decision. A ratio with a zero denominator is 0.

use crate::prediction::ArticlePrediction;
use crate::PipelineError;
use medclassify_domain::Domain;
use serde::{Deserialize, Serialize};

/// Precision, recall and F1 for one domain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    /// Domain
    pub domain: Domain,
    /// Correct labels over predicted labels
    pub precision: f64,
    /// Correct labels over expected labels
    pub recall: f64,
    /// Harmonic mean of precision and recall
    pub f1: f64,
    /// Articles expected to carry the domain
    pub support: usize,
}

/// Scores of a labelled run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    /// Articles compared
    pub samples: usize,
    /// Rows left out for lacking text or a recognised label
    pub skipped: usize,
    /// F1 weighted by support
    pub weighted_f1: f64,
    /// Unweighted mean F1
    pub macro_f1: f64,
    /// F1 over pooled decisions
    pub micro_f1: f64,
    /// Precision weighted by support
    pub weighted_precision: f64,
    /// Recall weighted by support
    pub weighted_recall: f64,
    /// Share of wrong (article, domain) decisions
    pub hamming_loss: f64,
    /// Share of articles whose label set matches exactly
    pub exact_match_ratio: f64,
    /// Per-domain figures in declaration order
    pub per_class: Vec<ClassMetrics>,
}

#[derive(Default, Clone, Copy)]
struct Counts {
    tp: usize,
    fp: usize,
    fn_: usize,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl EvaluationReport {
    /// Compare label sets pairwise
    pub fn compute(expected: &[Vec<Domain>], predicted: &[Vec<Domain>]) -> Result<Self, PipelineError> {
        if expected.len() != predicted.len() {
            return Err(PipelineError::Config(format!(
                "{} expected label sets for {} predictions",
                expected.len(),
                predicted.len()
            )));
        }
        if expected.is_empty() {
            return Err(PipelineError::NoLabels);
        }

        let mut counts = [Counts::default(); 4];
        let mut exact = 0;
        for (truth, guess) in expected.iter().zip(predicted) {
            let mut matched = true;
            for (i, domain) in Domain::ALL.iter().enumerate() {
                match (truth.contains(domain), guess.contains(domain)) {
                    (true, true) => counts[i].tp += 1,
                    (false, true) => {
                        counts[i].fp += 1;
                        matched = false;
                    }
                    (true, false) => {
                        counts[i].fn_ += 1;
                        matched = false;
                    }
                    (false, false) => {}
                }
            }
            if matched {
                exact += 1;
            }
        }

        let per_class: Vec<ClassMetrics> = Domain::ALL
            .iter()
            .zip(counts)
            .map(|(&domain, c)| ClassMetrics {
                domain,
                precision: ratio(c.tp, c.tp + c.fp),
                recall: ratio(c.tp, c.tp + c.fn_),
                f1: ratio(2 * c.tp, 2 * c.tp + c.fp + c.fn_),
                support: c.tp + c.fn_,
            })
            .collect();

        let support: usize = per_class.iter().map(|m| m.support).sum();
        let weighted = |metric: fn(&ClassMetrics) -> f64| {
            if support == 0 {
                0.0
            } else {
                per_class.iter().map(|m| metric(m) * m.support as f64).sum::<f64>() / support as f64
            }
        };

        let tp: usize = counts.iter().map(|c| c.tp).sum();
        let errors: usize = counts.iter().map(|c| c.fp + c.fn_).sum();
        let samples = expected.len();

        Ok(Self {
            samples,
            skipped: 0,
            weighted_f1: weighted(|m| m.f1),
            macro_f1: per_class.iter().map(|m| m.f1).sum::<f64>() / per_class.len() as f64,
            micro_f1: ratio(2 * tp, 2 * tp + errors),
            weighted_precision: weighted(|m| m.precision),
            weighted_recall: weighted(|m| m.recall),
            hamming_loss: ratio(errors, samples * Domain::ALL.len()),
            exact_match_ratio: ratio(exact, samples),
            per_class,
        })
    }

    /// Compare the predictions that carry expected labels
    ///
    /// Predictions without expected labels count as skipped, on top of the
    /// `skipped` rows already left out of the batch.
    pub fn from_predictions(predictions: &[ArticlePrediction], skipped: usize) -> Result<Self, PipelineError> {
        let (expected, predicted): (Vec<_>, Vec<_>) = predictions
            .iter()
            .filter_map(|p| Some((p.expected.clone()?, p.labels.clone())))
            .unzip();
        let unlabelled = predictions.len() - expected.len();

        let mut report = Self::compute(&expected, &predicted)?;
        report.skipped = skipped + unlabelled;
        Ok(report)
    }

    /// Figures for one domain
    pub fn class(&self, domain: Domain) -> Option<&ClassMetrics> {
        self.per_class.iter().find(|m| m.domain == domain)
    }
}
