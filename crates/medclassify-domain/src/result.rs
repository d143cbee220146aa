//! Classification result record

use crate::{DomainScores, ReliabilityResult};
use serde::{Deserialize, Serialize};

/// Everything produced by one classification request.
///
/// Serializes flat: the four domain keys sit next to `confidence`,
/// `processingTime` and `reliability`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Per-domain confidence
    #[serde(flatten)]
    pub scores: DomainScores,
    /// Aggregate confidence in [0.6, 0.98]
    pub confidence: f64,
    /// Simulated processing time in seconds, one decimal
    pub processing_time: String,
    /// Source reliability
    pub reliability: ReliabilityResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ReliabilityFactor, ReliabilityLevel};

    #[test]
    fn test_flat_json_shape() {
        let result = ClassificationResult {
            scores: DomainScores {
                cardiovascular: 0.9,
                neurological: 0.05,
                hepatorenal: 0.05,
                oncological: 0.05,
            },
            confidence: 0.95,
            processing_time: "3.2".to_string(),
            reliability: ReliabilityResult {
                score: 0.65,
                level: ReliabilityLevel::Medium,
                factors: vec![ReliabilityFactor::new("Verifiable DOI", 0.1)],
            },
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["cardiovascular"], 0.9);
        assert_eq!(json["processingTime"], "3.2");
        assert_eq!(json["reliability"]["level"], "Medium");
        assert_eq!(json["reliability"]["factors"][0]["score"], "+10%");

        let back: ClassificationResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }
}
