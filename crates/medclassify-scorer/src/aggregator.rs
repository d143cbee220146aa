//! Overall confidence from the per-domain scores

use medclassify_domain::DomainScores;

/// Lower bound of the aggregate confidence
pub const MIN_CONFIDENCE: f64 = 0.6;

/// Upper bound of the aggregate confidence
pub const MAX_CONFIDENCE: f64 = 0.98;

/// Reduces a domain score vector to one confidence scalar.
///
/// Confidence grows with the gap between the top two domains and is nudged
/// by the mean score.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceAggregator;

impl ConfidenceAggregator {
    /// Aggregate confidence in [0.6, 0.98]
    pub fn aggregate(&self, scores: &DomainScores) -> f64 {
        let ranked = scores.ranked();
        let separation = ranked[0].1 - ranked[1].1;
        let base = 0.7 + separation * 0.3;

        let avg = scores.mean();
        let adjustment = if avg > 0.3 {
            0.1
        } else if avg > 0.1 {
            0.05
        } else {
            -0.1
        };

        Self::clamp(base + adjustment)
    }

    /// Clamp any confidence value into the reported range
    pub fn clamp(confidence: f64) -> f64 {
        confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(c: f64, n: f64, h: f64, o: f64) -> DomainScores {
        DomainScores {
            cardiovascular: c,
            neurological: n,
            hepatorenal: h,
            oncological: o,
        }
    }

    #[test]
    fn test_flat_low_scores_hit_floor() {
        let conf = ConfidenceAggregator.aggregate(&scores(0.05, 0.05, 0.05, 0.05));
        assert!((conf - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_clear_winner_hits_ceiling() {
        let conf = ConfidenceAggregator.aggregate(&scores(0.95, 0.05, 0.05, 0.05));
        assert_eq!(conf, 0.98);
    }

    #[test]
    fn test_medium_average() {
        // separation 0.2 → base 0.76; avg 0.2 → +0.05
        let conf = ConfidenceAggregator.aggregate(&scores(0.4, 0.2, 0.1, 0.1));
        assert!((conf - 0.81).abs() < 1e-9);
    }

    #[test]
    fn test_high_average() {
        // separation 0.0 → base 0.7; avg 0.5 → +0.1
        let conf = ConfidenceAggregator.aggregate(&scores(0.5, 0.5, 0.5, 0.5));
        assert!((conf - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(ConfidenceAggregator::clamp(1.2), MAX_CONFIDENCE);
        assert_eq!(ConfidenceAggregator::clamp(0.1), MIN_CONFIDENCE);
        assert_eq!(ConfidenceAggregator::clamp(0.75), 0.75);
    }
}
