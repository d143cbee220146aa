//! Source reliability records

use serde::{Deserialize, Serialize};

/// Trust level derived by thresholding the reliability score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReliabilityLevel {
    /// score >= 0.8
    High,
    /// 0.6 <= score < 0.8
    Medium,
    /// score < 0.6
    Low,
}

impl ReliabilityLevel {
    /// Threshold a score with the given bounds
    pub fn from_thresholds(score: f64, high: f64, medium: f64) -> Self {
        if score >= high {
            ReliabilityLevel::High
        } else if score >= medium {
            ReliabilityLevel::Medium
        } else {
            ReliabilityLevel::Low
        }
    }

    /// Level name
    pub fn as_str(&self) -> &'static str {
        match self {
            ReliabilityLevel::High => "High",
            ReliabilityLevel::Medium => "Medium",
            ReliabilityLevel::Low => "Low",
        }
    }
}

impl std::fmt::Display for ReliabilityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One itemized contribution to the reliability score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityFactor {
    /// Human-readable label
    pub factor: String,
    /// Signed percentage, e.g. `+15%`
    pub score: String,
    /// Delta applied to the running score
    pub weight: f64,
}

impl ReliabilityFactor {
    /// Create a factor, deriving the percentage string from the weight
    pub fn new(factor: impl Into<String>, weight: f64) -> Self {
        let pct = (weight * 100.0).round() as i64;
        Self {
            factor: factor.into(),
            score: format!("{:+}%", pct),
            weight,
        }
    }
}

/// Trust score, level and the factors that produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityResult {
    /// Score clamped to [0, 1]
    pub score: f64,
    /// Level derived from the clamped score
    pub level: ReliabilityLevel,
    /// Fired rules in evaluation order
    pub factors: Vec<ReliabilityFactor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_percentage_string() {
        assert_eq!(ReliabilityFactor::new("a", 0.3).score, "+30%");
        assert_eq!(ReliabilityFactor::new("b", 0.05).score, "+5%");
        assert_eq!(ReliabilityFactor::new("c", -0.1).score, "-10%");
        assert_eq!(ReliabilityFactor::new("d", 0.15).score, "+15%");
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(ReliabilityLevel::from_thresholds(0.8, 0.8, 0.6), ReliabilityLevel::High);
        assert_eq!(ReliabilityLevel::from_thresholds(0.79, 0.8, 0.6), ReliabilityLevel::Medium);
        assert_eq!(ReliabilityLevel::from_thresholds(0.6, 0.8, 0.6), ReliabilityLevel::Medium);
        assert_eq!(ReliabilityLevel::from_thresholds(0.59, 0.8, 0.6), ReliabilityLevel::Low);
    }

    #[test]
    fn test_level_serializes_as_name() {
        let json = serde_json::to_string(&ReliabilityLevel::Medium).unwrap();
        assert_eq!(json, "\"Medium\"");
    }
}
