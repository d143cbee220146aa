//! Assessor configuration

use crate::ReliabilityError;
use serde::{Deserialize, Serialize};

/// Keyword lists, deltas and thresholds for the reliability rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReliabilityConfig {
    /// Journals matched as substrings for the high-impact bonus
    pub high_impact_journals: Vec<String>,

    /// Journals matched as substrings for the medium-impact bonus
    pub medium_impact_journals: Vec<String>,

    /// Institutions matched as substrings for the prestige bonus
    pub prestigious_institutions: Vec<String>,

    /// Starting score before any rule fires
    pub base_score: f64,

    /// Bonus for a high-impact journal
    pub high_impact_bonus: f64,

    /// Bonus for a medium-impact journal
    pub medium_impact_bonus: f64,

    /// Bonus for any other named journal
    pub identified_journal_bonus: f64,

    /// Bonus for a prestigious institution
    pub prestigious_institution_bonus: f64,

    /// Bonus for any other named institution
    pub academic_institution_bonus: f64,

    /// Years back that still count as recent
    pub recent_window_years: i32,

    /// Bonus for a recent publication
    pub recent_bonus: f64,

    /// Years back that still count as current
    pub current_window_years: i32,

    /// Bonus for a current publication
    pub current_bonus: f64,

    /// Publications older than this many years are outdated
    pub outdated_after_years: i32,

    /// Delta for an outdated publication (negative)
    pub outdated_penalty: f64,

    /// Bonus for a DOI
    pub doi_bonus: f64,

    /// Bonus for more than one author
    pub multiple_authors_bonus: f64,

    /// Minimum score for the High level
    pub high_threshold: f64,

    /// Minimum score for the Medium level
    pub medium_threshold: f64,
}

impl Default for ReliabilityConfig {
    fn default() -> Self {
        Self {
            high_impact_journals: to_strings(&["nature", "science", "cell", "lancet", "nejm", "jama"]),
            medium_impact_journals: to_strings(&["plos", "bmc", "frontiers", "mdpi"]),
            prestigious_institutions: to_strings(&[
                "harvard",
                "stanford",
                "mit",
                "oxford",
                "cambridge",
                "mayo clinic",
            ]),
            base_score: 0.5,
            high_impact_bonus: 0.3,
            medium_impact_bonus: 0.15,
            identified_journal_bonus: 0.05,
            prestigious_institution_bonus: 0.2,
            academic_institution_bonus: 0.1,
            recent_window_years: 2,
            recent_bonus: 0.15,
            current_window_years: 5,
            current_bonus: 0.1,
            outdated_after_years: 10,
            outdated_penalty: -0.1,
            doi_bonus: 0.1,
            multiple_authors_bonus: 0.05,
            high_threshold: 0.8,
            medium_threshold: 0.6,
        }
    }
}

impl ReliabilityConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ReliabilityError> {
        if !(0.0..=1.0).contains(&self.base_score) {
            return Err(ReliabilityError::Config(
                "base_score must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.medium_threshold)
            || !(0.0..=1.0).contains(&self.high_threshold)
        {
            return Err(ReliabilityError::Config(
                "thresholds must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.medium_threshold > self.high_threshold {
            return Err(ReliabilityError::Config(
                "medium_threshold cannot exceed high_threshold".to_string(),
            ));
        }
        let deltas = [
            ("high_impact_bonus", self.high_impact_bonus),
            ("medium_impact_bonus", self.medium_impact_bonus),
            ("identified_journal_bonus", self.identified_journal_bonus),
            ("prestigious_institution_bonus", self.prestigious_institution_bonus),
            ("academic_institution_bonus", self.academic_institution_bonus),
            ("recent_bonus", self.recent_bonus),
            ("current_bonus", self.current_bonus),
            ("outdated_penalty", self.outdated_penalty),
            ("doi_bonus", self.doi_bonus),
            ("multiple_authors_bonus", self.multiple_authors_bonus),
        ];
        if let Some((name, value)) = deltas.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ReliabilityError::Config(format!(
                "{} must be a finite number, got {}",
                name, value
            )));
        }
        if self.recent_window_years < 0
            || self.recent_window_years > self.current_window_years
            || self.current_window_years > self.outdated_after_years
        {
            return Err(ReliabilityError::Config(
                "year windows must satisfy 0 <= recent <= current <= outdated".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ReliabilityError> {
        let config: ReliabilityConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ReliabilityError> {
        toml::to_string_pretty(self)
            .map_err(|e| ReliabilityError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
