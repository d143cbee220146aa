//! Reliability rules

use crate::{ReliabilityConfig, ReliabilityError};
use chrono::Datelike;
use medclassify_domain::{
    MetadataInput, ReliabilityFactor, ReliabilityLevel, ReliabilityResult,
};
use tracing::debug;

/// Factor label for a high-impact journal
pub const HIGH_IMPACT_JOURNAL: &str = "High-Impact Journal";
/// Factor label for a medium-impact journal
pub const MEDIUM_IMPACT_JOURNAL: &str = "Medium-Impact Journal";
/// Factor label for any other named journal
pub const JOURNAL_IDENTIFIED: &str = "Journal Identified";
/// Factor label for a prestigious institution
pub const PRESTIGIOUS_INSTITUTION: &str = "Prestigious Institution";
/// Factor label for any other named institution
pub const ACADEMIC_INSTITUTION: &str = "Academic Institution";
/// Factor label for a recent publication
pub const RECENT_PUBLICATION: &str = "Recent Publication";
/// Factor label for a current publication
pub const CURRENT_PUBLICATION: &str = "Current Publication";
/// Factor label for an outdated publication
pub const OUTDATED_PUBLICATION: &str = "Outdated Publication";
/// Factor label for a DOI
pub const VERIFIABLE_DOI: &str = "Verifiable DOI";
/// Factor label for more than one author
pub const MULTIPLE_AUTHORS: &str = "Multiple Authors";

/// Scores bibliographic metadata against the configured rules
#[derive(Debug, Clone)]
pub struct ReliabilityAssessor {
    config: ReliabilityConfig,
}

impl ReliabilityAssessor {
    /// Create an assessor with the given configuration
    pub fn new(config: ReliabilityConfig) -> Result<Self, ReliabilityError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create an assessor with default configuration
    pub fn default_config() -> Self {
        Self {
            config: ReliabilityConfig::default(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ReliabilityConfig {
        &self.config
    }

    /// Assess metadata against the wall-clock year
    pub fn assess_now(&self, metadata: &MetadataInput) -> ReliabilityResult {
        self.assess(metadata, chrono::Local::now().year())
    }

    /// Assess metadata.
    ///
    /// Rules run in a fixed order and each fired rule appends one factor:
    /// journal, institution, publication year, DOI, authors. The level is
    /// taken from the clamped score.
    pub fn assess(&self, metadata: &MetadataInput, current_year: i32) -> ReliabilityResult {
        let cfg = &self.config;
        let mut score = cfg.base_score;
        let mut factors = Vec::new();

        let mut apply = |label: &str, weight: f64| {
            score += weight;
            factors.push(ReliabilityFactor::new(label, weight));
        };

        // 1. Journal; only an empty string counts as absent
        let journal = metadata.journal.to_lowercase();
        if !journal.is_empty() {
            if contains_any(&journal, &cfg.high_impact_journals) {
                apply(HIGH_IMPACT_JOURNAL, cfg.high_impact_bonus);
            } else if contains_any(&journal, &cfg.medium_impact_journals) {
                apply(MEDIUM_IMPACT_JOURNAL, cfg.medium_impact_bonus);
            } else {
                apply(JOURNAL_IDENTIFIED, cfg.identified_journal_bonus);
            }
        }

        // 2. Institution
        let institution = metadata.institution.trim().to_lowercase();
        if !institution.is_empty() {
            if contains_any(&institution, &cfg.prestigious_institutions) {
                apply(PRESTIGIOUS_INSTITUTION, cfg.prestigious_institution_bonus);
            } else {
                apply(ACADEMIC_INSTITUTION, cfg.academic_institution_bonus);
            }
        }

        // 3. Publication year; unparseable or zero years are treated as absent
        if let Some(year) = parse_year(&metadata.publication_year).filter(|y| *y != 0) {
            let current = i64::from(current_year);
            if year >= current - i64::from(cfg.recent_window_years) {
                apply(RECENT_PUBLICATION, cfg.recent_bonus);
            } else if year >= current - i64::from(cfg.current_window_years) {
                apply(CURRENT_PUBLICATION, cfg.current_bonus);
            } else if year < current - i64::from(cfg.outdated_after_years) {
                apply(OUTDATED_PUBLICATION, cfg.outdated_penalty);
            }
        }

        // 4. DOI
        if !metadata.doi.trim().is_empty() {
            apply(VERIFIABLE_DOI, cfg.doi_bonus);
        }

        // 5. Authors
        if metadata.authors.contains(',') || metadata.authors.contains(';') {
            apply(MULTIPLE_AUTHORS, cfg.multiple_authors_bonus);
        }

        let score = score.clamp(0.0, 1.0);
        let level =
            ReliabilityLevel::from_thresholds(score, cfg.high_threshold, cfg.medium_threshold);

        debug!(
            "Reliability assessed: {:.2} ({}) from {} factor(s)",
            score,
            level,
            factors.len()
        );

        ReliabilityResult {
            score,
            level,
            factors,
        }
    }
}

impl Default for ReliabilityAssessor {
    fn default() -> Self {
        Self::default_config()
    }
}

/// Parse the leading integer of a year field.
///
/// Leading whitespace and a sign are accepted and trailing text is ignored,
/// so `" 2021 (online)"` parses as 2021. Digit runs too long for `i64`
/// saturate. Returns `None` when no digits lead.
pub fn parse_year(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(magnitude * sign)
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|n| !n.is_empty() && haystack.contains(n.to_lowercase().as_str()))
}
