//! Configuration for the pipeline

use crate::PipelineError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Simulated timings and randomized fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Delay before a classification result is produced (milliseconds)
    pub classification_delay_ms: u64,

    /// Delay before a summary is produced (milliseconds)
    pub summary_delay_ms: u64,

    /// Delay per URL ingestion step (milliseconds)
    pub url_step_delay_ms: u64,

    /// Delay per file ingestion step (milliseconds)
    pub file_step_delay_ms: u64,

    /// Lower bound of the reported processing time (seconds)
    pub processing_time_min_secs: f64,

    /// Width of the reported processing time range (seconds)
    pub processing_time_spread_secs: f64,

    /// Maximum symmetric jitter added to the aggregate confidence
    pub confidence_jitter: f64,

    /// Year used for recency rules instead of the wall clock
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_year: Option<i32>,
}

impl PipelineConfig {
    /// Classification delay as a Duration
    pub fn classification_delay(&self) -> Duration {
        Duration::from_millis(self.classification_delay_ms)
    }

    /// Summary delay as a Duration
    pub fn summary_delay(&self) -> Duration {
        Duration::from_millis(self.summary_delay_ms)
    }

    /// URL step delay as a Duration
    pub fn url_step_delay(&self) -> Duration {
        Duration::from_millis(self.url_step_delay_ms)
    }

    /// File step delay as a Duration
    pub fn file_step_delay(&self) -> Duration {
        Duration::from_millis(self.file_step_delay_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.processing_time_min_secs < 0.0 || self.processing_time_spread_secs < 0.0 {
            return Err(PipelineError::Config(
                "processing time bounds must be non-negative".to_string(),
            ));
        }
        if !(0.0..=0.5).contains(&self.confidence_jitter) {
            return Err(PipelineError::Config(
                "confidence_jitter must be between 0.0 and 0.5".to_string(),
            ));
        }
        Ok(())
    }

    /// Preset with every simulated delay removed
    pub fn instant() -> Self {
        Self {
            classification_delay_ms: 0,
            summary_delay_ms: 0,
            url_step_delay_ms: 0,
            file_step_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, PipelineError> {
        let config: PipelineConfig = toml::from_str(toml_str)
            .map_err(|e| PipelineError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, PipelineError> {
        toml::to_string_pretty(self)
            .map_err(|e| PipelineError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            classification_delay_ms: 3_000,
            summary_delay_ms: 4_000,
            url_step_delay_ms: 800,
            file_step_delay_ms: 600,
            processing_time_min_secs: 2.5,
            processing_time_spread_secs: 1.5,
            confidence_jitter: 0.0,
            reference_year: None,
        }
    }
}
