//! Errors surfaced by `medclassify` commands.

use medclassify_pipeline::PipelineError;
use medclassify_reliability::ReliabilityError;
use medclassify_scorer::ScorerError;
use thiserror::Error;

/// Result alias used by every command.
pub type Result<T> = std::result::Result<T, CliError>;

/// Failures a command can report before exiting.
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad or unreadable configuration file
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation, busy or export failure from the pipeline
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Lexicon file that does not parse or validate
    #[error("Lexicon file error: {0}")]
    Lexicon(#[from] ScorerError),

    /// Invalid `[reliability]` section
    #[error(transparent)]
    Reliability(#[from] ReliabilityError),

    /// Reading an input or writing an export failed
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output could not be produced
    #[error("JSON output error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Config file is not valid TOML
    #[error("Config file is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Arguments that clap could not rule out
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
