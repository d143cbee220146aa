//! Scorer error types

use thiserror::Error;

/// Errors raised while building a scorer from a lexicon
#[derive(Error, Debug)]
pub enum ScorerError {
    /// A domain was configured without any terms
    #[error("Lexicon for domain '{0}' has no terms")]
    EmptyLexicon(String),

    /// A term could not be compiled into a matcher
    #[error("Invalid term '{term}': {source}")]
    InvalidTerm {
        /// Offending term
        term: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// The lexicon is missing a domain or lists one twice
    #[error("Lexicon error: {0}")]
    Lexicon(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
