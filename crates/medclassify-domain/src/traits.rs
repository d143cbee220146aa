//! Trait definitions for external interactions
//!
//! These traits mark the collaborators that are either random or fabricated,
//! so that tests can substitute fixed implementations and a real extractor
//! can replace the canned one without touching the scoring core.

use crate::{ExtractedContent, Source};

/// Source of uniform random numbers in `[0, 1)`
///
/// Implemented by the pipeline layer (medclassify-pipeline)
pub trait RandomSource {
    /// Next sample in `[0, 1)`
    fn next_f64(&mut self) -> f64;
}

/// Turns a source into a title and abstract
///
/// Implemented by the pipeline layer (medclassify-pipeline)
pub trait ContentExtractor {
    /// Error type for extraction
    type Error;

    /// Extract title and abstract from `source`
    fn extract(&self, source: &Source) -> Result<ExtractedContent, Self::Error>;
}
