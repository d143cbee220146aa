//! MedClassify Domain Layer
//!
//! This crate holds the value types shared by every other MedClassify crate
//! and the trait seams behind which the non-deterministic or fabricated
//! collaborators live.
//!
//! ## Key Concepts
//!
//! - **Domain**: one of the four fixed medical categories
//! - **DomainScores**: a multi-label confidence vector over all four domains
//! - **Reliability**: a trust score derived from bibliographic metadata
//! - **ClassificationResult**: the record handed to presentation and export
//!
//! ## Architecture
//!
//! - No I/O and no algorithms, only data and interfaces
//! - Scoring lives in `medclassify-scorer`, trust assessment in
//!   `medclassify-reliability`, orchestration in `medclassify-pipeline`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod content;
pub mod domain;
pub mod input;
pub mod reliability;
pub mod result;
pub mod traits;

// Re-exports for convenience
pub use content::{ExtractedContent, Source};
pub use domain::{Domain, DomainScores};
pub use input::{ClassificationInput, MetadataInput};
pub use reliability::{ReliabilityFactor, ReliabilityLevel, ReliabilityResult};
pub use result::ClassificationResult;
pub use traits::{ContentExtractor, RandomSource};
