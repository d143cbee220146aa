//! MedClassify Reliability
//!
//! Turns bibliographic metadata into a source trust score with an itemized
//! explanation.
//!
//! The assessor provides:
//! - Journal impact tiers
//! - Institution prestige
//! - Publication recency
//! - DOI presence and author count
//!
//! # Examples
//!
//! ```no_run
//! use medclassify_domain::MetadataInput;
//! use medclassify_reliability::{ReliabilityAssessor, ReliabilityConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let assessor = ReliabilityAssessor::new(ReliabilityConfig::default())?;
//! let metadata = MetadataInput {
//!     journal: "The Lancet".to_string(),
//!     doi: "10.1016/example".to_string(),
//!     ..Default::default()
//! };
//!
//! let result = assessor.assess(&metadata, 2025);
//! println!("{} ({:.2})", result.level, result.score);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod assessor;
mod config;
mod error;

pub use assessor::{parse_year, ReliabilityAssessor};
pub use config::ReliabilityConfig;
pub use error::ReliabilityError;
