//! MedClassify Scorer
//!
//! Weighted lexical matching that turns an article title and abstract into a
//! four-way multi-label confidence vector, plus the aggregator that reduces
//! that vector to a single confidence scalar.
//!
//! # Architecture
//!
//! ```text
//! (title, abstract) → DomainScorer → raw scores → decision rule → DomainScores
//!                                                          ↓
//!                                             ConfidenceAggregator → f64
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use medclassify_domain::ClassificationInput;
//! use medclassify_scorer::{ConfidenceAggregator, DomainScorer};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scorer = DomainScorer::with_default_lexicon()?;
//! let input = ClassificationInput::new(
//!     "Myocardial infarction outcomes after stent placement",
//!     "Coronary artery angioplasty and cholesterol management.",
//! );
//!
//! let scores = scorer.score(&input);
//! let confidence = ConfidenceAggregator::default().aggregate(&scores);
//! println!("{:?} ({:.2})", scores.primary(), confidence);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod aggregator;
mod error;
mod lexicon;
mod scorer;

pub use aggregator::ConfidenceAggregator;
pub use error::ScorerError;
pub use lexicon::{DomainLexicon, Lexicon};
pub use scorer::{DecisionBranch, DomainBreakdown, DomainScorer, ScoreReport};
