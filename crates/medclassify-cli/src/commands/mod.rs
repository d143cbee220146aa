//! Command implementations.

pub mod classify;
pub mod config;
pub mod ingest;
pub mod predict;
pub mod reliability;
pub mod summarize;

pub use self::classify::execute_classify;
pub use self::config::execute_config;
pub use self::ingest::{execute_fetch, execute_upload};
pub use self::predict::{execute_eval, execute_predict};
pub use self::reliability::execute_reliability;
pub use self::summarize::execute_summarize;

use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::Result;
use medclassify_pipeline::{Classifier, MockExtractor, PipelineConfig, SeededRandom};
use medclassify_scorer::Lexicon;
use std::fs;

/// Build a classifier from the loaded configuration and run flags.
pub fn build_classifier(config: &Config, run: &RunArgs) -> Result<Classifier> {
    let pipeline = if run.instant {
        PipelineConfig {
            reference_year: config.pipeline.reference_year,
            confidence_jitter: config.pipeline.confidence_jitter,
            ..PipelineConfig::instant()
        }
    } else {
        config.pipeline.clone()
    };
    let random = match run.seed {
        Some(seed) => SeededRandom::seeded(seed),
        None => SeededRandom::from_entropy(),
    };

    let mut builder = Classifier::<MockExtractor>::builder(pipeline)
        .reliability(config.reliability.clone())
        .random(random);
    if let Some(path) = &run.lexicon {
        builder = builder.lexicon(Lexicon::from_toml(&fs::read_to_string(path)?)?);
    }
    Ok(builder.build(MockExtractor::new()?)?)
}
