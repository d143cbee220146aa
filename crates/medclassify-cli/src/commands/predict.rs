//! Predict and eval command implementations.

use crate::cli::{EvalArgs, PredictArgs};
use crate::commands::build_classifier;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use medclassify_pipeline::prediction::predictions_csv;
use medclassify_pipeline::{read_articles, ArticleRecord};
use std::fs::{self, File};
use std::path::Path;

fn load(path: &Path) -> Result<Vec<ArticleRecord>> {
    Ok(read_articles(File::open(path)?)?)
}

/// Execute the predict command.
pub fn execute_predict(args: PredictArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let records = load(&args.input)?;
    let classifier = build_classifier(config, &args.run)?;
    let batch = classifier.predict_batch(&records)?;
    println!("{}", formatter.format_batch(&batch)?);

    if let Some(path) = args.output {
        fs::write(&path, predictions_csv(&batch)?)?;
        eprintln!("{}", formatter.success(&format!("Predictions saved to {}", path.display())));
    }
    Ok(())
}

/// Execute the eval command.
pub fn execute_eval(args: EvalArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let records = load(&args.data)?;
    let classifier = build_classifier(config, &args.run)?;
    let report = classifier.evaluate_labelled(&records)?;
    println!("{}", formatter.format_evaluation(&report)?);

    if let Some(path) = args.output {
        fs::write(&path, serde_json::to_string_pretty(&report)?)?;
        eprintln!("{}", formatter.success(&format!("Metrics saved to {}", path.display())));
    }
    Ok(())
}
