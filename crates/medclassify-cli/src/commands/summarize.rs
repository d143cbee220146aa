//! Summarize command implementation.

use crate::cli::{RunArgs, SummarizeArgs};
use crate::commands::build_classifier;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the summarize command.
pub async fn execute_summarize(args: SummarizeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let run = RunArgs {
        seed: None,
        instant: args.instant,
        lexicon: None,
    };
    let classifier = build_classifier(config, &run)?;

    let summary = match (args.text, args.url) {
        (Some(text), _) => classifier.summarize(&text, None).await?,
        (None, Some(url)) => classifier.summarize_url(&url).await?,
        (None, None) => {
            return Err(CliError::InvalidInput("Either --text or --url is required".to_string()))
        }
    };
    println!("{}", formatter.format_summary(&summary)?);
    Ok(())
}
