//! Upload and fetch command implementations.

use crate::cli::{FetchArgs, RunArgs, UploadArgs};
use crate::commands::build_classifier;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use medclassify_domain::{ClassificationInput, MetadataInput, Source};
use medclassify_pipeline::export::ingestion_csv;
use medclassify_pipeline::{Insights, Progress};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Execute the upload command.
pub async fn execute_upload(args: UploadArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let name = file_name(&args.file);
    let source = Source::File { name };
    ingest(source, args.metadata.into(), &args.run, args.output, config, formatter).await
}

/// Execute the fetch command.
pub async fn execute_fetch(args: FetchArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let source = Source::Url(args.url);
    ingest(source, args.metadata.into(), &args.run, args.output, config, formatter).await
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Print each step to stderr until the sender closes; yields the number printed
fn print_progress(mut progress: watch::Receiver<Progress>, prefix: String) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut printed = 0;
        while progress.changed().await.is_ok() {
            let current = progress.borrow_and_update().clone();
            if let Some(step) = current.step {
                eprintln!("{}[{:>3.0}%] {}", prefix, current.percent, step);
                printed += 1;
            }
        }
        printed
    })
}

async fn ingest(
    source: Source,
    metadata: MetadataInput,
    run: &RunArgs,
    output: Option<PathBuf>,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let classifier = build_classifier(config, run)?;

    // Step progress goes to stderr so it never mixes with JSON output
    let watcher = (formatter.format() == OutputFormat::Table)
        .then(|| print_progress(classifier.subscribe_progress(), formatter.info("")));

    let outcome = classifier.ingest(source, metadata).await;
    // The progress sender lives in the classifier; dropping it lets the watcher drain and exit
    drop(classifier);
    if let Some(watcher) = watcher {
        match watcher.await {
            Ok(steps) => debug!(steps, "Progress watcher finished"),
            Err(e) => debug!(error = %e, "Progress watcher failed"),
        }
    }
    let outcome = outcome?;

    let input = ClassificationInput::from(outcome.content.clone());
    let insights = Insights::derive(&input, &outcome.result);
    println!("{}", formatter.format_ingestion(&outcome, &insights)?);

    if let Some(path) = output {
        fs::write(&path, ingestion_csv(&outcome)?)?;
        eprintln!("{}", formatter.success(&format!("Exported to {}", path.display())));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_progress_printer_drains_last_step() {
        let (sender, receiver) = watch::channel(Progress {
            percent: 0.0,
            step: None,
        });
        let watcher = print_progress(receiver, String::new());
        sender.send_replace(Progress {
            percent: 75.0,
            step: Some("Classifying content"),
        });
        drop(sender);

        // the step sent just before the sender closed is still printed
        assert_eq!(watcher.await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_progress_printer_exits_when_sender_closes() {
        let (sender, receiver) = watch::channel(Progress {
            percent: 0.0,
            step: None,
        });
        let watcher = print_progress(receiver, String::new());
        drop(sender);
        assert_eq!(watcher.await.unwrap(), 0);
    }

    #[test]
    fn test_file_name_strips_directories() {
        assert_eq!(file_name(Path::new("/tmp/data/batch.csv")), "batch.csv");
        assert_eq!(file_name(Path::new("paper.pdf")), "paper.pdf");
    }
}
