//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::commands::build_classifier;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use chrono::Utc;
use medclassify_domain::MetadataInput;
use medclassify_pipeline::{ClassificationRequest, ExportDocument, ExportFormat, Insights};
use std::fs;

/// Execute the classify command.
pub async fn execute_classify(args: ClassifyArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let r#abstract = match (args.r#abstract, &args.abstract_file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => {
            return Err(CliError::InvalidInput(
                "An abstract or --abstract-file is required".to_string(),
            ))
        }
    };

    let classifier = build_classifier(config, &args.run)?;
    let metadata: MetadataInput = args.metadata.into();
    let request = ClassificationRequest::new(args.title, r#abstract).with_metadata(metadata);

    let result = classifier.classify(request.clone()).await?;
    let insights = Insights::derive(&request.input, &result);
    println!("{}", formatter.format_classification(&result, &insights)?);

    if let Some(export) = args.export {
        let format: ExportFormat = export.into();
        let now = Utc::now();
        let document = ExportDocument::at(&request.input, &result, now);
        let path = args
            .output
            .unwrap_or_else(|| format.file_name(now).into());
        fs::write(&path, document.render(format)?)?;
        eprintln!("{}", formatter.success(&format!("Exported to {}", path.display())));
    }

    Ok(())
}
