//! Command-level tests that run the pipeline without simulated delays

use medclassify_cli::cli::{
    ClassifyArgs, EvalArgs, ExportArg, MetadataArgs, PredictArgs, RunArgs, SummarizeArgs, UploadArgs,
};
use medclassify_cli::commands::{
    execute_classify, execute_eval, execute_predict, execute_summarize, execute_upload,
};
use medclassify_cli::config::OutputFormat;
use medclassify_cli::{CliError, Config, Formatter};
use medclassify_pipeline::{ExportDocument, PipelineError};
use std::fs;
use tempfile::tempdir;

fn instant() -> RunArgs {
    RunArgs {
        seed: Some(42),
        instant: true,
        lexicon: None,
    }
}

fn quiet() -> Formatter {
    Formatter::new(OutputFormat::Quiet, false)
}

#[tokio::test]
async fn test_classify_exports_json() {
    let dir = tempdir().unwrap();
    let abstract_path = dir.path().join("abstract.txt");
    fs::write(&abstract_path, "Kidney and liver function in cirrhosis with dialysis.").unwrap();
    let output = dir.path().join("result.json");

    let args = ClassifyArgs {
        title: "Hepatorenal syndrome outcomes".to_string(),
        r#abstract: None,
        abstract_file: Some(abstract_path),
        metadata: MetadataArgs::default(),
        run: instant(),
        export: Some(ExportArg::Json),
        output: Some(output.clone()),
    };
    execute_classify(args, &Config::default(), &quiet()).await.unwrap();

    let document = ExportDocument::from_json(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(document.title, "Hepatorenal syndrome outcomes");
    assert_eq!(document.primary_domain.key(), "hepatorenal");
}

#[tokio::test]
async fn test_classify_rejects_blank_title() {
    let args = ClassifyArgs {
        title: "  ".to_string(),
        r#abstract: Some("Cardiac outcomes".to_string()),
        abstract_file: None,
        metadata: MetadataArgs::default(),
        run: instant(),
        export: None,
        output: None,
    };
    let err = execute_classify(args, &Config::default(), &quiet()).await.unwrap_err();
    assert!(matches!(err, CliError::Pipeline(PipelineError::TitleRequired)));
}

#[tokio::test]
async fn test_upload_writes_csv() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("ingested.csv");
    let args = UploadArgs {
        file: "papers/batch.CSV".into(),
        metadata: MetadataArgs::default(),
        run: instant(),
        output: Some(output.clone()),
    };
    execute_upload(args, &Config::default(), &quiet()).await.unwrap();

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("Title,Abstract,"));
    assert!(csv.contains("Acute Myeloid Leukemia"));
}

#[tokio::test]
async fn test_upload_rejects_unknown_extension() {
    let args = UploadArgs {
        file: "scan.png".into(),
        metadata: MetadataArgs::default(),
        run: instant(),
        output: None,
    };
    let err = execute_upload(args, &Config::default(), &quiet()).await.unwrap_err();
    assert!(matches!(err, CliError::Pipeline(PipelineError::UnsupportedFile(_))));
}

#[tokio::test]
async fn test_summarize_requires_text() {
    let args = SummarizeArgs {
        text: Some("   ".to_string()),
        url: None,
        instant: true,
    };
    let err = execute_summarize(args, &Config::default(), &quiet()).await.unwrap_err();
    assert!(matches!(err, CliError::Pipeline(PipelineError::TextRequired)));
}

#[tokio::test]
async fn test_upload_with_progress_output() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("ingested.csv");
    let args = UploadArgs {
        file: "notes.txt".into(),
        metadata: MetadataArgs::default(),
        run: instant(),
        output: Some(output.clone()),
    };
    execute_upload(args, &Config::default(), &Formatter::new(OutputFormat::Table, false))
        .await
        .unwrap();
    assert!(output.exists());
}

const ARTICLES: &str = "\
title,abstract,group
Acute kidney injury in cirrhosis,\"Renal function, creatinine and albumin were measured in patients with liver cirrhosis and ascites undergoing dialysis.\",hepatorenal
Heart failure,Cardiac outcomes after coronary stenting,
";

#[test]
fn test_predict_writes_csv() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("articles.csv");
    fs::write(&input, ARTICLES).unwrap();
    let output = dir.path().join("predictions.csv");

    let args = PredictArgs {
        input,
        run: instant(),
        output: Some(output.clone()),
    };
    execute_predict(args, &Config::default(), &quiet()).unwrap();

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("id,title,group,predicted_labels,prob_cardiovascular"));
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("1,Acute kidney injury in cirrhosis,hepatorenal,"));
}

#[test]
fn test_eval_writes_json() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("labelled.csv");
    fs::write(&data, ARTICLES).unwrap();
    let output = dir.path().join("metrics.json");

    let args = EvalArgs {
        data,
        run: instant(),
        output: Some(output.clone()),
    };
    execute_eval(args, &Config::default(), &quiet()).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(value["samples"], 1);
    assert_eq!(value["skipped"], 1);
    assert!(value["weightedF1"].as_f64().is_some());
}

#[test]
fn test_predict_rejects_csv_without_text_columns() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("other.csv");
    fs::write(&input, "name,value\na,1\n").unwrap();

    let args = PredictArgs {
        input,
        run: instant(),
        output: None,
    };
    let err = execute_predict(args, &Config::default(), &quiet()).unwrap_err();
    assert!(matches!(err, CliError::Pipeline(PipelineError::MissingColumns)));
}
