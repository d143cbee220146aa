//! End-to-end tests of the classification service

use medclassify_domain::{Domain, MetadataInput, ReliabilityLevel, Source};
use medclassify_pipeline::export::ingestion_csv;
use medclassify_pipeline::{
    ClassificationRequest, Classifier, ExportDocument, ExportFormat, FixedRandom, Form,
    MockExtractor, PipelineConfig, PipelineError,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

fn instant_classifier() -> Classifier {
    Classifier::<MockExtractor>::builder(PipelineConfig {
        reference_year: Some(2024),
        ..PipelineConfig::instant()
    })
    .random(FixedRandom(0.0))
    .build(MockExtractor::new().unwrap())
    .unwrap()
}

fn slow_classifier() -> Arc<Classifier> {
    let config = PipelineConfig {
        classification_delay_ms: 200,
        ..PipelineConfig::instant()
    };
    Arc::new(
        Classifier::<MockExtractor>::builder(config)
            .random(FixedRandom(0.0))
            .build(MockExtractor::new().unwrap())
            .unwrap(),
    )
}

#[tokio::test]
async fn test_classify_with_metadata() {
    let classifier = instant_classifier();
    let request = ClassificationRequest::new(
        "  Heart failure and coronary artery disease  ",
        "Cardiac outcomes in patients with hypertension and arrhythmia.",
    )
    .with_metadata(MetadataInput {
        journal: "The Lancet".to_string(),
        authors: "A. Smith, B. Jones".to_string(),
        institution: "Mayo Clinic".to_string(),
        publication_year: "2023".to_string(),
        doi: "10.1000/xyz".to_string(),
    });

    let result = assert_ok!(classifier.classify(request).await);
    assert_eq!(result.scores.primary().0, Domain::Cardiovascular);
    assert!((0.6..=0.98).contains(&result.confidence));
    assert_eq!(result.processing_time, "2.5");
    assert_eq!(result.reliability.level, ReliabilityLevel::High);
    assert_eq!(classifier.latest(), Some(result));
    assert!(!classifier.is_busy(Form::Classification));
}

#[tokio::test]
async fn test_blank_fields_rejected() {
    let classifier = instant_classifier();
    let err = classifier
        .classify(ClassificationRequest::new("   ", "Some abstract"))
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::TitleRequired));

    let err = classifier
        .classify(ClassificationRequest::new("Title", "\n\t"))
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::AbstractRequired));
    assert!(classifier.latest().is_none());
}

#[tokio::test]
async fn test_second_request_is_busy() {
    let classifier = slow_classifier();
    let first = {
        let classifier = Arc::clone(&classifier);
        tokio::spawn(async move {
            classifier
                .classify(ClassificationRequest::new("Heart failure", "Cardiac outcomes"))
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(classifier.is_busy(Form::Classification));

    let second = classifier
        .classify(ClassificationRequest::new("Brain imaging", "Cortex activity"))
        .await;
    assert!(matches!(second, Err(PipelineError::Busy("classification"))));

    // other forms are independent
    assert!(classifier.summarize("The patients improved after treatment.", None).await.is_ok());

    assert!(first.await.unwrap().is_ok());
}

#[tokio::test]
async fn test_cancelled_request_is_stale() {
    let classifier = slow_classifier();
    let pending = {
        let classifier = Arc::clone(&classifier);
        tokio::spawn(async move {
            classifier
                .classify(ClassificationRequest::new("Heart failure", "Cardiac outcomes"))
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(classifier.cancel(Form::Classification).is_some());

    let outcome = pending.await.unwrap();
    assert!(matches!(outcome, Err(PipelineError::Stale(_))));
    assert!(classifier.latest().is_none());
}

#[tokio::test]
async fn test_ingest_file_reports_progress() {
    let classifier = instant_classifier();
    let progress = classifier.subscribe_progress();
    let outcome = classifier
        .ingest(
            Source::File {
                name: "articles.csv".to_string(),
            },
            MetadataInput::default(),
        )
        .await
        .unwrap();

    assert!(outcome.content.title.contains("Leukemia"));
    assert_eq!(outcome.summary.total_articles, 150);
    assert_eq!(outcome.summary.file_type.as_deref(), Some("CSV"));
    assert_eq!(outcome.result.reliability.score, 0.5);
    assert_eq!(progress.borrow().percent, 100.0);
    assert_eq!(classifier.latest_ingestion(), Some(outcome.clone()));

    let csv = ingestion_csv(&outcome).unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("Title,Abstract,Cardiovascular"));
    assert!(lines.next().unwrap().ends_with(",File,Low,2.5"));
}

#[tokio::test]
async fn test_ingest_url_and_rejections() {
    let classifier = instant_classifier();
    let outcome = classifier
        .ingest(
            Source::Url("https://www.nature.com/articles/1".to_string()),
            MetadataInput::default(),
        )
        .await
        .unwrap();
    assert_eq!(outcome.result.scores.primary().0, Domain::Neurological);
    assert_eq!(outcome.summary.total_articles, 1);

    let err = classifier
        .ingest(Source::Url(" ".to_string()), MetadataInput::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::UrlRequired));

    let err = classifier
        .ingest(
            Source::File {
                name: "scan.png".to_string(),
            },
            MetadataInput::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::UnsupportedFile(_)));
    assert!(!classifier.is_busy(Form::Ingestion));
}

#[tokio::test]
async fn test_summaries() {
    let classifier = instant_classifier();
    let err = assert_err!(classifier.summarize("   ", None).await);
    assert!(matches!(err, PipelineError::TextRequired));
    let err = assert_err!(classifier.summarize_url("").await);
    assert!(matches!(err, PipelineError::UrlRequired));

    let summary = assert_ok!(classifier.summarize_url("https://example.org/paper").await);
    assert_eq!(summary.source, "https://example.org/paper");
    assert!(summary.summary.ends_with('.'));
    assert_eq!(classifier.latest_summary(), Some(summary));
}

#[tokio::test]
async fn test_export_document_from_classification() {
    let classifier = instant_classifier();
    let request = ClassificationRequest::new(
        "Hepatorenal syndrome outcomes",
        "Kidney and liver function in cirrhosis with dialysis.",
    );
    let result = classifier.classify(request.clone()).await.unwrap();
    let doc = ExportDocument::new(&request.input, &result);
    assert_eq!(doc.primary_domain, Domain::Hepatorenal);

    let json = doc.render(ExportFormat::Json).unwrap();
    assert_eq!(ExportDocument::from_json(&json).unwrap(), doc);

    let csv = doc.render(ExportFormat::Csv).unwrap();
    assert!(csv.contains("Primary Domain,Hepatorenal"));
}

#[tokio::test]
async fn test_flat_scores_report_last_domain_as_primary() {
    let classifier = instant_classifier();
    let request = ClassificationRequest::new(
        "Quarterly shipping logistics",
        "Containers were loaded onto vessels at the port.",
    );
    let result = classifier.classify(request.clone()).await.unwrap();
    for (_, score) in result.scores.entries() {
        assert_eq!(score, 0.05);
    }

    let doc = ExportDocument::new(&request.input, &result);
    assert_eq!(doc.primary_domain, Domain::Oncological);
    assert_eq!(doc.insights.primary_domain, Domain::Oncological);
    let csv = doc.render(ExportFormat::Csv).unwrap();
    assert!(csv.contains("Primary Domain,Oncological"));
}
