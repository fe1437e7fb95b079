// Error handling across extraction, model loading and reading
// WHY: a bad document and a missing model must surface as different errors
use std::sync::Arc;

use splitcmp::discovery::{self, DiscoveryConfig};
use splitcmp::reader::{DocumentReader, ReaderConfig};
use splitcmp::{
    CompareConfig, Comparator, InputError, PdfTextExtractor, PipelineError, SharedTokenizer,
};

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::fixtures::SIMPLE_PAGES;
use test_utils::{build_pdf, TestFixture};

fn comparator_with(tokenizer: SharedTokenizer) -> Comparator {
    Comparator::new(
        Box::new(PdfTextExtractor::new()),
        Arc::new(tokenizer),
        CompareConfig::default(),
    )
}

#[test]
fn test_plain_text_is_rejected() {
    let result = Comparator::with_defaults().compare(b"Just some text. Not a PDF.");

    match result {
        Err(PipelineError::Input(InputError::NotPdf)) => {}
        other => panic!("Expected NotPdf, got {other:?}"),
    }
}

#[test]
fn test_empty_bytes_are_rejected() {
    let err = Comparator::with_defaults().compare(&[]).unwrap_err();
    assert!(!err.is_model_unavailable());
}

#[test]
fn test_truncated_pdf_is_malformed() {
    let pdf = build_pdf(SIMPLE_PAGES);
    let truncated = &pdf[..pdf.len() / 3];

    match Comparator::with_defaults().compare(truncated) {
        Err(PipelineError::Input(InputError::Malformed(_))) => {}
        other => panic!("Expected Malformed, got {other:?}"),
    }
}

#[test]
fn test_failed_extraction_is_not_cached() {
    let comparator = Comparator::with_defaults();
    assert!(comparator.compare(b"%PDF-1.4 garbage").is_err());
    assert_eq!(comparator.cached_documents(), 0);
}

#[test]
fn test_missing_model_is_distinct_from_bad_input() {
    let fixture = TestFixture::new();
    let comparator = comparator_with(SharedTokenizer::from_file(
        fixture.root_path.join("missing-model.json"),
    ));

    let err = comparator.compare(&build_pdf(SIMPLE_PAGES)).unwrap_err();
    assert!(err.is_model_unavailable(), "Expected ModelUnavailable, got {err:?}");
    assert!(err.to_string().contains("unavailable"));

    // The extracted text is still cached, so a retry only needs the model
    assert_eq!(comparator.cached_documents(), 1);
}

#[test]
fn test_model_recovers_after_file_appears() {
    let fixture = TestFixture::new();
    let model_path = fixture.root_path.join("model.json");
    let comparator = comparator_with(SharedTokenizer::from_file(&model_path));
    let pdf = build_pdf(SIMPLE_PAGES);

    assert!(comparator.compare(&pdf).unwrap_err().is_model_unavailable());

    fixture.create_file(
        "model.json",
        br#"{"language": "english", "abbreviations": ["dr"]}"#,
    );
    let comparison = comparator.compare(&pdf).expect("Model should load on retry");
    assert_eq!(comparison.report.semantic().sentence_count, 3);
}

#[test]
fn test_invalid_model_json_is_unavailable() {
    let fixture = TestFixture::new();
    let model_path = fixture.create_file("model.json", b"{ not json");
    let tokenizer = SharedTokenizer::from_file(model_path);

    let err = tokenizer.initialize().unwrap_err();
    assert!(err.to_string().contains("model.json"));
    assert!(!tokenizer.is_initialized());
}

#[test]
fn test_empty_text_does_not_need_the_model() {
    let fixture = TestFixture::new();
    let comparator = comparator_with(SharedTokenizer::from_file(
        fixture.root_path.join("missing-model.json"),
    ));

    let comparison = comparator.compare_text("").expect("Empty text should short-circuit");
    assert!(comparison.semantic_sentences.is_empty());
}

#[tokio::test]
async fn test_unreadable_file_is_input_error() {
    let fixture = TestFixture::new();
    let missing = fixture.root_path.join("gone.pdf");

    let reader = DocumentReader::new(ReaderConfig::default());
    match reader.read_document(&missing).await {
        Err(InputError::Read { path, .. }) => assert_eq!(path, missing),
        other => panic!("Expected InputError::Read, got {other:?}"),
    }

    // At the CLI edge the typed error survives anyhow wrapping
    let err: anyhow::Error = reader.read_document(&missing).await.unwrap_err().into();
    assert!(matches!(
        err.downcast_ref::<InputError>(),
        Some(InputError::Read { .. })
    ));
    assert!(err.to_string().contains("gone.pdf"));
}

#[tokio::test]
async fn test_discovery_of_missing_input_fails() {
    let fixture = TestFixture::new();
    let missing = fixture.root_path.join("nowhere");
    let result = discovery::collect_pdf_files(&missing, DiscoveryConfig::default()).await;
    assert!(result.is_err());
}
