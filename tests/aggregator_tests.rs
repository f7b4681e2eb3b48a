//! Outcome aggregation and error classification.

use std::path::PathBuf;
use thumbforge::{BatchResult, ExtractionErrorKind, ExtractionOutcome};

fn success(name: &str) -> ExtractionOutcome {
    ExtractionOutcome {
        path: PathBuf::from(name),
        result: Ok(()),
    }
}

fn failure(name: &str, error: ExtractionErrorKind) -> ExtractionOutcome {
    ExtractionOutcome {
        path: PathBuf::from(name),
        result: Err(error),
    }
}

fn sample_outcomes() -> Vec<ExtractionOutcome> {
    vec![
        success("a.jpg"),
        success("b.jpg"),
        failure(
            "c.bin",
            ExtractionErrorKind::ExtractionFailedNonFatal("no decoder".into()),
        ),
        failure("d.jpg", ExtractionErrorKind::Timeout("120s budget".into())),
        failure(
            "e.jpg",
            ExtractionErrorKind::ResourceUnavailable("renderer gone".into()),
        ),
        success("f.png"),
    ]
}

fn surfaced_multiset(batch: &BatchResult) -> Vec<(PathBuf, ExtractionErrorKind)> {
    let mut surfaced: Vec<_> = batch
        .failures
        .iter()
        .map(|f| (f.path.clone(), f.error.clone()))
        .collect();
    surfaced.sort_by(|a, b| a.0.cmp(&b.0));
    surfaced
}

#[test]
fn only_extraction_failed_non_fatal_is_benign() {
    use ExtractionErrorKind::*;

    let kinds = [
        InitializationFailed("x".into()),
        PathResolutionFailed("x".into()),
        CapabilityUnavailable("x".into()),
        InvalidArgument("x".into()),
        ExtractionFailedNonFatal("x".into()),
        Timeout("x".into()),
        ResourceUnavailable("x".into()),
        UnsupportedFastPath("x".into()),
    ];

    let benign: Vec<_> = kinds.iter().filter(|k| k.is_benign()).collect();
    assert_eq!(benign.len(), 1);
    assert!(matches!(benign[0], ExtractionFailedNonFatal(_)));
}

#[test]
fn benign_failures_are_counted_but_not_surfaced() {
    let batch = BatchResult::from_outcomes(vec![
        success("a.jpg"),
        failure(
            "b.bin",
            ExtractionErrorKind::ExtractionFailedNonFatal("no decoder".into()),
        ),
    ]);

    assert_eq!(batch.succeeded, 1);
    assert_eq!(batch.suppressed, 1);
    assert!(batch.failures.is_empty());
    assert_eq!(batch.processed(), 2);
}

#[test]
fn non_benign_failures_are_surfaced_with_diagnostics() {
    let batch = BatchResult::from_outcomes(sample_outcomes());

    assert_eq!(batch.succeeded, 3);
    assert_eq!(batch.suppressed, 1);
    assert_eq!(batch.failures.len(), 2);
    assert_eq!(batch.processed(), 6);

    let surfaced = surfaced_multiset(&batch);
    assert!(matches!(surfaced[0].1, ExtractionErrorKind::Timeout(_)));
    assert!(matches!(
        surfaced[1].1,
        ExtractionErrorKind::ResourceUnavailable(_)
    ));
}

#[test]
fn aggregation_is_order_insensitive() {
    let forward = BatchResult::from_outcomes(sample_outcomes());

    let mut reversed_input = sample_outcomes();
    reversed_input.reverse();
    let reversed = BatchResult::from_outcomes(reversed_input);

    let mut rotated_input = sample_outcomes();
    rotated_input.rotate_left(3);
    let rotated = BatchResult::from_outcomes(rotated_input);

    for other in [&reversed, &rotated] {
        assert_eq!(forward.succeeded, other.succeeded);
        assert_eq!(forward.suppressed, other.suppressed);
        assert_eq!(surfaced_multiset(&forward), surfaced_multiset(other));
    }
}

#[test]
fn incremental_and_bulk_aggregation_agree() {
    let mut incremental = BatchResult::default();
    for outcome in sample_outcomes() {
        incremental.record(outcome);
    }

    let bulk = BatchResult::from_outcomes(sample_outcomes());

    assert_eq!(incremental.succeeded, bulk.succeeded);
    assert_eq!(incremental.suppressed, bulk.suppressed);
    assert_eq!(surfaced_multiset(&incremental), surfaced_multiset(&bulk));
}
