//! Session state management: validation gating, identity-keyed errors,
//! artifact lifecycle, and disk round-trips.

use pdfsuite::compose::OperationSpec;
use pdfsuite::config::Limits;
use pdfsuite::error::{SessionError, ValidationError};
use pdfsuite::session::Session;
use pdfsuite::validate::RawFile;

use crate::common::{corrupt_file, page_count, pdf_file};

#[tokio::test]
async fn validation_rejects_whole_batch_atomically() {
    let mut session = Session::with_limits(Limits::default().with_max_file_bytes(64));

    let result = session.add_files(vec![
        RawFile::pdf("small.pdf", vec![0u8; 16]),
        RawFile::pdf("huge.pdf", vec![0u8; 128]),
    ]);

    assert!(matches!(
        result,
        Err(SessionError::Validation(ValidationError::TooLarge { .. }))
    ));
    assert!(session.inputs().is_empty());
}

#[tokio::test]
async fn count_limit_applies_across_batches() {
    let mut session = Session::with_limits(Limits::default().with_max_inputs(2));
    session
        .add_files(vec![pdf_file("a.pdf", 1), pdf_file("b.pdf", 1)])
        .unwrap();

    let result = session.add_files(vec![pdf_file("c.pdf", 1)]);
    assert!(matches!(
        result,
        Err(SessionError::Validation(ValidationError::TooManyFiles { .. }))
    ));
    assert_eq!(session.inputs().len(), 2);
}

#[tokio::test]
async fn failure_flags_follow_identity_through_reorders() {
    let mut session = Session::new();
    let ids = session
        .add_files(vec![
            pdf_file("a.pdf", 1),
            corrupt_file("broken.pdf"),
            pdf_file("c.pdf", 1),
        ])
        .unwrap();

    assert!(session.submit(OperationSpec::Merge).await.is_err());

    // Move the broken file to the end; the flag must move with it.
    session.reorder_input(1, 2).unwrap();
    let inputs = session.inputs();
    assert_eq!(inputs[2].name, "broken.pdf");
    assert!(inputs[2].has_error);
    assert!(!inputs[0].has_error);
    assert!(!inputs[1].has_error);

    // Identity-keyed removal targets the right file at its new position.
    session.remove_input(ids[1]);
    assert_eq!(session.inputs().len(), 2);
    assert!(session.failures().is_empty());
}

#[tokio::test]
async fn out_of_range_reorder_leaves_order_intact() {
    let mut session = Session::new();
    session
        .add_files(vec![pdf_file("a.pdf", 1), pdf_file("b.pdf", 1)])
        .unwrap();

    assert!(session.reorder_input(0, 9).is_err());

    let names: Vec<String> = session.inputs().iter().map(|i| i.name.clone()).collect();
    assert_eq!(names, vec!["a.pdf", "b.pdf"]);
}

#[tokio::test]
async fn clear_releases_everything_and_is_idempotent() {
    let mut session = Session::new();
    session
        .add_files(vec![pdf_file("a.pdf", 2), pdf_file("b.pdf", 1)])
        .unwrap();
    session.submit(OperationSpec::Merge).await.unwrap();
    assert!(!session.artifacts().is_empty());

    session.clear();
    assert!(session.inputs().is_empty());
    assert!(session.artifacts().is_empty());
    assert!(session.failures().is_empty());

    session.clear();
    assert!(session.inputs().is_empty());
    assert!(session.artifacts().is_empty());
}

#[tokio::test]
async fn successive_runs_supersede_artifacts() {
    let mut session = Session::new();
    session
        .add_files(vec![pdf_file("a.pdf", 1), pdf_file("b.pdf", 2)])
        .unwrap();

    session.submit(OperationSpec::Merge).await.unwrap();
    session.submit(OperationSpec::Merge).await.unwrap();

    // Only the latest run's artifact is held.
    assert_eq!(session.artifacts().len(), 1);
    assert_eq!(page_count(session.artifacts()[0].bytes()), 3);
}

#[tokio::test]
async fn artifact_round_trips_through_the_filesystem() {
    let mut session = Session::new();
    session
        .add_files(vec![pdf_file("a.pdf", 2), pdf_file("b.pdf", 3)])
        .unwrap();
    session.submit(OperationSpec::Merge).await.unwrap();

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("merged.pdf");
    tokio::fs::write(&path, session.artifacts()[0].bytes())
        .await
        .unwrap();

    let bytes = tokio::fs::read(&path).await.unwrap();
    assert_eq!(page_count(&bytes), 5);
}

#[tokio::test]
async fn structured_state_serializes_for_the_shell() {
    let mut session = Session::new();
    session
        .add_files(vec![pdf_file("a.pdf", 1), corrupt_file("broken.pdf")])
        .unwrap();
    assert!(session.submit(OperationSpec::Merge).await.is_err());

    let inputs = serde_json::to_value(session.inputs()).unwrap();
    assert_eq!(inputs[1]["name"], "broken.pdf");
    assert_eq!(inputs[1]["hasError"], true);

    let failures = serde_json::to_value(session.failures()).unwrap();
    assert_eq!(failures[0]["position"], 2);
}
