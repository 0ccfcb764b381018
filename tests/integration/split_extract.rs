//! Split and extract behavior, including archive packaging.

use std::io::Cursor;

use rstest::rstest;

use pdfsuite::compose::OperationSpec;
use pdfsuite::error::{CompositionError, SessionError};
use pdfsuite::session::Session;

use crate::common::{corrupt_file, page_count, pdf_file};

#[tokio::test]
async fn split_all_bundles_every_page_in_order() {
    let mut session = Session::new();
    session.add_files(vec![pdf_file("doc.pdf", 5)]).unwrap();

    session.submit(OperationSpec::SplitAll).await.unwrap();

    let artifacts = session.artifacts();
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].name(), "split-pages.zip");
    assert_eq!(artifacts[0].media_type(), "application/zip");

    let mut archive = zip::ZipArchive::new(Cursor::new(artifacts[0].bytes().to_vec())).unwrap();
    assert_eq!(archive.len(), 5);
    for idx in 0..5 {
        let mut entry = archive.by_index(idx).unwrap();
        assert_eq!(entry.name(), format!("split-file-{}.pdf", idx + 1));

        let mut bytes = Vec::new();
        std::io::copy(&mut entry, &mut bytes).unwrap();
        assert_eq!(page_count(&bytes), 1);
    }
}

#[tokio::test]
async fn split_of_corrupt_input_is_fatal() {
    let mut session = Session::new();
    session.add_files(vec![corrupt_file("broken.pdf")]).unwrap();

    let result = session.submit(OperationSpec::SplitAll).await;
    assert!(matches!(
        result,
        Err(SessionError::Composition(CompositionError::InvalidInput { .. }))
    ));
    assert!(session.artifacts().is_empty());
}

#[tokio::test]
async fn extract_range_copies_the_requested_pages() {
    let mut session = Session::new();
    session.add_files(vec![pdf_file("doc.pdf", 10)]).unwrap();

    session
        .submit(OperationSpec::ExtractRange { start: 2, end: 4 })
        .await
        .unwrap();

    let artifacts = session.artifacts();
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].name(), "split-file-2-4.pdf");
    assert_eq!(page_count(artifacts[0].bytes()), 3);
}

#[tokio::test]
async fn extract_full_document_works() {
    let mut session = Session::new();
    session.add_files(vec![pdf_file("doc.pdf", 4)]).unwrap();

    session
        .submit(OperationSpec::ExtractRange { start: 1, end: 4 })
        .await
        .unwrap();

    assert_eq!(page_count(session.artifacts()[0].bytes()), 4);
}

#[rstest]
#[case::zero_start(0, 3)]
#[case::end_before_start(4, 2)]
#[case::end_past_document(2, 6)]
#[tokio::test]
async fn invalid_ranges_are_rejected_without_output(#[case] start: u32, #[case] end: u32) {
    let mut session = Session::new();
    session.add_files(vec![pdf_file("doc.pdf", 5)]).unwrap();

    let result = session
        .submit(OperationSpec::ExtractRange { start, end })
        .await;

    assert!(matches!(
        result,
        Err(SessionError::Composition(CompositionError::InvalidRange { .. }))
    ));
    assert!(session.artifacts().is_empty());
}

#[tokio::test]
async fn single_input_operations_reject_multiple_inputs() {
    let mut session = Session::new();
    session
        .add_files(vec![pdf_file("a.pdf", 1), pdf_file("b.pdf", 1)])
        .unwrap();

    for spec in [
        OperationSpec::SplitAll,
        OperationSpec::ExtractRange { start: 1, end: 1 },
    ] {
        let result = session.submit(spec).await;
        assert!(matches!(
            result,
            Err(SessionError::Composition(CompositionError::InvalidInput { .. }))
        ));
    }
}
