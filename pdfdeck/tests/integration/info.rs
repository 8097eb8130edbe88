//! Integration tests for document information.

use lopdf::{Object, dictionary};
use pdfdeck::error::PdfDeckError;
use pdfdeck::ops::DocumentInfo;
use tempfile::TempDir;

use crate::common::{write_garbage, write_pdf, write_pdf_with_info};

#[tokio::test]
async fn test_info_reads_metadata() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_pdf_with_info(
        temp_dir.path(),
        "paper.pdf",
        5,
        Some(dictionary! {
            "Title" => Object::string_literal("On Decks"),
            "Author" => Object::string_literal("R. Jones"),
        }),
    );

    let info = DocumentInfo::read(&path).await.unwrap();

    assert_eq!(info.file_name, "paper.pdf");
    assert_eq!(info.page_count, 5);
    assert_eq!(
        info.metadata_fields(),
        [("Title", "On Decks"), ("Author", "R. Jones")]
    );

    let json: serde_json::Value = serde_json::from_str(&info.to_json().unwrap()).unwrap();
    assert_eq!(json["pageCount"], 5);
    assert_eq!(json["metadata"]["title"], "On Decks");
}

#[tokio::test]
async fn test_info_without_metadata() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_pdf(temp_dir.path(), "plain.pdf", 1);

    let info = DocumentInfo::read(&path).await.unwrap();
    assert!(info.metadata_fields().is_empty());
    assert!(info.file_size > 0);
}

#[tokio::test]
async fn test_info_rejects_non_pdf() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_garbage(temp_dir.path(), "fake.pdf");

    let err = DocumentInfo::read(&path).await.unwrap_err();
    assert!(err.is_recoverable());
    assert!(!matches!(err, PdfDeckError::FileNotFound { .. }));
}
