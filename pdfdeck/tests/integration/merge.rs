//! Integration tests for merging the deck.

use pdfdeck::config::{CompressionLevel, MergeConfig, Metadata, OverwriteMode};
use pdfdeck::deck::Deck;
use pdfdeck::error::PdfDeckError;
use pdfdeck::ops::{DocumentInfo, Merger};
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{page_labels, write_garbage, write_pdf};

#[rstest]
#[case(CompressionLevel::None)]
#[case(CompressionLevel::Standard)]
#[case(CompressionLevel::Maximum)]
#[tokio::test]
async fn test_merge_follows_deck_order(#[case] compression: CompressionLevel) {
    let temp_dir = TempDir::new().unwrap();
    let intro = write_pdf(temp_dir.path(), "intro.pdf", 1);
    let body = write_pdf(temp_dir.path(), "body.pdf", 2);

    let mut deck = Deck::from_paths([intro, body]);
    deck.move_up(1);

    let output = temp_dir.path().join("merged.pdf");
    let config = MergeConfig {
        compression,
        ..MergeConfig::new(deck.files().to_vec(), output.clone())
    };

    let (stats, write) = Merger::new().merge_to_file(&config).await.unwrap();

    assert_eq!(stats.files_merged, 2);
    assert_eq!(stats.total_pages, 3);
    assert_eq!(write.output_path, output);
    assert_eq!(page_labels(&output), ["body-1", "body-2", "intro-1"]);
}

#[tokio::test]
async fn test_merge_sets_metadata() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("book.pdf");
    let config = MergeConfig {
        metadata: Metadata::new(Some("Handbook".into()), Some("Ops".into()), None, None),
        ..MergeConfig::new(
            vec![
                write_pdf(temp_dir.path(), "a.pdf", 1),
                write_pdf(temp_dir.path(), "b.pdf", 1),
            ],
            output.clone(),
        )
    };

    Merger::new().merge_to_file(&config).await.unwrap();

    let info = DocumentInfo::read(&output).await.unwrap();
    assert_eq!(info.page_count, 2);
    assert_eq!(info.metadata.title.as_deref(), Some("Handbook"));
    assert_eq!(info.metadata.author.as_deref(), Some("Ops"));
    assert_eq!(info.metadata.producer.as_deref(), Some("pdfdeck"));
}

#[tokio::test]
async fn test_merge_skips_unreadable_with_continue_on_error() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("merged.pdf");
    let inputs = vec![
        write_pdf(temp_dir.path(), "a.pdf", 1),
        write_garbage(temp_dir.path(), "bad.pdf"),
        write_pdf(temp_dir.path(), "c.pdf", 1),
    ];

    let strict = MergeConfig::new(inputs.clone(), output.clone());
    assert!(Merger::new().merge_to_file(&strict).await.is_err());
    assert!(!output.exists());

    let lenient = MergeConfig {
        continue_on_error: true,
        ..strict
    };
    let (stats, _) = Merger::new().merge_to_file(&lenient).await.unwrap();

    assert_eq!(stats.files_merged, 2);
    assert_eq!(stats.files_skipped, 1);
    assert_eq!(page_labels(&output), ["a-1", "c-1"]);
}

#[tokio::test]
async fn test_merge_respects_existing_output() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("merged.pdf");
    std::fs::write(&output, b"keep me").unwrap();
    let inputs = vec![
        write_pdf(temp_dir.path(), "a.pdf", 1),
        write_pdf(temp_dir.path(), "b.pdf", 1),
    ];

    for mode in [OverwriteMode::Prompt, OverwriteMode::NoClobber] {
        let config = MergeConfig {
            overwrite_mode: mode,
            ..MergeConfig::new(inputs.clone(), output.clone())
        };
        let err = Merger::new().merge_to_file(&config).await.unwrap_err();
        assert!(matches!(err, PdfDeckError::OutputExists { .. }));
        assert_eq!(std::fs::read(&output).unwrap(), b"keep me");
    }

    let config = MergeConfig {
        overwrite_mode: OverwriteMode::Force,
        ..MergeConfig::new(inputs, output.clone())
    };
    Merger::new().merge_to_file(&config).await.unwrap();
    assert_eq!(page_labels(&output), ["a-1", "b-1"]);
}

#[tokio::test]
async fn test_merge_needs_two_files() {
    let temp_dir = TempDir::new().unwrap();
    let config = MergeConfig::new(
        vec![write_pdf(temp_dir.path(), "only.pdf", 4)],
        temp_dir.path().join("merged.pdf"),
    );

    let err = Merger::new().merge_to_file(&config).await.unwrap_err();
    assert!(matches!(err, PdfDeckError::NotEnoughFiles { found: 1, .. }));
}
