//! Integration tests for building, editing and persisting the deck.

use pdfdeck::deck::{Deck, DeckStore};
use pdfdeck::error::PdfDeckError;
use pdfdeck::utils::collect_paths_for_patterns;
use pdfdeck::validation::Validator;
use tempfile::TempDir;

use crate::common::{write_garbage, write_pdf};

#[tokio::test]
async fn test_add_from_glob_keeps_valid_files_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let b = write_pdf(temp_dir.path(), "b.pdf", 1);
    let a = write_pdf(temp_dir.path(), "a.pdf", 2);
    write_garbage(temp_dir.path(), "broken.pdf");

    let pattern = temp_dir.path().join("*.pdf").display().to_string();
    let paths = collect_paths_for_patterns([pattern]).unwrap();
    assert_eq!(paths.len(), 3);

    let summary = Validator::new().validate_files(&paths, true).await.unwrap();
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.total_pages, 3);

    let mut deck = Deck::default();
    assert_eq!(deck.add(summary.valid_paths()), 2);
    assert_eq!(deck.files(), [a, b]);
}

#[tokio::test]
async fn test_deck_survives_reload_after_edits() {
    let temp_dir = TempDir::new().unwrap();
    let store = DeckStore::new(temp_dir.path().join("deck.json"));
    let files: Vec<_> = ["one.pdf", "two.pdf", "three.pdf"]
        .iter()
        .map(|name| write_pdf(temp_dir.path(), name, 1))
        .collect();

    let mut deck = store.load().await.unwrap();
    assert!(deck.is_empty());
    deck.add(files.clone());
    deck.move_down(0);
    store.save(&deck).await.unwrap();

    let mut deck = store.load().await.unwrap();
    assert_eq!(
        deck.files(),
        [files[1].clone(), files[0].clone(), files[2].clone()]
    );

    let removed = deck.remove(&[2, 0]);
    assert_eq!(removed, [files[1].clone(), files[2].clone()]);
    store.save(&deck).await.unwrap();

    let deck = store.load().await.unwrap();
    assert_eq!(deck.files(), [files[0].clone()]);
}

#[tokio::test]
async fn test_targets_resolve_against_deck() {
    let temp_dir = TempDir::new().unwrap();
    let first = write_pdf(temp_dir.path(), "first.pdf", 1);
    let deck = Deck::from_paths([first.clone()]);

    assert_eq!(deck.resolve_target("1").unwrap(), first);
    assert!(matches!(
        deck.resolve_target("2"),
        Err(PdfDeckError::InvalidPosition { position: 2, len: 1 })
    ));
    assert_eq!(
        deck.resolve_target("other.pdf").unwrap(),
        std::path::PathBuf::from("other.pdf")
    );
    assert!(matches!(
        Deck::default().resolve_target("1"),
        Err(PdfDeckError::EmptyDeck)
    ));
}

#[test]
fn test_single_selection_required() {
    let deck = Deck::from_paths(["a.pdf", "b.pdf"].map(Into::into));

    assert!(deck.select_one(&[1], "split").is_ok());
    assert!(matches!(
        deck.select_one(&[0, 1], "split"),
        Err(PdfDeckError::SelectExactlyOne { .. })
    ));
    assert!(deck.select_one(&[], "extract").is_err());
}
