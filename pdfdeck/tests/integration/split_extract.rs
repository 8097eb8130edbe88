//! Integration tests for splitting and extracting pages.

use pdfdeck::config::{ExtractConfig, OverwriteMode, PageSpan, SplitConfig};
use pdfdeck::error::PdfDeckError;
use pdfdeck::ops::{Extractor, Splitter};
use tempfile::TempDir;

use crate::common::{page_labels, write_pdf};

#[tokio::test]
async fn test_split_writes_one_file_per_page() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "slides.pdf", 3);
    let out_dir = temp_dir.path().join("out");
    std::fs::create_dir(&out_dir).unwrap();

    let result = Splitter::new()
        .split(&SplitConfig::new(input, out_dir.clone()))
        .await
        .unwrap();

    assert_eq!(result.page_count(), 3);
    for n in 1..=3 {
        let page = out_dir.join(format!("slides_page_{n}.pdf"));
        assert_eq!(page_labels(&page), [format!("slides-{n}")]);
    }
}

#[tokio::test]
async fn test_split_plan_reports_conflicts() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "doc.pdf", 2);
    let existing = temp_dir.path().join("doc_page_2.pdf");
    std::fs::write(&existing, b"old").unwrap();

    let config = SplitConfig::new(input, temp_dir.path().to_path_buf());
    let splitter = Splitter::new();

    let plan = splitter.plan(&config).await.unwrap();
    assert_eq!(plan.conflicts(), [&existing]);

    assert!(matches!(
        splitter.split(&config).await,
        Err(PdfDeckError::OutputExists { .. })
    ));

    let no_clobber = SplitConfig {
        overwrite_mode: OverwriteMode::NoClobber,
        ..config.clone()
    };
    assert!(splitter.plan(&no_clobber).await.is_err());

    // Confirmed overwrite: execute the plan as is.
    let result = splitter.execute(plan).await.unwrap();
    assert_eq!(result.outputs.len(), 2);
    assert_eq!(page_labels(&existing), ["doc-2"]);
}

#[tokio::test]
async fn test_extract_span_to_default_name() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "book.pdf", 6);
    let span = PageSpan::new(2, 4).unwrap();
    let output = temp_dir.path().join(span.default_output_name());

    let result = Extractor::new()
        .extract(&ExtractConfig::new(input, span, Some(output.clone())))
        .await
        .unwrap();

    assert_eq!(result.source_pages, 6);
    assert!(output.ends_with("pages_2-4.pdf"));
    assert_eq!(page_labels(&output), ["book-2", "book-3", "book-4"]);
}

#[tokio::test]
async fn test_extract_span_past_end_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "short.pdf", 2);
    let output = temp_dir.path().join("out.pdf");

    let err = Extractor::new()
        .extract(&ExtractConfig::new(
            input,
            PageSpan::new(2, 5).unwrap(),
            Some(output.clone()),
        ))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PdfDeckError::InvalidPageRange { total_pages: 2, .. }
    ));
    assert!(!output.exists());
}
