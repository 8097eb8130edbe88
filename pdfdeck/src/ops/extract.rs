//! Extracting a contiguous page span into a new document.

use lopdf::Document;
use std::path::{Path, PathBuf};
use tokio::task;

use crate::config::{ExtractConfig, PageSpan};
use crate::error::{PdfDeckError, Result};
use crate::io::{PdfReader, PdfWriter, WriteStatistics};
use crate::ops::pages::keep_pages;
use crate::validation::Validator;

/// Result of an extract operation.
#[derive(Debug, Clone)]
pub struct ExtractResult {
    /// Source document.
    pub input: PathBuf,

    /// Written document.
    pub output: PathBuf,

    /// Extracted span.
    pub span: PageSpan,

    /// Page count of the source document.
    pub source_pages: usize,

    /// Write statistics for the output.
    pub write: WriteStatistics,
}

/// Copies a page span out of a document.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    reader: PdfReader,
    validator: Validator,
}

impl Extractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document holding pages `span` of `doc`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`PdfDeckError::InvalidPageRange`] when the span runs past
    /// the last page.
    pub fn extract_document(doc: &Document, span: PageSpan, path: &Path) -> Result<Document> {
        span.check(path, doc.get_pages().len())?;
        keep_pages(doc, "extract", |page| page >= span.start() && page <= span.end())
    }

    /// Load the source, extract the span and write it to `config.output`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid, the output exists and
    /// may not be replaced, the source cannot be loaded, or the span does
    /// not fit the document.
    pub async fn extract(&self, config: &ExtractConfig) -> Result<ExtractResult> {
        config.validate()?;
        self.validator
            .ensure_writable(&config.output, config.overwrite_mode)
            .await?;

        let loaded = self.reader.load(&config.input).await?;
        let source_pages = loaded.page_count;
        let input = loaded.path;

        let span = config.span;
        let document = loaded.document;
        let source = input.clone();
        let part = task::spawn_blocking(move || Self::extract_document(&document, span, &source))
            .await
            .map_err(|e| PdfDeckError::operation_failed("extract", e.to_string()))??;

        let write = PdfWriter::with_compression(config.compression)
            .save_with_stats(part, &config.output)
            .await?;

        Ok(ExtractResult {
            input,
            output: config.output.clone(),
            span,
            source_pages,
            write,
        })
    }
}
