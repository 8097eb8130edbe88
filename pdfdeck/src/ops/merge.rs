//! Merging several documents into one.
//!
//! The first document is the base. Every following document has its
//! objects renumbered past the base's highest id, is copied in, and has
//! its pages appended to the base's root page tree node. Input order is
//! page order.

use lopdf::{Document, ObjectId};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::{MIN_MERGE_FILES, MergeConfig};
use crate::error::{PdfDeckError, Result};
use crate::io::{LoadedPdf, PdfReader, PdfWriter, WriteStatistics};
use crate::ops::metadata::MetadataManager;
use crate::ops::pages::{adopt_pages, prune_unreachable};
use crate::utils::format_file_size;
use crate::validation::Validator;

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of PDFs successfully merged.
    pub files_merged: usize,

    /// Inputs skipped because they could not be loaded.
    pub files_skipped: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Total time taken for merge.
    pub merge_time: Duration,

    /// Time taken to load all PDFs.
    pub load_time: Duration,

    /// Total size of input files.
    pub input_size: u64,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of a merge operation.
#[derive(Debug)]
pub struct MergeResult {
    /// The merged PDF document.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// Paths of files that were merged, in page order.
    pub merged_files: Vec<PathBuf>,
}

/// PDF merger that combines multiple documents.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    reader: PdfReader,
    metadata_manager: MetadataManager,
}

impl Merger {
    /// Create a new merger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and merge the configured inputs.
    ///
    /// The merged document is returned in memory; see
    /// [`Merger::merge_to_file`] to also write it out.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config is invalid (fewer than two inputs, ...)
    /// - An input cannot be loaded and `continue_on_error` is off
    /// - Fewer than two inputs could be loaded
    /// - The page tree of an input is malformed
    pub async fn merge(&self, config: &MergeConfig) -> Result<MergeResult> {
        config.validate()?;
        let merge_start = Instant::now();

        let (load_results, load_stats) = self
            .reader
            .load_all(&config.inputs, config.effective_jobs())
            .await;

        let mut loaded_pdfs = Vec::with_capacity(load_results.len());
        for result in load_results {
            match result {
                Ok(loaded) => loaded_pdfs.push(loaded),
                Err(e) if config.continue_on_error => {
                    warn!("skipping input: {e}");
                }
                Err(e) => return Err(e),
            }
        }

        if loaded_pdfs.len() < MIN_MERGE_FILES {
            return Err(PdfDeckError::NotEnoughFiles {
                required: MIN_MERGE_FILES,
                found: loaded_pdfs.len(),
            });
        }

        let files_merged = loaded_pdfs.len();
        let input_size = loaded_pdfs.iter().map(|p| p.file_size).sum();
        let merged_files: Vec<PathBuf> = loaded_pdfs.iter().map(|p| p.path.clone()).collect();

        let mut document = merge_documents(loaded_pdfs)?;
        self.metadata_manager
            .set_metadata(&mut document, &config.metadata)?;

        let statistics = MergeStatistics {
            files_merged,
            files_skipped: load_stats.failure_count,
            total_pages: document.get_pages().len(),
            merge_time: merge_start.elapsed(),
            load_time: load_stats.total_time,
            input_size,
        };
        debug!(
            files = statistics.files_merged,
            pages = statistics.total_pages,
            "merge finished in {:?}",
            statistics.merge_time
        );

        Ok(MergeResult {
            document,
            statistics,
            merged_files,
        })
    }

    /// Merge the configured inputs and write the result to `config.output`.
    ///
    /// An existing output is only replaced under [`OverwriteMode::Force`].
    ///
    /// [`OverwriteMode::Force`]: crate::config::OverwriteMode::Force
    pub async fn merge_to_file(
        &self,
        config: &MergeConfig,
    ) -> Result<(MergeStatistics, WriteStatistics)> {
        config.validate()?;
        Validator::new()
            .ensure_writable(&config.output, config.overwrite_mode)
            .await?;

        let result = self.merge(config).await?;
        let write_stats = PdfWriter::with_compression(config.compression)
            .save_with_stats(result.document, &config.output)
            .await?;
        Ok((result.statistics, write_stats))
    }
}

/// Concatenate loaded documents in order.
fn merge_documents(loaded_pdfs: Vec<LoadedPdf>) -> Result<Document> {
    let mut docs = loaded_pdfs.into_iter().map(|loaded| loaded.document);
    let mut merged = docs.next().ok_or(PdfDeckError::EmptyDeck)?;
    let mut max_id = merged.max_id;

    for mut doc in docs {
        doc.renumber_objects_with(max_id + 1);
        max_id = doc.max_id;

        let doc_pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        merged.objects.extend(doc.objects);
        merged.max_id = max_id;

        adopt_pages(&mut merged, &doc_pages)?;
    }

    // Catalogs and page tree nodes of the appended documents are now
    // unreferenced.
    prune_unreachable(&mut merged);
    Ok(merged)
}
