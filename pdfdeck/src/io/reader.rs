//! PDF reading and loading operations.
//!
//! Parsing is CPU-bound, so every load runs on tokio's blocking pool.
//! Batch loads overlap up to a fixed number of files and hand results
//! back in input order.
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::io::reader::PdfReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let (results, stats) = reader.load_all(&paths, 4).await;
//! println!("{} of {} loaded", stats.success_count, results.len());
//! # Ok(())
//! # }
//! ```

use futures::stream::{self, StreamExt};
use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::debug;

use crate::error::{PdfDeckError, Result};
use crate::utils::format_file_size;

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

/// Result of a load operation (success or failure).
pub type LoadResult = Result<LoadedPdf>;

/// Statistics for a batch load operation.
#[derive(Debug, Clone)]
pub struct LoadStatistics {
    /// Number of PDFs successfully loaded.
    pub success_count: usize,

    /// Number of PDFs that failed to load.
    pub failure_count: usize,

    /// Total time taken for all loads.
    pub total_time: Duration,

    /// Total size of successfully loaded files.
    pub total_size: u64,

    /// Total number of pages loaded.
    pub total_pages: usize,
}

impl LoadStatistics {
    fn from_results(results: &[LoadResult], total_time: Duration) -> Self {
        let mut stats = Self {
            success_count: 0,
            failure_count: 0,
            total_time,
            total_size: 0,
            total_pages: 0,
        };

        for result in results {
            match result {
                Ok(loaded) => {
                    stats.success_count += 1;
                    stats.total_size += loaded.file_size;
                    stats.total_pages += loaded.page_count;
                }
                Err(_) => stats.failure_count += 1,
            }
        }

        stats
    }

    /// Format total size as human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// Loads PDF documents off the async runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File cannot be read or is not a valid PDF
    /// - PDF is encrypted
    /// - PDF has no pages
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();

        task::spawn_blocking(move || load_blocking(path_buf))
            .await
            .map_err(|e| PdfDeckError::other(format!("Load task failed: {e}")))?
    }

    /// Load several documents, overlapping at most `workers` loads.
    ///
    /// Returns one result per input, in input order, together with
    /// aggregate statistics.
    pub async fn load_all(
        &self,
        paths: &[PathBuf],
        workers: usize,
    ) -> (Vec<LoadResult>, LoadStatistics) {
        let start = Instant::now();
        let reader = *self;

        let results = stream::iter(paths.iter().cloned())
            .map(|path| async move { reader.load(&path).await })
            .buffered(workers.max(1))
            .collect::<Vec<_>>()
            .await;

        let stats = LoadStatistics::from_results(&results, start.elapsed());
        debug!(
            loaded = stats.success_count,
            failed = stats.failure_count,
            pages = stats.total_pages,
            "batch load finished in {:?}",
            stats.total_time
        );

        (results, stats)
    }
}

fn load_blocking(path: PathBuf) -> Result<LoadedPdf> {
    let start = Instant::now();

    let document = Document::load(&path).map_err(|e| {
        let err_msg = e.to_string();
        let lowered = err_msg.to_lowercase();
        if lowered.contains("encrypt") || lowered.contains("decrypt") || lowered.contains("password")
        {
            PdfDeckError::encrypted_pdf(path.clone())
        } else {
            PdfDeckError::failed_to_load_pdf(path.clone(), err_msg)
        }
    })?;

    let page_count = document.get_pages().len();
    if page_count == 0 {
        return Err(PdfDeckError::corrupted_pdf(path, "PDF has no pages"));
    }

    let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
    let load_time = start.elapsed();
    debug!(path = %path.display(), page_count, "loaded PDF in {load_time:?}");

    Ok(LoadedPdf {
        document,
        path,
        page_count,
        load_time,
        file_size,
    })
}
