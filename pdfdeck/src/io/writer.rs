//! PDF writing and saving operations.
//!
//! This module provides safe PDF writing with:
//! - Atomic writes (write to temp file, then rename)
//! - Compression levels
//! - Write statistics
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! writer.save(doc, Path::new("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::debug;

use crate::config::CompressionLevel;
use crate::error::{PdfDeckError, Result};
use crate::ops::pages::prune_unreachable;
use crate::utils::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// How hard to compress before writing.
    pub compression: CompressionLevel,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compression: CompressionLevel::default(),
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Compression applied before writing.
    pub compression: CompressionLevel,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create an atomic writer using the given compression level.
    pub fn with_compression(compression: CompressionLevel) -> Self {
        Self {
            options: WriteOptions {
                compression,
                ..Default::default()
            },
        }
    }

    /// Save a PDF document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be created or written.
    pub async fn save(&self, doc: Document, path: &Path) -> Result<()> {
        self.save_with_stats(doc, path).await.map(|_| ())
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// The document is compressed according to the writer's options and
    /// its objects renumbered before it is serialized.
    pub async fn save_with_stats(&self, doc: Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();

        let stats = task::spawn_blocking(move || write_blocking(doc, path_buf, &options))
            .await
            .map_err(|e| PdfDeckError::other(format!("Write task failed: {e}")))??;

        debug!(
            path = %stats.output_path.display(),
            size = stats.file_size,
            "wrote PDF in {:?}",
            stats.write_time
        );
        Ok(stats)
    }
}

fn write_blocking(
    mut doc: Document,
    path: PathBuf,
    options: &WriteOptions,
) -> Result<WriteStatistics> {
    let start = Instant::now();

    match options.compression {
        CompressionLevel::None => {}
        CompressionLevel::Standard => doc.compress(),
        CompressionLevel::Maximum => {
            prune_unreachable(&mut doc);
            doc.compress();
        }
    }
    doc.renumber_objects();

    let write_path = if options.atomic {
        path.with_extension("tmp")
    } else {
        path.clone()
    };

    let file =
        std::fs::File::create(&write_path).map_err(|e| PdfDeckError::FailedToCreateOutput {
            path: write_path.clone(),
            source: e,
        })?;

    let mut writer = std::io::BufWriter::with_capacity(options.buffer_size, file);

    let written = doc
        .save_to(&mut writer)
        .map_err(std::io::Error::other)
        .and_then(|_| writer.flush());
    if let Err(source) = written {
        if options.atomic {
            let _ = std::fs::remove_file(&write_path);
        }
        return Err(PdfDeckError::FailedToWrite {
            path: write_path,
            source,
        });
    }
    drop(writer);

    if options.atomic {
        std::fs::rename(&write_path, &path).map_err(|e| PdfDeckError::FailedToWrite {
            path: path.clone(),
            source: e,
        })?;
    }

    let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

    Ok(WriteStatistics {
        write_time: start.elapsed(),
        file_size,
        output_path: path,
        compression: options.compression,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{build_pdf, page_labels};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.pdf");

        PdfWriter::new()
            .save(build_pdf("doc", 2), &output_path)
            .await
            .unwrap();

        assert!(output_path.exists());
        assert!(!output_path.with_extension("tmp").exists());
        let saved = Document::load(&output_path).unwrap();
        assert_eq!(page_labels(&saved), vec!["doc-1", "doc-2"]);
    }

    #[tokio::test]
    async fn test_save_with_stats() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.pdf");

        let stats = PdfWriter::with_compression(CompressionLevel::Maximum)
            .save_with_stats(build_pdf("doc", 1), &output_path)
            .await
            .unwrap();

        assert!(stats.file_size > 0);
        assert_eq!(stats.output_path, output_path);
        assert_eq!(stats.compression, CompressionLevel::Maximum);
    }

    #[tokio::test]
    async fn test_save_non_atomic() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("plain.pdf");

        let writer = PdfWriter::with_options(WriteOptions {
            atomic: false,
            compression: CompressionLevel::None,
            ..Default::default()
        });
        writer.save(build_pdf("doc", 1), &output_path).await.unwrap();

        assert!(output_path.exists());
    }

    #[tokio::test]
    async fn test_save_to_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("missing").join("out.pdf");

        let err = PdfWriter::new()
            .save(build_pdf("doc", 1), &output_path)
            .await
            .unwrap_err();

        assert!(matches!(err, PdfDeckError::FailedToCreateOutput { .. }));
        assert_eq!(err.exit_code(), 5);
    }
}
