//! I/O operations for pdfdeck.
//!
//! This module handles all file I/O operations including:
//! - Loading PDF documents from disk
//! - Writing PDFs to disk atomically
//! - Concurrent, order-preserving batch loading

pub mod reader;
pub mod writer;

pub use reader::{LoadResult, LoadStatistics, LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};

use crate::error::Result;
use lopdf::Document;
use std::path::Path;

/// Load a PDF document from a file.
///
/// Convenience function for loading a single PDF.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid PDF.
pub async fn load_pdf(path: &Path) -> Result<Document> {
    let loaded = PdfReader::new().load(path).await?;
    Ok(loaded.document)
}

/// Save a PDF document to a file with default options.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub async fn save_pdf(doc: Document, path: &Path) -> Result<()> {
    PdfWriter::new().save(doc, path).await
}
