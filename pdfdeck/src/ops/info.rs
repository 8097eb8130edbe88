//! Document information: file name, page count, path and metadata.

use lopdf::Document;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::Metadata;
use crate::error::Result;
use crate::io::PdfReader;
use crate::ops::metadata::MetadataManager;
use crate::utils::format_file_size;

/// Information about one PDF file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    /// Final path component.
    pub file_name: String,

    /// Full path as given.
    pub path: PathBuf,

    /// Number of pages.
    pub page_count: usize,

    /// PDF version from the header.
    pub version: String,

    /// Size of the file in bytes.
    pub file_size: u64,

    /// Fields of the `Info` dictionary.
    pub metadata: Metadata,
}

impl DocumentInfo {
    /// Load `path` and collect its information.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded as a PDF.
    pub async fn read(path: &Path) -> Result<Self> {
        let loaded = PdfReader::new().load(path).await?;
        Ok(Self::from_document(
            &loaded.path,
            &loaded.document,
            loaded.file_size,
        ))
    }

    /// Collect information from an already loaded document.
    pub fn from_document(path: &Path, doc: &Document, file_size: u64) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            file_name,
            path: path.to_path_buf(),
            page_count: doc.get_pages().len(),
            version: doc.version.clone(),
            file_size,
            metadata: MetadataManager::new().get_metadata(doc),
        }
    }

    /// Format the file size as a human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }

    /// Metadata fields that are present, as `(label, value)` pairs.
    ///
    /// Title, Author and Creator come first, followed by Subject,
    /// Keywords and Producer.
    pub fn metadata_fields(&self) -> Vec<(&'static str, &str)> {
        let meta = &self.metadata;
        [
            ("Title", &meta.title),
            ("Author", &meta.author),
            ("Creator", &meta.creator),
            ("Subject", &meta.subject),
            ("Keywords", &meta.keywords),
            ("Producer", &meta.producer),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
        .collect()
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
