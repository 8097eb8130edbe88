//! Input and output validation for pdfdeck.
//!
//! Checks run before any operation touches a document:
//! - File existence and accessibility
//! - PDF format and page count
//! - Output overwrite policy and target directories
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::validation::Validator;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = Validator::new();
//! let result = validator.validate_file(&PathBuf::from("test.pdf")).await?;
//! println!("PDF has {} pages", result.page_count);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::OverwriteMode;
use crate::error::{PdfDeckError, Result};
use crate::io::PdfReader;
use crate::utils::format_file_size;

/// Result of validating a single PDF file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Path to the validated file.
    pub path: PathBuf,

    /// Number of pages in the PDF.
    pub page_count: usize,

    /// PDF version as written in the header, e.g. `"1.7"`.
    pub version: String,

    /// Size of the file in bytes.
    pub file_size: u64,
}

/// Summary of validation results for multiple files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    /// Files that passed validation, in input order.
    pub results: Vec<ValidationResult>,

    /// Files that failed, with the reason.
    pub failures: Vec<(PathBuf, String)>,

    /// Total number of pages across valid files.
    pub total_pages: usize,

    /// Total size of valid files in bytes.
    pub total_size: u64,
}

impl ValidationSummary {
    /// Paths of the files that passed validation.
    pub fn valid_paths(&self) -> Vec<PathBuf> {
        self.results.iter().map(|r| r.path.clone()).collect()
    }

    /// Format the total file size as a human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// What writing to an output path will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStatus {
    /// Nothing exists at the path yet.
    New,
    /// An existing file will be replaced (`--force`).
    Overwrite,
    /// A file exists and the user has to confirm replacing it.
    NeedsConfirmation,
}

/// Validator for PDF files and output locations.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    reader: PdfReader,
}

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a single PDF file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or is not a regular file
    /// - File is empty
    /// - File is not a valid PDF, is encrypted, or has no pages
    pub async fn validate_file(&self, path: &Path) -> Result<ValidationResult> {
        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PdfDeckError::file_not_found(path.to_path_buf()));
            }
            Err(e) => {
                return Err(PdfDeckError::FileNotAccessible {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        if !metadata.is_file() {
            return Err(PdfDeckError::not_a_file(path.to_path_buf()));
        }

        if metadata.len() == 0 {
            return Err(PdfDeckError::corrupted_pdf(
                path.to_path_buf(),
                "File is empty",
            ));
        }

        let loaded = self.reader.load(path).await?;

        Ok(ValidationResult {
            path: loaded.path,
            page_count: loaded.page_count,
            version: loaded.document.version.clone(),
            file_size: loaded.file_size,
        })
    }

    /// Validate several files in order.
    ///
    /// With `continue_on_error` a recoverable failure is recorded in the
    /// summary and logged; otherwise the first failure is returned.
    pub async fn validate_files(
        &self,
        paths: &[PathBuf],
        continue_on_error: bool,
    ) -> Result<ValidationSummary> {
        let mut summary = ValidationSummary::default();

        for path in paths {
            match self.validate_file(path).await {
                Ok(result) => {
                    summary.total_pages += result.page_count;
                    summary.total_size += result.file_size;
                    summary.results.push(result);
                }
                Err(e) if continue_on_error && e.is_recoverable() => {
                    warn!(path = %path.display(), "skipping invalid PDF: {e}");
                    summary.failures.push((path.clone(), e.to_string()));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(summary)
    }

    /// Check an output file path against the overwrite policy.
    ///
    /// Prompting is left to the caller: an existing file under
    /// [`OverwriteMode::Prompt`] yields [`OutputStatus::NeedsConfirmation`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path exists and [`OverwriteMode::NoClobber`] is set
    /// - The path is a directory
    /// - The parent directory doesn't exist or is read-only
    pub async fn check_output(
        &self,
        path: &Path,
        overwrite_mode: OverwriteMode,
    ) -> Result<OutputStatus> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        self.check_output_dir(parent).await?;

        match tokio::fs::metadata(path).await {
            Ok(metadata) if metadata.is_dir() => Err(PdfDeckError::not_a_file(path.to_path_buf())),
            Ok(_) => match overwrite_mode {
                OverwriteMode::NoClobber => Err(PdfDeckError::output_exists(path.to_path_buf())),
                OverwriteMode::Force => Ok(OutputStatus::Overwrite),
                OverwriteMode::Prompt => Ok(OutputStatus::NeedsConfirmation),
            },
            Err(_) => Ok(OutputStatus::New),
        }
    }

    /// Like [`Validator::check_output`], but an unconfirmed overwrite is an
    /// error. Operations call this right before writing; callers that
    /// prompt switch to [`OverwriteMode::Force`] once the user agrees.
    pub async fn ensure_writable(&self, path: &Path, overwrite_mode: OverwriteMode) -> Result<()> {
        match self.check_output(path, overwrite_mode).await? {
            OutputStatus::NeedsConfirmation => Err(PdfDeckError::output_exists(path.to_path_buf())),
            OutputStatus::New | OutputStatus::Overwrite => Ok(()),
        }
    }

    /// Check that `dir` exists, is a directory and is writable.
    pub async fn check_output_dir(&self, dir: &Path) -> Result<()> {
        let metadata = match tokio::fs::metadata(dir).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PdfDeckError::invalid_config(format!(
                    "Output directory does not exist: {}",
                    dir.display()
                )));
            }
            Err(e) => {
                return Err(PdfDeckError::FileNotAccessible {
                    path: dir.to_path_buf(),
                    source: e,
                });
            }
        };

        if !metadata.is_dir() {
            return Err(PdfDeckError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }

        if metadata.permissions().readonly() {
            return Err(PdfDeckError::invalid_config(format!(
                "Output directory is not writable: {}",
                dir.display()
            )));
        }

        Ok(())
    }
}
