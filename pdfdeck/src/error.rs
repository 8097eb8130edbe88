//! Error types for pdfdeck.
//!
//! Every fallible operation in the crate returns [`PdfDeckError`]. Messages
//! are written for the person at the terminal: they name the file involved
//! and, where there is one, the way out.
//!
//! # Error Categories
//!
//! - **I/O Errors**: missing files, permissions, failed writes
//! - **PDF Errors**: unreadable, encrypted or empty documents
//! - **Deck Errors**: bad positions, ambiguous selections, too few files
//! - **Render Errors**: thumbnail rendering failures

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfdeck operations.
pub type Result<T> = std::result::Result<T, PdfDeckError>;

/// Main error type for pdfdeck operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfDeckError {
    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input file is not accessible (permission denied, etc.).
    #[error("Cannot access file: {}\n  Reason: {source}", path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Path exists but is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Path exists but is not a directory.
    #[error("Not a directory: {}", path.display())]
    NotADirectory {
        /// Path that is not a directory.
        path: PathBuf,
    },

    /// Failed to load PDF file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF file is corrupted or has invalid structure.
    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", path.display())]
    CorruptedPdf {
        /// Path to the corrupted PDF.
        path: PathBuf,
        /// Details about the corruption.
        details: String,
    },

    /// PDF file is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// The deck holds fewer files than the operation needs.
    #[error("Load at least {required} PDF files to merge (found {found})")]
    NotEnoughFiles {
        /// Minimum number of files.
        required: usize,
        /// Number of files available.
        found: usize,
    },

    /// The deck is empty.
    #[error("The deck is empty\n  Hint: add files with 'pdfdeck add <FILE>...'")]
    EmptyDeck,

    /// A deck position does not exist.
    #[error("No file at position {position} (the deck holds {len} file(s))")]
    InvalidPosition {
        /// 1-based position requested.
        position: usize,
        /// Number of entries in the deck.
        len: usize,
    },

    /// An operation needs exactly one selected file.
    #[error("Select exactly one PDF to {action} ({selected} selected)")]
    SelectExactlyOne {
        /// What the selection was for.
        action: String,
        /// How many files were selected.
        selected: usize,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or choose a different output path",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to read or decode the deck file.
    #[error("Failed to read deck file: {}\n  Reason: {reason}", path.display())]
    InvalidDeckFile {
        /// Path to the deck file.
        path: PathBuf,
        /// Details about what's wrong.
        reason: String,
    },

    /// Page range is invalid for the PDF.
    #[error(
        "Invalid page range '{range}' for PDF: {}\n  \
         PDF has {total_pages} page(s). Page numbers must be between 1 and {total_pages}",
        path.display()
    )]
    InvalidPageRange {
        /// Path to the PDF file.
        path: PathBuf,
        /// Requested page range.
        range: String,
        /// Total pages in the PDF.
        total_pages: usize,
    },

    /// A merge, split or extract failed on the document structure.
    #[error("{operation} failed: {reason}")]
    OperationFailed {
        /// Which operation failed.
        operation: &'static str,
        /// Description of what went wrong.
        reason: String,
    },

    /// Metadata operation failed.
    #[error("Failed to set metadata: {reason}")]
    MetadataFailed {
        /// Details about the failure.
        reason: String,
    },

    /// Thumbnail rendering failed.
    #[error("Failed to render thumbnail for: {}\n  Reason: {reason}", path.display())]
    RenderFailed {
        /// Path of the document being rendered.
        path: PathBuf,
        /// Details about the failure.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfDeckError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<serde_json::Error> for PdfDeckError {
    fn from(err: serde_json::Error) -> Self {
        Self::other(format!("JSON error: {err}"))
    }
}

impl From<glob::PatternError> for PdfDeckError {
    fn from(err: glob::PatternError) -> Self {
        Self::invalid_config(format!("Invalid glob pattern: {err}"))
    }
}

impl From<glob::GlobError> for PdfDeckError {
    fn from(err: glob::GlobError) -> Self {
        Self::FileNotAccessible {
            path: err.path().to_path_buf(),
            source: err.into_error(),
        }
    }
}

impl PdfDeckError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create a SelectExactlyOne error.
    pub fn select_exactly_one(action: impl Into<String>, selected: usize) -> Self {
        Self::SelectExactlyOne {
            action: action.into(),
            selected,
        }
    }

    /// Create an OperationFailed error.
    pub fn operation_failed(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::OperationFailed {
            operation,
            reason: reason.into(),
        }
    }

    /// Create a RenderFailed error.
    pub fn render_failed(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::RenderFailed {
            path,
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable (operation can continue).
    ///
    /// Returns true for per-file errors that `--continue-on-error` may skip.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FailedToLoadPdf { .. }
                | Self::CorruptedPdf { .. }
                | Self::EncryptedPdf { .. }
                | Self::FileNotFound { .. }
                | Self::FileNotAccessible { .. }
                | Self::NotAFile { .. }
                | Self::RenderFailed { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::FileNotAccessible { .. }
            | Self::NotAFile { .. }
            | Self::NotADirectory { .. }
            | Self::InvalidDeckFile { .. } => 2,
            Self::FailedToLoadPdf { .. }
            | Self::CorruptedPdf { .. }
            | Self::EncryptedPdf { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } | Self::FailedToWrite { .. } | Self::Io { .. } => 5,
            Self::OperationFailed { .. }
            | Self::MetadataFailed { .. }
            | Self::RenderFailed { .. } => 6,
            Self::NotEnoughFiles { .. }
            | Self::EmptyDeck
            | Self::InvalidPosition { .. }
            | Self::SelectExactlyOne { .. }
            | Self::InvalidPageRange { .. }
            | Self::InvalidConfig { .. }
            | Self::Other { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_file_not_found_display() {
        let err = PdfDeckError::file_not_found(PathBuf::from("/tmp/missing.pdf"));
        let msg = err.to_string();
        assert!(msg.contains("File not found"));
        assert!(msg.contains("missing.pdf"));
    }

    #[test]
    fn test_encrypted_pdf_display() {
        let err = PdfDeckError::encrypted_pdf(PathBuf::from("secret.pdf"));
        let msg = err.to_string();
        assert!(msg.contains("encrypted"));
        assert!(msg.contains("secret.pdf"));
        assert!(msg.contains("Decrypt"));
    }

    #[test]
    fn test_not_enough_files_display() {
        let err = PdfDeckError::NotEnoughFiles {
            required: 2,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "Load at least 2 PDF files to merge (found 1)"
        );
    }

    #[test]
    fn test_select_exactly_one_display() {
        let err = PdfDeckError::select_exactly_one("split", 3);
        assert_eq!(err.to_string(), "Select exactly one PDF to split (3 selected)");
    }

    #[test]
    fn test_invalid_page_range_display() {
        let err = PdfDeckError::InvalidPageRange {
            path: PathBuf::from("doc.pdf"),
            range: "3-12".to_string(),
            total_pages: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("3-12"));
        assert!(msg.contains("doc.pdf"));
        assert!(msg.contains("between 1 and 10"));
    }

    #[test]
    fn test_is_recoverable() {
        assert!(PdfDeckError::failed_to_load_pdf(PathBuf::from("x"), "bad").is_recoverable());
        assert!(PdfDeckError::encrypted_pdf(PathBuf::from("x")).is_recoverable());
        assert!(PdfDeckError::not_a_file(PathBuf::from("dir")).is_recoverable());
        assert!(
            PdfDeckError::FileNotAccessible {
                path: PathBuf::from("x"),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            }
            .is_recoverable()
        );
        assert!(!PdfDeckError::EmptyDeck.is_recoverable());
        assert!(!PdfDeckError::Cancelled.is_recoverable());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(PdfDeckError::file_not_found(PathBuf::from("x")).exit_code(), 2);
        assert_eq!(
            PdfDeckError::failed_to_load_pdf(PathBuf::from("x"), "e").exit_code(),
            3
        );
        assert_eq!(PdfDeckError::output_exists(PathBuf::from("x")).exit_code(), 4);
        assert_eq!(
            PdfDeckError::operation_failed("Split", "no catalog").exit_code(),
            6
        );
        assert_eq!(PdfDeckError::EmptyDeck.exit_code(), 1);
        assert_eq!(PdfDeckError::Cancelled.exit_code(), 130);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "not found");
        let err: PdfDeckError = io_err.into();
        assert!(matches!(err, PdfDeckError::Io { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source() {
        let err = PdfDeckError::FileNotAccessible {
            path: PathBuf::from("test.pdf"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert!(PdfDeckError::EmptyDeck.source().is_none());
    }
}
