//! Configuration for pdfdeck operations.
//!
//! The CLI turns its arguments into one of the operation configs defined
//! here ([`MergeConfig`], [`SplitConfig`], [`ExtractConfig`]). Each config
//! is validated before the operation runs, so the operations themselves
//! can assume sane input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{PdfDeckError, Result};

/// Output file name used by merge when none is given.
pub const DEFAULT_MERGE_OUTPUT: &str = "merged.pdf";

/// Minimum number of files a merge accepts.
pub const MIN_MERGE_FILES: usize = 2;

/// Compression level for written PDFs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    /// No compression - streams are written as they were read.
    None,
    /// Compress streams.
    #[default]
    Standard,
    /// Compress streams and drop unreferenced objects.
    Maximum,
}

impl CompressionLevel {
    /// Name used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Standard => "standard",
            Self::Maximum => "maximum",
        }
    }
}

impl FromStr for CompressionLevel {
    type Err = PdfDeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfDeckError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// An inclusive, 1-based span of pages.
///
/// Parsed from `"START-END"` or a single page number `"N"`.
///
/// # Examples
///
/// ```
/// use pdfdeck::config::PageSpan;
///
/// let span: PageSpan = "3-5".parse().unwrap();
/// assert_eq!(span.len(), 3);
/// assert_eq!(span.default_output_name(), "pages_3-5.pdf");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpan {
    start: u32,
    end: u32,
}

impl PageSpan {
    /// Create a span from its first and last page.
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is zero or greater than `end`.
    pub fn new(start: u32, end: u32) -> Result<Self> {
        if start == 0 {
            return Err(PdfDeckError::invalid_config(
                "Page numbers must be positive (1-indexed)",
            ));
        }
        if start > end {
            return Err(PdfDeckError::invalid_config(format!(
                "Invalid range {start}-{end}: start page must be less than or equal to end page"
            )));
        }
        Ok(Self { start, end })
    }

    /// A span covering one page.
    pub fn single(page: u32) -> Result<Self> {
        Self::new(page, page)
    }

    /// First page of the span.
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Last page of the span.
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of pages in the span.
    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    /// Always false: a span holds at least one page.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Page numbers in the span, in order.
    pub fn pages(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }

    /// Check the span against a document's page count.
    ///
    /// # Errors
    ///
    /// Returns [`PdfDeckError::InvalidPageRange`] when the span runs past
    /// the last page.
    pub fn check(&self, path: &Path, total_pages: usize) -> Result<()> {
        if self.end as usize > total_pages {
            return Err(PdfDeckError::InvalidPageRange {
                path: path.to_path_buf(),
                range: self.to_string(),
                total_pages,
            });
        }
        Ok(())
    }

    /// File name extract uses when no output is given.
    pub fn default_output_name(&self) -> String {
        format!("pages_{}-{}.pdf", self.start, self.end)
    }
}

impl FromStr for PageSpan {
    type Err = PdfDeckError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PdfDeckError::invalid_config("Page range cannot be empty"));
        }

        let parse_page = |part: &str| -> Result<u32> {
            part.trim().parse::<u32>().map_err(|_| {
                PdfDeckError::invalid_config(format!("Invalid page number: {}", part.trim()))
            })
        };

        match s.split_once('-') {
            Some((start, end)) => {
                if end.contains('-') {
                    return Err(PdfDeckError::invalid_config(format!(
                        "Invalid page range format: {s}. Expected format like '1-5'"
                    )));
                }
                Self::new(parse_page(start)?, parse_page(end)?)
            }
            None => Self::single(parse_page(s)?),
        }
    }
}

impl fmt::Display for PageSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Document information fields (the PDF `Info` dictionary).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Document author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Document subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Document keywords (comma-separated).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Application that created the original document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    /// Application that produced the PDF.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
}

impl Metadata {
    /// Check if any metadata fields are set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.keywords.is_none()
            && self.creator.is_none()
            && self.producer.is_none()
    }

    /// Create metadata from optional strings, trimming whitespace.
    ///
    /// Blank values become `None`.
    pub fn new(
        title: Option<String>,
        author: Option<String>,
        subject: Option<String>,
        keywords: Option<String>,
    ) -> Self {
        Self {
            title: non_blank(title),
            author: non_blank(author),
            subject: non_blank(subject),
            keywords: non_blank(keywords),
            creator: None,
            producer: None,
        }
    }

    /// Set the creator field.
    pub fn with_creator(mut self, creator: Option<String>) -> Self {
        self.creator = non_blank(creator);
        self
    }

    /// Set the producer field.
    pub fn with_producer(mut self, producer: Option<String>) -> Self {
        self.producer = non_blank(producer);
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.trim().to_string())
}

/// Configuration for merging documents.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Input PDF file paths (in merge order).
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path.
    pub output: PathBuf,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for output.
    pub compression: CompressionLevel,

    /// Metadata to set on output document.
    pub metadata: Metadata,

    /// Skip unreadable inputs instead of stopping.
    pub continue_on_error: bool,

    /// Number of concurrent loads (None = auto-detect).
    pub jobs: Option<usize>,
}

impl MergeConfig {
    /// Create a merge config with default options.
    pub fn new(inputs: Vec<PathBuf>, output: PathBuf) -> Self {
        Self {
            inputs,
            output,
            overwrite_mode: OverwriteMode::default(),
            compression: CompressionLevel::default(),
            metadata: Metadata::default(),
            continue_on_error: false,
            jobs: None,
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than two inputs are given
    /// - Jobs count is zero
    /// - The output path is also an input
    pub fn validate(&self) -> Result<()> {
        if self.inputs.len() < MIN_MERGE_FILES {
            return Err(PdfDeckError::NotEnoughFiles {
                required: MIN_MERGE_FILES,
                found: self.inputs.len(),
            });
        }

        if self.jobs == Some(0) {
            return Err(PdfDeckError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }

        if self.inputs.iter().any(|input| input == &self.output) {
            return Err(PdfDeckError::invalid_config(format!(
                "Output file cannot be the same as an input file: {}",
                self.output.display()
            )));
        }

        Ok(())
    }

    /// Get the effective number of concurrent loads.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

/// Configuration for splitting a document into single pages.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Document to split.
    pub input: PathBuf,

    /// Directory receiving one file per page.
    pub output_dir: PathBuf,

    /// File overwrite behavior for each page file.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for page files.
    pub compression: CompressionLevel,
}

impl SplitConfig {
    /// Create a split config with default options.
    pub fn new(input: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input,
            output_dir,
            overwrite_mode: OverwriteMode::default(),
            compression: CompressionLevel::default(),
        }
    }

    /// Path of the file holding page `page` (1-based).
    ///
    /// Named `{stem}_page_{page}.pdf` after the input file.
    pub fn page_path(&self, page: u32) -> PathBuf {
        let stem = self
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        self.output_dir.join(format!("{stem}_page_{page}.pdf"))
    }
}

/// Configuration for extracting a page span.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Source document.
    pub input: PathBuf,

    /// Pages to keep.
    pub span: PageSpan,

    /// Output PDF file path.
    pub output: PathBuf,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for output.
    pub compression: CompressionLevel,
}

impl ExtractConfig {
    /// Create an extract config. Without an output path the file is named
    /// after the span (`pages_{start}-{end}.pdf`).
    pub fn new(input: PathBuf, span: PageSpan, output: Option<PathBuf>) -> Self {
        let output = output.unwrap_or_else(|| PathBuf::from(span.default_output_name()));
        Self {
            input,
            span,
            output,
            overwrite_mode: OverwriteMode::default(),
            compression: CompressionLevel::default(),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.input == self.output {
            return Err(PdfDeckError::invalid_config(format!(
                "Output file cannot be the same as the input file: {}",
                self.output.display()
            )));
        }
        Ok(())
    }
}
