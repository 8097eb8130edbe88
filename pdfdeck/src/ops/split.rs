//! Splitting a document into one file per page.
//!
//! Splitting runs in two steps so a front end can ask before replacing
//! files: [`Splitter::plan`] loads the source and works out every output
//! path, [`Splitter::execute`] writes them.

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task;
use tracing::debug;

use crate::config::{CompressionLevel, OverwriteMode, SplitConfig};
use crate::error::{PdfDeckError, Result};
use crate::io::{PdfReader, PdfWriter};
use crate::ops::pages::keep_pages;
use crate::validation::Validator;

/// A loaded source document and the files splitting it will produce.
#[derive(Debug)]
pub struct SplitPlan {
    source: Arc<Document>,
    input: PathBuf,
    outputs: Vec<PathBuf>,
    compression: CompressionLevel,
}

impl SplitPlan {
    /// Output paths, one per page in page order.
    pub fn outputs(&self) -> &[PathBuf] {
        &self.outputs
    }

    /// Outputs that already exist and would be replaced.
    pub fn conflicts(&self) -> Vec<&PathBuf> {
        self.outputs.iter().filter(|path| path.exists()).collect()
    }

    /// Number of pages in the source document.
    pub fn page_count(&self) -> usize {
        self.outputs.len()
    }
}

/// Result of a split operation.
#[derive(Debug, Clone)]
pub struct SplitResult {
    /// Source document.
    pub input: PathBuf,

    /// Written files, one per page in page order.
    pub outputs: Vec<PathBuf>,

    /// Total bytes written.
    pub total_size: u64,
}

impl SplitResult {
    /// Number of pages written.
    pub fn page_count(&self) -> usize {
        self.outputs.len()
    }
}

/// Splits documents into single-page files.
#[derive(Debug, Clone, Default)]
pub struct Splitter {
    reader: PdfReader,
    validator: Validator,
}

impl Splitter {
    /// Create a new splitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the source and compute the output paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory is missing or not a
    /// directory, if the source cannot be loaded, or if an output exists
    /// under [`OverwriteMode::NoClobber`].
    pub async fn plan(&self, config: &SplitConfig) -> Result<SplitPlan> {
        self.validator.check_output_dir(&config.output_dir).await?;

        let loaded = self.reader.load(&config.input).await?;
        let outputs: Vec<PathBuf> = (1..=loaded.page_count as u32)
            .map(|page| config.page_path(page))
            .collect();

        if config.overwrite_mode == OverwriteMode::NoClobber
            && let Some(existing) = outputs.iter().find(|path| path.exists())
        {
            return Err(PdfDeckError::output_exists(existing.clone()));
        }

        Ok(SplitPlan {
            source: Arc::new(loaded.document),
            input: loaded.path,
            outputs,
            compression: config.compression,
        })
    }

    /// Write one file per page.
    pub async fn execute(&self, plan: SplitPlan) -> Result<SplitResult> {
        self.execute_with_progress(plan, |_, _, _| {}).await
    }

    /// Write one file per page, calling `on_page(written, total, path)`
    /// after each file is saved.
    pub async fn execute_with_progress(
        &self,
        plan: SplitPlan,
        mut on_page: impl FnMut(usize, usize, &Path),
    ) -> Result<SplitResult> {
        let writer = PdfWriter::with_compression(plan.compression);
        let total = plan.outputs.len();
        let mut total_size = 0;

        for (index, output) in plan.outputs.iter().enumerate() {
            let page = index as u32 + 1;
            let source = Arc::clone(&plan.source);
            let part = task::spawn_blocking(move || keep_pages(&source, "split", |p| p == page))
                .await
                .map_err(|e| PdfDeckError::operation_failed("split", e.to_string()))??;

            let stats = writer.save_with_stats(part, output).await?;
            total_size += stats.file_size;
            debug!(page, path = %output.display(), "wrote page");
            on_page(index + 1, total, output);
        }

        Ok(SplitResult {
            input: plan.input,
            outputs: plan.outputs,
            total_size,
        })
    }

    /// Plan and execute in one go.
    ///
    /// Existing outputs are only replaced under [`OverwriteMode::Force`].
    pub async fn split(&self, config: &SplitConfig) -> Result<SplitResult> {
        let plan = self.plan(config).await?;

        if config.overwrite_mode == OverwriteMode::Prompt
            && let Some(existing) = plan.conflicts().first()
        {
            return Err(PdfDeckError::output_exists((*existing).clone()));
        }

        self.execute(plan).await
    }
}
