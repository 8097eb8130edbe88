//! Output formatting and display for pdfdeck.
//!
//! [`OutputFormatter`] prints leveled messages; the `display_*` helpers
//! turn operation results into the summaries the command line shows.
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::output::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, true);
//! formatter.info("Starting merge operation");
//! formatter.success("Merge completed successfully");
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::deck::Deck;
use crate::io::WriteStatistics;
use crate::ops::{DocumentInfo, ExtractResult, MergeStatistics, SplitResult};
use crate::utils::format_file_size;
use crate::validation::ValidationSummary;

/// Display the deck, numbered from 1.
pub fn display_deck(formatter: &OutputFormatter, deck: &Deck) {
    if deck.is_empty() {
        formatter.info("Deck is empty. Add files with `pdfdeck add <FILE>...`");
        return;
    }

    formatter.section(&format!("Deck ({} file(s))", deck.len()));
    for (index, path) in deck.files().iter().enumerate() {
        formatter.list_item(index + 1, &path.display().to_string());
    }
}

/// Display document information as a labelled block.
///
/// The block is the result of the `info` command, so it is printed even
/// in quiet mode.
pub fn display_document_info(formatter: &OutputFormatter, info: &DocumentInfo) {
    formatter.raw(&render_document_info(info, formatter.is_verbose()));
}

/// Format document information the way [`display_document_info`] prints it.
///
/// Version and file size are only included when `verbose` is set.
pub fn render_document_info(info: &DocumentInfo, verbose: bool) -> String {
    let mut lines = vec![
        info.file_name.clone(),
        format!("  {:<10} {}", "Pages", info.page_count),
        format!("  {:<10} {}", "Path", info.path.display()),
    ];
    if verbose {
        lines.push(format!("  {:<10} {}", "Version", info.version));
        lines.push(format!("  {:<10} {}", "Size", info.format_file_size()));
    }

    let fields = info.metadata_fields();
    if !fields.is_empty() {
        lines.push("Metadata".to_string());
        lines.extend(
            fields
                .into_iter()
                .map(|(label, value)| format!("  {label:<10} {value}")),
        );
    }
    lines.join("\n")
}

/// Display validation results, warning about skipped files.
pub fn display_validation_summary(formatter: &OutputFormatter, summary: &ValidationSummary) {
    for (path, reason) in &summary.failures {
        formatter.warning(&format!("Skipped {}: {reason}", path.display()));
    }

    formatter.debug(&format!(
        "Validated {} file(s): {} pages, {}",
        summary.results.len(),
        summary.total_pages,
        summary.format_total_size()
    ));
}

/// Display the outcome of a merge.
pub fn display_merge_summary(
    formatter: &OutputFormatter,
    stats: &MergeStatistics,
    write: &WriteStatistics,
) {
    if stats.files_skipped > 0 {
        formatter.warning(&format!(
            "{} file(s) could not be loaded and were skipped",
            stats.files_skipped
        ));
    }

    formatter.success(&format!(
        "Merged {} file(s) ({} pages) into {}",
        stats.files_merged,
        stats.total_pages,
        write.output_path.display()
    ));
    formatter.detail("Input size", &stats.format_input_size());
    formatter.detail("Output size", &write.format_file_size());
    formatter.detail("Compression", write.compression.as_str());
    formatter.detail(
        "Time",
        &format!(
            "{:.2}s (load {:.2}s)",
            stats.merge_time.as_secs_f64(),
            stats.load_time.as_secs_f64()
        ),
    );
}

/// Display the outcome of a split.
pub fn display_split_summary(formatter: &OutputFormatter, result: &SplitResult) {
    formatter.success(&format!(
        "Split {} into {} file(s)",
        result.input.display(),
        result.page_count()
    ));
    for output in &result.outputs {
        formatter.detail("Wrote", &output.display().to_string());
    }
    formatter.detail("Total size", &format_file_size(result.total_size));
}

/// Display the outcome of an extract.
pub fn display_extract_summary(formatter: &OutputFormatter, result: &ExtractResult) {
    formatter.success(&format!(
        "Extracted pages {} of {} ({} total) into {}",
        result.span,
        result.input.display(),
        result.source_pages,
        result.output.display()
    ));
    formatter.detail("Output size", &result.write.format_file_size());
}
