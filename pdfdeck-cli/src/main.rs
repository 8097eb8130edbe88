//! pdfdeck - keep an ordered deck of PDF files and work on it.
//!
//! Deck commands edit the deck file; merge, split, extract, info and
//! thumbnail act on its entries or on paths given directly.

mod cli;

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, MergeArgs};
use pdfdeck::config::OverwriteMode;
use pdfdeck::deck::{Deck, DeckStore};
use pdfdeck::error::{PdfDeckError, Result};
use pdfdeck::ops::{DocumentInfo, Extractor, Merger, Splitter};
use pdfdeck::output::{
    OutputFormatter, display_deck, display_document_info, display_extract_summary,
    display_merge_summary, display_split_summary, display_validation_summary,
};
use pdfdeck::thumbnail::ViewMode;
use pdfdeck::utils::collect_paths_for_patterns;
use pdfdeck::validation::{OutputStatus, Validator};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Log to stderr. `RUST_LOG` wins over the verbosity flag.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "pdfdeck=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.quiet, cli.verbose);
    let store = DeckStore::new(&cli.deck);
    let mut deck = store.load().await?;

    match &cli.command {
        Command::Add { patterns } => {
            add_files(&formatter, &mut deck, patterns).await?;
            store.save(&deck).await?;
            display_deck(&formatter, &deck);
        }
        Command::List { json } => {
            if *json {
                formatter.raw(&serde_json::to_string_pretty(&deck)?);
            } else {
                display_deck(&formatter, &deck);
            }
        }
        Command::Up { position } => {
            let index = deck.at_position(*position).map(|_| position - 1)?;
            match deck.move_up(index) {
                Some(_) => store.save(&deck).await?,
                None => formatter.info("Already at the top"),
            }
            display_deck(&formatter, &deck);
        }
        Command::Down { position } => {
            let index = deck.at_position(*position).map(|_| position - 1)?;
            match deck.move_down(index) {
                Some(_) => store.save(&deck).await?,
                None => formatter.info("Already at the bottom"),
            }
            display_deck(&formatter, &deck);
        }
        Command::Remove { positions } => {
            for position in positions {
                deck.at_position(*position)?;
            }
            let indices: Vec<usize> = positions.iter().map(|position| position - 1).collect();
            let removed = deck.remove(&indices);
            store.save(&deck).await?;

            for path in &removed {
                formatter.debug(&format!("Removed {}", path.display()));
            }
            formatter.success(&format!("Removed {} file(s) from the deck", removed.len()));
            display_deck(&formatter, &deck);
        }
        Command::Clear => {
            let count = deck.len();
            deck.clear();
            store.save(&deck).await?;
            formatter.success(&format!("Removed {count} file(s) from the deck"));
        }
        Command::Merge(args) => merge(&cli, args, &deck, &formatter).await?,
        Command::Split { target, output_dir } => {
            let input = deck.resolve_target(target)?;
            let config = cli.to_split_config(input, output_dir.clone())?;

            formatter.info(&format!("Splitting {}...", config.input.display()));
            let splitter = Splitter::new();
            let plan = splitter.plan(&config).await?;
            let conflicts: Vec<&Path> = match config.overwrite_mode {
                OverwriteMode::Prompt => plan.conflicts().into_iter().map(PathBuf::as_path).collect(),
                OverwriteMode::Force | OverwriteMode::NoClobber => Vec::new(),
            };
            confirm_overwrite(&formatter, &conflicts)?;

            let result = splitter
                .execute_with_progress(plan, |written, total, path| {
                    let name = path.file_name().map(|name| name.to_string_lossy());
                    formatter.progress(written, total, name.as_deref());
                })
                .await?;
            display_split_summary(&formatter, &result);
        }
        Command::Extract {
            target,
            start,
            end,
            output,
        } => {
            let input = deck.resolve_target(target)?;
            let mut config = cli.to_extract_config(input, *start, *end, output.clone())?;
            config.overwrite_mode =
                resolve_overwrite(&config.output, config.overwrite_mode, &formatter).await?;

            let result = Extractor::new().extract(&config).await?;
            display_extract_summary(&formatter, &result);
        }
        Command::Info { target, json } => {
            let path = deck.resolve_target(target)?;
            let info = DocumentInfo::read(&path).await?;
            if *json {
                formatter.raw(&info.to_json()?);
            } else {
                display_document_info(&formatter, &info);
            }
        }
        Command::Thumbnail {
            target,
            view,
            output,
        } => {
            let view: ViewMode = view.parse()?;
            thumbnails::run(&formatter, deck, target.as_deref(), view, output.clone())?;
        }
    }

    Ok(())
}

/// Expand patterns, keep the readable PDFs and append them to the deck.
async fn add_files(formatter: &OutputFormatter, deck: &mut Deck, patterns: &[String]) -> Result<()> {
    let paths: Vec<PathBuf> = collect_paths_for_patterns(patterns)?
        .into_iter()
        .map(|path| std::path::absolute(&path).unwrap_or(path))
        .collect();

    let summary = Validator::new().validate_files(&paths, true).await?;
    display_validation_summary(formatter, &summary);

    let valid = summary.valid_paths();
    let added = deck.add(valid.iter().cloned());
    formatter.success(&format!("Added {added} file(s) to the deck"));
    if added < valid.len() {
        formatter.info(&format!(
            "{} file(s) were already in the deck",
            valid.len() - added
        ));
    }
    Ok(())
}

async fn merge(cli: &Cli, args: &MergeArgs, deck: &Deck, formatter: &OutputFormatter) -> Result<()> {
    let mut config = cli.to_merge_config(args, deck)?;
    config.overwrite_mode =
        resolve_overwrite(&config.output, config.overwrite_mode, formatter).await?;

    formatter.info(&format!("Merging {} file(s)...", config.inputs.len()));
    let (stats, write_stats) = Merger::new().merge_to_file(&config).await?;
    display_merge_summary(formatter, &stats, &write_stats);
    Ok(())
}

/// Settle the overwrite policy for a single output file.
///
/// Returns [`OverwriteMode::Force`] once the user has agreed to replace an
/// existing file.
async fn resolve_overwrite(
    path: &Path,
    mode: OverwriteMode,
    formatter: &OutputFormatter,
) -> Result<OverwriteMode> {
    match Validator::new().check_output(path, mode).await? {
        OutputStatus::NeedsConfirmation => {
            confirm_overwrite(formatter, &[path])?;
            Ok(OverwriteMode::Force)
        }
        OutputStatus::New | OutputStatus::Overwrite => Ok(mode),
    }
}

/// Ask before replacing `existing` files. Nothing to replace is a yes.
///
/// In quiet mode there is nobody to ask, so existing files are an error.
fn confirm_overwrite(formatter: &OutputFormatter, existing: &[&Path]) -> Result<()> {
    let Some(first) = existing.first() else {
        return Ok(());
    };

    if formatter.is_quiet() {
        return Err(PdfDeckError::output_exists(first.to_path_buf()));
    }

    for path in existing {
        formatter.warning(&format!("Output file already exists: {}", path.display()));
    }

    if existing.len() == 1 {
        print!("Overwrite? [y/N]: ");
    } else {
        print!("Overwrite {} files? [y/N]: ", existing.len());
    }
    io::stdout().flush().ok();

    if read_confirmation(io::stdin().lock())? {
        Ok(())
    } else {
        Err(PdfDeckError::Cancelled)
    }
}

/// Read one answer line. Only "y" and "yes" agree.
fn read_confirmation(mut input: impl BufRead) -> Result<bool> {
    let mut response = String::new();
    input
        .read_line(&mut response)
        .map_err(|err| PdfDeckError::other(format!("Failed to read input: {err}")))?;

    let response = response.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

#[cfg(feature = "render")]
mod thumbnails {
    use super::*;
    use pdfdeck::Workspace;
    use pdfdeck::thumbnail::{PdfiumRenderer, ThumbnailCache, save_png};

    /// Render one target, or every deck entry when no target is given.
    pub(super) fn run(
        formatter: &OutputFormatter,
        deck: Deck,
        target: Option<&str>,
        view: ViewMode,
        output: Option<PathBuf>,
    ) -> Result<()> {
        match target {
            Some(target) => {
                let path = deck.resolve_target(target)?;
                let output = output.unwrap_or_else(|| PathBuf::from(format!("{}.png", stem(&path))));

                let mut cache = ThumbnailCache::new(PdfiumRenderer::new());
                let image = cache.thumbnail(&path, view).ok_or_else(|| {
                    PdfDeckError::render_failed(path.clone(), "no thumbnail available")
                })?;
                save_png(&image, &output)?;
                formatter.success(&format!("Wrote {}", output.display()));
            }
            None => {
                if deck.is_empty() {
                    return Err(PdfDeckError::EmptyDeck);
                }
                let dir = output.unwrap_or_else(|| PathBuf::from("."));
                if !dir.is_dir() {
                    return Err(PdfDeckError::NotADirectory { path: dir });
                }

                let mut workspace = Workspace::new(deck, PdfiumRenderer::new());
                let mut written = 0;
                for (index, (path, image)) in workspace.thumbnails(view).into_iter().enumerate() {
                    let Some(image) = image else {
                        formatter.warning(&format!("No thumbnail for {}", path.display()));
                        continue;
                    };
                    let file = dir.join(format!("{:02}_{}.png", index + 1, stem(&path)));
                    save_png(&image, &file)?;
                    formatter.debug(&format!("Wrote {}", file.display()));
                    written += 1;
                }
                formatter.success(&format!(
                    "Wrote {written} thumbnail(s) to {}",
                    dir.display()
                ));
            }
        }
        Ok(())
    }

    fn stem(path: &Path) -> String {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    }
}

#[cfg(not(feature = "render"))]
mod thumbnails {
    use super::*;

    pub(super) fn run(
        _formatter: &OutputFormatter,
        _deck: Deck,
        _target: Option<&str>,
        _view: ViewMode,
        _output: Option<PathBuf>,
    ) -> Result<()> {
        Err(PdfDeckError::invalid_config(
            "pdfdeck was built without the `render` feature; thumbnails are unavailable",
        ))
    }
}
