//! CLI argument parsing for pdfdeck.
//!
//! The command line keeps a deck of PDF files in a JSON file (by default
//! `.pdfdeck.json` in the current directory). Deck commands edit it;
//! operation commands act on deck entries or on paths given directly.
//!
//! Wherever a `TARGET` is expected, a number is a 1-based deck position
//! and anything else is a file path.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use pdfdeck::config::{
    CompressionLevel, DEFAULT_MERGE_OUTPUT, ExtractConfig, MergeConfig, Metadata, OverwriteMode,
    PageSpan, SplitConfig,
};
use pdfdeck::deck::{DEFAULT_DECK_FILE, Deck};
use pdfdeck::error::Result;

/// Keep an ordered deck of PDF files and merge, split, extract or inspect them.
#[derive(Parser, Debug)]
#[command(name = "pdfdeck")]
#[command(version)]
#[command(about = "Keep an ordered deck of PDF files and work on it", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Deck file holding the ordered list of PDFs
    #[arg(long, global = true, value_name = "FILE", env = "PDFDECK_DECK")]
    #[arg(default_value = DEFAULT_DECK_FILE)]
    pub deck: PathBuf,

    /// Verbose output - show timings, sizes and every file written
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed. An existing output file
    /// is never overwritten without --force in this mode.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Overwrite existing output files without confirmation
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Never overwrite existing output files
    #[arg(long, global = true, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Compression level for written PDFs
    ///
    /// - none: No compression (preserves exact quality)
    /// - standard: Balanced compression (default)
    /// - maximum: Drop unreferenced objects, then compress
    #[arg(short, long, global = true, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Append PDF files to the end of the deck
    ///
    /// Glob patterns are expanded. Files that are not readable PDFs are
    /// skipped with a warning; files already in the deck are ignored.
    Add {
        /// Files or glob patterns to add
        #[arg(required = true, value_name = "FILE")]
        patterns: Vec<String>,
    },

    /// Show the deck in order
    #[command(alias = "ls")]
    List {
        /// Print the deck as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move the entry at POSITION one place up
    Up {
        /// 1-based deck position
        position: usize,
    },

    /// Move the entry at POSITION one place down
    Down {
        /// 1-based deck position
        position: usize,
    },

    /// Remove entries from the deck (files on disk are kept)
    #[command(alias = "rm")]
    Remove {
        /// 1-based deck positions
        #[arg(required = true, value_name = "POSITION")]
        positions: Vec<usize>,
    },

    /// Remove every entry from the deck
    Clear,

    /// Merge the deck (or the given files) into one document
    Merge(MergeArgs),

    /// Write every page of a document to its own file
    Split {
        /// Deck position or file path
        target: String,

        /// Directory receiving the page files
        #[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,
    },

    /// Copy a contiguous page span into a new document
    Extract {
        /// Deck position or file path
        target: String,

        /// First page to keep (1-based)
        start: u32,

        /// Last page to keep, defaults to START
        end: Option<u32>,

        /// Output file, defaults to pages_START-END.pdf
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show page count and metadata of a document
    Info {
        /// Deck position or file path
        target: String,

        /// Print the information as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render first-page thumbnails as PNG files
    ///
    /// With a TARGET a single thumbnail is written to --output (default
    /// STEM.png). Without one, every deck entry is rendered into the
    /// --output directory as NN_STEM.png.
    Thumbnail {
        /// Deck position or file path
        target: Option<String>,

        /// Size class of the thumbnail
        #[arg(long, value_name = "VIEW", default_value = "grid")]
        #[arg(value_parser = ["list", "grid"])]
        view: String,

        /// Output file (with TARGET) or directory (without)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Arguments of the merge subcommand.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Files to merge in order, instead of the deck
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_MERGE_OUTPUT)]
    pub output: PathBuf,

    /// Set title metadata for output PDF
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Set author metadata for output PDF
    #[arg(long, value_name = "TEXT")]
    pub author: Option<String>,

    /// Set subject metadata for output PDF
    #[arg(long, value_name = "TEXT")]
    pub subject: Option<String>,

    /// Set keywords metadata for output PDF (comma-separated)
    #[arg(long, value_name = "TEXT")]
    pub keywords: Option<String>,

    /// Skip PDFs that fail to load instead of stopping
    #[arg(long)]
    pub continue_on_error: bool,

    /// Number of files to load concurrently (default: CPU count)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

impl Cli {
    /// Overwrite policy selected by --force / --no-clobber.
    pub fn overwrite_mode(&self) -> OverwriteMode {
        if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        }
    }

    /// Parsed compression level.
    pub fn compression(&self) -> Result<CompressionLevel> {
        CompressionLevel::from_str(&self.compression)
    }

    /// Build the merge configuration. Files named on the command line take
    /// precedence over the deck.
    pub fn to_merge_config(&self, args: &MergeArgs, deck: &Deck) -> Result<MergeConfig> {
        let inputs = if args.files.is_empty() {
            deck.files().to_vec()
        } else {
            args.files.clone()
        };

        let config = MergeConfig {
            overwrite_mode: self.overwrite_mode(),
            compression: self.compression()?,
            metadata: Metadata::new(
                args.title.clone(),
                args.author.clone(),
                args.subject.clone(),
                args.keywords.clone(),
            ),
            continue_on_error: args.continue_on_error,
            jobs: args.jobs,
            ..MergeConfig::new(inputs, args.output.clone())
        };
        config.validate()?;
        Ok(config)
    }

    /// Build the split configuration for a resolved input.
    pub fn to_split_config(&self, input: PathBuf, output_dir: PathBuf) -> Result<SplitConfig> {
        Ok(SplitConfig {
            overwrite_mode: self.overwrite_mode(),
            compression: self.compression()?,
            ..SplitConfig::new(input, output_dir)
        })
    }

    /// Build the extract configuration for a resolved input.
    pub fn to_extract_config(
        &self,
        input: PathBuf,
        start: u32,
        end: Option<u32>,
        output: Option<PathBuf>,
    ) -> Result<ExtractConfig> {
        let span = PageSpan::new(start, end.unwrap_or(start))?;
        let config = ExtractConfig {
            overwrite_mode: self.overwrite_mode(),
            compression: self.compression()?,
            ..ExtractConfig::new(input, span, output)
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfdeck::error::PdfDeckError;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pdfdeck").chain(args.iter().copied())).unwrap()
    }

    fn merge_args(cli: &Cli) -> &MergeArgs {
        match &cli.command {
            Command::Merge(args) => args,
            other => panic!("expected merge, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_defaults() {
        let cli = parse(&["list"]);
        assert_eq!(cli.deck, PathBuf::from(DEFAULT_DECK_FILE));
        assert_eq!(cli.overwrite_mode(), OverwriteMode::Prompt);
        assert_eq!(cli.compression().unwrap(), CompressionLevel::Standard);
        assert!(!cli.verbose);
        assert!(!cli.quiet);
    }

    #[rstest]
    #[case(&["clear", "--force"], OverwriteMode::Force)]
    #[case(&["clear", "--no-clobber"], OverwriteMode::NoClobber)]
    #[case(&["clear"], OverwriteMode::Prompt)]
    fn test_overwrite_modes(#[case] args: &[&str], #[case] expected: OverwriteMode) {
        assert_eq!(parse(args).overwrite_mode(), expected);
    }

    #[test]
    fn test_conflicting_flags_rejected() {
        assert!(Cli::try_parse_from(["pdfdeck", "clear", "-f", "--no-clobber"]).is_err());
        assert!(Cli::try_parse_from(["pdfdeck", "clear", "-q", "-v"]).is_err());
        assert!(Cli::try_parse_from(["pdfdeck", "clear", "-c", "ultra"]).is_err());
    }

    #[test]
    fn test_add_requires_files() {
        assert!(Cli::try_parse_from(["pdfdeck", "add"]).is_err());

        let cli = parse(&["add", "a.pdf", "chapters/*.pdf"]);
        match cli.command {
            Command::Add { patterns } => assert_eq!(patterns, ["a.pdf", "chapters/*.pdf"]),
            other => panic!("expected add, got {other:?}"),
        }
    }

    #[test]
    fn test_merge_uses_deck_without_files() {
        let cli = parse(&["merge", "--title", "Book", "-c", "none"]);
        let deck = Deck::from_paths(["a.pdf", "b.pdf"].map(PathBuf::from));

        let config = cli.to_merge_config(merge_args(&cli), &deck).unwrap();

        assert_eq!(config.inputs, deck.files());
        assert_eq!(config.output, PathBuf::from(DEFAULT_MERGE_OUTPUT));
        assert_eq!(config.compression, CompressionLevel::None);
        assert_eq!(config.metadata.title.as_deref(), Some("Book"));
    }

    #[test]
    fn test_merge_files_override_deck() {
        let cli = parse(&["merge", "x.pdf", "y.pdf", "-o", "out.pdf", "-j", "2"]);
        let deck = Deck::from_paths(["a.pdf", "b.pdf"].map(PathBuf::from));

        let config = cli.to_merge_config(merge_args(&cli), &deck).unwrap();

        assert_eq!(config.inputs, [PathBuf::from("x.pdf"), PathBuf::from("y.pdf")]);
        assert_eq!(config.output, PathBuf::from("out.pdf"));
        assert_eq!(config.jobs, Some(2));
    }

    #[test]
    fn test_merge_needs_two_files() {
        let cli = parse(&["merge"]);
        let deck = Deck::from_paths([PathBuf::from("only.pdf")]);

        let err = cli.to_merge_config(merge_args(&cli), &deck).unwrap_err();
        assert!(matches!(
            err,
            PdfDeckError::NotEnoughFiles {
                required: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_extract_single_page_defaults() {
        let cli = parse(&["extract", "2", "5"]);
        let config = cli
            .to_extract_config(PathBuf::from("doc.pdf"), 5, None, None)
            .unwrap();

        assert_eq!(config.span, PageSpan::single(5).unwrap());
        assert_eq!(config.output, PathBuf::from("pages_5-5.pdf"));
    }

    #[rstest]
    #[case(0, Some(3))]
    #[case(4, Some(2))]
    fn test_extract_invalid_span(#[case] start: u32, #[case] end: Option<u32>) {
        let cli = parse(&["extract", "doc.pdf", "1"]);
        assert!(
            cli.to_extract_config(PathBuf::from("doc.pdf"), start, end, None)
                .is_err()
        );
    }

    #[test]
    fn test_split_config() {
        let cli = parse(&["split", "1", "-d", "pages", "--no-clobber"]);
        let config = cli
            .to_split_config(PathBuf::from("doc.pdf"), PathBuf::from("pages"))
            .unwrap();

        assert_eq!(config.overwrite_mode, OverwriteMode::NoClobber);
        assert_eq!(config.page_path(3), PathBuf::from("pages/doc_page_3.pdf"));
    }

    #[test]
    fn test_thumbnail_defaults() {
        let cli = parse(&["thumbnail"]);
        match cli.command {
            Command::Thumbnail {
                target,
                view,
                output,
            } => {
                assert!(target.is_none());
                assert_eq!(view, "grid");
                assert!(output.is_none());
            }
            other => panic!("expected thumbnail, got {other:?}"),
        }
    }
}
