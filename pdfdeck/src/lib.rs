//! pdfdeck - keep an ordered deck of PDF files and work on it.
//!
//! This library holds the pieces behind the `pdfdeck` command:
//!
//! - An ordered, duplicate-free deck of paths with JSON persistence
//! - Merging documents in deck order
//! - Splitting a document into one file per page
//! - Extracting a contiguous page span
//! - Reading document metadata
//! - A path-keyed cache of first-page thumbnails
//!
//! # Examples
//!
//! ## Merge the deck
//!
//! ```no_run
//! use pdfdeck::config::{DEFAULT_MERGE_OUTPUT, MergeConfig};
//! use pdfdeck::deck::DeckStore;
//! use pdfdeck::ops::Merger;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let deck = DeckStore::new(".pdfdeck.json").load().await?;
//! let config = MergeConfig::new(deck.files().to_vec(), DEFAULT_MERGE_OUTPUT.into());
//!
//! let (stats, _) = Merger::new().merge_to_file(&config).await?;
//! println!("Created {} page document", stats.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Extract a page span
//!
//! ```no_run
//! use pdfdeck::config::{ExtractConfig, PageSpan};
//! use pdfdeck::ops::Extractor;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let span: PageSpan = "3-7".parse()?;
//! let config = ExtractConfig::new(PathBuf::from("book.pdf"), span, None);
//! let result = Extractor::new().extract(&config).await?;
//! println!("Wrote {}", result.output.display());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod deck;
pub mod error;
pub mod io;
pub mod ops;
pub mod output;
pub mod thumbnail;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use deck::{Deck, DeckStore, Workspace};
pub use error::{PdfDeckError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
