//! Whole-document operations.
//!
//! - [`merge`]: concatenate documents in order
//! - [`split`]: one file per page
//! - [`extract`]: copy a contiguous page span
//! - [`info`]: file name, page count, path and metadata
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::config::MergeConfig;
//! use pdfdeck::ops::Merger;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MergeConfig::new(
//!     vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
//!     PathBuf::from("merged.pdf"),
//! );
//! let (stats, _) = Merger::new().merge_to_file(&config).await?;
//! println!("Merged {} pages", stats.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod extract;
pub mod info;
pub mod merge;
pub mod metadata;
pub mod pages;
pub mod split;

pub use extract::{ExtractResult, Extractor};
pub use info::DocumentInfo;
pub use merge::{MergeResult, MergeStatistics, Merger};
pub use metadata::MetadataManager;
pub use split::{SplitPlan, SplitResult, Splitter};
