//! First-page thumbnails.
//!
//! A [`PageRenderer`] turns the first page of a file into an RGBA image;
//! [`ThumbnailCache`] keeps one image per path so every file is rendered
//! at most once. The cache has no size bound and no eviction: entries go
//! away only through [`ThumbnailCache::invalidate`] and
//! [`ThumbnailCache::clear`].

#[cfg(feature = "render")]
mod pdfium;

#[cfg(feature = "render")]
pub use pdfium::PdfiumRenderer;

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{PdfDeckError, Result};

/// Scale applied to page points when rendering thumbnails.
pub const DEFAULT_ZOOM: f32 = 0.5;

/// Renders the first page of a document.
pub trait PageRenderer {
    /// Render page one of `path`, scaling page points by `zoom`.
    ///
    /// Returns `Ok(None)` for a document without pages.
    fn render_first_page(&self, path: &Path, zoom: f32) -> Result<Option<RgbaImage>>;
}

/// How the deck is displayed, which decides the thumbnail box size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Compact rows with small icons.
    #[default]
    List,
    /// Large icons in a grid.
    Grid,
}

impl ViewMode {
    /// Bounding box `(width, height)` thumbnails are fitted into.
    pub fn box_size(&self) -> (u32, u32) {
        match self {
            Self::List => (32, 32),
            Self::Grid => (150, 200),
        }
    }
}

impl FromStr for ViewMode {
    type Err = PdfDeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "list" => Ok(Self::List),
            "grid" => Ok(Self::Grid),
            _ => Err(PdfDeckError::invalid_config(format!(
                "Invalid view mode: {s}. Must be one of: list, grid"
            ))),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => f.write_str("list"),
            Self::Grid => f.write_str("grid"),
        }
    }
}

/// Fit `image` into the box of `view`, keeping its aspect ratio.
pub fn scale_for_view(image: &RgbaImage, view: ViewMode) -> RgbaImage {
    let (width, height) = view.box_size();
    DynamicImage::ImageRgba8(image.clone())
        .resize(width, height, FilterType::Lanczos3)
        .to_rgba8()
}

/// Write an image as PNG.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| PdfDeckError::FailedToWrite {
            path: path.to_path_buf(),
            source: std::io::Error::other(e),
        })
}

/// Path-keyed cache of first-page renders.
pub struct ThumbnailCache<R> {
    renderer: R,
    zoom: f32,
    entries: HashMap<PathBuf, RgbaImage>,
}

impl<R: PageRenderer> ThumbnailCache<R> {
    /// Create an empty cache rendering at [`DEFAULT_ZOOM`].
    pub fn new(renderer: R) -> Self {
        Self::with_zoom(renderer, DEFAULT_ZOOM)
    }

    /// Create an empty cache rendering at `zoom`.
    pub fn with_zoom(renderer: R, zoom: f32) -> Self {
        Self {
            renderer,
            zoom,
            entries: HashMap::new(),
        }
    }

    /// The renderer used for cache misses.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Return the cached render of `path`, rendering it on first use.
    ///
    /// Render failures are logged and yield `None`. Nothing is cached for
    /// them, so a later call tries again.
    pub fn get_or_render(&mut self, path: &Path) -> Option<&RgbaImage> {
        if !self.entries.contains_key(path) {
            match self.renderer.render_first_page(path, self.zoom) {
                Ok(Some(image)) => {
                    debug!(path = %path.display(), "rendered thumbnail");
                    self.entries.insert(path.to_path_buf(), image);
                }
                Ok(None) => {
                    debug!(path = %path.display(), "no pages to render");
                    return None;
                }
                Err(e) => {
                    warn!("thumbnail unavailable: {e}");
                    return None;
                }
            }
        }
        self.entries.get(path)
    }

    /// Cached render scaled for `view`.
    pub fn thumbnail(&mut self, path: &Path, view: ViewMode) -> Option<RgbaImage> {
        self.get_or_render(path)
            .map(|image| scale_for_view(image, view))
    }

    /// Cached render of `path`, without rendering.
    pub fn get(&self, path: &Path) -> Option<&RgbaImage> {
        self.entries.get(path)
    }

    /// Drop the entry for `path`. Returns whether one existed.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached renders.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
