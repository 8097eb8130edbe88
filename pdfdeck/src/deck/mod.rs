//! The deck: an ordered, duplicate-free list of PDF paths.
//!
//! Operations that act on one document (split, extract, info) take their
//! target from a selection of exactly one entry. [`Workspace`] pairs the
//! deck with a [`ThumbnailCache`] and keeps the two in step: removing or
//! clearing entries also drops their cached thumbnails.
//!
//! # Examples
//!
//! ```
//! use pdfdeck::deck::Deck;
//! use std::path::PathBuf;
//!
//! let mut deck = Deck::default();
//! deck.add([PathBuf::from("a.pdf"), PathBuf::from("b.pdf"), PathBuf::from("a.pdf")]);
//! assert_eq!(deck.len(), 2);
//!
//! assert_eq!(deck.move_up(1), Some(0));
//! assert_eq!(deck.files()[0], PathBuf::from("b.pdf"));
//! ```

mod store;

pub use store::{DEFAULT_DECK_FILE, DeckStore};

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{PdfDeckError, Result};
use crate::thumbnail::{PageRenderer, ThumbnailCache, ViewMode};

/// Ordered list of PDF paths without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    files: Vec<PathBuf>,
}

impl Deck {
    /// Create a deck from paths, skipping duplicates.
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut deck = Self::default();
        deck.add(paths);
        deck
    }

    /// Entries in order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when the deck has no entries.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// True when `path` is already in the deck.
    pub fn contains(&self, path: &Path) -> bool {
        self.files.iter().any(|file| file == path)
    }

    /// Entry at 0-based `index`.
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.files.get(index).map(PathBuf::as_path)
    }

    /// Append paths not already present, in the order given.
    ///
    /// Returns the number of paths added.
    pub fn add(&mut self, paths: impl IntoIterator<Item = PathBuf>) -> usize {
        let before = self.files.len();
        for path in paths {
            if !self.contains(&path) {
                self.files.push(path);
            }
        }
        self.files.len() - before
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Swap the entry at `index` with the one above it.
    ///
    /// Returns the new index, or `None` when the entry is already first or
    /// `index` is out of range.
    pub fn move_up(&mut self, index: usize) -> Option<usize> {
        if index == 0 || index >= self.files.len() {
            return None;
        }
        self.files.swap(index, index - 1);
        Some(index - 1)
    }

    /// Swap the entry at `index` with the one below it.
    ///
    /// Returns the new index, or `None` when the entry is already last or
    /// `index` is out of range.
    pub fn move_down(&mut self, index: usize) -> Option<usize> {
        let next = index.checked_add(1).filter(|&next| next < self.files.len())?;
        self.files.swap(index, next);
        Some(next)
    }

    /// Remove the entries at the given 0-based indices.
    ///
    /// Invalid and repeated indices are ignored. Returns the removed paths
    /// in deck order.
    pub fn remove(&mut self, indices: &[usize]) -> Vec<PathBuf> {
        let valid = self.valid_indices(indices);
        let mut removed: Vec<PathBuf> = valid
            .iter()
            .rev()
            .map(|&index| self.files.remove(index))
            .collect();
        removed.reverse();
        removed
    }

    /// The single entry selected by `indices`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfDeckError::SelectExactlyOne`] unless exactly one valid
    /// index is given. `action` names the operation in the message.
    pub fn select_one(&self, indices: &[usize], action: &str) -> Result<&Path> {
        let valid = self.valid_indices(indices);
        match valid.iter().next() {
            Some(&index) if valid.len() == 1 => Ok(&self.files[index]),
            _ => Err(PdfDeckError::select_exactly_one(action, valid.len())),
        }
    }

    /// Entry at 1-based `position`, as shown to users.
    ///
    /// # Errors
    ///
    /// Returns [`PdfDeckError::InvalidPosition`] when out of range, or
    /// [`PdfDeckError::EmptyDeck`] when the deck is empty.
    pub fn at_position(&self, position: usize) -> Result<&Path> {
        if self.files.is_empty() {
            return Err(PdfDeckError::EmptyDeck);
        }
        position
            .checked_sub(1)
            .and_then(|index| self.get(index))
            .ok_or(PdfDeckError::InvalidPosition {
                position,
                len: self.files.len(),
            })
    }

    /// Resolve a user-supplied target: a 1-based deck position or a path.
    pub fn resolve_target(&self, target: &str) -> Result<PathBuf> {
        match target.parse::<usize>() {
            Ok(position) => self.at_position(position).map(Path::to_path_buf),
            Err(_) => Ok(PathBuf::from(target)),
        }
    }

    fn valid_indices(&self, indices: &[usize]) -> BTreeSet<usize> {
        indices
            .iter()
            .copied()
            .filter(|&index| index < self.files.len())
            .collect()
    }
}

/// A deck together with its thumbnail cache.
pub struct Workspace<R> {
    deck: Deck,
    thumbnails: ThumbnailCache<R>,
}

impl<R: PageRenderer> Workspace<R> {
    /// Wrap `deck`, rendering thumbnails with `renderer`.
    pub fn new(deck: Deck, renderer: R) -> Self {
        Self {
            deck,
            thumbnails: ThumbnailCache::new(renderer),
        }
    }

    /// The underlying deck.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Number of cached thumbnails.
    pub fn cached_thumbnails(&self) -> usize {
        self.thumbnails.len()
    }

    /// See [`Deck::add`].
    pub fn add(&mut self, paths: impl IntoIterator<Item = PathBuf>) -> usize {
        self.deck.add(paths)
    }

    /// See [`Deck::move_up`].
    pub fn move_up(&mut self, index: usize) -> Option<usize> {
        self.deck.move_up(index)
    }

    /// See [`Deck::move_down`].
    pub fn move_down(&mut self, index: usize) -> Option<usize> {
        self.deck.move_down(index)
    }

    /// Remove entries and their cached thumbnails.
    pub fn remove(&mut self, indices: &[usize]) -> Vec<PathBuf> {
        let removed = self.deck.remove(indices);
        for path in &removed {
            self.thumbnails.invalidate(path);
        }
        removed
    }

    /// Empty the deck and the cache.
    pub fn clear(&mut self) {
        self.deck.clear();
        self.thumbnails.clear();
    }

    /// Thumbnail of the entry at 0-based `index`, scaled for `view`.
    pub fn thumbnail(&mut self, index: usize, view: ViewMode) -> Option<RgbaImage> {
        let path = self.deck.get(index)?.to_path_buf();
        self.thumbnails.thumbnail(&path, view)
    }

    /// Every entry with its thumbnail, in deck order.
    ///
    /// Entries that cannot be rendered carry `None`.
    pub fn thumbnails(&mut self, view: ViewMode) -> Vec<(PathBuf, Option<RgbaImage>)> {
        let Self { deck, thumbnails } = self;
        deck.files()
            .iter()
            .map(|path| (path.clone(), thumbnails.thumbnail(path, view)))
            .collect()
    }
}
