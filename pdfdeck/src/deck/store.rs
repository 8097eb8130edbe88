//! JSON persistence for the deck.
//!
//! The file looks like `{"version":1,"files":["a.pdf","b.pdf"]}`. A
//! missing file is an empty deck.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::Deck;
use crate::error::{PdfDeckError, Result};

/// Deck file used when none is configured.
pub const DEFAULT_DECK_FILE: &str = ".pdfdeck.json";

const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct DeckFile {
    version: u32,
    #[serde(flatten)]
    deck: Deck,
}

/// Loads and saves a deck at a fixed path.
#[derive(Debug, Clone)]
pub struct DeckStore {
    path: PathBuf,
}

impl DeckStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the deck file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the deck. A missing file yields an empty deck.
    ///
    /// # Errors
    ///
    /// Returns [`PdfDeckError::InvalidDeckFile`] if the file is not a deck
    /// of a supported version, or an I/O error if it cannot be read.
    pub async fn load(&self) -> Result<Deck> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no deck file, starting empty");
                return Ok(Deck::default());
            }
            Err(e) => {
                return Err(PdfDeckError::FileNotAccessible {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let file: DeckFile = serde_json::from_str(&text).map_err(|e| self.invalid(e))?;
        if file.version != FORMAT_VERSION {
            return Err(self.invalid(format!(
                "unsupported version {} (expected {FORMAT_VERSION})",
                file.version
            )));
        }

        // Re-adding drops duplicates from hand-edited files.
        Ok(Deck::from_paths(file.deck.files))
    }

    /// Write the deck, replacing the file atomically.
    pub async fn save(&self, deck: &Deck) -> Result<()> {
        let file = DeckFile {
            version: FORMAT_VERSION,
            deck: deck.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| PdfDeckError::FailedToWrite {
                path: tmp.clone(),
                source: e,
            })?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| PdfDeckError::FailedToWrite {
                path: self.path.clone(),
                source: e,
            })?;

        debug!(path = %self.path.display(), entries = deck.len(), "saved deck");
        Ok(())
    }

    fn invalid(&self, reason: impl ToString) -> PdfDeckError {
        PdfDeckError::InvalidDeckFile {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}
