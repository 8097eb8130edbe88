//! PDF metadata management.
//!
//! Reads and writes the document `Info` dictionary: Title, Author,
//! Subject, Keywords, Creator, Producer and the creation/modification
//! dates. The trailer may hold the dictionary directly or by reference;
//! both are read, and writes always leave an indirect object behind.

use chrono::Utc;
use lopdf::{Dictionary, Document, Object};

use crate::config::Metadata;
use crate::error::{PdfDeckError, Result};
use crate::utils::{decode_text_string, encode_text_string, format_pdf_date};

/// Value written to `Producer` unless the caller supplies one.
pub const PRODUCER: &str = "pdfdeck";

/// Manager for PDF metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataManager;

impl MetadataManager {
    /// Create a new metadata manager.
    pub fn new() -> Self {
        Self
    }

    /// Read metadata from a document.
    ///
    /// Missing or malformed `Info` dictionaries yield empty metadata.
    pub fn get_metadata(&self, doc: &Document) -> Metadata {
        let Some(info) = info_dictionary(doc) else {
            return Metadata::default();
        };

        Metadata::new(
            text_field(info, b"Title"),
            text_field(info, b"Author"),
            text_field(info, b"Subject"),
            text_field(info, b"Keywords"),
        )
        .with_creator(text_field(info, b"Creator"))
        .with_producer(text_field(info, b"Producer"))
    }

    /// Write metadata into a document.
    ///
    /// Only fields that are set are written. `Producer` defaults to
    /// [`PRODUCER`], and `ModDate` is stamped with the current time
    /// (`CreationDate` too when the document has none).
    ///
    /// # Errors
    ///
    /// Returns an error if the trailer's `Info` entry points at something
    /// other than a dictionary.
    pub fn set_metadata(&self, doc: &mut Document, metadata: &Metadata) -> Result<()> {
        let existing = doc.trailer.get(b"Info").ok().cloned();
        let (info_id, mut info) = match existing {
            Some(Object::Reference(id)) => {
                let dict = doc.get_dictionary(id).map_err(|e| PdfDeckError::MetadataFailed {
                    reason: format!("Info object is not a dictionary: {e}"),
                })?;
                (id, dict.clone())
            }
            Some(Object::Dictionary(dict)) => (doc.new_object_id(), dict),
            _ => (doc.new_object_id(), Dictionary::new()),
        };

        let fields = [
            ("Title", &metadata.title),
            ("Author", &metadata.author),
            ("Subject", &metadata.subject),
            ("Keywords", &metadata.keywords),
            ("Creator", &metadata.creator),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                info.set(key, encode_text_string(value));
            }
        }

        let producer = metadata.producer.as_deref().unwrap_or(PRODUCER);
        info.set("Producer", encode_text_string(producer));

        let now = Object::string_literal(format_pdf_date(Utc::now()));
        if !info.has(b"CreationDate") {
            info.set("CreationDate", now.clone());
        }
        info.set("ModDate", now);

        doc.objects.insert(info_id, Object::Dictionary(info));
        doc.trailer.set("Info", Object::Reference(info_id));
        Ok(())
    }
}

fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

fn text_field(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        Object::Name(name) => Some(decode_text_string(name)),
        _ => None,
    }
}
