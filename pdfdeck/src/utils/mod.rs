//! Utilities for path collection, PDF text strings and formatting.

use chrono::{DateTime, Utc};
use lopdf::{Object, StringFormat};
use std::path::PathBuf;

use crate::Result;

/// Expand multiple glob patterns into filesystem paths.
///
/// Accepts anything iterable with items that convert to `&str`, e.g.:
/// `&[&str]`, `Vec<String>`, or `Vec<&str>`.
///
/// Matches of one pattern are sorted. A pattern without glob
/// metacharacters that matches nothing is returned as a plain path, so
/// the caller can report the missing file instead of dropping it.
///
/// Errors:
/// - Propagates `glob` parse errors.
/// - Propagates filesystem errors from glob iterator.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let paths = collect_paths_for_pattern(pattern)?;
        if paths.is_empty() && !is_glob(pattern) {
            resolved_paths.push(PathBuf::from(pattern));
        } else {
            resolved_paths.extend(paths);
        }
    }

    Ok(resolved_paths)
}

/// Expand a single glob pattern into filesystem paths.
///
/// Pattern examples:
/// - `"**/*.pdf"`
/// - `"./docs/*.pdf"`
fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut resolved_paths = Vec::new();

    for entry in glob::glob(pattern)? {
        resolved_paths.push(entry?);
    }

    resolved_paths.sort();
    Ok(resolved_paths)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Decode a PDF text string.
///
/// Text strings starting with the `FE FF` byte order mark are UTF-16BE;
/// anything else is read as UTF-8, falling back to Latin-1 (close enough
/// to PDFDocEncoding for metadata display).
pub fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Encode a string as a PDF text string object.
///
/// ASCII text becomes a literal string; anything else is written as
/// UTF-16BE with a byte order mark.
pub fn encode_text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }

    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Format a timestamp as a PDF date string (`D:YYYYMMDDHHmmSSZ`).
pub fn format_pdf_date(time: DateTime<Utc>) -> String {
    time.format("D:%Y%m%d%H%M%SZ").to_string()
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
