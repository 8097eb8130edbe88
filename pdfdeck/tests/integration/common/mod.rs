//! Shared fixtures for the integration tests.
//!
//! Fixtures are generated with lopdf instead of being checked in. Page `n`
//! of a fixture named `report.pdf` draws the text `report-n`, which
//! [`page_labels`] reads back to check page order.

#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};

/// Write a `pages`-page PDF named `name` into `dir`.
pub fn write_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    write_pdf_with_info(dir, name, pages, None)
}

/// Write a fixture carrying an `Info` dictionary.
pub fn write_pdf_with_info(
    dir: &Path,
    name: &str,
    pages: usize,
    info: Option<Dictionary>,
) -> PathBuf {
    let label = name.trim_end_matches(".pdf");
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });

    let kids: Vec<Object> = (1..=pages)
        .map(|n| {
            let content = format!("BT /F1 18 Tf 50 700 Td ({label}-{n}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
                "Contents" => content_id,
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(info) = info {
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", info_id);
    }

    let path = dir.join(name);
    doc.save(&path).expect("Failed to write fixture");
    path
}

/// Write a file with a PDF extension but no PDF inside.
pub fn write_garbage(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"this is not a pdf").expect("Failed to write fixture");
    path
}

/// Page markers of the PDF at `path`, in page order.
pub fn page_labels(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("Failed to load output");
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let content = doc.get_page_content(page_id).expect("page without content");
            let text = String::from_utf8_lossy(&content).into_owned();
            let start = text.find('(').expect("no text on page") + 1;
            let end = start + text[start..].find(')').expect("unterminated text");
            text[start..end].to_string()
        })
        .collect()
}
