//! PDF fixtures built in memory for unit tests.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use std::path::{Path, PathBuf};

/// Build a document with `pages` pages. Page `n` shows the text
/// `{label}-{n}`, which [`page_labels`] reads back.
///
/// `MediaBox` and `Resources` live on the page tree root, so pages rely on
/// inheritance the way many real-world files do.
pub(crate) fn build_pdf(label: &str, pages: usize) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::with_capacity(pages);
    for n in 1..=pages {
        let content = format!("BT /F1 24 Tf 72 720 Td ({label}-{n}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Attach an `Info` dictionary to the document as an indirect object.
pub(crate) fn set_info(doc: &mut Document, info: Dictionary) -> ObjectId {
    let info_id = doc.add_object(info);
    doc.trailer.set("Info", info_id);
    info_id
}

/// Save a document under `dir` and return its path.
pub(crate) fn save_pdf(doc: &mut Document, dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

/// Write a `pages`-page fixture named `name` into `dir`.
pub(crate) fn write_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let label = name.trim_end_matches(".pdf");
    let mut doc = build_pdf(label, pages);
    save_pdf(&mut doc, dir, name)
}

/// Read back the `{label}-{n}` marker of every page, in page order.
pub(crate) fn page_labels(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let content = doc.get_page_content(page_id).unwrap();
            let text = String::from_utf8_lossy(&content);
            let start = text.find('(').unwrap() + 1;
            let end = text[start..].find(')').unwrap() + start;
            text[start..end].to_string()
        })
        .collect()
}
