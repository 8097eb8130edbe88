//! Page tree manipulation shared by merge, split and extract.

use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{PdfDeckError, Result};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Guard against malformed, cyclic `Parent` chains.
const MAX_TREE_DEPTH: usize = 64;

/// Catalog entries that point into the page tree of the source and are
/// dropped when only some of its pages are kept.
const PAGE_BOUND_CATALOG_KEYS: [&[u8]; 2] = [b"Outlines", b"StructTreeRoot"];

/// Append `page_ids` to the root page tree node of `doc`.
///
/// The pages must already be present in `doc.objects`. Inherited
/// attributes are copied onto each page first, since the page loses its
/// old ancestors once it is re-parented under the root node.
///
/// # Errors
///
/// Returns an error if the catalog or root `Pages` node is malformed.
pub fn adopt_pages(doc: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
    let pages_id = page_tree_root(doc, "merge")?;

    for &page_id in page_ids {
        let inherited = inherited_attributes(doc, page_id);
        let page = doc.get_dictionary_mut(page_id).map_err(|e| {
            PdfDeckError::operation_failed("merge", format!("Page {page_id:?} is missing: {e}"))
        })?;
        reparent(page, inherited, pages_id);
    }

    let pages = doc.get_dictionary_mut(pages_id).map_err(|_| {
        PdfDeckError::operation_failed("merge", "Pages object is not a dictionary")
    })?;

    match pages.get_mut(b"Kids") {
        Ok(Object::Array(kids)) => {
            kids.extend(page_ids.iter().map(|&id| Object::Reference(id)));
        }
        _ => {
            return Err(PdfDeckError::operation_failed(
                "merge",
                "Pages dictionary is missing its Kids array",
            ));
        }
    }

    let count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
    pages.set("Count", count + page_ids.len() as i64);

    Ok(())
}

/// Build a document holding only the pages of `doc` that `keep` accepts.
///
/// Page numbers are 1-based. The kept pages become direct children of
/// the root page tree node, and only objects reachable from the rewritten
/// tree are copied, so the cost follows the size of the result rather
/// than the size of `doc`. The outline and structure tree are dropped
/// because their entries may point at pages that were left out.
///
/// # Errors
///
/// Returns an error naming `operation` if the catalog or page tree of
/// `doc` is malformed.
pub fn keep_pages(
    doc: &Document,
    operation: &'static str,
    keep: impl Fn(u32) -> bool,
) -> Result<Document> {
    let catalog_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|e| PdfDeckError::operation_failed(operation, format!("No catalog: {e}")))?;
    let pages_id = page_tree_root(doc, operation)?;

    let kept: Vec<ObjectId> = doc
        .get_pages()
        .into_iter()
        .filter(|&(page, _)| keep(page))
        .map(|(_, id)| id)
        .collect();

    let mut rewritten: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for &page_id in &kept {
        let mut page = doc
            .get_dictionary(page_id)
            .map_err(|e| {
                PdfDeckError::operation_failed(operation, format!("Page {page_id:?} is missing: {e}"))
            })?
            .clone();
        reparent(&mut page, inherited_attributes(doc, page_id), pages_id);
        rewritten.insert(page_id, Object::Dictionary(page));
    }

    let mut root = doc
        .get_dictionary(pages_id)
        .map_err(|_| PdfDeckError::operation_failed(operation, "Pages object is not a dictionary"))?
        .clone();
    root.set(
        "Kids",
        kept.iter().map(|&id| Object::Reference(id)).collect::<Vec<_>>(),
    );
    root.set("Count", kept.len() as i64);
    rewritten.insert(pages_id, Object::Dictionary(root));

    let mut catalog = doc
        .get_dictionary(catalog_id)
        .map_err(|e| PdfDeckError::operation_failed(operation, format!("No catalog: {e}")))?
        .clone();
    for key in PAGE_BOUND_CATALOG_KEYS {
        catalog.remove(key);
    }
    rewritten.insert(catalog_id, Object::Dictionary(catalog));

    let reachable = {
        let rewritten = &rewritten;
        let objects = &doc.objects;
        reachable_ids(&doc.trailer, move |id| {
            rewritten.get(&id).or_else(|| objects.get(&id))
        })
    };

    let objects: BTreeMap<ObjectId, Object> = reachable
        .into_iter()
        .filter_map(|id| {
            let object = rewritten
                .remove(&id)
                .or_else(|| doc.objects.get(&id).cloned())?;
            Some((id, object))
        })
        .collect();

    let mut part = Document::with_version(doc.version.clone());
    part.binary_mark = doc.binary_mark.clone();
    part.trailer = doc.trailer.clone();
    part.objects = objects;
    part.max_id = doc.max_id;
    part.renumber_objects();
    Ok(part)
}

/// Remove every object that cannot be reached from the trailer.
///
/// Runs in time linear in the number of objects and references.
pub fn prune_unreachable(doc: &mut Document) -> usize {
    let reachable = {
        let objects = &doc.objects;
        reachable_ids(&doc.trailer, move |id| objects.get(&id))
    };

    let before = doc.objects.len();
    doc.objects.retain(|id, _| reachable.contains(id));
    before - doc.objects.len()
}

/// Object ids reachable from `trailer`, resolving each id with `lookup`.
fn reachable_ids<'a>(
    trailer: &Dictionary,
    lookup: impl Fn(ObjectId) -> Option<&'a Object>,
) -> BTreeSet<ObjectId> {
    let mut pending = Vec::new();
    for (_, value) in trailer.iter() {
        collect_references(value, &mut pending);
    }

    let mut seen = BTreeSet::new();
    while let Some(id) = pending.pop() {
        if !seen.insert(id) {
            continue;
        }
        if let Some(object) = lookup(id) {
            collect_references(object, &mut pending);
        }
    }
    seen
}

fn collect_references(object: &Object, out: &mut Vec<ObjectId>) {
    match object {
        Object::Reference(id) => out.push(*id),
        Object::Array(items) => {
            for item in items {
                collect_references(item, out);
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter() {
                collect_references(value, out);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter() {
                collect_references(value, out);
            }
        }
        _ => {}
    }
}

fn page_tree_root(doc: &Document, operation: &'static str) -> Result<ObjectId> {
    doc.catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| {
            PdfDeckError::operation_failed(operation, format!("Failed to get pages reference: {e}"))
        })
}

/// Point `page` at `pages_id`, keeping the attributes it used to inherit.
fn reparent(page: &mut Dictionary, inherited: Vec<(&'static [u8], Object)>, pages_id: ObjectId) {
    for (key, value) in inherited {
        if !page.has(key) {
            page.set(key, value);
        }
    }
    page.set("Parent", Object::Reference(pages_id));
}

/// Collect inheritable attributes from the ancestors of `page_id`.
///
/// The nearest ancestor wins for each key.
fn inherited_attributes(doc: &Document, page_id: ObjectId) -> Vec<(&'static [u8], Object)> {
    let mut found: Vec<(&'static [u8], Object)> = Vec::new();

    let mut parent = doc
        .get_dictionary(page_id)
        .and_then(|page| page.get(b"Parent"))
        .and_then(Object::as_reference)
        .ok();

    for _ in 0..MAX_TREE_DEPTH {
        let Some(node_id) = parent else { break };
        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };

        for key in INHERITABLE {
            if found.iter().any(|(k, _)| *k == key) {
                continue;
            }
            if let Ok(value) = node.get(key) {
                found.push((key, value.clone()));
            }
        }

        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    found
}
