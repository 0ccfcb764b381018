//! Thin wrapper over the lopdf collaborator.
//!
//! Everything the engine needs from the PDF library lives here: decoding a
//! byte buffer, counting pages, carving out a page range as a new document,
//! appending one document's pages to another, and serializing. All failures
//! come back as values so a caller can attribute them to a specific input.

use lopdf::{Document, Object, ObjectId};

/// Failure of a single page-level operation, with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct PageOpError(
    /// Human-readable reason.
    pub String,
);

impl PageOpError {
    fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Decode a PDF from an in-memory buffer.
///
/// A document that parses but contains no pages is treated as a decode
/// failure; there is nothing downstream operations could do with it.
pub fn decode(bytes: &[u8]) -> Result<Document, PageOpError> {
    let doc = Document::load_mem(bytes).map_err(|e| {
        let msg = e.to_string();
        if msg.contains("encrypt") || msg.contains("password") {
            PageOpError::new("PDF is encrypted")
        } else {
            PageOpError::new(msg)
        }
    })?;

    if doc.get_pages().is_empty() {
        return Err(PageOpError::new("PDF has no pages"));
    }

    Ok(doc)
}

/// Number of pages in a decoded document.
pub fn page_count(doc: &Document) -> u32 {
    doc.get_pages().len() as u32
}

/// Build a new document containing only pages `start..=end` (1-based), in
/// their original order.
///
/// The caller is expected to have range-checked `start` and `end` against
/// [`page_count`]; this function only carves.
pub fn extract_range(doc: &Document, start: u32, end: u32) -> Result<Document, PageOpError> {
    let total = page_count(doc);
    let mut carved = doc.clone();

    // Delete in reverse so page numbers stay valid while deleting.
    let mut to_delete: Vec<u32> = (1..=total).filter(|p| *p < start || *p > end).collect();
    to_delete.reverse();
    for page_num in to_delete {
        carved.delete_pages(&[page_num]);
    }

    if page_count(&carved) != end - start + 1 {
        return Err(PageOpError::new(format!(
            "expected {} page(s) after extraction, got {}",
            end - start + 1,
            page_count(&carved)
        )));
    }

    carved.prune_objects();
    Ok(carved)
}

/// Append all pages of `src` to `dest`, in their original order.
///
/// `max_id` tracks the highest object id in `dest` across repeated appends;
/// source objects are renumbered past it to avoid collisions.
pub fn append_document(
    dest: &mut Document,
    max_id: &mut u32,
    mut src: Document,
) -> Result<(), PageOpError> {
    src.renumber_objects_with(*max_id + 1);
    *max_id = src.max_id;

    let src_pages: Vec<ObjectId> = src.get_pages().into_values().collect();
    dest.objects.extend(src.objects);

    add_pages_to_tree(dest, &src_pages)
}

/// Serialize a document to bytes, compressing streams first.
pub fn serialize(doc: &mut Document) -> Result<Vec<u8>, PageOpError> {
    doc.compress();
    doc.renumber_objects();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| PageOpError::new(format!("failed to serialize document: {e}")))?;
    Ok(buffer)
}

/// Push page references onto the destination's page tree and fix its count.
fn add_pages_to_tree(dest: &mut Document, page_ids: &[ObjectId]) -> Result<(), PageOpError> {
    let catalog = dest
        .catalog_mut()
        .map_err(|e| PageOpError::new(format!("failed to get catalog: {e}")))?;

    let pages_id = catalog
        .get(b"Pages")
        .and_then(|p| p.as_reference())
        .map_err(|e| PageOpError::new(format!("failed to get pages reference: {e}")))?;

    let pages_obj = dest
        .get_object_mut(pages_id)
        .map_err(|e| PageOpError::new(format!("failed to get pages object: {e}")))?;

    let Object::Dictionary(dict) = pages_obj else {
        return Err(PageOpError::new("Pages object is not a dictionary"));
    };

    match dict.get_mut(b"Kids") {
        Ok(Object::Array(kids)) => {
            for &page_id in page_ids {
                kids.push(Object::Reference(page_id));
            }
        }
        Ok(_) => return Err(PageOpError::new("Kids is not an array")),
        Err(_) => return Err(PageOpError::new("Pages dictionary missing Kids array")),
    }

    let current = dict.get(b"Count").and_then(|c| c.as_i64()).unwrap_or(0);
    dict.set("Count", Object::Integer(current + page_ids.len() as i64));

    Ok(())
}
