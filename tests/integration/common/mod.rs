//! Shared helpers for the integration tests.
//!
//! Tests build their PDFs in memory instead of shipping binary fixtures, so
//! every page stays attributable to its source document.

use lopdf::{Dictionary, Document, Object, Stream};
use pdfsuite::validate::RawFile;

/// Build a valid PDF with `num_pages` pages, each tagged `<prefix>-Page-<n>`.
pub fn build_test_pdf(num_pages: u32, prefix: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let catalog_id = doc.new_object_id();

    let mut page_refs = Vec::new();
    for page_num in 0..num_pages {
        let content = format!("BT /F1 12 Tf 50 700 Td ({prefix}-Page-{}) Tj ET", page_num + 1);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set("Contents", Object::Reference(content_id));
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]),
        );
        let page_id = doc.add_object(page);
        page_refs.push(Object::Reference(page_id));
    }

    let mut pages = Dictionary::new();
    pages.set("Type", Object::Name(b"Pages".to_vec()));
    pages.set("Count", Object::Integer(num_pages as i64));
    pages.set("Kids", Object::Array(page_refs));
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    doc.objects.insert(catalog_id, Object::Dictionary(catalog));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// A candidate file declaring itself a PDF, with a tagged page per index.
pub fn pdf_file(name: &str, pages: u32) -> RawFile {
    RawFile::pdf(name, build_test_pdf(pages, name))
}

/// Bytes that declare themselves a PDF but do not parse as one.
pub fn corrupt_file(name: &str) -> RawFile {
    RawFile::pdf(name, b"%PDF-1.5 not actually a pdf".to_vec())
}

/// Page count of a serialized PDF.
pub fn page_count(bytes: &[u8]) -> usize {
    Document::load_mem(bytes).unwrap().get_pages().len()
}
