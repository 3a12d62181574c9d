//! Writing profile metadata into an exported PDF.

use crate::error::{Error, Result};
use crate::model::DocumentInfo;
use lopdf::{Dictionary, Document, Object, StringFormat};
use std::fs;
use std::path::Path;

/// Set the PDF's document-information dictionary from `info`.
///
/// Entries the browser already wrote (producer, creation date) are kept.
/// The result is saved next to the original and renamed over it, so a
/// failure leaves the browser's PDF untouched.
pub fn stamp_document_info(pdf: &Path, info: &DocumentInfo) -> Result<()> {
    let mut doc = Document::load(pdf)?;

    let existing = doc
        .trailer
        .get(b"Info")
        .and_then(Object::as_reference)
        .ok();

    match existing {
        Some(id) => {
            let dict = doc.get_object_mut(id)?.as_dict_mut()?;
            apply(dict, info);
        }
        None => {
            let mut dict = Dictionary::new();
            apply(&mut dict, info);
            let id = doc.add_object(dict);
            doc.trailer.set("Info", Object::Reference(id));
        }
    }

    let staged = pdf.with_extension("tmp.pdf");
    doc.save(&staged)?;
    if let Err(e) = fs::rename(&staged, pdf) {
        let _ = fs::remove_file(&staged);
        return Err(Error::write(pdf, e));
    }

    log::debug!("Stamped document info into {}", pdf.display());
    Ok(())
}

fn apply(dict: &mut Dictionary, info: &DocumentInfo) {
    dict.set("Title", text_string(&info.title));
    dict.set("Author", text_string(&info.author));
    dict.set("Subject", text_string(&info.subject));
    if !info.keywords.is_empty() {
        dict.set("Keywords", text_string(&info.keywords));
    }
    dict.set("Creator", text_string(&info.creator));
}

/// Encode a PDF text string: ASCII as a literal, anything else as
/// UTF-16BE with a byte-order mark.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }

    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}
