//! Serialization of the element tree back to XML text.

use quick_xml::escape::escape;

use crate::element::{Document, Element};

/// Serializes a document with a UTF-8 declaration and two-space indentation.
///
/// The output is a machine artifact consumed by Mapnik, so the original
/// formatting is not preserved; entities in text and attribute values are
/// re-escaped on the way out.
pub(crate) fn write_document(doc: &Document) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    write_element(&mut out, doc.root(), 0);
    out.push('\n');
    out
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);
    out.push('<');
    out.push_str(element.name());
    for (key, value) in element.attrs() {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }

    if element.text().is_empty() && element.children().is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    out.push_str(&escape(element.text()));
    if !element.children().is_empty() {
        for child in element.children() {
            out.push('\n');
            write_element(out, child, depth + 1);
        }
        out.push('\n');
        out.push_str(&indent);
    }
    out.push_str("</");
    out.push_str(element.name());
    out.push('>');
}
