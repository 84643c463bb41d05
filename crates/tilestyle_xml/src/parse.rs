//! Event-stream parsing into the owned element tree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::element::{Document, Element};
use crate::error::XmlError;

/// Parses a complete document from a string.
///
/// The XML declaration, DOCTYPE, comments, and processing instructions are
/// skipped. Whitespace-only text inside elements that contain child elements
/// is treated as formatting and dropped; all other text is kept verbatim.
pub(crate) fn parse_document(content: &str) -> Result<Document, XmlError> {
    let mut reader = Reader::from_str(content);
    // Tag matching is checked below so mismatches surface as MismatchedTag
    // with both names, not as a generic reader error.
    reader.config_mut().check_end_names = false;
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event().map_err(|e| XmlError::Parse(e.to_string()))? {
            Event::Start(start) => {
                if root.is_some() && stack.is_empty() {
                    return Err(XmlError::Parse(
                        "content after the root element".to_string(),
                    ));
                }
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                if root.is_some() && stack.is_empty() {
                    return Err(XmlError::Parse(
                        "content after the root element".to_string(),
                    ));
                }
                attach(&mut stack, &mut root, element);
            }
            Event::End(end) => {
                let element = stack.pop().ok_or_else(|| {
                    XmlError::Parse("closing tag without matching open tag".to_string())
                })?;
                let found = decode(end.name().as_ref())?;
                if found != element.name() {
                    return Err(XmlError::MismatchedTag {
                        expected: element.name().to_string(),
                        found,
                    });
                }
                attach(&mut stack, &mut root, element);
            }
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    let unescaped =
                        text.unescape().map_err(|e| XmlError::Parse(e.to_string()))?;
                    top.push_text(&unescaped);
                }
                // Text outside any element (leading/trailing whitespace,
                // whitespace around the DOCTYPE) is dropped.
            }
            Event::CData(cdata) => {
                if let Some(top) = stack.last_mut() {
                    let raw = decode(&cdata.into_inner())?;
                    top.push_text(&raw);
                }
            }
            Event::Decl(_) | Event::DocType(_) | Event::Comment(_) | Event::PI(_) => {}
            Event::Eof => break,
        }
    }

    if !stack.is_empty() {
        return Err(XmlError::Parse(format!(
            "unclosed element '{}'",
            stack.last().map(Element::name).unwrap_or_default()
        )));
    }
    root.map(Document::new).ok_or(XmlError::NoRoot)
}

/// Builds an element (name + attributes) from a start or empty tag.
fn element_from_start(start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let mut element = Element::new(decode(start.name().as_ref())?);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::Parse(e.to_string()))?;
        let key = decode(attr.key.as_ref())?;
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError::Parse(e.to_string()))?;
        element.set_attr(key, value.into_owned());
    }
    Ok(element)
}

/// Finishes an element: formatting whitespace is stripped from non-leaf
/// elements, then the element is attached to its parent (or becomes the root).
fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, mut element: Element) {
    if !element.children().is_empty() && element.text().chars().all(char::is_whitespace) {
        element.set_text("");
    }
    match stack.last_mut() {
        Some(parent) => parent.push_child(element),
        None => *root = Some(element),
    }
}

fn decode(bytes: &[u8]) -> Result<String, XmlError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| XmlError::Encoding(e.to_string()))
}
