//! The owned element tree: [`Document`] and [`Element`].

use std::path::Path;

use crate::error::XmlError;

/// A single XML element: name, ordered attributes, text content, children.
///
/// Attribute order is preserved so that a parse/serialize round trip keeps
/// the document stable apart from deliberate edits. Text content is the
/// concatenation of all text nodes directly inside the element; an element
/// with no text has the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Creates an element with the given name and no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// The element's tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up an attribute value by key.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets an attribute, replacing any existing value for the same key.
    ///
    /// A replaced attribute keeps its position; a new one is appended.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    /// Removes an attribute, returning its value if it was present.
    ///
    /// Removing an absent attribute is not an error; the patcher relies on
    /// this to stay idempotent.
    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        let idx = self.attrs.iter().position(|(k, _)| k == key)?;
        Some(self.attrs.remove(idx).1)
    }

    /// All attributes in document order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The element's text content (empty string if none).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the element's text content.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Appends to the element's text content (used by the parser when text
    /// is split across multiple events).
    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// The element's direct children.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Mutable access to the element's direct children.
    pub fn children_mut(&mut self) -> &mut Vec<Element> {
        &mut self.children
    }

    /// Appends a child element.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Direct children with the given tag name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Number of direct children with the given tag name.
    pub fn count_children_named(&self, name: &str) -> usize {
        self.children_named(name).count()
    }

    /// All elements in the subtree rooted at `self`, excluding `self`,
    /// in depth-first document order.
    pub fn descendants(&self) -> impl Iterator<Item = &Element> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Whether any element in the subtree (excluding `self`) satisfies the
    /// predicate.
    pub fn any_descendant(&self, pred: impl Fn(&Element) -> bool) -> bool {
        self.descendants().any(|e| pred(e))
    }

    /// Keeps only the direct children for which the predicate holds.
    pub fn retain_children(&mut self, pred: impl FnMut(&Element) -> bool) {
        self.children.retain(pred);
    }
}

/// Depth-first iterator over an element's subtree.
struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

/// A parsed XML document: a single root element.
///
/// The XML declaration, DOCTYPE, comments, and processing instructions are
/// discarded on parse; serialization always emits a fresh UTF-8 declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Creates a document from a root element.
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// The document's root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Mutable access to the root element.
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Parses a document from a file.
    pub fn parse_file(path: &Path) -> Result<Self, XmlError> {
        let content = std::fs::read_to_string(path).map_err(|e| XmlError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse_str(&content)
    }

    /// Parses a document from a string.
    pub fn parse_str(content: &str) -> Result<Self, XmlError> {
        crate::parse::parse_document(content)
    }

    /// Serializes the document to a string.
    pub fn to_xml_string(&self) -> String {
        crate::write::write_document(self)
    }

    /// Serializes the document to a file, overwriting any existing content.
    pub fn write_file(&self, path: &Path) -> Result<(), XmlError> {
        std::fs::write(path, self.to_xml_string()).map_err(|e| XmlError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
