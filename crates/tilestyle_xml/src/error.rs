//! Error types for style-document parsing and serialization.

use std::path::PathBuf;

/// Errors that can occur while reading or writing a style document.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An I/O error occurred while reading or writing the document file.
    #[error("failed to access '{path}': {source}")]
    Io {
        /// The file that could not be read or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The XML content is malformed and could not be parsed.
    #[error("malformed XML: {0}")]
    Parse(String),

    /// The document contains no root element.
    #[error("document has no root element")]
    NoRoot,

    /// A closing tag did not match the element being closed.
    #[error("mismatched closing tag '</{found}>' (expected '</{expected}>')")]
    MismatchedTag {
        /// The element name that was open.
        expected: String,
        /// The closing tag name that was found.
        found: String,
    },

    /// The document is not valid UTF-8.
    #[error("document is not valid UTF-8: {0}")]
    Encoding(String),
}
