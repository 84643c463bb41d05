//! Error types for style-document patching.

use tilestyle_xml::XmlError;

/// Errors that can occur while patching a compiled style document.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    /// The document could not be read, parsed, or written back.
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// An element is missing an attribute the patcher requires.
    #[error("<{element}> element is missing required attribute '{attr}'")]
    MissingAttr {
        /// The element's tag name.
        element: String,
        /// The attribute that was expected.
        attr: String,
    },
}
