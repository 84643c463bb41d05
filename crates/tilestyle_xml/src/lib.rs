//! Style-document XML tree for the tilestyle toolchain.
//!
//! Compiled Mapnik style files are small enough to hold fully in memory, and
//! the patch passes need random-access mutation (attribute rewrites, child
//! removal), so this crate parses the `quick-xml` event stream into a plain
//! owned tree rather than operating on events directly.

#![warn(missing_docs)]

mod element;
mod error;
mod parse;
mod write;

pub use element::{Document, Element};
pub use error::XmlError;
