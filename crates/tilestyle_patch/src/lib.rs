//! Post-processing for compiled Mapnik style documents.
//!
//! The stylesheet compiler emits correct but inefficient XML: rules that can
//! never draw anything, layers that reference no style, and map attributes
//! that point at the compile-time environment. This crate rewrites a compiled
//! document in place:
//!
//! 1. map attributes: embed the project's `base` and `font-directory` paths,
//!    drop `maximum-extent` and `srs`;
//! 2. rule pruning: delete rules that contain a zero-width line symbolizer or
//!    a text/shield symbolizer with no label content;
//! 3. layer hints: `clear-label-cache` for the geographic-line layer,
//!    `cache-features` for multi-style layers, removal of style-less layers.

#![warn(missing_docs)]

mod error;
mod patcher;
mod report;

pub use error::PatchError;
pub use patcher::Patcher;
pub use report::PatchReport;
