//! The build pipeline: manifest write → compile → patch, per output variant.

#![warn(missing_docs)]

mod compiler;
mod error;
mod theme;

pub use compiler::CartoCompiler;
pub use error::BuildError;
pub use theme::{ThemeBuilder, VariantOutcome};
