pub mod common;
pub mod imports;

pub use common::TreeSitterParser;
pub use imports::{Extraction, FileDependencies, ImportExtractor, ImportReference, ReferenceKind};
