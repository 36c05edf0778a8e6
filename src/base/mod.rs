//! Foundation types for the slicer.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`ModuleId`], [`DeclId`], [`SymbolId`] - Dense identifiers into the semantic model
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - Lexical path helpers for mirroring module locations under an output root
//!
//! This module has NO dependencies on other slicer modules.

mod ids;
pub mod paths;

pub use ids::{DeclId, ModuleId, SymbolId};
pub use text_size::{TextRange, TextSize};

// Re-export text-size for convenience
pub use text_size;
