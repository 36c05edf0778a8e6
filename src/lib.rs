//! # decl-slicer
//!
//! Extracts named declarations, plus everything they transitively depend on,
//! from a module-based TypeScript/JavaScript project into a minimal
//! self-contained subset with re-targeted imports and an external
//! dependency manifest.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! extract   → Extractor façade: one request in, one Extraction out
//!   ↓
//! emit      → package.json / deno.json, DEPENDENCIES.md, on-disk writer
//!   ↓
//! deps      → Dependency reconstruction: imports and external packages
//!   ↓
//! slice     → Reachability engine: roots, traversal, closure
//!   ↓
//! project   → Project context detection (runtime, deps, path aliases)
//!   ↓
//! hir       → Semantic model: SemanticModel trait, ProjectDatabase
//!   ↓
//! base      → Primitives (ids, TextRange, path helpers)
//! ```

// ============================================================================
// MODULES (dependency order: base → hir → project → slice → deps → emit → extract)
// ============================================================================

/// Foundation types: ids, TextRange, lexical path helpers
pub mod base;

/// Semantic model queried by the slicer
pub mod hir;

/// Project context: runtime flavor, dependency tables, path aliases
pub mod project;

/// Reachability engine
pub mod slice;

/// Dependency reconstruction
pub mod deps;

/// Manifest, report and file output
pub mod emit;

/// Extraction façade
pub mod extract;

pub mod diagnostics;
mod error;

pub use base::{DeclId, ModuleId, SymbolId, TextRange, TextSize};
pub use diagnostics::{Diagnostic, Severity};
pub use error::{MissingRoot, Result, SliceError};
pub use extract::{Extraction, Extractor};
pub use hir::{ProjectBuilder, ProjectDatabase, SemanticModel};
pub use project::{ProjectContext, ProjectDetector};
pub use slice::{RootPair, RootRequest};
