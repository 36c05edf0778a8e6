//! High-level IR (HIR): the semantic model the slicer queries.
//!
//! Nothing here parses source. A front end (or [`ProjectBuilder`] in tests)
//! produces modules, declarations, symbols and identifier occurrences once;
//! the slicer then reads them through [`SemanticModel`].
//!
//! ## Key Types
//!
//! - [`SemanticModel`] — read-only query trait (the resolution service seam)
//! - [`ProjectDatabase`] — concrete, immutable implementation with JSON snapshots
//! - [`ProjectBuilder`] — incremental construction of a [`ProjectDatabase`]
//! - [`DeclKind`] / [`KindInfo`] — declaration kinds and their capability table
//!
//! ## Layers
//!
//! ```text
//! ProjectBuilder / JSON snapshot   ← INPUT
//!     │
//!     ▼
//! ProjectDatabase                  ← validated, indexed, frozen
//!     │
//!     ▼
//! SemanticModel                    ← queries used by slice and deps
//! ```

mod builder;
mod db;
mod kinds;
mod model;
mod semantic;

pub use builder::ProjectBuilder;
pub use db::ProjectDatabase;
pub use kinds::{DeclKind, KindInfo, Promotion};
pub use model::{
    BindingKind, Declaration, IdentRole, ImportKind, ImportStatement, Module, NamedImport,
    Occurrence, Symbol,
};
pub use semantic::SemanticModel;
