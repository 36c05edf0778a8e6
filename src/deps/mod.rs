//! Dependency reconstruction.
//!
//! Turns a slice into output modules with the imports they still need, and
//! aggregates references to code outside the project into an
//! [`ExternalDependencies`] table for manifest emission.

mod builtins;
mod identifiers;
mod imports;
mod packages;
mod reconstruct;

pub use builtins::{is_builtin_module, is_global_name};
pub use identifiers::IdentifierUsage;
pub use imports::{ImportOrigin, ImportRecord, ImportResolver};
pub use packages::{is_url, package_identity};
pub use reconstruct::{
    ExternalDependencies, ExternalDependency, ReconstructedModule, Reconstruction, Reconstructor,
};
