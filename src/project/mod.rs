//! Project context: what the source project is built with.
//!
//! [`ProjectDetector`] reads `package.json`, `deno.json(c)`, `tsconfig.json`
//! and lockfiles from the project root and produces a [`ProjectContext`].
//! The context is passed by reference to import classification, dependency
//! reconstruction and manifest emission. Tests usually build one directly
//! with the `with_*` builders.

mod context;
mod detect;
pub mod jsonc;

pub use context::{ModuleType, PackageManager, ProjectContext, Runtime};
pub use detect::ProjectDetector;
