//! Reachability engine.
//!
//! ```text
//! RootRequest ──pairs()──▶ RootPair* ──resolve_roots()──▶ ResolvedRoot*
//!                                                            │
//!                                   Slicer::visit (worklist) ◀┘
//!                                                            │
//!                                  Closure ──into_slices()──▶ ModuleSlice*
//! ```

mod closure;
mod roots;
mod traversal;

pub use closure::{Closure, ModuleSlice, SliceResult};
pub use roots::{
    ResolvedRoot, RootPair, RootRequest, RootResolution, expand_pattern, glob_to_regex,
    is_pattern, resolve_roots,
};
pub use traversal::{Slicer, TraversalContext};
