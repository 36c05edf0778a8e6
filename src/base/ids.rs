//! Dense identifiers for modules, declarations and symbols.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create an id from a raw index.
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            /// The raw index, usable for slice lookups.
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            pub(crate) fn from_usize(index: usize) -> Self {
                Self(u32::try_from(index).unwrap_or(u32::MAX))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Identifies a module (one source file) in the project.
    ModuleId,
    "module#"
);

define_id!(
    /// Identifies a declaration inside some module.
    DeclId,
    "decl#"
);

define_id!(
    /// Identifies a semantic symbol.
    SymbolId,
    "symbol#"
);
