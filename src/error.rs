//! Fatal error types.
//!
//! Anything in here aborts a run before output is produced. Non-fatal
//! findings are reported as [`crate::diagnostics::Diagnostic`]s instead.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Why a requested root could not be resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingRoot {
    /// The requested module is not part of the project.
    Module,
    /// The module exists but has no top-level declaration with that name.
    Declaration,
}

impl fmt::Display for MissingRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingRoot::Module => f.write_str("module is not part of the project"),
            MissingRoot::Declaration => f.write_str("no top-level declaration with that name"),
        }
    }
}

/// Errors that abort a slicing run.
#[derive(Debug, Error)]
pub enum SliceError {
    /// No usable project configuration.
    #[error("configuration error in {}: {message}", path.display())]
    Configuration { path: PathBuf, message: String },

    /// A requested (module, name) root does not exist.
    #[error("root `{name}` not found in {module}: {reason}")]
    RootNotFound {
        module: String,
        name: String,
        reason: MissingRoot,
    },

    /// Root modules and names cannot be paired up.
    #[error(
        "inconsistent root arity: {modules} module(s) and {names} name(s); \
         expected 1:N, N:1 or N:N"
    )]
    InconsistentRootArity { modules: usize, names: usize },

    /// A root name pattern could not be compiled.
    #[error("invalid root pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The semantic model is internally inconsistent.
    #[error("invalid semantic model: {0}")]
    Model(String),

    /// A semantic model snapshot could not be decoded.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// IO error while reading configuration or writing output.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SliceError {
    /// Create a configuration error.
    pub fn configuration(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Configuration {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a model consistency error.
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model(message.into())
    }

    /// Wrap an IO error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this is a fatal root-resolution failure.
    pub fn is_root_not_found(&self) -> bool {
        matches!(self, SliceError::RootNotFound { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = SliceError> = std::result::Result<T, E>;
