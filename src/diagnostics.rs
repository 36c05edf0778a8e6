//! Diagnostics for non-fatal findings.
//!
//! Fatal problems are [`crate::SliceError`]s. Everything here is reported
//! alongside a successful result and never blocks output.

use std::fmt;
use std::path::{Path, PathBuf};

use smol_str::SmolStr;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
        }
    }
}

/// A diagnostic keyed by module and subject.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Stable code from [`codes`].
    pub code: &'static str,
    /// Project-relative module path, if the finding concerns one module.
    pub module: Option<PathBuf>,
    /// The identifier, pattern or package the finding is about.
    pub subject: SmolStr,
    pub message: String,
}

impl Diagnostic {
    /// Create a new warning diagnostic.
    pub fn warning(code: &'static str, subject: impl Into<SmolStr>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            module: None,
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Attach the module the finding concerns.
    pub fn in_module(mut self, module: &Path) -> Self {
        self.module = Some(module.to_path_buf());
        self
    }

    /// `W0001`: a root pattern matched no exported name.
    pub fn unmatched_wildcard(module: &Path, pattern: &str) -> Self {
        Self::warning(
            codes::UNMATCHED_WILDCARD,
            pattern,
            format!("pattern `{pattern}` matched no exported name"),
        )
        .in_module(module)
    }

    /// `W0002`: an external identifier has no import statement introducing it.
    pub fn missing_import_origin(module: &Path, ident: &str) -> Self {
        Self::warning(
            codes::MISSING_IMPORT_ORIGIN,
            ident,
            format!("no import found for `{ident}`"),
        )
        .in_module(module)
    }

    /// `W0003`: an internal-looking specifier resolves to no project module.
    pub fn unresolved_internal_import(module: &Path, specifier: &str) -> Self {
        Self::warning(
            codes::UNRESOLVED_INTERNAL_IMPORT,
            specifier,
            format!("import `{specifier}` does not resolve to a project module"),
        )
        .in_module(module)
    }

    /// `W0004`: the manifest format cannot express a dependency identity.
    pub fn non_npm_dependency(package: &str, manifest: &str) -> Self {
        Self::warning(
            codes::NON_NPM_DEPENDENCY,
            package,
            format!("`{package}` cannot be declared in {manifest}; skipped"),
        )
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.severity.as_str(), self.code)?;
        if let Some(module) = &self.module {
            write!(f, " {}", module.display())?;
        }
        write!(f, ": {}", self.message)
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Stable diagnostic codes.
///
/// - **W0001-W0099**: warnings that never block output
pub mod codes {
    /// Root pattern matched no exported name.
    pub const UNMATCHED_WILDCARD: &str = "W0001";
    /// External identifier without an introducing import.
    pub const MISSING_IMPORT_ORIGIN: &str = "W0002";
    /// Internal specifier that does not resolve to a project module.
    pub const UNRESOLVED_INTERNAL_IMPORT: &str = "W0003";
    /// Dependency identity the target manifest cannot express.
    pub const NON_NPM_DEPENDENCY: &str = "W0004";
}
