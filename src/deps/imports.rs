//! Import classification and internal specifier resolution.

use std::path::{Path, PathBuf};

use super::builtins::is_builtin_module;
use super::packages::is_url;
use crate::base::{ModuleId, paths};
use crate::hir::{ImportKind, ImportStatement, SemanticModel};
use crate::project::ProjectContext;

/// Where an import statement's specifier points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImportOrigin {
    /// A file of the project itself.
    Internal,
    /// A library package.
    External,
    /// A module provided by the runtime.
    Builtin,
}

impl ImportOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportOrigin::Internal => "internal",
            ImportOrigin::External => "external",
            ImportOrigin::Builtin => "builtin",
        }
    }
}

/// One import statement of a module, classified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportRecord {
    pub statement: ImportStatement,
    pub origin: ImportOrigin,
    /// Resolved project module for internal imports that resolve.
    pub target: Option<ModuleId>,
}

impl ImportRecord {
    pub fn kind(&self) -> ImportKind {
        self.statement.kind()
    }
}

const EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx", ".d.ts", ""];

/// Classifies and resolves the import statements of project modules.
pub struct ImportResolver<'a, M: SemanticModel + ?Sized> {
    model: &'a M,
    context: &'a ProjectContext,
}

impl<'a, M: SemanticModel + ?Sized> ImportResolver<'a, M> {
    pub fn new(model: &'a M, context: &'a ProjectContext) -> Self {
        Self { model, context }
    }

    /// Classify a raw specifier.
    pub fn classify(&self, specifier: &str) -> ImportOrigin {
        if specifier.starts_with("node:") {
            ImportOrigin::Builtin
        } else if specifier.starts_with('.') || self.context.is_path_alias(specifier) {
            ImportOrigin::Internal
        } else if is_url(specifier)
            || specifier.starts_with("npm:")
            || specifier.starts_with("jsr:")
        {
            ImportOrigin::External
        } else if is_builtin_module(specifier) {
            ImportOrigin::Builtin
        } else {
            ImportOrigin::External
        }
    }

    /// Resolve an internal specifier written in `from` to a project module.
    ///
    /// A trailing `.js`/`.jsx` is dropped, then the source extensions and
    /// `index` files are tried in order.
    pub fn resolve_internal(&self, from: &Path, specifier: &str) -> Option<ModuleId> {
        let base = if specifier.starts_with('.') {
            let dir = from.parent().unwrap_or_else(|| Path::new(""));
            let trimmed = specifier
                .strip_suffix(".js")
                .or_else(|| specifier.strip_suffix(".jsx"))
                .unwrap_or(specifier);
            paths::normalize(&dir.join(trimmed))
        } else {
            paths::normalize(&self.context.resolve_alias(specifier)?)
        };

        self.candidates(&base)
            .find_map(|candidate| self.model.module_by_path(&candidate))
    }

    fn candidates<'p>(&self, base: &'p Path) -> impl Iterator<Item = PathBuf> + 'p {
        let direct = EXTENSIONS.iter().map(move |ext| with_suffix(base, ext));
        let index = EXTENSIONS
            .iter()
            .map(move |ext| base.join(format!("index{ext}")));
        direct.chain(index)
    }

    /// Classify every import statement of `module`, in statement order.
    pub fn records(&self, module: ModuleId) -> Vec<ImportRecord> {
        let source = self.model.module(module);
        source
            .imports
            .iter()
            .map(|statement| {
                let origin = self.classify(&statement.specifier);
                let target = match origin {
                    ImportOrigin::Internal => {
                        self.resolve_internal(&source.path, &statement.specifier)
                    }
                    _ => None,
                };
                ImportRecord {
                    statement: statement.clone(),
                    origin,
                    target,
                }
            })
            .collect()
    }
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut raw = base.as_os_str().to_os_string();
    raw.push(suffix);
    PathBuf::from(raw)
}
