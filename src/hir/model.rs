//! Read-only semantic model types.
//!
//! These are produced once by a front end (or [`super::ProjectBuilder`]) and
//! never mutated while a slicing run is in flight.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::path::PathBuf;

use super::kinds::DeclKind;
use crate::base::{DeclId, ModuleId, SymbolId, TextRange};

// ============================================================================
// MODULES
// ============================================================================

/// A source unit of the project.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Module {
    /// Path relative to the project root.
    pub path: PathBuf,
    /// Library or runtime-provided module outside the project's own sources
    /// (`node_modules`, `lib.*.d.ts`).
    #[serde(default)]
    pub is_library: bool,
    /// Top-level declarations in source order.
    #[serde(default)]
    pub declarations: Vec<DeclId>,
    /// Import statements in source order.
    #[serde(default)]
    pub imports: Vec<ImportStatement>,
    /// Every identifier occurrence in the module, sorted by start offset.
    #[serde(default)]
    pub occurrences: Vec<Occurrence>,
}

impl Module {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_library: false,
            declarations: Vec::new(),
            imports: Vec::new(),
            occurrences: Vec::new(),
        }
    }
}

// ============================================================================
// DECLARATIONS
// ============================================================================

/// A syntactic unit defining a function, type, class, enum or variable group.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Declaration {
    pub module: ModuleId,
    pub kind: DeclKind,
    /// `None` for anonymous declarations (`export default function () {}`)
    /// and destructuring declarators.
    #[serde(default)]
    pub name: Option<SmolStr>,
    /// Full syntactic extent inside the module.
    pub range: TextRange,
    /// Raw source text covered by `range`.
    pub text: String,
    /// Structural parent, `None` at the top level.
    #[serde(default)]
    pub parent: Option<DeclId>,
    #[serde(default)]
    pub children: Vec<DeclId>,
    #[serde(default)]
    pub exported: bool,
    #[serde(default)]
    pub default_export: bool,
    /// The symbol this declaration backs.
    #[serde(default)]
    pub symbol: Option<SymbolId>,
}

impl Declaration {
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether `other` lies inside this declaration's extent.
    pub fn contains(&self, other: &Declaration) -> bool {
        self.module == other.module && self.range.contains_range(other.range)
    }
}

// ============================================================================
// SYMBOLS
// ============================================================================

/// The semantic identity a name resolves to.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Symbol {
    pub name: SmolStr,
    /// Backing declarations; more than one under declaration merging.
    #[serde(default)]
    pub declarations: Vec<DeclId>,
    /// Canonical symbol this one re-exposes (import bindings, re-exports).
    #[serde(default)]
    pub alias_of: Option<SymbolId>,
    #[serde(default)]
    pub is_type_parameter: bool,
}

impl Symbol {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
            alias_of: None,
            is_type_parameter: false,
        }
    }
}

// ============================================================================
// IDENTIFIER OCCURRENCES
// ============================================================================

/// What kind of binding site an identifier occurrence is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BindingKind {
    /// The name of a declaration (`function foo`, `const x`).
    DeclarationName,
    Parameter,
    TypeParameter,
    /// A property or method name in declaration position.
    Member,
    /// A name bound by a destructuring pattern.
    Destructuring,
}

impl BindingKind {
    /// Whether the binding introduces a value or type name into a lexical
    /// scope.
    ///
    /// Member names are reached through their object and never shadow or
    /// satisfy a free identifier. Type parameters are tracked through their
    /// symbol instead.
    pub fn declares_scope_name(self) -> bool {
        !matches!(self, BindingKind::Member | BindingKind::TypeParameter)
    }
}

/// The syntactic role of an identifier occurrence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentRole {
    /// A binding site; never a reference.
    Binding(BindingKind),
    /// A reference in type position (annotation, type argument, heritage).
    Type,
    /// A reference in value position.
    Value,
    /// A property-access name (`user.id`): resolved through the object's
    /// type rather than through scope.
    Member,
}

impl IdentRole {
    pub fn is_binding(self) -> bool {
        matches!(self, IdentRole::Binding(_))
    }

    /// Whether the occurrence is a reference the traversal must follow.
    pub fn is_reference(self) -> bool {
        !self.is_binding()
    }
}

/// One identifier occurrence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub text: SmolStr,
    pub range: TextRange,
    pub role: IdentRole,
    /// Symbol the occurrence resolves to, if any.
    #[serde(default)]
    pub symbol: Option<SymbolId>,
}

// ============================================================================
// IMPORT STATEMENTS
// ============================================================================

/// Syntax shape of an import statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    /// `import { foo } from 'x'`
    Named,
    /// `import foo from 'x'`
    Default,
    /// `import * as foo from 'x'`
    Namespace,
    /// `import 'x'`
    SideEffect,
    /// `import foo, { bar } from 'x'` or `import foo, * as ns from 'x'`
    Mixed,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Named => "named",
            ImportKind::Default => "default",
            ImportKind::Namespace => "namespace",
            ImportKind::SideEffect => "side-effect",
            ImportKind::Mixed => "mixed",
        }
    }
}

/// `imported as local` inside an import clause.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedImport {
    /// Name exported by the origin module.
    pub imported: SmolStr,
    /// Name bound in the importing module.
    pub local: SmolStr,
    /// Inline `type` modifier (`import { type Foo }`).
    #[serde(default)]
    pub type_only: bool,
}

/// One import statement exactly as written in the original module.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStatement {
    pub specifier: String,
    #[serde(default)]
    pub default_binding: Option<SmolStr>,
    #[serde(default)]
    pub namespace_binding: Option<SmolStr>,
    #[serde(default)]
    pub named: Vec<NamedImport>,
    /// `import type ...`
    #[serde(default)]
    pub type_only: bool,
    /// Raw import attributes, e.g. `{ type: "json" }`.
    #[serde(default)]
    pub attributes: Option<String>,
}

impl ImportStatement {
    /// A side-effect import; add bindings with the builder methods.
    pub fn new(specifier: impl Into<String>) -> Self {
        Self {
            specifier: specifier.into(),
            ..Self::default()
        }
    }

    /// `import { a, b } from 'specifier'`
    pub fn named(specifier: impl Into<String>, names: &[&str]) -> Self {
        names
            .iter()
            .fold(Self::new(specifier), |stmt, name| stmt.with_named(name))
    }

    pub fn with_named(mut self, name: &str) -> Self {
        self.named.push(NamedImport {
            imported: name.into(),
            local: name.into(),
            type_only: false,
        });
        self
    }

    pub fn with_aliased(mut self, imported: &str, local: &str) -> Self {
        self.named.push(NamedImport {
            imported: imported.into(),
            local: local.into(),
            type_only: false,
        });
        self
    }

    pub fn with_default(mut self, local: &str) -> Self {
        self.default_binding = Some(local.into());
        self
    }

    pub fn with_namespace(mut self, local: &str) -> Self {
        self.namespace_binding = Some(local.into());
        self
    }

    pub fn type_only(mut self) -> Self {
        self.type_only = true;
        self
    }

    pub fn with_attributes(mut self, attributes: &str) -> Self {
        self.attributes = Some(attributes.to_string());
        self
    }

    /// Detect the syntax shape of this statement.
    pub fn kind(&self) -> ImportKind {
        let has_default = self.default_binding.is_some();
        let has_named = !self.named.is_empty();

        let has_namespace = self.namespace_binding.is_some();

        if has_default && (has_named || has_namespace) {
            ImportKind::Mixed
        } else if has_namespace {
            ImportKind::Namespace
        } else if has_default {
            ImportKind::Default
        } else if has_named {
            ImportKind::Named
        } else {
            ImportKind::SideEffect
        }
    }

    /// Whether this statement binds `local` in the importing module.
    pub fn binds(&self, local: &str) -> bool {
        self.default_binding.as_deref() == Some(local)
            || self.namespace_binding.as_deref() == Some(local)
            || self.named.iter().any(|n| n.local == local)
    }

    /// The origin-side name for a local binding (`imported` for named
    /// imports, the local name itself for default and namespace bindings).
    pub fn origin_name<'a>(&'a self, local: &'a str) -> Option<&'a str> {
        if let Some(named) = self.named.iter().find(|n| n.local == local) {
            return Some(named.imported.as_str());
        }
        if self.binds(local) { Some(local) } else { None }
    }
}
