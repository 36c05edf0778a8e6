//! Dependency reconstruction.
//!
//! For each module of a slice, work out which import statements the
//! extracted declarations still need, re-target internal ones at their
//! output location, and aggregate every external package reference.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use super::identifiers::IdentifierUsage;
use super::imports::{ImportOrigin, ImportRecord, ImportResolver};
use super::packages::package_identity;
use crate::base::{DeclId, ModuleId, SymbolId, paths};
use crate::diagnostics::Diagnostic;
use crate::hir::{ImportKind, ImportStatement, SemanticModel};
use crate::project::ProjectContext;
use crate::slice::{ModuleSlice, SliceResult};

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// One output module: import statements followed by its declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconstructedModule {
    pub module: ModuleId,
    pub path: PathBuf,
    pub imports: Vec<String>,
    pub declarations: Vec<DeclId>,
}

impl ReconstructedModule {
    /// Source text of the output module.
    pub fn render<M>(&self, model: &M) -> String
    where
        M: SemanticModel + ?Sized,
    {
        let mut out = String::new();
        for import in &self.imports {
            out.push_str(import);
            out.push('\n');
        }
        if !self.imports.is_empty() {
            out.push('\n');
        }
        let bodies: Vec<&str> = self
            .declarations
            .iter()
            .map(|&decl| model.declaration(decl).text.as_str())
            .collect();
        out.push_str(&bodies.join("\n\n"));
        out.push('\n');
        out
    }
}

/// A package referenced from the closure, aggregated across modules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalDependency {
    pub package: SmolStr,
    pub version: Option<String>,
    /// Origin-side names imported from the package.
    pub symbols: IndexSet<SmolStr>,
    pub import_kinds: IndexSet<ImportKind>,
    pub dev: bool,
}

impl ExternalDependency {
    /// Names sorted for display.
    pub fn sorted_symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.symbols.iter().map(SmolStr::as_str).collect();
        symbols.sort_unstable();
        symbols
    }
}

/// External dependencies keyed by package identity, first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExternalDependencies {
    packages: IndexMap<SmolStr, ExternalDependency>,
}

impl ExternalDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, package: &str) -> Option<&ExternalDependency> {
        self.packages.get(package)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExternalDependency> {
        self.packages.values()
    }

    /// Record one use of `specifier`, optionally importing `symbol`.
    pub fn record(
        &mut self,
        context: &ProjectContext,
        specifier: &str,
        kind: ImportKind,
        symbol: Option<&str>,
    ) {
        let package = package_identity(specifier);
        let entry = self
            .packages
            .entry(package.clone())
            .or_insert_with(|| ExternalDependency {
                version: context.version_of(&package).map(str::to_string),
                dev: context.is_dev_dependency(&package),
                package,
                symbols: IndexSet::new(),
                import_kinds: IndexSet::new(),
            });
        if let Some(symbol) = symbol {
            entry.symbols.insert(SmolStr::from(symbol));
        }
        entry.import_kinds.insert(kind);
    }
}

/// Everything reconstruction produces for one slice.
#[derive(Clone, Debug, Default)]
pub struct Reconstruction {
    pub modules: Vec<ReconstructedModule>,
    pub dependencies: ExternalDependencies,
    pub diagnostics: Vec<Diagnostic>,
}

// ============================================================================
// RECONSTRUCTOR
// ============================================================================

/// Computes per-module imports and the external dependency table.
pub struct Reconstructor<'a, M: SemanticModel + ?Sized> {
    model: &'a M,
    context: &'a ProjectContext,
    resolver: ImportResolver<'a, M>,
}

impl<'a, M: SemanticModel + ?Sized> Reconstructor<'a, M> {
    pub fn new(model: &'a M, context: &'a ProjectContext) -> Self {
        Self {
            model,
            context,
            resolver: ImportResolver::new(model, context),
        }
    }

    pub fn reconstruct(&self, slice: &SliceResult) -> Reconstruction {
        let mut reconstruction = Reconstruction::default();
        for module_slice in &slice.modules {
            let module = self.reconstruct_module(slice, module_slice, &mut reconstruction);
            reconstruction.modules.push(module);
        }
        debug!(
            modules = reconstruction.modules.len(),
            packages = reconstruction.dependencies.len(),
            diagnostics = reconstruction.diagnostics.len(),
            "reconstructed imports"
        );
        reconstruction
    }

    fn reconstruct_module(
        &self,
        slice: &SliceResult,
        module_slice: &ModuleSlice,
        out: &mut Reconstruction,
    ) -> ReconstructedModule {
        let path = &module_slice.path;
        let usage = IdentifierUsage::collect(self.model, &module_slice.declarations);
        let records = self.resolver.records(module_slice.module);

        // Needed local names per import statement.
        let mut needed: Vec<IndexSet<SmolStr>> = vec![IndexSet::new(); records.len()];
        // Names reached through a module outside the slice, re-targeted at
        // the declaring module inside it.
        let mut retargeted: IndexMap<ModuleId, Vec<(SmolStr, SmolStr)>> = IndexMap::new();
        let mut unresolved: FxHashSet<usize> = FxHashSet::default();

        for name in usage.external_names() {
            let Some(idx) = records.iter().position(|r| r.statement.binds(&name)) else {
                let diagnostic = Diagnostic::missing_import_origin(path, &name);
                warn!(code = diagnostic.code, module = %path.display(), ident = %name, "missing import origin");
                out.diagnostics.push(diagnostic);
                continue;
            };

            let record = &records[idx];
            if record.origin == ImportOrigin::Internal {
                let in_slice = record.target.is_some_and(|t| slice.contains_module(t));
                if !in_slice {
                    if let Some((target, origin)) =
                        self.declaring_module(slice, usage.symbol_of(&name))
                    {
                        retargeted.entry(target).or_default().push((origin, name));
                    } else if record.target.is_none() && unresolved.insert(idx) {
                        self.report_unresolved(path, &record.statement.specifier, out);
                    }
                    continue;
                }
            }
            needed[idx].insert(name);
        }

        let mut imports = Vec::new();
        for (record, names) in records.iter().zip(&needed) {
            if let Some(line) = self.emit_record(slice, module_slice, record, names, out) {
                imports.push(line);
            }
        }
        for (target, names) in retargeted {
            let specifier = paths::relative_specifier(path, &self.model.module(target).path);
            let statement = names.iter().fold(ImportStatement::new(specifier), |stmt, (origin, local)| {
                stmt.with_aliased(origin, local)
            });
            let locals: IndexSet<SmolStr> = names.into_iter().map(|(_, local)| local).collect();
            if let Some(line) = render_import(&statement, &statement.specifier, &locals) {
                imports.push(line);
            }
        }

        debug!(module = %path.display(), imports = imports.len(), "module imports");
        ReconstructedModule {
            module: module_slice.module,
            path: path.clone(),
            imports,
            declarations: module_slice.declarations.clone(),
        }
    }

    fn emit_record(
        &self,
        slice: &SliceResult,
        module_slice: &ModuleSlice,
        record: &ImportRecord,
        names: &IndexSet<SmolStr>,
        out: &mut Reconstruction,
    ) -> Option<String> {
        let statement = &record.statement;
        let kind = record.kind();
        let side_effect = kind == ImportKind::SideEffect;
        trace!(
            specifier = %statement.specifier,
            origin = record.origin.as_str(),
            kind = kind.as_str(),
            used = names.len(),
            "import statement"
        );

        match record.origin {
            ImportOrigin::Internal => {
                if names.is_empty() && !side_effect {
                    return None;
                }
                let Some(target) = record.target else {
                    self.report_unresolved(&module_slice.path, &statement.specifier, out);
                    return None;
                };
                if !slice.contains_module(target) {
                    return None;
                }
                let specifier =
                    paths::relative_specifier(&module_slice.path, &self.model.module(target).path);
                if side_effect {
                    return Some(render_side_effect(statement, &specifier));
                }
                render_import(statement, &specifier, names)
            }
            ImportOrigin::External | ImportOrigin::Builtin => {
                let external = record.origin == ImportOrigin::External;
                if side_effect {
                    if external {
                        out.dependencies
                            .record(self.context, &statement.specifier, ImportKind::SideEffect, None);
                    }
                    return Some(render_side_effect(statement, &statement.specifier));
                }
                if names.is_empty() {
                    return None;
                }
                if external {
                    for name in names {
                        let origin = statement.origin_name(name).unwrap_or(name.as_str());
                        out.dependencies.record(
                            self.context,
                            &statement.specifier,
                            kind,
                            Some(origin),
                        );
                    }
                }
                render_import(statement, &statement.specifier, names)
            }
        }
    }

    fn report_unresolved(&self, module: &Path, specifier: &str, out: &mut Reconstruction) {
        let diagnostic = Diagnostic::unresolved_internal_import(module, specifier);
        warn!(code = diagnostic.code, module = %module.display(), %specifier, "unresolved internal import");
        out.diagnostics.push(diagnostic);
    }

    /// The sliced module that declares what `symbol` ultimately refers to,
    /// with the name it is declared under.
    fn declaring_module(
        &self,
        slice: &SliceResult,
        symbol: Option<SymbolId>,
    ) -> Option<(ModuleId, SmolStr)> {
        let canonical = self.model.resolve_alias(symbol?);
        let name = self.model.symbol(canonical).name.clone();
        self.model
            .declarations_of(canonical)
            .iter()
            .map(|&decl| self.model.owning_module(decl))
            .find(|&module| slice.contains_module(module))
            .map(|module| (module, name))
    }
}

// ============================================================================
// RENDERING
// ============================================================================

fn attributes_suffix(statement: &ImportStatement) -> String {
    statement
        .attributes
        .as_deref()
        .map(|attrs| format!(" with {attrs}"))
        .unwrap_or_default()
}

fn render_side_effect(statement: &ImportStatement, specifier: &str) -> String {
    format!("import '{specifier}'{};", attributes_suffix(statement))
}

/// Render `statement` restricted to the local names in `names`, keeping its
/// original shape. `None` if nothing is left to import.
fn render_import(
    statement: &ImportStatement,
    specifier: &str,
    names: &IndexSet<SmolStr>,
) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(default) = statement.default_binding.as_ref().filter(|d| names.contains(*d)) {
        parts.push(default.to_string());
    }
    if let Some(namespace) = statement.namespace_binding.as_ref().filter(|n| names.contains(*n)) {
        parts.push(format!("* as {namespace}"));
    }
    let named: Vec<String> = statement
        .named
        .iter()
        .filter(|n| names.contains(&n.local))
        .map(|n| {
            let prefix = if n.type_only { "type " } else { "" };
            if n.imported == n.local {
                format!("{prefix}{}", n.local)
            } else {
                format!("{prefix}{} as {}", n.imported, n.local)
            }
        })
        .collect();
    if !named.is_empty() {
        parts.push(format!("{{ {} }}", named.join(", ")));
    }
    if parts.is_empty() {
        return None;
    }

    let keyword = if statement.type_only { "import type" } else { "import" };
    Some(format!(
        "{keyword} {} from '{specifier}'{};",
        parts.join(", "),
        attributes_suffix(statement)
    ))
}
