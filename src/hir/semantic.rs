//! The Semantic Resolution Service seam.
//!
//! The slicer never parses or type-checks anything itself. Everything it
//! knows about the project comes through [`SemanticModel`], which must stay
//! immutable for the duration of a slicing run.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use std::path::Path;

use super::kinds::DeclKind;
use super::model::{Declaration, IdentRole, Module, Occurrence, Symbol};
use crate::base::{DeclId, ModuleId, SymbolId};

/// Read-only symbol, declaration, alias and export queries over a whole
/// project.
///
/// Implementors provide the storage accessors; the remaining queries have
/// default implementations in terms of them.
pub trait SemanticModel {
    /// Look up a module by its project-relative path.
    fn module_by_path(&self, path: &Path) -> Option<ModuleId>;

    fn module(&self, id: ModuleId) -> &Module;

    fn declaration(&self, id: DeclId) -> &Declaration;

    fn symbol(&self, id: SymbolId) -> &Symbol;

    /// Identifier occurrences inside a declaration's extent, in source order.
    fn occurrences_in(&self, decl: DeclId) -> &[Occurrence];

    // ------------------------------------------------------------------------
    // Provided queries
    // ------------------------------------------------------------------------

    fn top_level_declarations(&self, module: ModuleId) -> &[DeclId] {
        &self.module(module).declarations
    }

    fn owning_module(&self, decl: DeclId) -> ModuleId {
        self.declaration(decl).module
    }

    fn parent_of(&self, decl: DeclId) -> Option<DeclId> {
        self.declaration(decl).parent
    }

    fn is_library_module(&self, module: ModuleId) -> bool {
        self.module(module).is_library
    }

    fn symbol_for_declaration(&self, decl: DeclId) -> Option<SymbolId> {
        self.declaration(decl).symbol
    }

    fn symbol_for_occurrence(&self, occurrence: &Occurrence) -> Option<SymbolId> {
        occurrence.symbol
    }

    fn classify(&self, occurrence: &Occurrence) -> IdentRole {
        occurrence.role
    }

    fn is_alias(&self, symbol: SymbolId) -> bool {
        self.symbol(symbol).alias_of.is_some()
    }

    /// Follow an alias chain to its canonical symbol.
    ///
    /// A cyclic chain resolves to the last symbol reached before the cycle
    /// closes.
    fn resolve_alias(&self, symbol: SymbolId) -> SymbolId {
        let mut seen = FxHashSet::default();
        let mut current = symbol;
        while let Some(target) = self.symbol(current).alias_of {
            if !seen.insert(current) || seen.contains(&target) {
                break;
            }
            current = target;
        }
        current
    }

    fn declarations_of(&self, symbol: SymbolId) -> &[DeclId] {
        &self.symbol(symbol).declarations
    }

    /// Names a declaration binds in its enclosing scope. Variable groups bind
    /// every declarator and destructured name they contain.
    fn bound_names(&self, decl: DeclId) -> Vec<SmolStr> {
        let declaration = self.declaration(decl);
        if !declaration.kind.binds_through() {
            return declaration.name.iter().cloned().collect();
        }

        let mut names = Vec::new();
        let mut stack = vec![decl];
        while let Some(current) = stack.pop() {
            let node = self.declaration(current);
            if matches!(node.kind, DeclKind::Variable | DeclKind::BindingElement) {
                if let Some(name) = &node.name {
                    names.push(name.clone());
                }
            }
            stack.extend(node.children.iter().rev().copied());
        }
        names
    }

    /// Top-level declarations of `module` matching `name`, in source order.
    ///
    /// Never descends into bodies. `default` also matches a default-exported
    /// declaration, named or not.
    fn resolve_top_level(&self, module: ModuleId, name: &str) -> Vec<DeclId> {
        self.top_level_declarations(module)
            .iter()
            .copied()
            .filter(|&decl| {
                let declaration = self.declaration(decl);
                if !declaration.kind.is_root_candidate() {
                    return false;
                }
                if name == "default" && declaration.default_export {
                    return true;
                }
                if declaration.kind == DeclKind::VariableGroup {
                    return self.bound_names(decl).iter().any(|n| n == name);
                }
                declaration.name.as_deref() == Some(name)
            })
            .collect()
    }

    /// Exported top-level names of `module`, in source order, deduplicated.
    /// An anonymous default export is listed as `default`.
    fn exported_names(&self, module: ModuleId) -> Vec<SmolStr> {
        let mut names: Vec<SmolStr> = Vec::new();
        for &decl in self.top_level_declarations(module) {
            if !self.declaration(decl).exported {
                continue;
            }
            let mut bound = self.bound_names(decl);
            if bound.is_empty() && self.declaration(decl).default_export {
                bound.push(SmolStr::new_static("default"));
            }
            for name in bound {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}
