//! Identifier usage inside a set of declarations.

use indexmap::IndexSet;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use super::builtins::is_global_name;
use crate::base::{DeclId, SymbolId};
use crate::hir::{IdentRole, SemanticModel};

/// Names used and declared by one module's closure declarations.
///
/// Values and types are separate namespaces; a name may be used in both.
#[derive(Clone, Debug, Default)]
pub struct IdentifierUsage {
    pub values: IndexSet<SmolStr>,
    pub types: IndexSet<SmolStr>,
    pub declared: FxHashSet<SmolStr>,
    /// Names that resolve to a type parameter somewhere in the set.
    type_parameters: FxHashSet<SmolStr>,
    /// First resolved symbol seen for each used name.
    symbols: FxHashMap<SmolStr, SymbolId>,
}

impl IdentifierUsage {
    /// Collect usage over `declarations`, all from the same module.
    pub fn collect<M>(model: &M, declarations: &[DeclId]) -> Self
    where
        M: SemanticModel + ?Sized,
    {
        let mut usage = Self::default();
        for &decl in declarations {
            usage.declared.extend(model.bound_names(decl));
            for occurrence in model.occurrences_in(decl) {
                let name = &occurrence.text;
                match model.classify(occurrence) {
                    IdentRole::Binding(kind) => {
                        if kind.declares_scope_name() {
                            usage.declared.insert(name.clone());
                        }
                        continue;
                    }
                    IdentRole::Member => continue,
                    IdentRole::Type => {
                        usage.types.insert(name.clone());
                    }
                    IdentRole::Value => {
                        usage.values.insert(name.clone());
                    }
                }

                if let Some(symbol) = model.symbol_for_occurrence(occurrence) {
                    if model.symbol(model.resolve_alias(symbol)).is_type_parameter {
                        usage.type_parameters.insert(name.clone());
                    }
                    usage.symbols.entry(name.clone()).or_insert(symbol);
                }
            }
        }
        usage
    }

    /// Used names that must come from somewhere else, first-use order with
    /// values before types.
    pub fn external_names(&self) -> Vec<SmolStr> {
        let names: IndexSet<&SmolStr> = self
            .values
            .iter()
            .chain(self.types.iter())
            .filter(|name| self.is_external(name))
            .collect();
        names.into_iter().cloned().collect()
    }

    pub fn is_external(&self, name: &str) -> bool {
        !self.declared.contains(name)
            && !self.type_parameters.contains(name)
            && !is_global_name(name)
    }

    /// The symbol a used name resolved to, if the model knew it.
    pub fn symbol_of(&self, name: &str) -> Option<SymbolId> {
        self.symbols.get(name).copied()
    }
}
