//! The closure: declarations reachable from the roots, grouped by module.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use std::fmt::Write as _;
use std::path::PathBuf;

use super::roots::ResolvedRoot;
use crate::base::{DeclId, ModuleId};
use crate::diagnostics::Diagnostic;
use crate::hir::SemanticModel;

/// Insertion-ordered module -> declarations mapping that only grows.
#[derive(Clone, Debug, Default)]
pub struct Closure {
    modules: IndexMap<ModuleId, Vec<DeclId>>,
    members: FxHashSet<DeclId>,
}

impl Closure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `decl` under `module`. Returns `false` if it was already present.
    pub fn insert(&mut self, module: ModuleId, decl: DeclId) -> bool {
        if !self.members.insert(decl) {
            return false;
        }
        self.modules.entry(module).or_default().push(decl);
        true
    }

    pub fn contains(&self, decl: DeclId) -> bool {
        self.members.contains(&decl)
    }

    pub fn contains_module(&self, module: ModuleId) -> bool {
        self.modules.contains_key(&module)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Modules in first-insertion order.
    pub fn modules(&self) -> impl Iterator<Item = ModuleId> + '_ {
        self.modules.keys().copied()
    }

    /// Declarations of `module` in insertion order.
    pub fn declarations(&self, module: ModuleId) -> &[DeclId] {
        self.modules.get(&module).map_or(&[], Vec::as_slice)
    }

    /// Group into per-module slices, each sorted by source position.
    pub fn into_slices<M>(self, model: &M) -> Vec<ModuleSlice>
    where
        M: SemanticModel + ?Sized,
    {
        self.modules
            .into_iter()
            .map(|(module, mut declarations)| {
                declarations.sort_by_key(|&decl| model.declaration(decl).range.start());
                ModuleSlice {
                    module,
                    path: model.module(module).path.clone(),
                    declarations,
                }
            })
            .collect()
    }
}

/// The closure declarations of one module, in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleSlice {
    pub module: ModuleId,
    pub path: PathBuf,
    pub declarations: Vec<DeclId>,
}

/// Result of one slicing run.
#[derive(Clone, Debug, Default)]
pub struct SliceResult {
    pub roots: Vec<ResolvedRoot>,
    /// Per-module slices, modules in first-reached order.
    pub modules: Vec<ModuleSlice>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SliceResult {
    pub fn module(&self, module: ModuleId) -> Option<&ModuleSlice> {
        self.modules.iter().find(|slice| slice.module == module)
    }

    pub fn contains_module(&self, module: ModuleId) -> bool {
        self.module(module).is_some()
    }

    pub fn contains(&self, decl: DeclId) -> bool {
        self.modules
            .iter()
            .any(|slice| slice.declarations.contains(&decl))
    }

    pub fn declaration_count(&self) -> usize {
        self.modules.iter().map(|slice| slice.declarations.len()).sum()
    }

    /// Print the closure with per-file banners.
    pub fn render<M>(&self, model: &M) -> String
    where
        M: SemanticModel + ?Sized,
    {
        let mut out = String::new();
        for slice in &self.modules {
            let _ = writeln!(out, "//==================================================");
            let _ = writeln!(out, "// File: {}", crate::base::paths::to_slash(&slice.path));
            let _ = writeln!(out, "//==================================================\n");
            for &decl in &slice.declarations {
                let _ = writeln!(out, "{}", model.declaration(decl).text);
                let _ = writeln!(out, "\n//--------------------------------------------------\n");
            }
        }
        out
    }
}
