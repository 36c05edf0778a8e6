//! In-memory project database.
//!
//! [`ProjectDatabase`] is the concrete [`SemanticModel`] used by the crate's
//! tests and by front ends that export a JSON snapshot of their semantic
//! model. It is immutable once built.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::model::{Declaration, Module, Occurrence, Symbol};
use super::semantic::SemanticModel;
use crate::base::{DeclId, ModuleId, SymbolId, paths};
use crate::error::{Result, SliceError};

/// A fully built, read-only semantic model.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProjectDatabase {
    modules: Vec<Module>,
    declarations: Vec<Declaration>,
    symbols: Vec<Symbol>,
    /// Normalized module path -> module.
    #[serde(skip)]
    by_path: FxHashMap<PathBuf, ModuleId>,
}

impl ProjectDatabase {
    /// Assemble a database from its parts, validating cross references.
    pub fn from_parts(
        modules: Vec<Module>,
        declarations: Vec<Declaration>,
        symbols: Vec<Symbol>,
    ) -> Result<Self> {
        let mut db = Self {
            modules,
            declarations,
            symbols,
            by_path: FxHashMap::default(),
        };
        db.finish()?;
        Ok(db)
    }

    /// Decode a JSON snapshot produced by a front end.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut db: ProjectDatabase = serde_json::from_str(json)?;
        db.finish()?;
        Ok(db)
    }

    /// Encode this database as a JSON snapshot.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Iterate over all module ids.
    pub fn module_ids(&self) -> impl Iterator<Item = ModuleId> + '_ {
        (0..self.modules.len()).map(ModuleId::from_usize)
    }

    /// Iterate over all declarations with their ids.
    pub fn declarations(&self) -> impl Iterator<Item = (DeclId, &Declaration)> {
        self.declarations
            .iter()
            .enumerate()
            .map(|(idx, decl)| (DeclId::from_usize(idx), decl))
    }

    fn finish(&mut self) -> Result<()> {
        self.validate()?;
        let declarations = &self.declarations;
        for module in &mut self.modules {
            module
                .occurrences
                .sort_by_key(|occurrence| occurrence.range.start());
            module
                .declarations
                .sort_by_key(|&decl| declarations[decl.index()].range.start());
        }

        self.by_path.clear();
        for (idx, module) in self.modules.iter().enumerate() {
            let key = paths::normalize(&module.path);
            if self.by_path.insert(key, ModuleId::from_usize(idx)).is_some() {
                return Err(SliceError::model(format!(
                    "duplicate module path {}",
                    module.path.display()
                )));
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let module_ok = |id: ModuleId| id.index() < self.modules.len();
        let decl_ok = |id: DeclId| id.index() < self.declarations.len();
        let symbol_ok = |id: SymbolId| id.index() < self.symbols.len();

        for (idx, module) in self.modules.iter().enumerate() {
            if let Some(bad) = module.declarations.iter().find(|&&d| !decl_ok(d)) {
                return Err(SliceError::model(format!(
                    "module#{idx} lists unknown declaration {bad}"
                )));
            }
            if let Some(nested) = module
                .declarations
                .iter()
                .find(|&&d| !self.declarations[d.index()].is_top_level())
            {
                return Err(SliceError::model(format!(
                    "module#{idx} lists nested declaration {nested} as top-level"
                )));
            }
            if let Some(bad) = module
                .occurrences
                .iter()
                .filter_map(|o| o.symbol)
                .find(|&s| !symbol_ok(s))
            {
                return Err(SliceError::model(format!(
                    "module#{idx} has an occurrence of unknown {bad}"
                )));
            }
        }

        for (idx, decl) in self.declarations.iter().enumerate() {
            if !module_ok(decl.module) {
                return Err(SliceError::model(format!(
                    "decl#{idx} belongs to unknown {}",
                    decl.module
                )));
            }
            let dangling = decl
                .parent
                .into_iter()
                .chain(decl.children.iter().copied())
                .find(|&d| !decl_ok(d));
            if let Some(bad) = dangling {
                return Err(SliceError::model(format!(
                    "decl#{idx} refers to unknown declaration {bad}"
                )));
            }
            if let Some(bad) = decl.symbol.filter(|&s| !symbol_ok(s)) {
                return Err(SliceError::model(format!("decl#{idx} backs unknown {bad}")));
            }
            if let Some(parent) = decl.parent {
                let parent = &self.declarations[parent.index()];
                if !parent.contains(decl) {
                    return Err(SliceError::model(format!(
                        "decl#{idx} lies outside its parent's extent"
                    )));
                }
            }
        }

        for (idx, symbol) in self.symbols.iter().enumerate() {
            if let Some(bad) = symbol.declarations.iter().find(|&&d| !decl_ok(d)) {
                return Err(SliceError::model(format!(
                    "symbol#{idx} is backed by unknown declaration {bad}"
                )));
            }
            if let Some(bad) = symbol.alias_of.filter(|&s| !symbol_ok(s)) {
                return Err(SliceError::model(format!(
                    "symbol#{idx} aliases unknown {bad}"
                )));
            }
        }
        Ok(())
    }
}

impl SemanticModel for ProjectDatabase {
    fn module_by_path(&self, path: &Path) -> Option<ModuleId> {
        self.by_path.get(&paths::normalize(path)).copied()
    }

    fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.index()]
    }

    fn declaration(&self, id: DeclId) -> &Declaration {
        &self.declarations[id.index()]
    }

    fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    fn occurrences_in(&self, decl: DeclId) -> &[Occurrence] {
        let declaration = self.declaration(decl);
        let occurrences = &self.module(declaration.module).occurrences;
        let range = declaration.range;
        let lo = occurrences.partition_point(|o| o.range.start() < range.start());
        let hi = occurrences.partition_point(|o| o.range.start() < range.end());
        &occurrences[lo..hi.max(lo)]
    }
}
