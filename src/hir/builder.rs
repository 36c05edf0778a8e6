//! Programmatic construction of a [`ProjectDatabase`].
//!
//! Top-level declarations are laid out one after another in their module;
//! nested declarations and identifier occurrences are located by searching
//! their text inside the enclosing declaration. Named declarations in the
//! same scope share one symbol, which is how declaration merging and
//! overloads are modelled.
//!
//! ```ignore
//! let mut builder = ProjectBuilder::new();
//! let types = builder.module("src/types.ts");
//! let user = builder.declare(types, DeclKind::Interface, Some("User"), "interface User { id: number; }");
//! builder.nested(user, DeclKind::PropertySignature, Some("id"), "id: number");
//! let db = builder.build()?;
//! ```

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::path::PathBuf;

use super::db::ProjectDatabase;
use super::kinds::DeclKind;
use super::model::{Declaration, IdentRole, ImportStatement, Module, Occurrence, Symbol};
use crate::base::{DeclId, ModuleId, SymbolId, TextRange, TextSize};
use crate::error::{Result, SliceError};

type ScopeKey = (ModuleId, Option<DeclId>, SmolStr);

/// Incrementally builds a project database.
#[derive(Default)]
pub struct ProjectBuilder {
    modules: Vec<Module>,
    /// Next free offset per module.
    module_ends: Vec<u32>,
    declarations: Vec<Declaration>,
    symbols: Vec<Symbol>,
    scopes: FxHashMap<ScopeKey, SymbolId>,
    /// Search start for the next nested declaration, relative to the parent.
    child_cursor: FxHashMap<DeclId, usize>,
    /// Search start for the next occurrence, relative to the declaration.
    occurrence_cursor: FxHashMap<DeclId, usize>,
    errors: Vec<String>,
}

impl ProjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a project source module.
    pub fn module(&mut self, path: impl Into<PathBuf>) -> ModuleId {
        let id = ModuleId::from_usize(self.modules.len());
        self.modules.push(Module::new(path));
        self.module_ends.push(0);
        id
    }

    /// Add a library or runtime-provided module.
    pub fn library_module(&mut self, path: impl Into<PathBuf>) -> ModuleId {
        let id = self.module(path);
        self.modules[id.index()].is_library = true;
        id
    }

    /// Append a top-level declaration to `module`.
    pub fn declare(
        &mut self,
        module: ModuleId,
        kind: DeclKind,
        name: Option<&str>,
        text: &str,
    ) -> DeclId {
        let start = self.module_ends[module.index()];
        let len = text_len(text);
        self.module_ends[module.index()] = start + len + 1;

        let id = self.push_declaration(Declaration {
            module,
            kind,
            name: name.map(SmolStr::from),
            range: TextRange::at(TextSize::from(start), TextSize::from(len)),
            text: text.to_string(),
            parent: None,
            children: Vec::new(),
            exported: false,
            default_export: false,
            symbol: None,
        });
        self.modules[module.index()].declarations.push(id);
        if let Some(name) = name {
            self.bind_name(id, name);
        }
        id
    }

    /// Add a declaration nested in `parent`, located by searching `snippet`
    /// inside the parent's text. Occurrences recorded on `parent` afterwards
    /// are searched after the snippet.
    pub fn nested(
        &mut self,
        parent: DeclId,
        kind: DeclKind,
        name: Option<&str>,
        snippet: &str,
    ) -> DeclId {
        let cursor = self.child_cursor.get(&parent).copied().unwrap_or(0);
        let (module, parent_start, offset) = {
            let parent_decl = &self.declarations[parent.index()];
            let offset = find_from(&parent_decl.text, snippet, cursor);
            (parent_decl.module, parent_decl.range.start(), offset)
        };

        let offset = match offset {
            Some(offset) => offset,
            None => {
                self.errors.push(format!(
                    "`{snippet}` not found inside declaration {parent}"
                ));
                0
            }
        };
        let end = offset + snippet.len();
        self.child_cursor.insert(parent, end);
        let parent_cursor = self.occurrence_cursor.entry(parent).or_insert(0);
        *parent_cursor = (*parent_cursor).max(end);

        let id = self.push_declaration(Declaration {
            module,
            kind,
            name: name.map(SmolStr::from),
            range: TextRange::at(
                parent_start + TextSize::from(offset_u32(offset)),
                TextSize::from(text_len(snippet)),
            ),
            text: snippet.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            exported: false,
            default_export: false,
            symbol: None,
        });
        self.declarations[parent.index()].children.push(id);
        if let Some(name) = name {
            self.bind_name(id, name);
        }
        id
    }

    /// Add a type parameter to `owner` and return its (flagged) symbol.
    pub fn type_parameter(&mut self, owner: DeclId, name: &str) -> SymbolId {
        let decl = self.nested(owner, DeclKind::TypeParameter, Some(name), name);
        let symbol = self.declarations[decl.index()]
            .symbol
            .unwrap_or_else(|| self.new_symbol(Symbol::new(name)));
        self.symbols[symbol.index()].is_type_parameter = true;
        symbol
    }

    /// Mark a top-level declaration as exported.
    pub fn export(&mut self, decl: DeclId) -> &mut Self {
        self.declarations[decl.index()].exported = true;
        self
    }

    /// Mark a top-level declaration as the module's default export.
    pub fn export_default(&mut self, decl: DeclId) -> &mut Self {
        let declaration = &mut self.declarations[decl.index()];
        declaration.exported = true;
        declaration.default_export = true;
        self
    }

    /// Record a reference to `target` inside `within`.
    pub fn reference(
        &mut self,
        within: DeclId,
        ident: &str,
        role: IdentRole,
        target: SymbolId,
    ) -> &mut Self {
        self.occurrence(within, ident, role, Some(target))
    }

    /// Record an identifier inside `within` that resolves to nothing the
    /// model knows about (globals, typos).
    pub fn unresolved(&mut self, within: DeclId, ident: &str, role: IdentRole) -> &mut Self {
        self.occurrence(within, ident, role, None)
    }

    /// Create a symbol that re-exposes `target` (an import binding or a
    /// re-export).
    pub fn alias(&mut self, name: &str, target: SymbolId) -> SymbolId {
        let mut symbol = Symbol::new(name);
        symbol.alias_of = Some(target);
        self.new_symbol(symbol)
    }

    /// Append an import statement to `module`.
    pub fn import(&mut self, module: ModuleId, statement: ImportStatement) -> &mut Self {
        self.modules[module.index()].imports.push(statement);
        self
    }

    pub fn symbol_of(&self, decl: DeclId) -> Option<SymbolId> {
        self.declarations[decl.index()].symbol
    }

    /// Validate and freeze the model.
    pub fn build(self) -> Result<ProjectDatabase> {
        if !self.errors.is_empty() {
            return Err(SliceError::model(self.errors.join("; ")));
        }
        ProjectDatabase::from_parts(self.modules, self.declarations, self.symbols)
    }

    // ------------------------------------------------------------------------

    fn push_declaration(&mut self, declaration: Declaration) -> DeclId {
        let id = DeclId::from_usize(self.declarations.len());
        self.declarations.push(declaration);
        id
    }

    fn new_symbol(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId::from_usize(self.symbols.len());
        self.symbols.push(symbol);
        id
    }

    /// Attach `decl` to the symbol named `name` in its scope and record the
    /// name's binding occurrence.
    fn bind_name(&mut self, decl: DeclId, name: &str) {
        let key = (
            self.declarations[decl.index()].module,
            self.scope_of(decl),
            SmolStr::from(name),
        );
        let symbol = match self.scopes.get(&key) {
            Some(&symbol) => symbol,
            None => {
                let symbol = self.new_symbol(Symbol::new(name));
                self.scopes.insert(key, symbol);
                symbol
            }
        };
        self.symbols[symbol.index()].declarations.push(decl);
        self.declarations[decl.index()].symbol = Some(symbol);

        let (module, start, offset, role) = {
            let declaration = &self.declarations[decl.index()];
            (
                declaration.module,
                declaration.range.start(),
                find_from(&declaration.text, name, 0),
                IdentRole::Binding(declaration.kind.info().name_binding),
            )
        };
        match offset {
            Some(offset) => {
                let range = TextRange::at(
                    start + TextSize::from(offset_u32(offset)),
                    TextSize::from(text_len(name)),
                );
                self.modules[module.index()].occurrences.push(Occurrence {
                    text: SmolStr::from(name),
                    range,
                    role,
                    symbol: Some(symbol),
                });
                self.occurrence_cursor.insert(decl, offset + name.len());
            }
            None => self
                .errors
                .push(format!("name `{name}` not found inside declaration {decl}")),
        }
    }

    /// The declaration whose scope a name bound by `decl` lives in.
    ///
    /// Declarators and destructured names bind through their variable group
    /// into the group's own scope.
    fn scope_of(&self, decl: DeclId) -> Option<DeclId> {
        let mut scope = self.declarations[decl.index()].parent;
        while let Some(current) = scope {
            if !self.declarations[current.index()].kind.binds_through() {
                break;
            }
            scope = self.declarations[current.index()].parent;
        }
        scope
    }

    fn occurrence(
        &mut self,
        within: DeclId,
        ident: &str,
        role: IdentRole,
        symbol: Option<SymbolId>,
    ) -> &mut Self {
        let cursor = self.occurrence_cursor.get(&within).copied().unwrap_or(0);
        let (module, start, offset) = {
            let declaration = &self.declarations[within.index()];
            (
                declaration.module,
                declaration.range.start(),
                find_from(&declaration.text, ident, cursor),
            )
        };
        match offset {
            Some(offset) => {
                let range = TextRange::at(
                    start + TextSize::from(offset_u32(offset)),
                    TextSize::from(text_len(ident)),
                );
                self.modules[module.index()].occurrences.push(Occurrence {
                    text: SmolStr::from(ident),
                    range,
                    role,
                    symbol,
                });
                self.occurrence_cursor.insert(within, offset + ident.len());
            }
            None => self
                .errors
                .push(format!("identifier `{ident}` not found inside declaration {within}")),
        }
        self
    }
}

fn text_len(text: &str) -> u32 {
    u32::try_from(text.len()).unwrap_or(u32::MAX)
}

fn offset_u32(offset: usize) -> u32 {
    u32::try_from(offset).unwrap_or(u32::MAX)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Find `needle` in `haystack` at or after `from`, wrapping around to the
/// start when nothing follows. Identifier-like edges must sit on word
/// boundaries, so `x` never matches inside `export`.
fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let from = from.min(haystack.len());
    find_word(haystack, needle, from).or_else(|| find_word(haystack, needle, 0))
}

fn find_word(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    if needle.is_empty() || !haystack.is_char_boundary(from) {
        return None;
    }
    let check_start = needle.chars().next().is_some_and(is_ident_char);
    let check_end = needle.chars().last().is_some_and(is_ident_char);

    let mut search = from;
    while let Some(found) = haystack[search..].find(needle) {
        let at = search + found;
        let end = at + needle.len();
        let before_ok = !check_start || !haystack[..at].chars().last().is_some_and(is_ident_char);
        let after_ok = !check_end || !haystack[end..].chars().next().is_some_and(is_ident_char);
        if before_ok && after_ok {
            return Some(at);
        }
        search = at + needle.chars().next().map_or(1, char::len_utf8);
    }
    None
}
