//! Reachability traversal.
//!
//! Starting from resolved roots, every reference inside a declaration is
//! resolved to its canonical symbol and each backing declaration that is
//! neither local to the referencing declaration nor library code is promoted
//! to its structural container and enqueued. The run's state lives in a
//! [`TraversalContext`] built fresh per run; a [`Slicer`] only borrows the
//! model and can run any number of independent slices.

use rustc_hash::FxHashSet;

use super::closure::{Closure, SliceResult};
use super::roots::{RootRequest, resolve_roots};
use crate::base::{DeclId, SymbolId};
use crate::error::Result;
use crate::hir::{DeclKind, SemanticModel};

// ============================================================================
// TRAVERSAL STATE
// ============================================================================

/// State owned by exactly one slicing run.
#[derive(Debug, Default)]
pub struct TraversalContext {
    visited: FxHashSet<SymbolId>,
    closure: Closure,
    worklist: Vec<DeclId>,
}

impl TraversalContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visited(&self, symbol: SymbolId) -> bool {
        self.visited.contains(&symbol)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn closure(&self) -> &Closure {
        &self.closure
    }

    pub fn into_closure(self) -> Closure {
        self.closure
    }
}

// ============================================================================
// SLICER
// ============================================================================

/// The reachability engine over a read-only semantic model.
pub struct Slicer<'m, M: SemanticModel + ?Sized> {
    model: &'m M,
}

impl<'m, M: SemanticModel + ?Sized> Slicer<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Self { model }
    }

    /// Validate, resolve and traverse a whole request.
    pub fn slice(&self, request: &RootRequest) -> Result<SliceResult> {
        let resolution = resolve_roots(self.model, request)?;

        let mut cx = TraversalContext::new();
        for root in &resolution.roots {
            for &decl in &root.declarations {
                self.visit(&mut cx, decl);
            }
        }

        tracing::debug!(
            roots = resolution.roots.len(),
            declarations = cx.closure.len(),
            symbols = cx.visited_count(),
            "slice complete"
        );
        Ok(SliceResult {
            roots: resolution.roots,
            modules: cx.into_closure().into_slices(self.model),
            diagnostics: resolution.diagnostics,
        })
    }

    /// Traverse from already resolved root declarations with a fresh context.
    pub fn slice_from(&self, roots: &[DeclId]) -> Closure {
        let mut cx = TraversalContext::new();
        for &root in roots {
            self.visit(&mut cx, root);
        }
        cx.into_closure()
    }

    /// Add everything reachable from `root` to `cx`.
    pub fn visit(&self, cx: &mut TraversalContext, root: DeclId) {
        cx.worklist.push(self.promote(root));

        while let Some(decl) = cx.worklist.pop() {
            let module = self.model.owning_module(decl);
            if !cx.closure.insert(module, decl) {
                continue;
            }
            self.mark_bound_symbols(cx, decl);

            let found = self.dependencies_of(cx, decl);
            // Reverse so the first reference is processed first.
            cx.worklist.extend(found.into_iter().rev());
        }
    }

    /// Mark the symbols `decl` itself binds as visited.
    fn mark_bound_symbols(&self, cx: &mut TraversalContext, decl: DeclId) {
        let mut stack = vec![decl];
        while let Some(current) = stack.pop() {
            let declaration = self.model.declaration(current);
            if let Some(symbol) = self.model.symbol_for_declaration(current) {
                cx.visited.insert(symbol);
            }
            if declaration.kind.binds_through() {
                stack.extend(declaration.children.iter().copied().filter(|&child| {
                    matches!(
                        self.model.declaration(child).kind,
                        DeclKind::Variable | DeclKind::BindingElement
                    )
                }));
            }
        }
    }

    /// Promoted declarations `decl` depends on that are not yet visited,
    /// marking their symbols visited.
    fn dependencies_of(&self, cx: &mut TraversalContext, decl: DeclId) -> Vec<DeclId> {
        let mut found = Vec::new();

        for occurrence in self.model.occurrences_in(decl) {
            if !self.model.classify(occurrence).is_reference() {
                continue;
            }
            let Some(symbol) = self.model.symbol_for_occurrence(occurrence) else {
                continue;
            };
            let symbol = self.model.resolve_alias(symbol);
            if self.model.symbol(symbol).is_type_parameter || cx.is_visited(symbol) {
                continue;
            }

            let candidates: Vec<DeclId> = self
                .model
                .declarations_of(symbol)
                .iter()
                .copied()
                .filter(|&candidate| self.is_dependency(decl, candidate))
                .map(|candidate| self.promote(candidate))
                .collect();
            if candidates.is_empty() {
                continue;
            }

            cx.visited.insert(symbol);
            for candidate in candidates {
                if !cx.closure.contains(candidate) && !found.contains(&candidate) {
                    tracing::trace!(from = %decl, to = %candidate, name = %occurrence.text, "enqueued");
                    found.push(candidate);
                }
            }
        }
        found
    }

    /// Whether `candidate` is a cross-cutting dependency of `decl`.
    fn is_dependency(&self, decl: DeclId, candidate: DeclId) -> bool {
        let within = self.model.declaration(decl);
        let declaration = self.model.declaration(candidate);
        if within.contains(declaration) {
            tracing::trace!(%decl, %candidate, "skip local");
            return false;
        }
        if self.model.is_library_module(declaration.module) {
            tracing::trace!(%candidate, "skip library");
            return false;
        }
        true
    }

    /// Walk up while the declaration is a fragment of its parent.
    ///
    /// Depends only on the model's structure, so the same fragment always
    /// promotes to the same container.
    pub fn promote(&self, decl: DeclId) -> DeclId {
        let mut current = decl;
        while let Some(parent) = self.model.parent_of(current) {
            let kind = self.model.declaration(current).kind;
            if !kind.is_fragment_of(self.model.declaration(parent).kind) {
                break;
            }
            current = parent;
        }
        if current != decl {
            tracing::trace!(fragment = %decl, container = %current, "promoted");
        }
        current
    }
}
