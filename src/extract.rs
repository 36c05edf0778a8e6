//! Extraction façade: one root request in, everything downstream needs out.
//!
//! ```text
//! RootRequest ─► Slicer ─► SliceResult ─► Reconstructor ─► Reconstruction
//!                                                              │
//!                              render_manifest / render_report ◄┘
//! ```
//!
//! A run is all-or-nothing. Any fatal error returns `Err` before anything
//! is rendered, and an [`Extraction`] is the only way to reach the
//! [`OutputWriter`].

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::base::paths;
use crate::deps::{ExternalDependencies, ReconstructedModule, Reconstructor};
use crate::diagnostics::Diagnostic;
use crate::emit::{Manifest, OutputWriter, render_manifest, render_report};
use crate::error::Result;
use crate::hir::SemanticModel;
use crate::project::ProjectContext;
use crate::slice::{ResolvedRoot, RootRequest, SliceResult, Slicer};

/// Runs extractions against one model and project context.
pub struct Extractor<'a, M: SemanticModel + ?Sized> {
    model: &'a M,
    context: &'a ProjectContext,
}

/// The result of a successful extraction.
#[derive(Clone, Debug)]
pub struct Extraction {
    pub roots: Vec<ResolvedRoot>,
    /// Per-module closure, before import reconstruction.
    pub slice: SliceResult,
    /// Output modules with their import blocks.
    pub modules: Vec<ReconstructedModule>,
    pub dependencies: ExternalDependencies,
    pub manifest: Option<Manifest>,
    pub report: Option<String>,
    /// Every non-fatal finding of the run, in the order produced.
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a, M: SemanticModel + ?Sized> Extractor<'a, M> {
    pub fn new(model: &'a M, context: &'a ProjectContext) -> Self {
        Self { model, context }
    }

    pub fn run(&self, request: &RootRequest) -> Result<Extraction> {
        let slice = Slicer::new(self.model).slice(request)?;
        let reconstruction = Reconstructor::new(self.model, self.context).reconstruct(&slice);

        let mut diagnostics = slice.diagnostics.clone();
        diagnostics.extend(reconstruction.diagnostics);
        let manifest = render_manifest(self.context, &reconstruction.dependencies, &mut diagnostics)?;
        let report = render_report(self.context, &reconstruction.dependencies);

        debug!(
            modules = reconstruction.modules.len(),
            declarations = slice.declaration_count(),
            packages = reconstruction.dependencies.len(),
            diagnostics = diagnostics.len(),
            "extraction complete"
        );
        Ok(Extraction {
            roots: slice.roots.clone(),
            slice,
            modules: reconstruction.modules,
            dependencies: reconstruction.dependencies,
            manifest,
            report,
            diagnostics,
        })
    }
}

impl Extraction {
    /// Output module for a project-relative path.
    pub fn module(&self, path: impl AsRef<Path>) -> Option<&ReconstructedModule> {
        let path = paths::normalize(path.as_ref());
        self.modules.iter().find(|module| paths::normalize(&module.path) == path)
    }

    /// Rendered source text of the output module at `path`.
    pub fn render_module<M>(&self, model: &M, path: impl AsRef<Path>) -> Option<String>
    where
        M: SemanticModel + ?Sized,
    {
        self.module(path).map(|module| module.render(model))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }

    /// Write every artifact under `root`.
    pub fn write_to<M>(&self, model: &M, root: impl Into<PathBuf>) -> Result<Vec<PathBuf>>
    where
        M: SemanticModel + ?Sized,
    {
        OutputWriter::new(root).write(
            model,
            &self.modules,
            self.manifest.as_ref(),
            self.report.as_deref(),
        )
    }
}
