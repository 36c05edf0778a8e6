//! On-disk output of an extraction.

use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use super::manifest::Manifest;
use super::report::REPORT_FILE;
use crate::deps::ReconstructedModule;
use crate::error::{Result, SliceError};
use crate::hir::SemanticModel;

/// Writes output modules, the manifest and the report under one root.
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where a project-relative module path lands under the output root.
    ///
    /// Only normal components are kept, so nothing is written outside the
    /// root.
    pub fn output_path(&self, module_path: &Path) -> PathBuf {
        let mut out = self.root.clone();
        for component in module_path.components() {
            if let Component::Normal(part) = component {
                out.push(part);
            }
        }
        out
    }

    /// Write everything and return the written paths in write order.
    pub fn write<M>(
        &self,
        model: &M,
        modules: &[ReconstructedModule],
        manifest: Option<&Manifest>,
        report: Option<&str>,
    ) -> Result<Vec<PathBuf>>
    where
        M: SemanticModel + ?Sized,
    {
        let mut written = Vec::with_capacity(modules.len() + 2);
        for module in modules {
            let path = self.output_path(&module.path);
            self.write_file(&path, &module.render(model))?;
            written.push(path);
        }
        if let Some(manifest) = manifest {
            let path = self.root.join(manifest.file_name);
            self.write_file(&path, &manifest.contents)?;
            written.push(path);
        }
        if let Some(report) = report {
            let path = self.root.join(REPORT_FILE);
            self.write_file(&path, report)?;
            written.push(path);
        }
        debug!(root = %self.root.display(), files = written.len(), "wrote extraction");
        Ok(written)
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| SliceError::io(parent, err))?;
        }
        fs::write(path, contents).map_err(|err| SliceError::io(path, err))
    }
}
