//! Runtime-appropriate dependency manifests (`package.json`, `deno.json`).

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use smol_str::SmolStr;
use tracing::{debug, warn};

use crate::deps::{ExternalDependencies, ExternalDependency, is_url};
use crate::diagnostics::Diagnostic;
use crate::error::Result;
use crate::project::{ProjectContext, Runtime};

pub const PACKAGE_NAME: &str = "extracted-code";
pub const PACKAGE_VERSION: &str = "1.0.0";
const LATEST: &str = "latest";

/// A rendered manifest file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Manifest {
    /// File name relative to the output root.
    pub file_name: &'static str,
    pub contents: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PackageJson<'a> {
    name: &'static str,
    version: &'static str,
    #[serde(rename = "type")]
    module_type: &'static str,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    dependencies: IndexMap<&'a str, &'a str>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    dev_dependencies: IndexMap<&'a str, &'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DenoJson<'a> {
    imports: IndexMap<&'a str, String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    compiler_options: &'a Map<String, Value>,
}

/// Render the manifest for the project's runtime.
///
/// `None` when there are no external dependencies. Identities the manifest
/// format cannot express are skipped and reported into `diagnostics`.
pub fn render_manifest(
    context: &ProjectContext,
    dependencies: &ExternalDependencies,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Option<Manifest>> {
    if dependencies.is_empty() {
        debug!("no external dependencies, no manifest");
        return Ok(None);
    }
    let manifest = match context.runtime {
        Runtime::Deno => render_deno_json(context, dependencies)?,
        Runtime::Node | Runtime::Bun | Runtime::Unknown => {
            render_package_json(context, dependencies, diagnostics)?
        }
    };
    debug!(file = manifest.file_name, packages = dependencies.len(), "rendered manifest");
    Ok(Some(manifest))
}

fn version(dependency: &ExternalDependency) -> &str {
    dependency.version.as_deref().unwrap_or(LATEST)
}

fn is_npm_expressible(package: &SmolStr) -> bool {
    !is_url(package) && !package.starts_with("jsr:")
}

fn render_package_json(
    context: &ProjectContext,
    dependencies: &ExternalDependencies,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Manifest> {
    let mut manifest = PackageJson {
        name: PACKAGE_NAME,
        version: PACKAGE_VERSION,
        module_type: context.module_type.as_str(),
        dependencies: IndexMap::new(),
        dev_dependencies: IndexMap::new(),
    };

    for dependency in dependencies.iter() {
        if !is_npm_expressible(&dependency.package) {
            let diagnostic = Diagnostic::non_npm_dependency(&dependency.package, "package.json");
            warn!(code = diagnostic.code, package = %dependency.package, "dependency not expressible in package.json");
            diagnostics.push(diagnostic);
            continue;
        }
        let table = if dependency.dev {
            &mut manifest.dev_dependencies
        } else {
            &mut manifest.dependencies
        };
        table.insert(dependency.package.as_str(), version(dependency));
    }

    Ok(Manifest {
        file_name: "package.json",
        contents: serde_json::to_string_pretty(&manifest)? + "\n",
    })
}

fn render_deno_json(
    context: &ProjectContext,
    dependencies: &ExternalDependencies,
) -> Result<Manifest> {
    let imports = dependencies
        .iter()
        .map(|dependency| {
            let package = dependency.package.as_str();
            let target = if !is_npm_expressible(&dependency.package) {
                package.to_string()
            } else {
                format!("npm:{package}@{}", version(dependency))
            };
            (package, target)
        })
        .collect();

    let manifest = DenoJson {
        imports,
        compiler_options: &context.compiler_options,
    };
    Ok(Manifest {
        file_name: "deno.json",
        contents: serde_json::to_string_pretty(&manifest)? + "\n",
    })
}
