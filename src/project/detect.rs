//! Project context detection from configuration files on disk.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use smol_str::SmolStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::context::{ModuleType, PackageManager, ProjectContext, Runtime};
use super::jsonc;
use crate::base::paths;
use crate::error::{Result, SliceError};

const PACKAGE_JSON: &str = "package.json";
const TSCONFIG_JSON: &str = "tsconfig.json";
const DENO_CONFIGS: &[&str] = &["deno.json", "deno.jsonc"];
const BUN_LOCKFILE: &str = "bun.lockb";

/// Lockfiles in order of specificity.
const LOCKFILES: &[(&str, PackageManager)] = &[
    ("bun.lockb", PackageManager::Bun),
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("package-lock.json", PackageManager::Npm),
];

/// Detects runtime, dependencies and module path aliases of a project.
pub struct ProjectDetector {
    root: PathBuf,
}

/// What one tsconfig contributes.
#[derive(Default)]
struct TsConfig {
    compiler_options: Map<String, Value>,
    path_aliases: IndexMap<String, PathBuf>,
    references: Vec<PathBuf>,
}

impl ProjectDetector {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn detect(&self) -> Result<ProjectContext> {
        if !self.root.is_dir() {
            return Err(SliceError::configuration(
                &self.root,
                "project root is not a directory",
            ));
        }

        let deno_config = DENO_CONFIGS
            .iter()
            .map(|name| self.root.join(name))
            .find(|path| path.is_file());
        let package_json = Some(self.root.join(PACKAGE_JSON)).filter(|p| p.is_file());
        let tsconfig_path = self.find_tsconfig();

        if deno_config.is_none() && package_json.is_none() && tsconfig_path.is_none() {
            return Err(SliceError::configuration(
                &self.root,
                "no tsconfig.json, deno.json or package.json found",
            ));
        }

        let runtime = self.detect_runtime(deno_config.is_some(), package_json.is_some());
        let package_manager = self.detect_package_manager(runtime);
        let lockfile_path = package_manager
            .lockfile()
            .map(|name| self.root.join(name))
            .filter(|path| path.is_file());

        let mut context = ProjectContext::new(runtime).with_root(&self.root);
        context.package_manager = package_manager;
        context.lockfile_path = lockfile_path;

        match runtime {
            Runtime::Deno => {
                if let Some(path) = &deno_config {
                    self.read_deno_config(path, &mut context)?;
                }
                context.manifest_path = deno_config.clone();
            }
            _ => {
                if let Some(path) = &package_json {
                    self.read_package_json(path, &mut context)?;
                }
                context.manifest_path = package_json.clone();
            }
        }

        if let Some(path) = &tsconfig_path {
            self.apply_tsconfig(path, &mut context)?;
        }
        context.tsconfig_path = tsconfig_path;

        debug!(
            root = %self.root.display(),
            runtime = runtime.as_str(),
            dependencies = context.dependencies.len(),
            dev_dependencies = context.dev_dependencies.len(),
            aliases = context.path_aliases.len(),
            "detected project context"
        );
        Ok(context)
    }

    fn detect_runtime(&self, has_deno: bool, has_package_json: bool) -> Runtime {
        if has_deno {
            Runtime::Deno
        } else if self.root.join(BUN_LOCKFILE).is_file() && !has_package_json {
            Runtime::Bun
        } else if has_package_json {
            Runtime::Node
        } else {
            Runtime::Unknown
        }
    }

    fn detect_package_manager(&self, runtime: Runtime) -> PackageManager {
        if runtime == Runtime::Deno {
            return PackageManager::None;
        }
        if let Some(&(_, manager)) = LOCKFILES
            .iter()
            .find(|(name, _)| self.root.join(name).is_file())
        {
            return manager;
        }
        match runtime {
            Runtime::Node | Runtime::Bun => PackageManager::Npm,
            _ => PackageManager::None,
        }
    }

    /// Nearest `tsconfig.json` in the root or any ancestor.
    fn find_tsconfig(&self) -> Option<PathBuf> {
        self.root
            .ancestors()
            .map(|dir| dir.join(TSCONFIG_JSON))
            .find(|path| path.is_file())
    }

    /// An unparsable package.json leaves the dependency tables empty.
    fn read_package_json(&self, path: &Path, context: &mut ProjectContext) -> Result<()> {
        let text = read(path)?;
        let manifest: Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not parse package.json");
                return Ok(());
            }
        };

        context.dependencies = string_table(&manifest["dependencies"]);
        context.dev_dependencies = string_table(&manifest["devDependencies"]);
        if manifest["type"] == "module" {
            context.module_type = ModuleType::Module;
        }
        Ok(())
    }

    /// `npm:` import-map entries become dependencies, relative entries become
    /// path aliases.
    fn read_deno_config(&self, path: &Path, context: &mut ProjectContext) -> Result<()> {
        let config = jsonc::parse(&read(path)?)
            .map_err(|err| SliceError::configuration(path, err.to_string()))?;

        if let Some(imports) = config["imports"].as_object() {
            for (key, target) in imports {
                let Some(target) = target.as_str() else {
                    continue;
                };
                if let Some((name, version)) = parse_npm_specifier(target) {
                    context.dependencies.insert(name, version);
                } else if target.starts_with("./") || target.starts_with("../") {
                    let alias = key.trim_end_matches('/').to_string();
                    context
                        .path_aliases
                        .entry(alias)
                        .or_insert_with(|| paths::normalize(Path::new(target)));
                }
            }
        }
        if let Some(options) = config["compilerOptions"].as_object() {
            context.compiler_options = options.clone();
        }
        Ok(())
    }

    /// Merge compiler options and path aliases of the tsconfig and the
    /// projects it references. The root config wins on conflicts.
    fn apply_tsconfig(&self, path: &Path, context: &mut ProjectContext) -> Result<()> {
        let root_config = self.read_tsconfig(path)?;

        let mut referenced = Vec::new();
        for reference in &root_config.references {
            if !reference.is_file() {
                warn!(path = %reference.display(), "referenced tsconfig not found");
                continue;
            }
            match self.read_tsconfig(reference) {
                Ok(config) => referenced.push(config),
                Err(err) => {
                    warn!(path = %reference.display(), error = %err, "skipping referenced tsconfig")
                }
            }
        }

        let mut options = referenced
            .first()
            .map(|config| config.compiler_options.clone())
            .unwrap_or_default();
        options.extend(root_config.compiler_options.clone());
        if context.compiler_options.is_empty() {
            context.compiler_options = options;
        }

        for config in std::iter::once(&root_config).chain(referenced.iter()) {
            for (alias, target) in &config.path_aliases {
                context
                    .path_aliases
                    .entry(alias.clone())
                    .or_insert_with(|| target.clone());
            }
        }
        Ok(())
    }

    fn read_tsconfig(&self, path: &Path) -> Result<TsConfig> {
        let config = jsonc::parse(&read(path)?)
            .map_err(|err| SliceError::configuration(path, err.to_string()))?;
        let config_dir = path.parent().unwrap_or_else(|| Path::new(""));

        let mut tsconfig = TsConfig::default();
        if let Some(options) = config["compilerOptions"].as_object() {
            tsconfig.compiler_options = options.clone();
        }

        let base_url = config["compilerOptions"]["baseUrl"].as_str().unwrap_or(".");
        let base_dir = config_dir.join(base_url);
        if let Some(path_map) = config["compilerOptions"]["paths"].as_object() {
            for (pattern, mappings) in path_map {
                let Some(first) = mappings.get(0).and_then(Value::as_str) else {
                    continue;
                };
                let alias = pattern.trim_end_matches("/*").to_string();
                let target = base_dir.join(first.trim_end_matches("/*"));
                let relative = paths::relative_path(&self.root, &target);
                tsconfig.path_aliases.entry(alias).or_insert(relative);
            }
        }

        if let Some(references) = config["references"].as_array() {
            for reference in references {
                let Some(reference) = reference["path"].as_str() else {
                    continue;
                };
                let mut location = config_dir.join(reference);
                if location.extension().is_none_or(|ext| ext != "json") {
                    location = location.join(TSCONFIG_JSON);
                }
                tsconfig.references.push(location);
            }
        }
        Ok(tsconfig)
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|err| SliceError::io(path, err))
}

/// `{ "name": "version" }` -> table; non-string versions are skipped.
fn string_table(value: &Value) -> IndexMap<SmolStr, String> {
    value
        .as_object()
        .into_iter()
        .flatten()
        .filter_map(|(name, version)| {
            Some((SmolStr::from(name.as_str()), version.as_str()?.to_string()))
        })
        .collect()
}

/// `npm:name@version` -> (name, version), `latest` when unversioned.
fn parse_npm_specifier(specifier: &str) -> Option<(SmolStr, String)> {
    let rest = specifier.strip_prefix("npm:")?;
    let (scope, rest) = match rest.strip_prefix('@') {
        Some(scoped) => ("@", scoped),
        None => ("", rest),
    };
    let (name, version) = match rest.split_once('@') {
        Some((name, version)) => (name, version.to_string()),
        None => (rest, "latest".to_string()),
    };
    let segments = if scope.is_empty() { 1 } else { 2 };
    let name: Vec<&str> = name.split('/').take(segments).collect();
    Some((SmolStr::from(format!("{scope}{}", name.join("/"))), version))
}

#[cfg(test)]
mod tests_detect;
