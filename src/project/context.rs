//! The project context handed to dependency reconstruction and emission.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use smol_str::SmolStr;
use std::path::PathBuf;

/// JavaScript runtime flavor of the source project.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Runtime {
    Node,
    Deno,
    Bun,
    #[default]
    Unknown,
}

impl Runtime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Runtime::Node => "nodejs",
            Runtime::Deno => "deno",
            Runtime::Bun => "bun",
            Runtime::Unknown => "unknown",
        }
    }
}

/// Package manager inferred from the lockfile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
    #[default]
    None,
}

impl PackageManager {
    /// Lockfile name, if the manager has one.
    pub fn lockfile(&self) -> Option<&'static str> {
        match self {
            PackageManager::Npm => Some("package-lock.json"),
            PackageManager::Yarn => Some("yarn.lock"),
            PackageManager::Pnpm => Some("pnpm-lock.yaml"),
            PackageManager::Bun => Some("bun.lockb"),
            PackageManager::None => None,
        }
    }
}

/// `"type"` of the source package.json.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ModuleType {
    Module,
    #[default]
    CommonJs,
}

impl ModuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleType::Module => "module",
            ModuleType::CommonJs => "commonjs",
        }
    }
}

/// Everything detected about the source project.
///
/// Configuration file paths are joined onto `root`. Alias targets are
/// relative to `root`, the same convention module paths in the semantic
/// model use.
#[derive(Clone, Debug, Default)]
pub struct ProjectContext {
    pub root: PathBuf,
    pub runtime: Runtime,
    pub package_manager: PackageManager,
    pub manifest_path: Option<PathBuf>,
    pub lockfile_path: Option<PathBuf>,
    pub dependencies: IndexMap<SmolStr, String>,
    pub dev_dependencies: IndexMap<SmolStr, String>,
    pub module_type: ModuleType,
    pub tsconfig_path: Option<PathBuf>,
    /// Raw `compilerOptions` of the effective tsconfig or deno config.
    pub compiler_options: Map<String, Value>,
    /// Alias prefix (`@`, `~utils`) -> target directory.
    pub path_aliases: IndexMap<String, PathBuf>,
}

impl ProjectContext {
    pub fn new(runtime: Runtime) -> Self {
        Self {
            runtime,
            ..Self::default()
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_dependency(mut self, name: &str, version: &str) -> Self {
        self.dependencies.insert(name.into(), version.to_string());
        self
    }

    pub fn with_dev_dependency(mut self, name: &str, version: &str) -> Self {
        self.dev_dependencies.insert(name.into(), version.to_string());
        self
    }

    pub fn with_path_alias(mut self, alias: &str, target: impl Into<PathBuf>) -> Self {
        self.path_aliases.insert(alias.to_string(), target.into());
        self
    }

    pub fn with_module_type(mut self, module_type: ModuleType) -> Self {
        self.module_type = module_type;
        self
    }

    /// Declared version of `package`, regular dependencies first.
    pub fn version_of(&self, package: &str) -> Option<&str> {
        self.dependencies
            .get(package)
            .or_else(|| self.dev_dependencies.get(package))
            .map(String::as_str)
    }

    /// Listed only under devDependencies.
    pub fn is_dev_dependency(&self, package: &str) -> bool {
        self.dev_dependencies.contains_key(package) && !self.dependencies.contains_key(package)
    }

    /// The longest alias `specifier` starts with, and the path it maps to.
    ///
    /// `@/feats/store` with alias `@` -> `src` gives `src/feats/store`.
    pub fn resolve_alias(&self, specifier: &str) -> Option<PathBuf> {
        self.path_aliases
            .iter()
            .filter_map(|(alias, target)| {
                let rest = specifier.strip_prefix(alias.as_str())?;
                if rest.is_empty() {
                    Some((alias.len(), target.clone()))
                } else {
                    let rest = rest.strip_prefix('/')?;
                    Some((alias.len(), target.join(rest)))
                }
            })
            .max_by_key(|(len, _)| *len)
            .map(|(_, path)| path)
    }

    pub fn is_path_alias(&self, specifier: &str) -> bool {
        self.resolve_alias(specifier).is_some()
    }
}
