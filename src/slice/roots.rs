//! Root requests: arity rules, wildcard expansion and resolution.

use regex::{Regex, RegexBuilder};
use smol_str::SmolStr;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

use crate::base::{DeclId, ModuleId, paths};
use crate::diagnostics::Diagnostic;
use crate::error::{MissingRoot, Result, SliceError};
use crate::hir::SemanticModel;

/// Modules and names requested by the caller, before pairing.
///
/// Cardinality rules: one module with any number of names, any number of
/// modules sharing one name, or equally long lists paired by position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RootRequest {
    pub modules: Vec<PathBuf>,
    pub names: Vec<String>,
}

/// One (module, name) starting point.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RootPair {
    pub module: PathBuf,
    pub name: String,
}

/// A root pair resolved to its top-level declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRoot {
    pub module: ModuleId,
    pub name: SmolStr,
    /// Every matching top-level declaration (overloads, merged declarations).
    pub declarations: Vec<DeclId>,
}

impl RootRequest {
    pub fn new<P, N>(
        modules: impl IntoIterator<Item = P>,
        names: impl IntoIterator<Item = N>,
    ) -> Self
    where
        P: Into<PathBuf>,
        N: Into<String>,
    {
        Self {
            modules: modules.into_iter().map(Into::into).collect(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// A single (module, name) root.
    pub fn single(module: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self::new([module.into()], [name.into()])
    }

    /// Pair modules with names according to the cardinality rules.
    ///
    /// Runs before any model lookup, so an inconsistent request is rejected
    /// without touching the project.
    pub fn pairs(&self) -> Result<Vec<RootPair>> {
        let (modules, names) = (self.modules.len(), self.names.len());
        let pair = |module: &PathBuf, name: &String| RootPair {
            module: module.clone(),
            name: name.clone(),
        };

        if modules == 0 || names == 0 {
            return Err(SliceError::InconsistentRootArity { modules, names });
        }
        let pairs = if modules == 1 {
            self.names.iter().map(|n| pair(&self.modules[0], n)).collect()
        } else if names == 1 {
            self.modules.iter().map(|m| pair(m, &self.names[0])).collect()
        } else if modules == names {
            self.modules
                .iter()
                .zip(&self.names)
                .map(|(m, n)| pair(m, n))
                .collect()
        } else {
            return Err(SliceError::InconsistentRootArity { modules, names });
        };
        Ok(pairs)
    }
}

/// Compiled size ceiling for one root pattern.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Whether a requested name is a glob pattern.
pub fn is_pattern(name: &str) -> bool {
    name.contains('*')
}

/// Compile a glob where `*` matches any substring and everything else is
/// literal, anchored at both ends.
pub fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    RegexBuilder::new(&format!("^{body}$"))
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
        .map_err(|source| SliceError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Exported names of `module` matching `pattern`, in source order.
pub fn expand_pattern<M>(model: &M, module: ModuleId, pattern: &str) -> Result<Vec<SmolStr>>
where
    M: SemanticModel + ?Sized,
{
    let regex = glob_to_regex(pattern)?;
    Ok(model
        .exported_names(module)
        .into_iter()
        .filter(|name| regex.is_match(name))
        .collect())
}

/// Outcome of resolving a whole request.
#[derive(Clone, Debug, Default)]
pub struct RootResolution {
    pub roots: Vec<ResolvedRoot>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolve every pair of `request` to top-level declarations.
///
/// All-or-nothing: every offending pair is logged, then the first one is
/// returned, either as [`SliceError::RootNotFound`] or as the
/// [`SliceError::Pattern`] of a wildcard that does not compile.
pub fn resolve_roots<M>(model: &M, request: &RootRequest) -> Result<RootResolution>
where
    M: SemanticModel + ?Sized,
{
    let pairs = request.pairs()?;
    let mut resolution = RootResolution::default();
    let mut failures: Vec<SliceError> = Vec::new();

    for pair in pairs {
        let Some(module) = model.module_by_path(&pair.module) else {
            failures.push(root_not_found(pair, MissingRoot::Module));
            continue;
        };

        if is_pattern(&pair.name) {
            let names = match expand_pattern(model, module, &pair.name) {
                Ok(names) => names,
                Err(err) => {
                    failures.push(err);
                    continue;
                }
            };
            if names.is_empty() {
                let diagnostic = Diagnostic::unmatched_wildcard(&pair.module, &pair.name);
                warn!(code = diagnostic.code, module = %pair.module.display(), pattern = %pair.name, "wildcard matched nothing");
                resolution.diagnostics.push(diagnostic);
            }
            for name in names {
                let declarations = model.resolve_top_level(module, &name);
                debug!(pattern = %pair.name, %name, count = declarations.len(), "expanded root");
                resolution.roots.push(ResolvedRoot {
                    module,
                    name,
                    declarations,
                });
            }
            continue;
        }

        let declarations = model.resolve_top_level(module, &pair.name);
        if declarations.is_empty() {
            failures.push(root_not_found(pair, MissingRoot::Declaration));
            continue;
        }
        resolution.roots.push(ResolvedRoot {
            module,
            name: SmolStr::from(pair.name.as_str()),
            declarations,
        });
    }

    for failure in &failures {
        match failure {
            SliceError::RootNotFound { module, name, reason } => {
                error!(%module, %name, %reason, "root not found");
            }
            other => error!(error = %other, "root could not be resolved"),
        }
    }
    if let Some(first) = failures.into_iter().next() {
        return Err(first);
    }

    debug!(roots = resolution.roots.len(), "resolved roots");
    Ok(resolution)
}

fn root_not_found(pair: RootPair, reason: MissingRoot) -> SliceError {
    SliceError::RootNotFound {
        module: display_path(&pair.module),
        name: pair.name,
        reason,
    }
}

fn display_path(path: &Path) -> String {
    paths::to_slash(&paths::normalize(path))
}
