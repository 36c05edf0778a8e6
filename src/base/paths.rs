//! Lexical path helpers.
//!
//! Module paths are compared and rewritten purely lexically: extracted code
//! lives under an output root that does not exist yet, so nothing here may
//! touch the filesystem.

use std::path::{Component, Path, PathBuf};

/// Source extensions stripped from generated import specifiers, longest first.
const STRIPPED_EXTENSIONS: &[&str] = &[".d.ts", ".tsx", ".jsx", ".ts", ".js", ".mts", ".mjs"];

/// Normalize `.` and `..` components without consulting the filesystem.
///
/// Leading `..` components that climb above the start of a relative path are
/// kept, so `../a/./b/../c` becomes `../a/c`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().map(|c| c.as_os_str()).collect()
}

/// Render a path with `/` separators.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::CurDir => None,
            Component::RootDir | Component::Prefix(_) => Some(String::new()),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Strip a trailing source extension (`.ts`, `.tsx`, `.js`, `.jsx`, `.d.ts`, ...).
pub fn strip_source_extension(specifier: &str) -> &str {
    STRIPPED_EXTENSIONS
        .iter()
        .find_map(|ext| specifier.strip_suffix(ext))
        .unwrap_or(specifier)
}

/// Lexical path from directory `from_dir` to `to`, using `..` to climb.
///
/// Both paths must share the same anchor (both relative to one root, or
/// both absolute).
pub fn relative_path(from_dir: &Path, to: &Path) -> PathBuf {
    let from_dir = normalize(from_dir);
    let to = normalize(to);

    let from: Vec<Component<'_>> = from_dir.components().collect();
    let to: Vec<Component<'_>> = to.components().collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..from.len() {
        out.push("..");
    }
    for component in &to[common..] {
        out.push(component.as_os_str());
    }
    out
}

/// Compute the import specifier that reaches `to_file` from a module located
/// at `from_file`.
///
/// Both paths are interpreted relative to the same root. The result always
/// starts with `./` or `../` and carries no source extension.
pub fn relative_specifier(from_file: &Path, to_file: &Path) -> String {
    let from_dir = from_file.parent().unwrap_or_else(|| Path::new(""));
    let joined = to_slash(&relative_path(from_dir, to_file));
    let joined = strip_source_extension(&joined);
    if joined.starts_with("../") {
        joined.to_string()
    } else {
        format!("./{joined}")
    }
}
