//! Canonical package identities.

use smol_str::SmolStr;

/// Whether `specifier` is a full URL import.
pub fn is_url(specifier: &str) -> bool {
    specifier.starts_with("http://") || specifier.starts_with("https://")
}

/// Derive the package identity an external specifier belongs to.
///
/// - URLs are their own identity, verbatim.
/// - `npm:` is a registry qualifier and is dropped.
/// - `jsr:` identities keep the prefix.
/// - Scoped packages keep `@scope/name`; sub-paths and `@version` suffixes
///   collapse to the package root.
///
/// ```
/// use slicer::deps::package_identity;
/// assert_eq!(package_identity("lodash/debounce"), "lodash");
/// assert_eq!(package_identity("npm:@scope/pkg@1.2.3/sub"), "@scope/pkg");
/// ```
pub fn package_identity(specifier: &str) -> SmolStr {
    if is_url(specifier) {
        return SmolStr::from(specifier);
    }
    if let Some(rest) = specifier.strip_prefix("npm:") {
        return package_root(rest);
    }
    if let Some(rest) = specifier.strip_prefix("jsr:") {
        return SmolStr::from(format!("jsr:{}", package_root(rest)));
    }
    package_root(specifier)
}

/// `@scope/name[@ver][/sub]` -> `@scope/name`, `name[@ver][/sub]` -> `name`.
fn package_root(specifier: &str) -> SmolStr {
    let mut segments = specifier.split('/');
    let first = segments.next().unwrap_or_default();

    if let Some(scope) = first.strip_prefix('@') {
        let name = segments.next().map(strip_version).unwrap_or_default();
        if name.is_empty() {
            return SmolStr::from(format!("@{}", strip_version(scope)));
        }
        return SmolStr::from(format!("@{scope}/{name}"));
    }
    SmolStr::from(strip_version(first))
}

fn strip_version(segment: &str) -> &str {
    segment.split('@').next().unwrap_or(segment)
}
