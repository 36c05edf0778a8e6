//! Plain-text `DEPENDENCIES.md` report.

use std::fmt::Write as _;

use crate::deps::ExternalDependencies;
use crate::project::ProjectContext;

pub const REPORT_FILE: &str = "DEPENDENCIES.md";

/// Human-readable summary of the external dependencies.
///
/// `None` when there are none. The output is deterministic: packages in
/// first-seen order, imported names sorted, no timestamps.
pub fn render_report(context: &ProjectContext, dependencies: &ExternalDependencies) -> Option<String> {
    if dependencies.is_empty() {
        return None;
    }

    let mut out = String::new();
    let _ = writeln!(out, "# External Dependencies\n");
    let _ = writeln!(out, "Runtime: {}\n", context.runtime.as_str());
    let _ = writeln!(out, "Total dependencies: {}", dependencies.len());

    for dependency in dependencies.iter() {
        let _ = writeln!(out, "\n## {}", dependency.package);
        let _ = writeln!(out, "- Version: {}", dependency.version.as_deref().unwrap_or("latest"));
        let kind = if dependency.dev { "devDependency" } else { "dependency" };
        let _ = writeln!(out, "- Type: {kind}");
        let _ = writeln!(out, "- Imported symbols ({}):", dependency.symbols.len());
        for symbol in dependency.sorted_symbols() {
            let _ = writeln!(out, "  - {symbol}");
        }
        let kinds: Vec<&str> = dependency.import_kinds.iter().map(|k| k.as_str()).collect();
        let _ = writeln!(out, "- Import kinds: {}", kinds.join(", "));
    }
    Some(out)
}
