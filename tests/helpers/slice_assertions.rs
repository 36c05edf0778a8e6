//! Assertions over slice and extraction results.

use slicer::slice::SliceResult;
use slicer::{DeclId, ModuleId, SemanticModel};

/// Declarations of `module` in the slice, in emitted order.
pub fn sliced<'a>(result: &'a SliceResult, module: ModuleId) -> &'a [DeclId] {
    result
        .module(module)
        .map_or(&[], |slice| slice.declarations.as_slice())
}

/// Names of the sliced declarations of `module`; variable groups contribute
/// the names they bind.
pub fn sliced_names<M: SemanticModel>(model: &M, result: &SliceResult, module: ModuleId) -> Vec<String> {
    sliced(result, module)
        .iter()
        .flat_map(|&decl| model.bound_names(decl))
        .map(|name| name.to_string())
        .collect()
}

/// Assert emitted declarations of every module ascend by source position.
pub fn assert_source_order<M: SemanticModel>(model: &M, result: &SliceResult) {
    for slice in &result.modules {
        let starts: Vec<_> = slice
            .declarations
            .iter()
            .map(|&decl| model.declaration(decl).range.start())
            .collect();
        assert!(
            starts.windows(2).all(|pair| pair[0] < pair[1]),
            "declarations of {} are not in source order: {:?}",
            slice.path.display(),
            starts
        );
    }
}
