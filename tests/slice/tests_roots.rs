//! Root request validation and resolution.

use crate::helpers::fixtures::*;
use slicer::diagnostics::codes;
use slicer::slice::Slicer;
use slicer::{MissingRoot, RootRequest, SliceError};

#[test]
fn test_inconsistent_arity_is_rejected_before_resolution() {
    let p = sample_project();
    let request = RootRequest::new(["src/nope.ts", "src/missing.ts"], ["a", "b", "c"]);
    let err = Slicer::new(&p.db).slice(&request).unwrap_err();
    assert!(matches!(
        err,
        SliceError::InconsistentRootArity {
            modules: 2,
            names: 3
        }
    ));
}

#[test]
fn test_arity_shapes_that_pair_up() {
    let p = sample_project();
    let slicer = Slicer::new(&p.db);

    let one_to_many = RootRequest::new([UTILS], ["getUserApi", "isEmail"]);
    assert_eq!(slicer.slice(&one_to_many).unwrap().roots.len(), 2);

    let pairs = RootRequest::new([UTILS, TYPES], ["isEmail", "User"]);
    assert_eq!(slicer.slice(&pairs).unwrap().roots.len(), 2);

    let shared_name = RootRequest::new([TYPES, PROMISE], ["*"]);
    let roots = slicer.slice(&shared_name).unwrap().roots;
    assert_eq!(roots.len(), 4);
}

#[test]
fn test_missing_declaration_names_module_and_symbol() {
    let p = sample_project();
    let err = Slicer::new(&p.db)
        .slice(&RootRequest::single(MAIN, "doesNotExist"))
        .unwrap_err();

    match &err {
        SliceError::RootNotFound {
            module,
            name,
            reason,
        } => {
            assert_eq!(module, MAIN);
            assert_eq!(name, "doesNotExist");
            assert_eq!(*reason, MissingRoot::Declaration);
        }
        other => panic!("expected RootNotFound, got {other:?}"),
    }
    let message = err.to_string();
    assert!(message.contains(MAIN) && message.contains("doesNotExist"));
}

#[test]
fn test_missing_module_is_fatal() {
    let p = sample_project();
    let err = Slicer::new(&p.db)
        .slice(&RootRequest::new([MAIN, "src/gone.ts"], ["mainFunction"]))
        .unwrap_err();
    assert!(matches!(
        err,
        SliceError::RootNotFound {
            reason: MissingRoot::Module,
            ..
        }
    ));
}

#[test]
fn test_nested_names_are_not_roots() {
    let p = sample_project();
    let err = Slicer::new(&p.db)
        .slice(&RootRequest::single(MAIN, "url"))
        .unwrap_err();
    assert!(err.is_root_not_found());
}

#[test]
fn test_unmatched_pattern_warns_and_continues() {
    let p = sample_project();
    let result = Slicer::new(&p.db)
        .slice(&RootRequest::new([UTILS], ["get*", "zz*"]))
        .unwrap();

    let roots: Vec<&str> = result.roots.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(roots, vec!["getUserApi"]);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, codes::UNMATCHED_WILDCARD);
    assert_eq!(result.diagnostics[0].subject, "zz*");
}

#[test]
fn test_pattern_matches_whole_names_only() {
    let p = sample_project();
    let result = Slicer::new(&p.db)
        .slice(&RootRequest::single(TYPES, "User*"))
        .unwrap();
    let roots: Vec<&str> = result.roots.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(roots, vec!["User", "UserRole"]);
}

#[test]
fn test_failures_are_reported_in_pair_order() {
    let p = sample_project();
    let slicer = Slicer::new(&p.db);
    let oversized = "*x".repeat(100_000);

    let missing_first = RootRequest::new(
        [UTILS, UTILS],
        ["doesNotExist".to_string(), oversized.clone()],
    );
    assert!(matches!(
        slicer.slice(&missing_first),
        Err(SliceError::RootNotFound { reason: MissingRoot::Declaration, .. })
    ));

    let pattern_first = RootRequest::new([UTILS, UTILS], [oversized, "doesNotExist".to_string()]);
    assert!(matches!(
        slicer.slice(&pattern_first),
        Err(SliceError::Pattern { .. })
    ));
}
