//! End-to-end slicing of the sample project.

use crate::helpers::fixtures::*;
use crate::helpers::slice_assertions::*;
use slicer::RootRequest;
use slicer::slice::Slicer;

#[test]
fn test_main_function_closure() {
    let p = sample_project();
    let result = Slicer::new(&p.db)
        .slice(&RootRequest::single(MAIN, "mainFunction"))
        .unwrap();

    assert_eq!(sliced(&result, p.main), &[p.local_helper, p.main_function]);
    assert_eq!(sliced(&result, p.utils), &[p.base_url, p.get_user_api]);
    assert_eq!(sliced(&result, p.types), &[p.user, p.user_role]);
    assert_eq!(sliced(&result, p.promise), &[p.decoupled_promise]);
    assert_eq!(result.modules.len(), 4);
    assert_eq!(result.declaration_count(), 7);

    for unrelated in [p.another_unused, p.is_email, p.unused_type] {
        assert!(!result.contains(unrelated));
    }
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_main_function_closure_names() {
    let p = sample_project();
    let result = Slicer::new(&p.db)
        .slice(&RootRequest::single(MAIN, "mainFunction"))
        .unwrap();

    assert_eq!(sliced_names(&p.db, &result, p.main), vec!["localHelper", "mainFunction"]);
    assert_eq!(sliced_names(&p.db, &result, p.utils), vec!["BASE_URL", "getUserApi"]);
    assert_eq!(sliced_names(&p.db, &result, p.types), vec!["User", "UserRole"]);
}

#[test]
fn test_wildcard_expands_exported_names_only() {
    let p = sample_project();
    let result = Slicer::new(&p.db)
        .slice(&RootRequest::single(MAIN, "*"))
        .unwrap();

    let roots: Vec<&str> = result.roots.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(roots, vec!["mainFunction", "anotherUnusedFunction"]);
    assert_eq!(
        sliced(&result, p.main),
        &[p.local_helper, p.main_function, p.another_unused]
    );
    assert!(
        result
            .roots
            .iter()
            .all(|root| !root.declarations.contains(&p.local_helper))
    );
}

#[test]
fn test_closure_of_utility_pulls_its_constant() {
    let p = sample_project();
    let result = Slicer::new(&p.db)
        .slice(&RootRequest::single(UTILS, "getUserApi"))
        .unwrap();

    assert_eq!(result.modules.len(), 1);
    assert_eq!(sliced(&result, p.utils), &[p.base_url, p.get_user_api]);
}

#[test]
fn test_render_prints_file_banners() {
    let p = sample_project();
    let result = Slicer::new(&p.db)
        .slice(&RootRequest::single(TYPES, "UserRole"))
        .unwrap();

    let rendered = result.render(&p.db);
    assert!(rendered.contains("// File: src/types.ts"));
    assert!(rendered.contains("export type UserRole = 'admin' | 'user';"));
    assert!(!rendered.contains("UnusedType"));
}
