//! Import statements of output modules.

use crate::helpers::fixtures::*;
use pretty_assertions::assert_eq;
use slicer::hir::{DeclKind, IdentRole, ImportStatement};
use slicer::project::Runtime;
use slicer::{Extractor, ProjectBuilder, ProjectContext, ProjectDatabase, RootRequest, SemanticModel};

fn extract_main(p: &SampleProject) -> slicer::Extraction {
    let context = ProjectContext::new(Runtime::Node);
    Extractor::new(&p.db, &context)
        .run(&RootRequest::single(MAIN, "mainFunction"))
        .unwrap()
}

#[test]
fn test_main_imports_are_regenerated() {
    let p = sample_project();
    let extraction = extract_main(&p);

    let main = extraction.module(MAIN).unwrap();
    assert_eq!(
        main.imports,
        vec![
            "import { DecoupledPromise } from './DecoupledPromise';",
            "import { User, UserRole } from './types';",
            "import { getUserApi } from './utils';",
        ]
    );
    assert!(extraction.diagnostics.is_empty());
}

#[test]
fn test_main_renders_imports_then_declarations() {
    let p = sample_project();
    let extraction = extract_main(&p);

    let rendered = extraction.render_module(&p.db, MAIN).unwrap();
    let expected = format!(
        "import {{ DecoupledPromise }} from './DecoupledPromise';\n\
         import {{ User, UserRole }} from './types';\n\
         import {{ getUserApi }} from './utils';\n\
         \n{}\n\n{}\n",
        p.db.declaration(p.local_helper).text,
        p.db.declaration(p.main_function).text,
    );
    assert_eq!(rendered, expected);
}

#[test]
fn test_unused_internal_import_is_dropped() {
    let p = sample_project();
    let extraction = extract_main(&p);

    let utils = extraction.module(UTILS).unwrap();
    assert!(utils.imports.is_empty());
    let rendered = extraction.render_module(&p.db, UTILS).unwrap();
    assert!(rendered.starts_with("const BASE_URL"));
    assert!(!rendered.contains("isEmail"));
}

#[test]
fn test_modules_without_imports() {
    let p = sample_project();
    let extraction = extract_main(&p);

    for path in [TYPES, PROMISE] {
        assert!(extraction.module(path).unwrap().imports.is_empty(), "{path}");
    }
    assert!(extraction.dependencies.is_empty());
    assert_eq!(extraction.manifest, None);
    assert_eq!(extraction.report, None);
}

#[test]
fn test_import_into_unsliced_module_is_dropped() {
    let p = sample_project();
    let context = ProjectContext::default();
    let extraction = Extractor::new(&p.db, &context)
        .run(&RootRequest::single(MAIN, "anotherUnusedFunction"))
        .unwrap();

    assert_eq!(extraction.modules.len(), 1);
    assert!(extraction.modules[0].imports.is_empty());
}

#[test]
fn test_generic_parameters_never_become_imports() {
    let mut b = ProjectBuilder::new();
    let module = b.module("src/generic.ts");
    b.import(module, ImportStatement::named("./types", &["T"]));
    let first = b.declare(
        module,
        DeclKind::Function,
        Some("first"),
        "export function first<T>(items: T[]): T {\n    const head: T = items[0];\n    return head;\n}",
    );
    let t = b.type_parameter(first, "T");
    let items = b.nested(first, DeclKind::Parameter, Some("items"), "items: T[]");
    b.reference(items, "T", IdentRole::Type, t);
    b.reference(first, "T", IdentRole::Type, t);
    let head = b.nested(first, DeclKind::Variable, Some("head"), "head: T = items[0]");
    let items_symbol = b.symbol_of(items).unwrap();
    b.reference(head, "T", IdentRole::Type, t)
        .reference(head, "items", IdentRole::Value, items_symbol);
    let head_symbol = b.symbol_of(head).unwrap();
    b.reference(first, "head", IdentRole::Value, head_symbol);
    b.export(first);
    let db = b.build().unwrap();

    let context = ProjectContext::new(Runtime::Node);
    let extraction = Extractor::new(&db, &context)
        .run(&RootRequest::single("src/generic.ts", "first"))
        .unwrap();

    assert!(extraction.modules[0].imports.is_empty());
    assert!(extraction.dependencies.is_empty());
    assert!(extraction.diagnostics.is_empty());
    assert_eq!(extraction.report, None);
}

/// `src/feature/view.ts` importing through the `@` alias and a barrel.
fn aliased_project() -> (ProjectDatabase, ProjectContext) {
    let mut b = ProjectBuilder::new();
    let types = b.module("src/types.ts");
    let user = b.declare(types, DeclKind::Interface, Some("User"), "export interface User { id: number; }");
    let role = b.declare(types, DeclKind::TypeAlias, Some("Role"), "export type Role = 'admin';");
    b.export(user).export(role);

    let barrel = b.module("src/index.ts");
    b.import(barrel, ImportStatement::named("./types", &["Role"]));
    let reexported_role = b.alias("Role", b.symbol_of(role).unwrap());

    let view = b.module("src/feature/view.ts");
    b.import(view, ImportStatement::named("@/types", &["User"]))
        .import(view, ImportStatement::new("@/index").with_aliased("Role", "AccountRole"));
    let user_alias = b.alias("User", b.symbol_of(user).unwrap());
    let role_alias = b.alias("AccountRole", reexported_role);
    let render = b.declare(
        view,
        DeclKind::Function,
        Some("render"),
        "export function render(user: User, role: AccountRole) { return user.id; }",
    );
    let user_param = b.nested(render, DeclKind::Parameter, Some("user"), "user: User");
    b.reference(user_param, "User", IdentRole::Type, user_alias);
    let role_param = b.nested(render, DeclKind::Parameter, Some("role"), "role: AccountRole");
    b.reference(role_param, "AccountRole", IdentRole::Type, role_alias);
    b.export(render);

    let context = ProjectContext::new(Runtime::Node).with_path_alias("@", "src");
    (b.build().unwrap(), context)
}

#[test]
fn test_alias_imports_become_relative() {
    let (db, context) = aliased_project();
    let extraction = Extractor::new(&db, &context)
        .run(&RootRequest::single("src/feature/view.ts", "render"))
        .unwrap();

    let view = extraction.module("src/feature/view.ts").unwrap();
    assert_eq!(
        view.imports,
        vec![
            "import { User } from '../types';",
            "import { Role as AccountRole } from '../types';",
        ]
    );
    assert!(extraction.module("src/index.ts").is_none());
    assert!(extraction.diagnostics.is_empty());
}
