//! Detection on disk feeding an extraction.

use crate::helpers::fixtures::*;
use slicer::hir::{DeclKind, IdentRole, ImportStatement};
use slicer::project::{ModuleType, PackageManager, Runtime};
use slicer::{Extractor, ProjectBuilder, ProjectDatabase, ProjectDetector, RootRequest};
use std::fs;
use std::path::Path;

fn write(root: &Path, name: &str, contents: &str) {
    let path = root.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn node_project(root: &Path) {
    write(
        root,
        "package.json",
        r#"{
  "name": "sample",
  "type": "module",
  "dependencies": { "zod": "^3.22.0" },
  "devDependencies": { "vitest": "^1.0.0" }
}"#,
    );
    write(root, "pnpm-lock.yaml", "lockfileVersion: '6.0'\n");
    write(
        root,
        "tsconfig.json",
        r#"{
  // path aliases
  "compilerOptions": {
    "baseUrl": "./src",
    "paths": { "@models/*": ["models/*"] },
  },
}"#,
    );
}

/// `src/api.ts` validating a model imported through `@models`.
fn api_project() -> ProjectDatabase {
    let mut b = ProjectBuilder::new();
    let models = b.module("src/models/user.ts");
    let schema = b.declare(
        models,
        DeclKind::VariableGroup,
        None,
        "export const UserSchema = z.object({ id: z.number() });",
    );
    let schema_var = b.nested(
        schema,
        DeclKind::Variable,
        Some("UserSchema"),
        "UserSchema = z.object({ id: z.number() })",
    );
    b.unresolved(schema_var, "z", IdentRole::Value)
        .unresolved(schema_var, "object", IdentRole::Member)
        .unresolved(schema_var, "z", IdentRole::Value)
        .unresolved(schema_var, "number", IdentRole::Member);
    b.import(models, ImportStatement::named("zod", &["z"]));
    b.export(schema);

    let api = b.module("src/api.ts");
    b.import(api, ImportStatement::named("@models/user", &["UserSchema"]));
    let parse = b.declare(
        api,
        DeclKind::Function,
        Some("parseUser"),
        "export function parseUser(raw: unknown) { return UserSchema.parse(raw); }",
    );
    let raw = b.nested(parse, DeclKind::Parameter, Some("raw"), "raw: unknown");
    let schema_alias = b.alias("UserSchema", b.symbol_of(schema_var).unwrap());
    let raw_symbol = b.symbol_of(raw).unwrap();
    b.reference(parse, "UserSchema", IdentRole::Value, schema_alias)
        .unresolved(parse, "parse", IdentRole::Member)
        .reference(parse, "raw", IdentRole::Value, raw_symbol);
    b.export(parse);
    b.build().unwrap()
}

#[test]
fn test_detected_context_drives_extraction() {
    let dir = tempfile::tempdir().unwrap();
    node_project(dir.path());

    let context = ProjectDetector::new(dir.path()).detect().unwrap();
    assert_eq!(context.runtime, Runtime::Node);
    assert_eq!(context.package_manager, PackageManager::Pnpm);
    assert_eq!(context.module_type, ModuleType::Module);
    assert!(context.is_path_alias("@models/user"));

    let db = api_project();
    let extraction = Extractor::new(&db, &context)
        .run(&RootRequest::single("src/api.ts", "parseUser"))
        .unwrap();

    let api = extraction.module("src/api.ts").unwrap();
    assert_eq!(api.imports, vec!["import { UserSchema } from './models/user';"]);
    let models = extraction.module("src/models/user.ts").unwrap();
    assert_eq!(models.imports, vec!["import { z } from 'zod';"]);

    let zod = extraction.dependencies.get("zod").unwrap();
    assert_eq!(zod.version.as_deref(), Some("^3.22.0"));
    assert_eq!(extraction.dependencies.len(), 1);

    let manifest = extraction.manifest.as_ref().unwrap();
    let value: serde_json::Value = serde_json::from_str(&manifest.contents).unwrap();
    assert_eq!(value["type"], "module");
    assert_eq!(value["dependencies"]["zod"], "^3.22.0");
}

#[test]
fn test_sample_project_snapshot_slices_identically() {
    let p = sample_project();
    let snapshot = ProjectDatabase::from_json(&p.db.to_json().unwrap()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "tsconfig.json", "{}");
    let context = ProjectDetector::new(dir.path()).detect().unwrap();
    assert_eq!(context.runtime, Runtime::Unknown);

    let request = RootRequest::single(MAIN, "mainFunction");
    let original = Extractor::new(&p.db, &context).run(&request).unwrap();
    let restored = Extractor::new(&snapshot, &context).run(&request).unwrap();
    assert_eq!(original.modules, restored.modules);
    assert_eq!(original.slice.modules, restored.slice.modules);
}
