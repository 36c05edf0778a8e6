#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    dir
}

#[test]
fn test_missing_root_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ProjectDetector::new(dir.path().join("nope")).detect().unwrap_err();
    assert!(matches!(err, SliceError::Configuration { .. }));
}

#[test]
fn test_no_configuration_at_all() {
    let dir = project(&[("src/main.ts", "export const x = 1;")]);
    let detector = ProjectDetector::new(dir.path().join("src"));
    // The walk up may find a tsconfig above the temp dir on some machines.
    if detector.find_tsconfig().is_none() {
        assert!(matches!(
            detector.detect(),
            Err(SliceError::Configuration { .. })
        ));
    }
}

#[rstest]
#[case(&[("package.json", "{}")], Runtime::Node)]
#[case(&[("deno.json", "{}")], Runtime::Deno)]
#[case(&[("deno.jsonc", "// c\n{}"), ("package.json", "{}")], Runtime::Deno)]
#[case(&[("bun.lockb", ""), ("tsconfig.json", "{}")], Runtime::Bun)]
#[case(&[("tsconfig.json", "{}")], Runtime::Unknown)]
fn test_runtime_detection(#[case] files: &[(&str, &str)], #[case] expected: Runtime) {
    let dir = project(files);
    let context = ProjectDetector::new(dir.path()).detect().unwrap();
    assert_eq!(context.runtime, expected);
}

#[rstest]
#[case(&[("package.json", "{}"), ("yarn.lock", "")], PackageManager::Yarn)]
#[case(&[("package.json", "{}"), ("pnpm-lock.yaml", "")], PackageManager::Pnpm)]
#[case(&[("package.json", "{}"), ("bun.lockb", "")], PackageManager::Bun)]
#[case(&[("package.json", "{}")], PackageManager::Npm)]
#[case(&[("deno.json", "{}"), ("yarn.lock", "")], PackageManager::None)]
fn test_package_manager_detection(
    #[case] files: &[(&str, &str)],
    #[case] expected: PackageManager,
) {
    let dir = project(files);
    let context = ProjectDetector::new(dir.path()).detect().unwrap();
    assert_eq!(context.package_manager, expected);
}

#[test]
fn test_package_json_dependencies_and_type() {
    let dir = project(&[(
        "package.json",
        r#"{
            "type": "module",
            "dependencies": { "lodash": "^4.17.21", "bad": 3 },
            "devDependencies": { "vitest": "^1.0.0" }
        }"#,
    )]);
    let context = ProjectDetector::new(dir.path()).detect().unwrap();
    assert_eq!(context.module_type, ModuleType::Module);
    assert_eq!(context.version_of("lodash"), Some("^4.17.21"));
    assert_eq!(context.version_of("bad"), None);
    assert!(context.is_dev_dependency("vitest"));
    assert_eq!(context.manifest_path, Some(dir.path().join("package.json")));
}

#[test]
fn test_broken_package_json_only_warns() {
    let dir = project(&[("package.json", "{ not json")]);
    let context = ProjectDetector::new(dir.path()).detect().unwrap();
    assert_eq!(context.runtime, Runtime::Node);
    assert!(context.dependencies.is_empty());
}

#[test]
fn test_broken_tsconfig_is_fatal() {
    let dir = project(&[("package.json", "{}"), ("tsconfig.json", "{ \"compilerOptions\": ")]);
    let err = ProjectDetector::new(dir.path()).detect().unwrap_err();
    assert!(matches!(err, SliceError::Configuration { .. }));
}

#[test]
fn test_tsconfig_paths_become_aliases() {
    let dir = project(&[
        ("package.json", "{}"),
        (
            "tsconfig.json",
            r#"{
                // JSONC
                "compilerOptions": {
                    "baseUrl": ".",
                    "strict": true,
                    "paths": { "@/*": ["src/*"], "~utils": ["src/utils/index.ts"], },
                },
            }"#,
        ),
    ]);
    let context = ProjectDetector::new(dir.path()).detect().unwrap();
    assert_eq!(context.path_aliases.get("@"), Some(&PathBuf::from("src")));
    assert_eq!(
        context.path_aliases.get("~utils"),
        Some(&PathBuf::from("src/utils/index.ts"))
    );
    assert_eq!(context.compiler_options["strict"], true);
}

#[test]
fn test_tsconfig_found_in_ancestor() {
    let dir = project(&[
        ("tsconfig.json", r#"{ "compilerOptions": { "paths": { "@/*": ["app/src/*"] } } }"#),
        ("app/package.json", "{}"),
    ]);
    let context = ProjectDetector::new(dir.path().join("app")).detect().unwrap();
    assert_eq!(context.tsconfig_path, Some(dir.path().join("tsconfig.json")));
    assert_eq!(context.path_aliases.get("@"), Some(&PathBuf::from("src")));
}

#[test]
fn test_referenced_projects_merge_with_root_priority() {
    let dir = project(&[
        ("package.json", "{}"),
        (
            "tsconfig.json",
            r#"{
                "compilerOptions": { "target": "es2022", "paths": { "@/*": ["src/*"] } },
                "references": [{ "path": "./packages/core" }]
            }"#,
        ),
        (
            "packages/core/tsconfig.json",
            r#"{
                "compilerOptions": {
                    "target": "es5",
                    "module": "esnext",
                    "paths": { "@/*": ["lib/*"], "@core/*": ["src/*"] }
                }
            }"#,
        ),
    ]);
    let context = ProjectDetector::new(dir.path()).detect().unwrap();
    assert_eq!(context.path_aliases.get("@"), Some(&PathBuf::from("src")));
    assert_eq!(
        context.path_aliases.get("@core"),
        Some(&PathBuf::from("packages/core/src"))
    );
    assert_eq!(context.compiler_options["target"], "es2022");
    assert_eq!(context.compiler_options["module"], "esnext");
}

#[test]
fn test_deno_import_map() {
    let dir = project(&[(
        "deno.jsonc",
        r#"{
            "imports": {
                "chalk": "npm:chalk@5.3.0",
                "@scope/pkg": "npm:@scope/pkg",
                "@/": "./src/",
                "oak": "https://deno.land/x/oak/mod.ts"
            },
            "compilerOptions": { "strict": true }
        }"#,
    )]);
    let context = ProjectDetector::new(dir.path()).detect().unwrap();
    assert_eq!(context.version_of("chalk"), Some("5.3.0"));
    assert_eq!(context.version_of("@scope/pkg"), Some("latest"));
    assert_eq!(context.path_aliases.get("@"), Some(&PathBuf::from("src")));
    assert_eq!(context.compiler_options["strict"], true);
    assert_eq!(context.package_manager, PackageManager::None);
}

#[test]
fn test_broken_deno_config_is_fatal() {
    let dir = project(&[("deno.json", "{ imports: }")]);
    assert!(matches!(
        ProjectDetector::new(dir.path()).detect(),
        Err(SliceError::Configuration { .. })
    ));
}

#[rstest]
#[case("npm:chalk@5.3.0", Some(("chalk", "5.3.0")))]
#[case("npm:chalk", Some(("chalk", "latest")))]
#[case("npm:@scope/pkg@1.0.0", Some(("@scope/pkg", "1.0.0")))]
#[case("jsr:@std/path", None)]
fn test_parse_npm_specifier(#[case] specifier: &str, #[case] expected: Option<(&str, &str)>) {
    let parsed = parse_npm_specifier(specifier);
    let parsed = parsed.as_ref().map(|(n, v)| (n.as_str(), v.as_str()));
    assert_eq!(parsed, expected);
}
