//! Promotion of members that live outside a class or interface body.

use crate::helpers::slice_assertions::*;
use rstest::rstest;
use slicer::hir::{DeclKind, IdentRole};
use slicer::slice::Slicer;
use slicer::{DeclId, ModuleId, ProjectBuilder, ProjectDatabase, RootRequest, SemanticModel};

const SHAPES: &str = "src/shapes.ts";

struct Shape {
    db: ProjectDatabase,
    module: ModuleId,
    /// Container the member must be promoted into.
    container: DeclId,
    main: DeclId,
    member_text: &'static str,
}

/// `make(): { id: number }` used as `make().id`.
fn return_type_member() -> Shape {
    let mut b = ProjectBuilder::new();
    let module = b.module(SHAPES);
    let make = b.declare(
        module,
        DeclKind::Function,
        Some("make"),
        "export function make(): { id: number } { return { id: 1 }; }",
    );
    let id = b.nested(make, DeclKind::PropertySignature, Some("id"), "id: number");
    let main = b.declare(
        module,
        DeclKind::Function,
        Some("main"),
        "export function main() { return make().id; }",
    );
    let (make_symbol, id_symbol) = (b.symbol_of(make).unwrap(), b.symbol_of(id).unwrap());
    b.reference(main, "make", IdentRole::Value, make_symbol)
        .reference(main, "id", IdentRole::Member, id_symbol);
    b.export(make).export(main);
    Shape {
        db: b.build().unwrap(),
        module,
        container: make,
        main,
        member_text: "id: number",
    }
}

/// `const config = { port: 1 }` used as `config.port`.
fn object_literal_property() -> Shape {
    let mut b = ProjectBuilder::new();
    let module = b.module(SHAPES);
    let group = b.declare(module, DeclKind::VariableGroup, None, "const config = { port: 1 };");
    let config = b.nested(group, DeclKind::Variable, Some("config"), "config = { port: 1 }");
    let port = b.nested(config, DeclKind::Property, Some("port"), "port: 1");
    let main = b.declare(
        module,
        DeclKind::Function,
        Some("main"),
        "export function main() { return config.port; }",
    );
    let (config_symbol, port_symbol) = (b.symbol_of(config).unwrap(), b.symbol_of(port).unwrap());
    b.reference(main, "config", IdentRole::Value, config_symbol)
        .reference(main, "port", IdentRole::Member, port_symbol);
    b.export(main);
    Shape {
        db: b.build().unwrap(),
        module,
        container: group,
        main,
        member_text: "port: 1",
    }
}

/// `handle(opts: { verbose: boolean })` used as `handle({ verbose }).verbose`.
fn parameter_type_member() -> Shape {
    let mut b = ProjectBuilder::new();
    let module = b.module(SHAPES);
    let handle = b.declare(
        module,
        DeclKind::Function,
        Some("handle"),
        "export function handle(opts: { verbose: boolean }) { return opts; }",
    );
    let opts = b.nested(handle, DeclKind::Parameter, Some("opts"), "opts: { verbose: boolean }");
    let verbose = b.nested(opts, DeclKind::PropertySignature, Some("verbose"), "verbose: boolean");
    let main = b.declare(
        module,
        DeclKind::Function,
        Some("main"),
        "export function main() { return handle(flags).verbose; }",
    );
    let (handle_symbol, verbose_symbol) =
        (b.symbol_of(handle).unwrap(), b.symbol_of(verbose).unwrap());
    b.reference(main, "handle", IdentRole::Value, handle_symbol)
        .reference(main, "verbose", IdentRole::Member, verbose_symbol);
    b.export(handle).export(main);
    Shape {
        db: b.build().unwrap(),
        module,
        container: handle,
        main,
        member_text: "verbose: boolean",
    }
}

#[rstest]
#[case::return_type(return_type_member())]
#[case::object_literal(object_literal_property())]
#[case::parameter_type(parameter_type_member())]
fn test_members_promote_to_their_enclosing_declaration(#[case] shape: Shape) {
    let result = Slicer::new(&shape.db)
        .slice(&RootRequest::single(SHAPES, "main"))
        .unwrap();

    assert_eq!(sliced(&result, shape.module), &[shape.container, shape.main]);
    for &decl in sliced(&result, shape.module) {
        assert!(shape.db.declaration(decl).is_top_level());
    }
    assert_eq!(result.render(&shape.db).matches(shape.member_text).count(), 1);
}

#[rstest]
#[case::return_type(return_type_member())]
#[case::object_literal(object_literal_property())]
#[case::parameter_type(parameter_type_member())]
fn test_member_alone_slices_like_its_container(#[case] shape: Shape) {
    let slicer = Slicer::new(&shape.db);
    let member = shape
        .db
        .declarations()
        .find(|(_, decl)| decl.text == shape.member_text)
        .map(|(id, _)| id)
        .unwrap();
    assert_eq!(slicer.promote(member), shape.container);
    assert_eq!(
        slicer.slice_from(&[member]).declarations(shape.module),
        slicer.slice_from(&[shape.container]).declarations(shape.module)
    );
}
