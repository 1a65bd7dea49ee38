use indoc::indoc;

use super::*;
use crate::ErrorKind;

fn resolve_err(label: &str, source: &str) -> crate::Error {
    match Interface::from_wit(label, source) {
        Ok(interface) => panic!("expected an error, got {interface:#?}"),
        Err(err) => err,
    }
}

#[test]
fn label_determines_name_and_direction() {
    let interface = Interface::from_wit("dir/calc.exports.wit", "").unwrap();
    assert_eq!(interface.name(), "calc");
    assert_eq!(interface.direction(), Direction::Exports);
    assert!(interface.is_empty());

    let interface = Interface::from_wit("host.imports.wit", "").unwrap();
    assert_eq!(interface.name(), "host");
    assert_eq!(interface.direction(), Direction::Imports);

    assert_eq!(interface_name(r"C:\wit\calc.wit"), ("calc", Direction::Exports));
}

#[test]
fn resolves_types_and_functions() {
    let source = indoc! {r#"
        /// A 2D point.
        record point { x: float64, y: float64 }
        type path = list<point>
        enum unit { metres, feet }

        /// Total length of a path.
        length: func(p: path, u: unit) -> float64
    "#};
    let interface = Interface::from_wit("geometry.wit", source).unwrap();

    let names: Vec<_> = interface.types().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["point", "path", "unit"]);
    assert_eq!(
        interface.get_type("point").unwrap().docs.as_deref(),
        Some("A 2D point.")
    );

    let [length] = interface.functions() else {
        panic!("expected one function");
    };
    assert_eq!(length.kind, FunctionKind::Freestanding);
    assert_eq!(length.params[0].ty, Type::Named("path".into()));
    assert_eq!(length.result, Some(Type::Float64));
    assert_eq!(
        interface.get_type("path").unwrap().kind,
        TypeDefKind::Alias(Type::List(Box::new(Type::Named("point".into()))))
    );
}

#[test]
fn forward_references_resolve() {
    let source = indoc! {r#"
        make: func() -> later
        record later { inner: inner-type }
        type inner-type = u8
    "#};
    assert!(Interface::from_wit("fwd.wit", source).is_ok());
}

#[test]
fn resources_become_handles() {
    let source = indoc! {r#"
        resource counter {
            static new: func(start: u32) -> counter
            increment: func()
            value: func() -> u32
        }
    "#};
    let interface = Interface::from_wit("counter.wit", source).unwrap();
    let resources: Vec<_> = interface.resources().collect();
    assert_eq!(resources.len(), 1);
    let (def, methods) = resources[0];
    assert_eq!(def.name, "counter");
    assert_eq!(
        methods[0].kind,
        FunctionKind::Static {
            resource: "counter".into()
        }
    );
    assert_eq!(methods[0].result, Some(Type::Handle("counter".into())));
    assert_eq!(methods[1].core_export_name(), "counter::increment");
}

#[test]
fn expected_with_units() {
    let interface = Interface::from_wit("e.wit", "f: func() -> expected<_, string>").unwrap();
    let result = interface.functions()[0].result.as_ref().unwrap();
    assert_eq!(result, &Type::Expected(None, Some(Box::new(Type::String))));
}

#[test]
fn parse_error_names_label() {
    let err = resolve_err("broken.wit", "record p { x: }");
    assert_eq!(err.kind(), ErrorKind::ParseError);
    assert!(err.verbose().starts_with("failed to parse \"broken.wit\""));
    assert!(err.verbose().contains("broken.wit:1:15"), "{}", err.verbose());
}

#[test]
fn undefined_type() {
    let err = resolve_err("u.wit", "f: func(x: missing)");
    assert_eq!(err.kind(), ErrorKind::ResolutionError);
    insta::assert_snapshot!(err.verbose().lines().take(2).collect::<Vec<_>>().join("\n"), @r#"
    failed to resolve "u.wit"
    u.wit:1:12: `missing` is not defined
    "#);
}

#[test]
fn duplicate_type() {
    let err = resolve_err("d.wit", "enum a { x }\nrecord a { y: u8 }");
    assert_eq!(err.kind(), ErrorKind::ResolutionError);
    assert!(err.verbose().contains("d.wit:2:8: `a` is already defined"), "{}", err.verbose());
    assert!(err.verbose().contains("first defined here (d.wit:1:6)"), "{}", err.verbose());
}

#[test]
fn duplicate_function() {
    let err = resolve_err("d.wit", "f: func()\nf: func(x: u8)");
    assert!(err.verbose().contains("function `f` is already defined"), "{}", err.verbose());
}

#[test]
fn duplicate_members() {
    let err = resolve_err("d.wit", "record r { a: u8, a: u16 }");
    assert!(err.verbose().contains("duplicate member: field `a`"), "{}", err.verbose());

    let err = resolve_err("d.wit", "flags f { read, read }");
    assert!(err.verbose().contains("duplicate member: case `read`"), "{}", err.verbose());

    let err = resolve_err("d.wit", "f: func(a: u8, a: u8)");
    assert!(err.verbose().contains("parameter `a` is already declared"), "{}", err.verbose());
}

#[test]
fn duplicate_resource_method() {
    let err = resolve_err("d.wit", "resource r { m: func()\nm: func() }");
    assert!(err.verbose().contains("function `r::m` is already defined"), "{}", err.verbose());
}

#[test]
fn recursive_types() {
    let err = resolve_err("r.wit", "record node { next: option<node> }");
    assert!(err.verbose().contains("type `node` refers to itself"), "{}", err.verbose());

    let source = "record a { b: b }\nvariant b { a(a), none }";
    let err = resolve_err("r.wit", source);
    assert!(err.verbose().contains("type `a` refers to itself"));
    assert!(err.verbose().contains("type `b` refers to itself"));
}

#[test]
fn resource_methods_may_mention_their_resource() {
    let source = "resource tree { children: func() -> list<tree> }";
    assert!(Interface::from_wit("t.wit", source).is_ok());
}

#[test]
fn unit_outside_expected() {
    let err = resolve_err("u.wit", "f: func(x: list<_>)");
    assert_eq!(err.kind(), ErrorKind::ResolutionError);
    assert!(err.verbose().contains("`_` is not a type here"), "{}", err.verbose());
}

#[test]
fn builtin_shadowing_is_a_resolution_error() {
    let err = resolve_err("s.wit", "record string { }");
    assert_eq!(err.kind(), ErrorKind::ResolutionError);
    assert!(err.verbose().contains("`string` is a builtin type"));
}

#[test]
fn use_imports_from_dependency() {
    let types = Interface::from_wit(
        "types.wit",
        "record point { x: u8, y: u8 }\ntype polygon = list<point>",
    )
    .unwrap();
    let source = indoc! {r#"
        use { polygon as shape } from types
        area: func(s: shape) -> float32
    "#};
    let interface = Interface::from_wit_with_deps("calc.wit", source, &[types]).unwrap();

    let names: Vec<_> = interface.types().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["point", "shape"]);
    assert_eq!(interface.functions()[0].params[0].ty, Type::Named("shape".into()));
}

#[test]
fn use_of_dependency_already_imported() {
    let types = Interface::from_wit(
        "types.wit",
        "record point { x: u8, y: u8 }\ntype polygon = list<point>",
    )
    .unwrap();
    let source = "use { polygon, point } from types";
    let interface = Interface::from_wit_with_deps("calc.wit", source, &[types]).unwrap();
    assert_eq!(interface.types().count(), 2);
}

#[test]
fn use_unknown_interface() {
    let err = resolve_err("calc.wit", "use { point } from geometry\nf: func(p: point)");
    assert_eq!(err.kind(), ErrorKind::ResolutionError);
    assert!(err.verbose().contains("interface `geometry` was not provided"));
    assert!(!err.verbose().contains("is not defined"));
}

#[test]
fn use_missing_name() {
    let types = Interface::from_wit("types.wit", "enum color { red }").unwrap();
    let err = Interface::from_wit_with_deps("calc.wit", "use { colour } from types", &[types])
        .unwrap_err();
    assert!(
        err.verbose().contains("name not found in interface: `colour` in `types`"),
        "{}",
        err.verbose()
    );
}

#[test]
fn import_conflicts_with_local_definition() {
    let types = Interface::from_wit("types.wit", "enum color { red }").unwrap();
    let source = "use { color } from types\nrecord color { v: u8 }";
    let err = Interface::from_wit_with_deps("calc.wit", source, &[types]).unwrap_err();
    assert!(err.verbose().contains("`color` is already defined"));
}
