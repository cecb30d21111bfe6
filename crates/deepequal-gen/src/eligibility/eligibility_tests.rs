#![allow(non_snake_case)]

use super::*;
use deepequal_core::{DeclarationFile, GeneratorConfig, Name, Universe};
use test_case::test_case;

const PKG: &str = "example.com/shapes";

fn universe(package_comments: &str, types: &str) -> Universe {
    let json = format!(
        r#"{{ "packages": [ {{ "path": "{PKG}", "comments": [{package_comments}], "types": [{types}] }} ] }}"#
    );
    DeclarationFile::from_json(&json)
        .unwrap()
        .into_universe()
        .unwrap()
}

fn id(universe: &Universe, name: &str) -> TypeId {
    universe.lookup(&Name::new(PKG, name)).unwrap()
}

// ============================================================================
// Structural gate
// ============================================================================

#[test_case(r#"{ "name": "Box", "kind": "struct" }"#, "Box", true ; "exported struct")]
#[test_case(r#"{ "name": "box", "kind": "struct" }"#, "box", false ; "unexported struct")]
#[test_case(r#"{ "name": "Tag", "kind": "alias", "underlying": "string" }"#, "Tag", true ; "alias of primitive")]
#[test_case(r#"{ "name": "Tags", "kind": "alias", "underlying": "[]string" }"#, "Tags", true ; "alias of slice")]
#[test_case(r#"{ "name": "Index", "kind": "alias", "underlying": "map[string]int" }"#, "Index", true ; "alias of map")]
#[test_case(r#"{ "name": "Ref", "kind": "alias", "underlying": "*int" }"#, "Ref", false ; "alias of pointer")]
#[test_case(r#"{ "name": "Any", "kind": "alias", "underlying": "interface{}" }"#, "Any", false ; "alias of interface")]
#[test_case(r#"{ "name": "Shape", "kind": "interface" }"#, "Shape", false ; "interface")]
#[test_case(r#"{ "name": "Hook", "kind": "func" }"#, "Hook", false ; "func")]
fn comparable_type___shapes(decl: &str, name: &str, expected: bool) {
    let universe = universe("", decl);

    assert_eq!(comparable_type(&universe, id(&universe, name)).unwrap(), expected);
}

#[test]
fn comparable_type___alias_of_alias___recurses_on_shape() {
    let universe = universe(
        "",
        r#"{ "name": "Ref", "kind": "alias", "underlying": "*int" },
           { "name": "Ref2", "kind": "alias", "underlying": "Ref" },
           { "name": "Tag", "kind": "alias", "underlying": "string" },
           { "name": "Tag2", "kind": "alias", "underlying": "Tag" }"#,
    );

    assert!(!comparable_type(&universe, id(&universe, "Ref2")).unwrap());
    assert!(comparable_type(&universe, id(&universe, "Tag2")).unwrap());
}

#[test]
fn comparable_type___alias_of_pointer_with_deep_equal___eligible() {
    let universe = universe(
        "",
        r#"{ "name": "Ref", "kind": "alias", "underlying": "*int",
             "methods": [ { "name": "DeepEqual", "receiver": "*Ref", "params": ["*Ref"], "results": ["bool"] } ] }"#,
    );

    assert!(comparable_type(&universe, id(&universe, "Ref")).unwrap());
}

#[test]
fn comparable_type___opted_out___not_eligible() {
    let universe = universe(
        "",
        r#"{ "name": "Box", "kind": "struct", "comments": ["+deepequal-gen=false"] }"#,
    );

    assert!(!comparable_type(&universe, id(&universe, "Box")).unwrap());
}

// ============================================================================
// Directive gate
// ============================================================================

#[test_case(true, None, true ; "package mode without tag")]
#[test_case(true, Some("false"), false ; "package mode opt out")]
#[test_case(true, Some("true"), true ; "package mode explicit true")]
#[test_case(false, None, false ; "opt in mode without tag")]
#[test_case(false, Some("true"), true ; "opt in mode explicit true")]
#[test_case(false, Some("false"), false ; "opt in mode explicit false")]
fn needs_generation___modes(all_types: bool, tag: Option<&str>, expected: bool) {
    let comments = tag
        .map(|v| format!(r#""+deepequal-gen={v}""#))
        .unwrap_or_default();
    let decl = format!(r#"{{ "name": "Box", "kind": "struct", "comments": [{comments}] }}"#);
    let universe = universe("", &decl);

    assert_eq!(
        needs_generation(&universe, id(&universe, "Box"), all_types).unwrap(),
        expected
    );
}

#[test]
fn needs_generation___invalid_value___fails() {
    let universe = universe(
        "",
        r#"{ "name": "Box", "kind": "struct", "comments": ["+deepequal-gen=yes"] }"#,
    );

    let err = needs_generation(&universe, id(&universe, "Box"), true).unwrap_err();

    assert_eq!(err.exit_code(), 2);
}

#[test]
fn selects_type___explicit_request_for_interface___is_fatal() {
    let universe = universe(
        "",
        r#"{ "name": "Shape", "kind": "interface", "comments": ["+deepequal-gen=true"] }"#,
    );

    let err = selects_type(&universe, id(&universe, "Shape"), false).unwrap_err();

    assert!(matches!(err, GenError::IneligibleTarget(_)));
}

#[test]
fn selects_type___package_mode_interface___silently_skipped() {
    let universe = universe(r#""+deepequal-gen=package""#, r#"{ "name": "Shape", "kind": "interface" }"#);

    assert!(!selects_type(&universe, id(&universe, "Shape"), true).unwrap());
}

// ============================================================================
// Package selection
// ============================================================================

#[test]
fn select_package___package_directive___selects_all_types() {
    let universe = universe(r#""+deepequal-gen=package,register""#, r#"{ "name": "Box", "kind": "struct" }"#);

    let selection = select_package(&universe, &universe.packages()[0])
        .unwrap()
        .unwrap();

    assert!(selection.all_types);
    assert!(selection.register);
    assert_eq!(selection.path, PKG);
}

#[test]
fn select_package___no_directives___not_selected() {
    let universe = universe("", r#"{ "name": "Box", "kind": "struct" }"#);

    assert_eq!(select_package(&universe, &universe.packages()[0]).unwrap(), None);
}

#[test]
fn select_package___type_opt_in___selects_package() {
    let universe = universe(
        "",
        r#"{ "name": "Box", "kind": "struct" },
           { "name": "Crate", "kind": "struct", "comments": ["+deepequal-gen=true"] }"#,
    );

    let selection = select_package(&universe, &universe.packages()[0])
        .unwrap()
        .unwrap();

    assert!(!selection.all_types);
}

#[test]
fn select_package___wrong_package_value___fails() {
    let universe = universe(r#""+deepequal-gen=true""#, r#"{ "name": "Box", "kind": "struct" }"#);

    let err = select_package(&universe, &universe.packages()[0]).unwrap_err();

    assert!(matches!(err, GenError::UnsupportedDirectiveValue { .. }));
}

#[test]
fn select_package___opt_in_non_comparable___fails() {
    let universe = universe(
        "",
        r#"{ "name": "Ref", "kind": "alias", "underlying": "*int", "comments": ["+deepequal-gen=true"] }"#,
    );

    let err = select_package(&universe, &universe.packages()[0]).unwrap_err();

    assert!(matches!(err, GenError::IneligibleTarget(name) if name == "example.com/shapes.Ref"));
}

#[test]
fn select_packages___bounding_dirs___filter_packages() {
    let universe = universe(r#""+deepequal-gen=package""#, r#"{ "name": "Box", "kind": "struct" }"#);
    let bounded = GeneratorConfig {
        bounding_dirs: vec!["example.com/other".into()],
        ..GeneratorConfig::default()
    };

    assert_eq!(select_packages(&universe, &GeneratorConfig::default()).unwrap().len(), 1);
    assert!(select_packages(&universe, &bounded).unwrap().is_empty());
}
