#![allow(non_snake_case)]

use super::*;
use deepequal_core::{Member, Shape, Universe};

#[test]
fn underlying___alias_chain___resolves_to_final_type() {
    let mut universe = Universe::new();
    let string = universe.builtin("string");
    let tag = universe.declare("a", "Tag", Shape::Alias(string)).unwrap();
    let label = universe.declare("a", "Label", Shape::Alias(tag)).unwrap();

    assert_eq!(underlying(&universe, label), string);
    assert!(is_primitive(&universe, label));
}

#[test]
fn underlying___non_alias___is_identity() {
    let mut universe = Universe::new();
    let int = universe.builtin("int");
    let slice = universe.slice_of(int);

    assert_eq!(underlying(&universe, slice), slice);
    assert_eq!(underlying_kind(&universe, slice), Kind::Slice);
}

#[test]
fn is_pure_value___nested_primitive_structs___true() {
    let mut universe = Universe::new();
    let int = universe.builtin("int");
    let string = universe.builtin("string");
    let inner = universe
        .declare("a", "Inner", Shape::Struct(vec![Member::new("N", int)]))
        .unwrap();
    let outer = universe
        .declare(
            "a",
            "Outer",
            Shape::Struct(vec![Member::new("S", string), Member::new("In", inner)]),
        )
        .unwrap();

    assert!(is_pure_value(&universe, outer));
}

#[test]
fn is_pure_value___pointer_member___false() {
    let mut universe = Universe::new();
    let int = universe.builtin("int");
    let ptr = universe.pointer_to(int);
    let t = universe
        .declare("a", "T", Shape::Struct(vec![Member::new("P", ptr)]))
        .unwrap();

    assert!(!is_pure_value(&universe, t));
}

#[test]
fn is_pure_value___slice_member_deep_inside___false() {
    let mut universe = Universe::new();
    let int = universe.builtin("int");
    let ints = universe.slice_of(int);
    let inner = universe
        .declare("a", "Inner", Shape::Struct(vec![Member::new("Xs", ints)]))
        .unwrap();
    let outer = universe
        .declare("a", "Outer", Shape::Struct(vec![Member::new("In", inner)]))
        .unwrap();

    assert!(!is_pure_value(&universe, outer));
}

#[test]
fn is_declared___distinguishes_named_types() {
    let mut universe = Universe::new();
    let int = universe.builtin("int");
    let ints = universe.slice_of(int);
    let list = universe.declare("a", "List", Shape::Alias(ints)).unwrap();

    assert!(is_declared(&universe, list));
    assert!(!is_declared(&universe, ints));
    assert!(!is_declared(&universe, int));
}
