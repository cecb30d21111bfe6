//! Shape classification helpers shared by the eligibility filter and the
//! emitter.

use deepequal_core::{Kind, Shape, TypeId, Universe};
use std::collections::HashSet;

/// Follow alias links to the first non-alias type
pub fn underlying(universe: &Universe, id: TypeId) -> TypeId {
    let mut current = id;
    let mut seen = HashSet::new();
    while let Shape::Alias(target) = universe.get(current).shape {
        if !seen.insert(current) {
            break;
        }
        current = target;
    }
    current
}

/// Kind of the fully resolved type
pub fn underlying_kind(universe: &Universe, id: TypeId) -> Kind {
    universe.get(underlying(universe, id)).kind()
}

/// Whether ordinary `==` suffices after alias resolution
pub fn is_primitive(universe: &Universe, id: TypeId) -> bool {
    underlying_kind(universe, id) == Kind::Primitive
}

/// Whether a type is a named declaration (struct or alias) that can carry
/// methods
pub fn is_declared(universe: &Universe, id: TypeId) -> bool {
    matches!(universe.get(id).kind(), Kind::Struct | Kind::Alias)
}

/// Whether a struct is a pure value: every member, transitively, is
/// primitive or another pure-value struct. Such structs compare with `!=`.
pub fn is_pure_value(universe: &Universe, id: TypeId) -> bool {
    is_pure_value_inner(universe, id, &mut HashSet::new())
}

fn is_pure_value_inner(universe: &Universe, id: TypeId, visiting: &mut HashSet<TypeId>) -> bool {
    let ut = underlying(universe, id);
    match &universe.get(ut).shape {
        Shape::Primitive => true,
        Shape::Struct(members) => {
            // Self-reference can only go through a pointer, slice or map,
            // none of which is a value member; treat a cycle as impure.
            if !visiting.insert(ut) {
                return false;
            }
            let pure = members
                .iter()
                .all(|m| is_pure_value_inner(universe, m.ty, visiting));
            visiting.remove(&ut);
            pure
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "shape/shape_tests.rs"]
mod shape_tests;
