//! Hand-written method detection and the append-only resolution cache.

use deepequal_core::{GenError, GenResult, Kind, Shape, TypeId, Universe};
use std::collections::BTreeMap;
use tracing::debug;

/// Method name emitted and delegated to
pub const DEEP_EQUAL: &str = "DeepEqual";

/// Method name preferred for non-pure struct members
pub const EQUAL: &str = "Equal";

/// How a `DeepEqual` method receives its subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    Value,
    Pointer,
}

/// A qualifying `DeepEqual(other *T) bool` method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeepEqualMethod {
    pub receiver: Receiver,
    /// Recorded by the generator rather than declared in source
    pub synthetic: bool,
}

impl DeepEqualMethod {
    /// The descriptor recorded for a generated method
    pub fn generated() -> Self {
        Self {
            receiver: Receiver::Pointer,
            synthetic: true,
        }
    }
}

/// A qualifying `Equal` method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EqualMethod {
    /// `Equal(*T)` rather than `Equal(T)`
    pub pointer_param: bool,
}

fn is_bool(universe: &Universe, id: TypeId) -> bool {
    let ty = universe.get(id);
    ty.kind() == Kind::Primitive && ty.name.package.is_empty() && ty.name.name == "bool"
}

fn is_pointer_to(universe: &Universe, id: TypeId, target: TypeId) -> bool {
    matches!(universe.get(id).shape, Shape::Pointer(elem) if elem == target)
}

/// Look up a declared `DeepEqual` method on `id`.
///
/// A method with that name must take exactly one `*T` and return exactly one
/// `bool`, with receiver `T` or `*T`; anything else is fatal.
pub fn deep_equal_method(universe: &Universe, id: TypeId) -> GenResult<Option<DeepEqualMethod>> {
    let ty = universe.get(id);
    let Some(signature) = ty.methods.get(DEEP_EQUAL) else {
        return Ok(None);
    };

    let invalid = |reason: String| GenError::InvalidSignature {
        type_name: ty.name.to_string(),
        method: DEEP_EQUAL.to_string(),
        reason,
    };

    if signature.parameters.len() != 1 || signature.results.len() != 1 {
        return Err(invalid(format!(
            "should take 1 param and return 1 result, got {} params and {} results",
            signature.parameters.len(),
            signature.results.len()
        )));
    }
    let receiver = match signature.receiver {
        Some(r) if r == id => Receiver::Value,
        Some(r) if is_pointer_to(universe, r, id) => Receiver::Pointer,
        _ => {
            return Err(invalid(format!(
                "receiver should be {name} or *{name}",
                name = ty.name
            )));
        }
    };
    if !is_pointer_to(universe, signature.parameters[0], id) {
        return Err(invalid(format!(
            "param should be *{}, got {}",
            ty.name,
            universe.type_name(signature.parameters[0])
        )));
    }
    if !is_bool(universe, signature.results[0]) {
        return Err(invalid(format!(
            "result should be bool, got {}",
            universe.type_name(signature.results[0])
        )));
    }

    Ok(Some(DeepEqualMethod {
        receiver,
        synthetic: false,
    }))
}

/// Look up a qualifying `Equal(T) bool` or `Equal(*T) bool` method.
///
/// A method named `Equal` with any other signature is fatal.
pub fn equal_method(universe: &Universe, id: TypeId) -> GenResult<Option<EqualMethod>> {
    let ty = universe.get(id);
    let Some(signature) = ty.methods.get(EQUAL) else {
        return Ok(None);
    };

    let invalid = |reason: String| GenError::InvalidSignature {
        type_name: ty.name.to_string(),
        method: EQUAL.to_string(),
        reason,
    };

    if signature.parameters.len() != 1 || signature.results.len() != 1 {
        return Err(invalid(format!(
            "should take 1 param and return 1 result, got {} params and {} results",
            signature.parameters.len(),
            signature.results.len()
        )));
    }
    if !is_bool(universe, signature.results[0]) {
        return Err(invalid(format!(
            "result should be bool, got {}",
            universe.type_name(signature.results[0])
        )));
    }
    let param = signature.parameters[0];
    let pointer_param = if param == id {
        false
    } else if is_pointer_to(universe, param, id) {
        true
    } else {
        return Err(invalid(format!(
            "param should be {name} or *{name}, got {}",
            universe.type_name(param),
            name = ty.name
        )));
    };
    debug!(type_name = %ty.name, pointer_param, "found Equal method");

    Ok(Some(EqualMethod { pointer_param }))
}

/// Synthetic `DeepEqual` descriptors recorded as methods are generated.
///
/// The cache only grows. It is consulted before the declared method set, so
/// types processed later delegate to methods generated earlier in the run.
#[derive(Debug, Default)]
pub struct MethodCache {
    entries: BTreeMap<TypeId, DeepEqualMethod>,
}

impl MethodCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a method; returns false when one was already recorded
    pub fn record(&mut self, id: TypeId, method: DeepEqualMethod) -> bool {
        match self.entries.entry(id) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(method);
                true
            }
        }
    }

    pub fn get(&self, id: TypeId) -> Option<DeepEqualMethod> {
        self.entries.get(&id).copied()
    }

    pub fn contains(&self, id: TypeId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached method first, then the declared method set
    pub fn deep_equal(&self, universe: &Universe, id: TypeId) -> GenResult<Option<DeepEqualMethod>> {
        match self.get(id) {
            Some(method) => Ok(Some(method)),
            None => deep_equal_method(universe, id),
        }
    }
}
