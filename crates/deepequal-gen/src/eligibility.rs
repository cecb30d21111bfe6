//! Package and type selection.
//!
//! A type gets a method when it passes two gates: the directive gate (is
//! generation requested, either package-wide or on the type) and the
//! structural gate (can a method be generated for it at all).

use crate::directive::{enabled_package_tag, enabled_type_tag};
use crate::methods::deep_equal_method;
use deepequal_core::{GeneratorConfig, GenError, GenResult, Package, Shape, TypeId, Universe};
use tracing::{debug, trace};

/// Per-package generation decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSelection {
    pub path: String,
    /// Package-wide `+deepequal-gen=package`
    pub all_types: bool,
    /// `register` parameter of the package directive
    pub register: bool,
}

/// Structural gate.
///
/// Unexported types and types opted out with `+deepequal-gen=false` never
/// qualify. Structs always qualify. Aliases qualify when they carry a
/// `DeepEqual` method or when their target shape is one the emitter covers.
pub fn comparable_type(universe: &Universe, id: TypeId) -> GenResult<bool> {
    if let Some(tag) = enabled_type_tag(universe, id)? {
        if tag.is_false() {
            return Ok(false);
        }
    }

    let ty = universe.get(id);
    if !ty.name.is_exported() {
        return Ok(false);
    }

    match ty.shape {
        Shape::Struct(_) => Ok(true),
        Shape::Alias(target) => {
            if deep_equal_method(universe, id)?.is_some() {
                return Ok(true);
            }
            Ok(alias_target_comparable(universe, target))
        }
        _ => Ok(false),
    }
}

fn alias_target_comparable(universe: &Universe, target: TypeId) -> bool {
    match &universe.get(target).shape {
        Shape::Pointer(_) | Shape::Interface | Shape::Func => false,
        Shape::Alias(next) => alias_target_comparable(universe, *next),
        Shape::Primitive | Shape::Struct(_) | Shape::Slice(_) | Shape::Map { .. } => true,
    }
}

/// Directive gate: package-wide mode unless the type opts out, otherwise an
/// explicit `+deepequal-gen=true`.
pub fn needs_generation(universe: &Universe, id: TypeId, all_types: bool) -> GenResult<bool> {
    let tag = enabled_type_tag(universe, id)?;
    Ok(match tag {
        Some(tag) if all_types => !tag.is_false(),
        Some(tag) => tag.is_true(),
        None => all_types,
    })
}

/// Both gates; an explicit request for a non-comparable type is fatal.
pub fn selects_type(universe: &Universe, id: TypeId, all_types: bool) -> GenResult<bool> {
    if !needs_generation(universe, id, all_types)? {
        trace!(type_name = %universe.get(id).name, "type not requested");
        return Ok(false);
    }
    if comparable_type(universe, id)? {
        return Ok(true);
    }

    let explicit = enabled_type_tag(universe, id)?.is_some_and(|tag| tag.is_true());
    if explicit {
        return Err(GenError::IneligibleTarget(universe.type_name(id)));
    }
    debug!(type_name = %universe.get(id).name, kind = %universe.get(id).kind(), "type is not comparable");
    Ok(false)
}

/// Decide whether a package gets an output file.
///
/// Returns `None` when nothing in the package requests generation.
pub fn select_package(universe: &Universe, package: &Package) -> GenResult<Option<PackageSelection>> {
    let tag = enabled_package_tag(&package.comments, &package.path)?;
    let (all_types, register) = match &tag {
        Some(tag) => (true, tag.register),
        None => (false, false),
    };

    let mut wanted = all_types;
    for &id in &package.types {
        // Validates every type directive, including those in package-wide mode.
        let tag = enabled_type_tag(universe, id)?;
        if all_types || !tag.as_ref().is_some_and(|t| t.is_true()) {
            continue;
        }
        if !comparable_type(universe, id)? {
            return Err(GenError::IneligibleTarget(universe.type_name(id)));
        }
        wanted = true;
    }

    if !wanted {
        return Ok(None);
    }
    Ok(Some(PackageSelection {
        path: package.path.clone(),
        all_types,
        register,
    }))
}

/// Select packages in universe order, honoring the configured bounding dirs.
pub fn select_packages(universe: &Universe, config: &GeneratorConfig) -> GenResult<Vec<PackageSelection>> {
    let mut selected = Vec::new();
    for package in universe.packages() {
        trace!(package = %package.path, "considering package");
        if !config.is_bounded(&package.path) {
            debug!(package = %package.path, "package outside bounding dirs");
            continue;
        }
        match select_package(universe, package)? {
            Some(selection) => {
                debug!(package = %package.path, all_types = selection.all_types, "package selected");
                selected.push(selection);
            }
            None => trace!(package = %package.path, "no types request generation"),
        }
    }
    Ok(selected)
}

#[cfg(test)]
#[path = "eligibility/eligibility_tests.rs"]
mod eligibility_tests;
