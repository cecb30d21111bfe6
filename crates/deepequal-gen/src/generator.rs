//! Per-package generation.
//!
//! Packages are processed in universe order and types in declaration order.
//! Every selected type is recorded in the [`MethodCache`] once handled, so
//! later types delegate to it instead of inlining its comparison.

use crate::eligibility::{PackageSelection, select_packages, selects_type};
use crate::emitter::Emitter;
use crate::methods::{DeepEqualMethod, MethodCache, deep_equal_method};
use crate::plan::Plan;
use crate::render::render_method;
use deepequal_core::{GenError, GenResult, GeneratorConfig, TypeId, Universe};
use std::collections::BTreeSet;
use tracing::{debug, info, trace, warn};

/// The method decided for one selected type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMethod {
    pub ty: TypeId,
    /// Unqualified name used in the receiver position
    pub name: String,
    /// `None` when the type already declares a qualifying `DeepEqual`
    pub plan: Option<Plan>,
}

/// Generation result for one package.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageOutput {
    pub path: String,
    /// Package clause of the generated file
    pub name: String,
    pub source_path: Option<String>,
    pub register: bool,
    pub methods: Vec<TypeMethod>,
}

impl PackageOutput {
    /// Methods with a generated body, in declaration order
    pub fn generated(&self) -> impl Iterator<Item = (&TypeMethod, &Plan)> {
        self.methods
            .iter()
            .filter_map(|m| m.plan.as_ref().map(|plan| (m, plan)))
    }

    /// Selected types left to their hand-written method
    pub fn kept(&self) -> impl Iterator<Item = &TypeMethod> {
        self.methods.iter().filter(|m| m.plan.is_none())
    }

    /// Rendered method text, separated by blank lines
    pub fn render_methods(&self) -> String {
        self.generated()
            .map(|(method, plan)| render_method(&method.name, plan))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Drives selection, planning and caching over a whole universe.
pub struct Generator<'a> {
    universe: &'a Universe,
    config: &'a GeneratorConfig,
    cache: MethodCache,
}

impl<'a> Generator<'a> {
    pub fn new(universe: &'a Universe, config: &'a GeneratorConfig) -> Self {
        Self {
            universe,
            config,
            cache: MethodCache::new(),
        }
    }

    pub fn cache(&self) -> &MethodCache {
        &self.cache
    }

    /// Plan every selected type of every selected package.
    pub fn run(&mut self) -> GenResult<Vec<PackageOutput>> {
        let universe = self.universe;
        let selections = select_packages(universe, self.config)?;

        let mut work = Vec::with_capacity(selections.len());
        let mut selected = BTreeSet::new();
        for selection in selections {
            let types = self.selected_types(&selection)?;
            selected.extend(types.iter().copied());
            work.push((selection, types));
        }

        let mut outputs = Vec::with_capacity(work.len());
        for (selection, types) in work {
            let package = universe
                .package(&selection.path)
                .ok_or_else(|| GenError::Declaration(format!("unknown package {}", selection.path)))?;

            let mut methods = Vec::with_capacity(types.len());
            for ty in types {
                let method = self.generate_type(ty)?;
                if let Some(plan) = &method.plan {
                    self.check_delegates(ty, plan, &selected)?;
                }
                methods.push(method);
            }

            info!(
                package = %package.path,
                generated = methods.iter().filter(|m| m.plan.is_some()).count(),
                "planned package"
            );
            outputs.push(PackageOutput {
                path: package.path.clone(),
                name: package.name.clone(),
                source_path: package.source_path.clone(),
                register: selection.register,
                methods,
            });
        }
        Ok(outputs)
    }

    fn selected_types(&self, selection: &PackageSelection) -> GenResult<Vec<TypeId>> {
        let Some(package) = self.universe.package(&selection.path) else {
            return Ok(Vec::new());
        };
        let mut types = Vec::new();
        for &ty in &package.types {
            if selects_type(self.universe, ty, selection.all_types)? {
                types.push(ty);
            }
        }
        Ok(types)
    }

    /// Plan one type and record its method for later delegation.
    pub fn generate_type(&mut self, ty: TypeId) -> GenResult<TypeMethod> {
        let universe = self.universe;
        let name = &universe.get(ty).name;
        trace!(type_name = %name, "generating deepequal function");

        let declared = deep_equal_method(universe, ty)?;
        let plan = if declared.is_some() {
            debug!(type_name = %name, "keeping declared DeepEqual");
            None
        } else {
            let emitter = Emitter::new(universe, &self.cache, self.config.unordered_matching);
            Some(emitter.plan(ty)?)
        };

        self.cache
            .record(ty, declared.unwrap_or_else(DeepEqualMethod::generated));
        Ok(TypeMethod {
            ty,
            name: name.name.clone(),
            plan,
        })
    }

    fn check_delegates(&self, ty: TypeId, plan: &Plan, selected: &BTreeSet<TypeId>) -> GenResult<()> {
        for target in plan.delegates() {
            let provided = target == ty
                || selected.contains(&target)
                || self.cache.deep_equal(self.universe, target)?.is_some();
            if !provided {
                warn!(
                    type_name = %self.universe.get(ty).name,
                    delegate = %self.universe.get(target).name,
                    "generated code calls DeepEqual on a type that does not provide it"
                );
            }
        }
        Ok(())
    }
}
