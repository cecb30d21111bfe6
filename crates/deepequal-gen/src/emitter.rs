//! Comparison planning.
//!
//! [`Emitter::plan`] dispatches on the underlying kind of a type and decides,
//! member by member and element by element, which comparison applies.
//! Shapes outside that coverage fail with an unsupported-shape error naming
//! the shape and the type being generated.

use crate::directive;
use crate::methods::{MethodCache, equal_method};
use crate::plan::{ElementCheck, FieldCheck, FieldKind, Plan, PointeeCheck, SliceOrder};
use crate::shape::{is_declared, is_pure_value, underlying};
use deepequal_core::{GenError, GenResult, Kind, Shape, TypeId, Universe, UnorderedMatching};

/// Plans comparisons against a universe and the methods generated so far.
pub struct Emitter<'a> {
    universe: &'a Universe,
    cache: &'a MethodCache,
    matching: UnorderedMatching,
}

impl<'a> Emitter<'a> {
    pub fn new(universe: &'a Universe, cache: &'a MethodCache, matching: UnorderedMatching) -> Self {
        Self {
            universe,
            cache,
            matching,
        }
    }

    /// Plan the `DeepEqual` body for a type.
    pub fn plan(&self, ty: TypeId) -> GenResult<Plan> {
        let ut = underlying(self.universe, ty);
        match self.universe.get(ut).kind() {
            Kind::Primitive => Ok(Plan::Value),
            Kind::Slice => self.plan_slice(ty, ty, None),
            Kind::Map => self.plan_map(ty, ty),
            Kind::Struct => self.plan_struct(ty),
            kind => Err(GenError::unsupported_shape(
                kind,
                "a generation target",
                self.name(ty),
            )),
        }
    }

    fn name(&self, ty: TypeId) -> String {
        self.universe.type_name(ty)
    }

    /// `owner` is the type whose method is being generated, for diagnostics.
    fn plan_slice(&self, owner: TypeId, ty: TypeId, unordered_override: Option<bool>) -> GenResult<Plan> {
        let own = directive::unordered_array(self.universe, ty)?.unwrap_or(false);
        // A member directive wins over one on the slice type, so a method
        // generated for that type is only reused when both agree.
        let unordered = unordered_override.unwrap_or(own);
        if unordered == own && self.cache.deep_equal(self.universe, ty)?.is_some() {
            return Ok(Plan::Delegate(ty));
        }
        let ut = underlying(self.universe, ty);
        let Shape::Slice(elem) = self.universe.get(ut).shape else {
            return Err(GenError::unsupported_shape(self.universe.get(ut).kind(), "a slice", self.name(owner)));
        };

        let element = self.element_check(owner, ut, elem)?;
        let order = if unordered {
            SliceOrder::Unordered(self.matching)
        } else {
            SliceOrder::Positional
        };
        Ok(Plan::Slice { element, order })
    }

    fn plan_map(&self, owner: TypeId, ty: TypeId) -> GenResult<Plan> {
        if self.cache.deep_equal(self.universe, ty)?.is_some() {
            return Ok(Plan::Delegate(ty));
        }
        let ut = underlying(self.universe, ty);
        let Shape::Map { value, .. } = self.universe.get(ut).shape else {
            return Err(GenError::unsupported_shape(self.universe.get(ut).kind(), "a map", self.name(owner)));
        };

        let value = self.element_check(owner, ut, value)?;
        Ok(Plan::Map { value })
    }

    fn element_check(&self, owner: TypeId, container: TypeId, elem: TypeId) -> GenResult<ElementCheck> {
        let context = || format!("an element of {}", self.name(container));
        let uet = underlying(self.universe, elem);

        match self.universe.get(uet).shape {
            Shape::Primitive => Ok(ElementCheck::Value),
            Shape::Pointer(pointee) => {
                let up = underlying(self.universe, pointee);
                match self.universe.get(up).kind() {
                    Kind::Primitive => Ok(ElementCheck::PointerToValue),
                    Kind::Struct | Kind::Slice | Kind::Map if is_declared(self.universe, pointee) => {
                        Ok(ElementCheck::PointerDeepEqual(pointee))
                    }
                    _ => Err(GenError::unsupported_shape(
                        self.name(elem),
                        context(),
                        self.name(owner),
                    )),
                }
            }
            Shape::Struct(_) | Shape::Slice(_) | Shape::Map { .. } if is_declared(self.universe, elem) => {
                Ok(ElementCheck::DeepEqual(elem))
            }
            _ => Err(GenError::unsupported_shape(
                self.name(elem),
                context(),
                self.name(owner),
            )),
        }
    }

    fn plan_struct(&self, ty: TypeId) -> GenResult<Plan> {
        if self.cache.deep_equal(self.universe, ty)?.is_some() {
            return Ok(Plan::Delegate(ty));
        }
        let ut = underlying(self.universe, ty);
        let ignore_nil = match directive::ignore_nil_fields(self.universe, ty)? {
            Some(value) => value,
            None if ut != ty => directive::ignore_nil_fields(self.universe, ut)?.unwrap_or(false),
            None => false,
        };

        let fields = self
            .universe
            .get(ut)
            .members()
            .iter()
            .map(|member| {
                let kind = self.field_kind(ty, ut, &member.name, member.ty, &member.comments, ignore_nil)?;
                Ok(FieldCheck {
                    name: member.name.clone(),
                    kind,
                })
            })
            .collect::<GenResult<Vec<_>>>()?;
        Ok(Plan::Struct { fields })
    }

    fn field_kind(
        &self,
        owner: TypeId,
        container: TypeId,
        name: &str,
        ft: TypeId,
        comments: &[String],
        ignore_nil: bool,
    ) -> GenResult<FieldKind> {
        let context = || format!("member {name} of {}", self.name(container));
        let uft = underlying(self.universe, ft);

        let unordered = directive::unordered_array_member(self.universe, container, name, comments)?;
        if unordered.is_some() && !matches!(self.universe.get(uft).shape, Shape::Slice(_)) {
            return Err(GenError::Config(format!(
                "member {}.{name}: {} applies to slices only, got {}",
                self.universe.get(container).name,
                directive::TAG_UNORDERED_ARRAY,
                self.name(ft)
            )));
        }

        match self.universe.get(uft).shape {
            Shape::Primitive => Ok(FieldKind::Value),
            Shape::Pointer(pointee) => {
                let up = underlying(self.universe, pointee);
                let pointee = match self.universe.get(up).kind() {
                    Kind::Primitive => PointeeCheck::Value,
                    Kind::Struct | Kind::Slice | Kind::Map if is_declared(self.universe, pointee) => {
                        PointeeCheck::DeepEqual(pointee)
                    }
                    _ => {
                        return Err(GenError::unsupported_shape(
                            self.name(ft),
                            context(),
                            self.name(owner),
                        ));
                    }
                };
                Ok(FieldKind::Pointer {
                    pointee,
                    ignore_nil,
                })
            }
            Shape::Slice(_) => Ok(FieldKind::Nested(Box::new(self.plan_slice(owner, ft, unordered)?))),
            Shape::Map { .. } => Ok(FieldKind::Nested(Box::new(self.plan_map(owner, ft)?))),
            Shape::Struct(_) => {
                if is_pure_value(self.universe, uft) {
                    Ok(FieldKind::Value)
                } else if let Some(equal) = equal_method(self.universe, ft)? {
                    Ok(FieldKind::Equal {
                        ty: ft,
                        pointer_param: equal.pointer_param,
                    })
                } else {
                    Ok(FieldKind::DeepEqual(ft))
                }
            }
            Shape::Interface | Shape::Func | Shape::Alias(_) => Err(GenError::unsupported_shape(
                self.universe.get(uft).kind(),
                context(),
                self.name(owner),
            )),
        }
    }
}
