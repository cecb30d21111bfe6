//! Comparison plans.
//!
//! The emitter decides how each type is compared and records the decision as
//! a [`Plan`]. The renderer turns plans into Go text and the evaluator runs
//! them over in-memory values, so both read the same decisions.

use deepequal_core::{TypeId, UnorderedMatching};

/// The body of one `DeepEqual` method.
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    /// Call the `DeepEqual` method the type already has
    Delegate(TypeId),
    /// `*in != *other`
    Value,
    Slice {
        element: ElementCheck,
        order: SliceOrder,
    },
    Map {
        value: ElementCheck,
    },
    Struct {
        fields: Vec<FieldCheck>,
    },
}

/// Element matching for slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceOrder {
    Positional,
    Unordered(UnorderedMatching),
}

/// How two slice elements or two map values are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementCheck {
    /// `a == b`
    Value,
    /// Nil-aware `*a == *b`
    PointerToValue,
    /// Nil-aware `a.DeepEqual(b)` on the pointee type
    PointerDeepEqual(TypeId),
    /// `a.DeepEqual(&b)`
    DeepEqual(TypeId),
}

/// One struct member comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCheck {
    pub name: String,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// `in.X != other.X`
    Value,
    Pointer {
        pointee: PointeeCheck,
        /// Skip the member when the receiver's pointer is nil
        ignore_nil: bool,
    },
    /// A slice or map member, compared in place when either side is non-nil
    Nested(Box<Plan>),
    /// `in.X.Equal(other.X)` or `in.X.Equal(&other.X)`
    Equal { ty: TypeId, pointer_param: bool },
    /// `in.X.DeepEqual(&other.X)`
    DeepEqual(TypeId),
}

/// Comparison of two non-nil pointees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointeeCheck {
    /// `*in.X != *other.X`
    Value,
    /// `in.X.DeepEqual(other.X)`
    DeepEqual(TypeId),
}

impl Plan {
    /// Types whose `DeepEqual` this plan calls
    pub fn delegates(&self) -> Vec<TypeId> {
        let mut out = Vec::new();
        self.collect_delegates(&mut out);
        out
    }

    fn collect_delegates(&self, out: &mut Vec<TypeId>) {
        match self {
            Plan::Delegate(ty) => out.push(*ty),
            Plan::Value => {}
            Plan::Slice { element, .. } => element.collect_delegates(out),
            Plan::Map { value } => value.collect_delegates(out),
            Plan::Struct { fields } => {
                for field in fields {
                    match &field.kind {
                        FieldKind::Pointer {
                            pointee: PointeeCheck::DeepEqual(ty),
                            ..
                        }
                        | FieldKind::DeepEqual(ty) => out.push(*ty),
                        FieldKind::Nested(plan) => plan.collect_delegates(out),
                        FieldKind::Value | FieldKind::Pointer { .. } | FieldKind::Equal { .. } => {}
                    }
                }
            }
        }
    }
}

impl ElementCheck {
    fn collect_delegates(&self, out: &mut Vec<TypeId>) {
        match self {
            ElementCheck::PointerDeepEqual(ty) | ElementCheck::DeepEqual(ty) => out.push(*ty),
            ElementCheck::Value | ElementCheck::PointerToValue => {}
        }
    }
}
