//! In-memory execution of comparison plans.
//!
//! The evaluator gives generated methods a meaning without a Go toolchain:
//! it runs the same [`Plan`] the renderer prints over [`Value`]s shaped like
//! Go values. Hand-written `Equal` and `DeepEqual` methods are supplied as
//! closures.

use crate::plan::{ElementCheck, FieldKind, Plan, PointeeCheck, SliceOrder};
use deepequal_core::{TypeId, UnorderedMatching};
use std::collections::HashMap;
use thiserror::Error;

/// A Go-like runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Pointer(Option<Box<Value>>),
    Slice(Option<Vec<Value>>),
    Map(Option<Vec<(Value, Value)>>),
    Struct(Vec<(String, Value)>),
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    pub fn some(v: Value) -> Self {
        Value::Pointer(Some(Box::new(v)))
    }

    pub fn nil_pointer() -> Self {
        Value::Pointer(None)
    }

    pub fn slice(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Slice(Some(items.into_iter().collect()))
    }

    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Map(Some(entries.into_iter().collect()))
    }

    pub fn record<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Value::Struct(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    fn field(&self, name: &str) -> Result<&Value, EvalError> {
        match self {
            Value::Struct(fields) => fields
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v)
                .ok_or_else(|| EvalError::MissingField(name.to_string())),
            other => Err(EvalError::mismatch("struct", other)),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Pointer(_) => "pointer",
            Value::Slice(_) => "slice",
            Value::Map(_) => "map",
            Value::Struct(_) => "struct",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("expected a {expected} value, got {found}")]
    ShapeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("struct value has no field {0}")]
    MissingField(String),

    #[error("no {method} method for type id {ty}")]
    NoMethod { method: &'static str, ty: usize },
}

impl EvalError {
    fn mismatch(expected: &'static str, found: &Value) -> Self {
        EvalError::ShapeMismatch {
            expected,
            found: found.kind_name(),
        }
    }

    fn no_method(method: &'static str, ty: TypeId) -> Self {
        EvalError::NoMethod {
            method,
            ty: ty.index(),
        }
    }
}

type DeepEqualFn = Box<dyn Fn(&Value, Option<&Value>) -> bool>;
type EqualFn = Box<dyn Fn(&Value, &Value) -> bool>;

/// Runs generated plans, falling back to registered hand-written methods.
#[derive(Default)]
pub struct Evaluator {
    plans: HashMap<TypeId, Plan>,
    deep_equal: HashMap<TypeId, DeepEqualFn>,
    equal: HashMap<TypeId, EqualFn>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register generated method bodies
    pub fn with_plans<I>(mut self, plans: I) -> Self
    where
        I: IntoIterator<Item = (TypeId, Plan)>,
    {
        self.plans.extend(plans);
        self
    }

    /// Register a hand-written `DeepEqual`; it receives `None` for a nil other
    pub fn with_deep_equal(mut self, ty: TypeId, f: impl Fn(&Value, Option<&Value>) -> bool + 'static) -> Self {
        self.deep_equal.insert(ty, Box::new(f));
        self
    }

    /// Register a hand-written `Equal`
    pub fn with_equal(mut self, ty: TypeId, f: impl Fn(&Value, &Value) -> bool + 'static) -> Self {
        self.equal.insert(ty, Box::new(f));
        self
    }

    /// `in.DeepEqual(other)` for a non-nil receiver.
    pub fn deep_equal(&self, ty: TypeId, left: &Value, right: Option<&Value>) -> Result<bool, EvalError> {
        if let Some(f) = self.deep_equal.get(&ty) {
            return Ok(f(left, right));
        }
        match self.plans.get(&ty) {
            Some(plan) => self.run(plan, left, right),
            None => Err(EvalError::no_method("DeepEqual", ty)),
        }
    }

    /// Run a plan body with `in` bound to `left` and `other` to `right`.
    pub fn run(&self, plan: &Plan, left: &Value, right: Option<&Value>) -> Result<bool, EvalError> {
        let Some(right) = right else {
            return Ok(false);
        };
        match plan {
            Plan::Delegate(ty) => self.deep_equal(*ty, left, Some(right)),
            Plan::Value => Ok(left == right),
            Plan::Slice { element, order } => self.run_slice(element, *order, left, right),
            Plan::Map { value } => self.run_map(value, left, right),
            Plan::Struct { fields } => {
                for field in fields {
                    let l = left.field(&field.name)?;
                    let r = right.field(&field.name)?;
                    if !self.field_equal(&field.kind, l, r)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }

    fn run_slice(&self, element: &ElementCheck, order: SliceOrder, left: &Value, right: &Value) -> Result<bool, EvalError> {
        let l = as_slice(left)?;
        let r = as_slice(right)?;
        if l.len() != r.len() {
            return Ok(false);
        }

        match order {
            SliceOrder::Positional => {
                for (a, b) in l.iter().zip(r) {
                    if !self.element_equal(element, a, b)? {
                        return Ok(false);
                    }
                }
            }
            SliceOrder::Unordered(UnorderedMatching::Multiset) => {
                let mut matched = vec![false; r.len()];
                for a in l {
                    let mut found = false;
                    for (i, b) in r.iter().enumerate() {
                        if matched[i] {
                            continue;
                        }
                        if self.element_equal(element, a, b)? {
                            matched[i] = true;
                            found = true;
                            break;
                        }
                    }
                    if !found {
                        return Ok(false);
                    }
                }
            }
            SliceOrder::Unordered(UnorderedMatching::AnyMatch) => {
                for a in l {
                    let mut found = false;
                    for b in r {
                        if self.element_equal(element, a, b)? {
                            found = true;
                            break;
                        }
                    }
                    if !found {
                        return Ok(false);
                    }
                }
            }
        }
        Ok(true)
    }

    fn run_map(&self, value: &ElementCheck, left: &Value, right: &Value) -> Result<bool, EvalError> {
        let l = as_map(left)?;
        let r = as_map(right)?;
        if l.len() != r.len() {
            return Ok(false);
        }
        for (key, a) in l {
            let Some((_, b)) = r.iter().find(|(k, _)| k == key) else {
                return Ok(false);
            };
            if !self.element_equal(value, a, b)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn element_equal(&self, check: &ElementCheck, a: &Value, b: &Value) -> Result<bool, EvalError> {
        match check {
            ElementCheck::Value => Ok(a == b),
            ElementCheck::PointerToValue => match (as_pointer(a)?, as_pointer(b)?) {
                (None, None) => Ok(true),
                (Some(x), Some(y)) => Ok(x == y),
                _ => Ok(false),
            },
            ElementCheck::PointerDeepEqual(ty) => match (as_pointer(a)?, as_pointer(b)?) {
                (None, None) => Ok(true),
                (Some(x), Some(y)) => self.deep_equal(*ty, x, Some(y)),
                _ => Ok(false),
            },
            ElementCheck::DeepEqual(ty) => self.deep_equal(*ty, a, Some(b)),
        }
    }

    fn field_equal(&self, kind: &FieldKind, l: &Value, r: &Value) -> Result<bool, EvalError> {
        match kind {
            FieldKind::Value => Ok(l == r),
            FieldKind::Pointer {
                pointee,
                ignore_nil,
            } => {
                let lp = as_pointer(l)?;
                let rp = as_pointer(r)?;
                if *ignore_nil && lp.is_none() {
                    return Ok(true);
                }
                match (lp, rp) {
                    (None, None) => Ok(true),
                    (Some(x), Some(y)) => match pointee {
                        PointeeCheck::Value => Ok(x == y),
                        PointeeCheck::DeepEqual(ty) => self.deep_equal(*ty, x, Some(y)),
                    },
                    _ => Ok(false),
                }
            }
            FieldKind::Nested(plan) => {
                if is_nil(l) && is_nil(r) {
                    return Ok(true);
                }
                self.run(plan, l, Some(r))
            }
            FieldKind::Equal { ty, .. } => match self.equal.get(ty) {
                Some(f) => Ok(f(l, r)),
                None => Err(EvalError::no_method("Equal", *ty)),
            },
            FieldKind::DeepEqual(ty) => self.deep_equal(*ty, l, Some(r)),
        }
    }
}

fn as_slice(v: &Value) -> Result<&[Value], EvalError> {
    match v {
        Value::Slice(items) => Ok(items.as_deref().unwrap_or(&[])),
        other => Err(EvalError::mismatch("slice", other)),
    }
}

fn as_map(v: &Value) -> Result<&[(Value, Value)], EvalError> {
    match v {
        Value::Map(entries) => Ok(entries.as_deref().unwrap_or(&[])),
        other => Err(EvalError::mismatch("map", other)),
    }
}

fn as_pointer(v: &Value) -> Result<Option<&Value>, EvalError> {
    match v {
        Value::Pointer(target) => Ok(target.as_deref()),
        other => Err(EvalError::mismatch("pointer", other)),
    }
}

fn is_nil(v: &Value) -> bool {
    matches!(v, Value::Slice(None) | Value::Map(None) | Value::Pointer(None))
}
