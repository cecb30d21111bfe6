//! Go source rendering for comparison plans.

use crate::plan::{ElementCheck, FieldCheck, FieldKind, Plan, PointeeCheck, SliceOrder};
use crate::writer::GoWriter;
use deepequal_core::UnorderedMatching;

/// Doc comment placed above every generated method
pub const METHOD_DOC: [&str; 2] = [
    "// DeepEqual is an autogenerated deepequal function, deeply comparing the",
    "// receiver with other. in must be non-nil.",
];

/// Render one complete method; `type_name` is the package-local name.
pub fn render_method(type_name: &str, plan: &Plan) -> String {
    let mut w = GoWriter::new();
    w.lines(METHOD_DOC);
    w.line(format!("func (in *{type_name}) DeepEqual(other *{type_name}) bool {{"));
    render_body(&mut w, plan);
    w.blank();
    w.line("return true");
    w.line("}");
    w.finish()
}

fn render_body(w: &mut GoWriter, plan: &Plan) {
    match plan {
        Plan::Delegate(_) => {
            w.lines(["if other == nil || !in.DeepEqual(other) {", "return false", "}"]);
        }
        Plan::Value => {
            w.lines(["if other == nil || *in != *other {", "return false", "}"]);
        }
        Plan::Slice { element, order } => {
            nil_guard(w);
            w.lines(["if len(*in) != len(*other) {", "return false", "} else {"]);
            match order {
                SliceOrder::Positional => {
                    w.line("for i, inElement := range *in {");
                    w.line(format!("if {} {{", element_ne(element, "inElement", "(*other)[i]")));
                    w.lines(["return false", "}", "}"]);
                }
                SliceOrder::Unordered(UnorderedMatching::Multiset) => {
                    w.line("matched := make([]bool, len(*other))");
                    w.line("for _, inElement := range *in {");
                    w.line("found := false");
                    w.line("for i, otherElement := range *other {");
                    w.lines(["if matched[i] {", "continue", "}"]);
                    w.line(format!("if {} {{", element_eq(element, "inElement", "otherElement")));
                    w.lines(["matched[i] = true", "found = true", "break", "}", "}"]);
                    w.lines(["if !found {", "return false", "}", "}"]);
                }
                SliceOrder::Unordered(UnorderedMatching::AnyMatch) => {
                    w.line("for _, inElement := range *in {");
                    w.line("found := false");
                    w.line("for _, otherElement := range *other {");
                    w.line(format!("if {} {{", element_eq(element, "inElement", "otherElement")));
                    w.lines(["found = true", "break", "}", "}"]);
                    w.lines(["if !found {", "return false", "}", "}"]);
                }
            }
            w.line("}");
        }
        Plan::Map { value } => {
            nil_guard(w);
            w.lines(["if len(*in) != len(*other) {", "return false", "} else {"]);
            w.line("for key, inValue := range *in {");
            w.line("if otherValue, present := (*other)[key]; !present {");
            w.lines(["return false", "} else {"]);
            w.line(format!("if {} {{", element_ne(value, "inValue", "otherValue")));
            w.lines(["return false", "}", "}", "}", "}"]);
        }
        Plan::Struct { fields } => {
            nil_guard(w);
            for field in fields {
                w.blank();
                render_field(w, field);
            }
        }
    }
}

fn nil_guard(w: &mut GoWriter) {
    w.lines(["if other == nil {", "return false", "}"]);
    w.blank();
}

fn render_field(w: &mut GoWriter, field: &FieldCheck) {
    let name = &field.name;
    match &field.kind {
        FieldKind::Value => {
            w.line(format!("if in.{name} != other.{name} {{"));
            w.lines(["return false", "}"]);
        }
        FieldKind::Pointer {
            pointee,
            ignore_nil,
        } => {
            if *ignore_nil {
                w.line(format!("if in.{name} != nil {{"));
            }
            w.line(format!("if (in.{name} == nil) != (other.{name} == nil) {{"));
            w.line("return false");
            w.line(format!("}} else if in.{name} != nil {{"));
            match pointee {
                PointeeCheck::Value => w.line(format!("if *in.{name} != *other.{name} {{")),
                PointeeCheck::DeepEqual(_) => {
                    w.line(format!("if !in.{name}.DeepEqual(other.{name}) {{"))
                }
            }
            w.lines(["return false", "}", "}"]);
            if *ignore_nil {
                w.line("}");
            }
        }
        FieldKind::Nested(plan) => {
            w.line(format!(
                "if ((in.{name} != nil) && (other.{name} != nil)) || ((in.{name} == nil) != (other.{name} == nil)) {{"
            ));
            w.line(format!("in, other := &in.{name}, &other.{name}"));
            render_body(w, plan);
            w.line("}");
        }
        FieldKind::Equal { pointer_param, .. } => {
            let arg = if *pointer_param { "&" } else { "" };
            w.line(format!("if !in.{name}.Equal({arg}other.{name}) {{"));
            w.lines(["return false", "}"]);
        }
        FieldKind::DeepEqual(_) => {
            w.line(format!("if !in.{name}.DeepEqual(&other.{name}) {{"));
            w.lines(["return false", "}"]);
        }
    }
}

/// Expression true when two elements are equal
fn element_eq(check: &ElementCheck, a: &str, b: &str) -> String {
    match check {
        ElementCheck::Value => format!("{a} == {b}"),
        ElementCheck::PointerToValue => {
            format!("({a} == nil && {b} == nil) || ({a} != nil && {b} != nil && *{a} == *{b})")
        }
        ElementCheck::PointerDeepEqual(_) => {
            format!("({a} == nil && {b} == nil) || ({a} != nil && {b} != nil && {a}.DeepEqual({b}))")
        }
        ElementCheck::DeepEqual(_) => format!("{a}.DeepEqual(&{b})"),
    }
}

/// Expression true when two elements differ
fn element_ne(check: &ElementCheck, a: &str, b: &str) -> String {
    match check {
        ElementCheck::Value => format!("{a} != {b}"),
        ElementCheck::PointerToValue => {
            format!("(({a} == nil) != ({b} == nil)) || ({a} != nil && *{a} != *{b})")
        }
        ElementCheck::PointerDeepEqual(_) => {
            format!("(({a} == nil) != ({b} == nil)) || ({a} != nil && !{a}.DeepEqual({b}))")
        }
        ElementCheck::DeepEqual(_) => format!("!{a}.DeepEqual(&{b})"),
    }
}

#[cfg(test)]
#[path = "render/render_tests.rs"]
mod render_tests;
