#![allow(non_snake_case)]

use super::*;

#[test]
fn GoWriter___braces___indent_with_tabs() {
    let mut w = GoWriter::new();
    w.lines(["func f() {", "if x {", "return", "}", "}"]);

    assert_eq!(w.finish(), "func f() {\n\tif x {\n\t\treturn\n\t}\n}\n");
}

#[test]
fn GoWriter___else_branch___dedents_then_indents() {
    let mut w = GoWriter::new();
    w.lines(["if a {", "x()", "} else {", "y()", "}"]);

    assert_eq!(w.finish(), "if a {\n\tx()\n} else {\n\ty()\n}\n");
}

#[test]
fn GoWriter___repeated_blanks___collapse_to_one() {
    let mut w = GoWriter::new();
    w.line("a()");
    w.blank();
    w.blank();
    w.line("b()");

    assert_eq!(w.finish(), "a()\n\nb()\n");
}

#[test]
fn GoWriter___blank_after_open_or_before_close___dropped() {
    let mut w = GoWriter::new();
    w.line("if a {");
    w.blank();
    w.line("x()");
    w.blank();
    w.line("}");

    assert_eq!(w.finish(), "if a {\n\tx()\n}\n");
}

#[test]
fn GoWriter___leading_blank___dropped() {
    let mut w = GoWriter::new();
    w.blank();
    w.line("x()");

    assert_eq!(w.finish(), "x()\n");
}
