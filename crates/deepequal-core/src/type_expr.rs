//! Go type expressions used by the declaration file.
//!
//! Only the subset the generator can reason about is accepted: builtins,
//! named references (`Name` or `path/to/pkg.Name`), `*T`, `[]T`, `map[K]V`,
//! `interface{...}` and `func(...)` literals.

use crate::error::{GenError, GenResult};

/// Go's predeclared types.
pub const BUILTINS: &[&str] = &[
    "bool",
    "string",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
    "byte",
    "rune",
    "float32",
    "float64",
    "complex64",
    "complex128",
    "error",
];

/// Parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A predeclared type
    Builtin(String),
    /// A declared type; `package` is `None` for same-package references
    Named {
        package: Option<String>,
        name: String,
    },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Map(Box<TypeExpr>, Box<TypeExpr>),
    Interface(String),
    Func(String),
}

/// Parse a type expression.
pub fn parse(expr: &str) -> GenResult<TypeExpr> {
    let trimmed = expr.trim();
    parse_inner(trimmed).map_err(|reason| GenError::InvalidTypeExpr {
        expr: expr.to_string(),
        reason,
    })
}

fn parse_inner(s: &str) -> Result<TypeExpr, String> {
    if s.is_empty() {
        return Err("empty type".to_string());
    }
    if let Some(rest) = s.strip_prefix('*') {
        return Ok(TypeExpr::Pointer(Box::new(parse_inner(rest.trim_start())?)));
    }
    if let Some(rest) = s.strip_prefix("[]") {
        return Ok(TypeExpr::Slice(Box::new(parse_inner(rest.trim_start())?)));
    }
    if s.starts_with('[') {
        return Err("fixed-size arrays are not supported".to_string());
    }
    if let Some(rest) = s.strip_prefix("map[") {
        let close = matching_bracket(rest).ok_or("unterminated map key")?;
        let key = parse_inner(rest[..close].trim())?;
        let value = parse_inner(rest[close + 1..].trim())?;
        return Ok(TypeExpr::Map(Box::new(key), Box::new(value)));
    }
    if s.starts_with("interface{") || s.starts_with("interface {") {
        if !s.ends_with('}') {
            return Err("unterminated interface literal".to_string());
        }
        return Ok(TypeExpr::Interface(s.to_string()));
    }
    if s == "any" {
        return Ok(TypeExpr::Interface("interface{}".to_string()));
    }
    if s.starts_with("func(") || s.starts_with("func (") {
        return Ok(TypeExpr::Func(s.to_string()));
    }
    if s.starts_with("chan ") || s.starts_with("chan<-") || s.starts_with("<-chan") {
        return Err("channel types are not supported".to_string());
    }

    match s.rsplit_once('.') {
        Some((package, name)) => {
            if package.is_empty() {
                return Err("empty package path".to_string());
            }
            if !is_identifier(name) {
                return Err(format!("{name:?} is not an identifier"));
            }
            Ok(TypeExpr::Named {
                package: Some(package.to_string()),
                name: name.to_string(),
            })
        }
        None if BUILTINS.contains(&s) => Ok(TypeExpr::Builtin(s.to_string())),
        None if is_identifier(s) => Ok(TypeExpr::Named {
            package: None,
            name: s.to_string(),
        }),
        None => Err(format!("{s:?} is not an identifier")),
    }
}

/// Index of the `]` closing an already opened `[`
fn matching_bracket(s: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, c) in s.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {
            chars.all(|c| c == '_' || c.is_alphanumeric())
        }
        _ => false,
    }
}
