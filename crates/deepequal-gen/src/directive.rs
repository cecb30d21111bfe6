//! Comment directive parsing.
//!
//! Directives are gengo-style comment tags: a comment line that, once
//! trimmed of spaces, starts with `+`. The text after the marker splits once
//! on `=` into a tag name and a value. Three independent families exist:
//!
//! | tag | scope | grammar |
//! |-----|-------|---------|
//! | `deepequal-gen` | package, type | `value[,register[=true\|false]]` |
//! | `deepequal-gen:unordered-array` | type, struct member | `[true\|false]` |
//! | `deepequal-gen:ignore-nil-fields` | type | `[true\|false]` |
//!
//! Parsing is pure; every malformed or ambiguous directive is a fatal error.

use deepequal_core::{GenError, GenResult, TypeId, Universe};
use std::collections::BTreeMap;

/// Comment tag marker
pub const TAG_MARKER: &str = "+";

/// Generation-enabled tag name
pub const TAG_ENABLED: &str = "deepequal-gen";

/// Order-insensitive slice comparison tag name
pub const TAG_UNORDERED_ARRAY: &str = "deepequal-gen:unordered-array";

/// Nil-pointer-skipping tag name
pub const TAG_IGNORE_NIL_FIELDS: &str = "deepequal-gen:ignore-nil-fields";

/// Package-scope value enabling every type in the package
pub const VALUE_PACKAGE: &str = "package";

/// One parsed `deepequal-gen` directive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Directive {
    /// Primary (unnamed) value
    pub value: String,
    /// Recorded for the driver, unused by the generator itself
    pub register: bool,
}

impl Directive {
    pub fn is_package(&self) -> bool {
        self.value == VALUE_PACKAGE
    }

    pub fn is_true(&self) -> bool {
        self.value == "true"
    }

    pub fn is_false(&self) -> bool {
        self.value == "false"
    }
}

/// Collect `+name[=value]` tags from comment lines, keyed by tag name.
pub fn extract_comment_tags(marker: &str, lines: &[String]) -> BTreeMap<String, Vec<String>> {
    let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for line in lines {
        let line = line.trim_matches(' ');
        let Some(tag) = line.strip_prefix(marker) else {
            continue;
        };
        let (name, value) = tag.split_once('=').unwrap_or((tag, ""));
        out.entry(name.to_string())
            .or_default()
            .push(value.to_string());
    }
    out
}

/// The single value of a tag family, or `None` when absent
fn single_tag_value(tag: &str, lines: &[String], subject: &str) -> GenResult<Option<String>> {
    let mut tags = extract_comment_tags(TAG_MARKER, lines);
    let Some(values) = tags.remove(tag) else {
        return Ok(None);
    };
    if values.len() > 1 {
        return Err(GenError::DuplicateDirective {
            subject: subject.to_string(),
            directive: tag.to_string(),
            count: values.len(),
            values,
        });
    }
    Ok(values.into_iter().next())
}

/// Parse the generation-enabled directive from a comment set.
pub fn extract_enabled(lines: &[String], subject: &str) -> GenResult<Option<Directive>> {
    let Some(raw) = single_tag_value(TAG_ENABLED, lines, subject)? else {
        return Ok(None);
    };

    let mut parts = raw.split(',');
    let mut directive = Directive {
        value: parts.next().unwrap_or_default().to_string(),
        register: false,
    };

    for part in parts {
        let (key, value) = part.split_once('=').unwrap_or((part, ""));
        match key {
            "register" => directive.register = value != "false",
            _ => {
                return Err(GenError::UnsupportedDirectiveParam {
                    subject: subject.to_string(),
                    directive: TAG_ENABLED.to_string(),
                    param: part.to_string(),
                });
            }
        }
    }
    Ok(Some(directive))
}

/// Parse a boolean directive family (`unordered-array`, `ignore-nil-fields`).
///
/// A bare marker means `true`.
pub fn extract_flag(tag: &str, lines: &[String], subject: &str) -> GenResult<Option<bool>> {
    let Some(raw) = single_tag_value(tag, lines, subject)? else {
        return Ok(None);
    };
    if raw.contains(',') {
        return Err(GenError::TooManyDirectiveValues {
            subject: subject.to_string(),
            directive: tag.to_string(),
            value: raw,
        });
    }
    match raw.as_str() {
        "" | "true" => Ok(Some(true)),
        "false" => Ok(Some(false)),
        _ => Err(GenError::UnsupportedDirectiveValue {
            subject: subject.to_string(),
            directive: tag.to_string(),
            value: raw,
        }),
    }
}

fn type_subject(universe: &Universe, id: TypeId) -> String {
    format!("type {}", universe.get(id).name)
}

/// The type-scoped enabled directive, restricted to `true`/`false`
pub fn enabled_type_tag(universe: &Universe, id: TypeId) -> GenResult<Option<Directive>> {
    let subject = type_subject(universe, id);
    let tag = extract_enabled(&universe.get(id).comments(), &subject)?;
    if let Some(tag) = &tag {
        if !tag.is_true() && !tag.is_false() {
            return Err(GenError::UnsupportedDirectiveValue {
                subject,
                directive: TAG_ENABLED.to_string(),
                value: tag.value.clone(),
            });
        }
    }
    Ok(tag)
}

/// The package-scoped enabled directive, restricted to `package`
pub fn enabled_package_tag(lines: &[String], package_path: &str) -> GenResult<Option<Directive>> {
    let subject = format!("package {package_path}");
    let tag = extract_enabled(lines, &subject)?;
    if let Some(tag) = &tag {
        if !tag.is_package() {
            return Err(GenError::UnsupportedDirectiveValue {
                subject,
                directive: TAG_ENABLED.to_string(),
                value: tag.value.clone(),
            });
        }
    }
    Ok(tag)
}

/// Unordered-array directive on a type
pub fn unordered_array(universe: &Universe, id: TypeId) -> GenResult<Option<bool>> {
    extract_flag(
        TAG_UNORDERED_ARRAY,
        &universe.get(id).comments(),
        &type_subject(universe, id),
    )
}

/// Unordered-array directive on a struct member
pub fn unordered_array_member(
    universe: &Universe,
    owner: TypeId,
    member: &str,
    comments: &[String],
) -> GenResult<Option<bool>> {
    let subject = format!("member {}.{member}", universe.get(owner).name);
    extract_flag(TAG_UNORDERED_ARRAY, comments, &subject)
}

/// Ignore-nil-fields directive on a type
pub fn ignore_nil_fields(universe: &Universe, id: TypeId) -> GenResult<Option<bool>> {
    extract_flag(
        TAG_IGNORE_NIL_FIELDS,
        &universe.get(id).comments(),
        &type_subject(universe, id),
    )
}
