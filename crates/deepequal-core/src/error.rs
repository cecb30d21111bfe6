//! Error types for deepequal generation

use thiserror::Error;

/// Result type alias for generator operations
pub type GenResult<T> = Result<T, GenError>;

/// Broad class of a fatal diagnostic.
///
/// None of these are recoverable: every error aborts the run, the category
/// only tells the user where to look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed or contradictory directives, or an invalid configuration file
    Configuration,
    /// A reachable type shape the generator cannot compare
    StructuralCoverage,
    /// A hand-written `Equal`/`DeepEqual` with the wrong signature
    SignatureMismatch,
    /// The declaration input itself is inconsistent
    Input,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Configuration => write!(f, "configuration"),
            ErrorCategory::StructuralCoverage => write!(f, "structural coverage"),
            ErrorCategory::SignatureMismatch => write!(f, "signature mismatch"),
            ErrorCategory::Input => write!(f, "input"),
        }
    }
}

/// Error type for generator operations
#[derive(Error, Debug)]
pub enum GenError {
    /// The same directive family appears more than once on one comment set
    #[error("{subject}: found {count} {directive} tags: {values:?}")]
    DuplicateDirective {
        subject: String,
        directive: String,
        count: usize,
        values: Vec<String>,
    },

    /// A `key[=value]` sub-parameter the directive does not know
    #[error("{subject}: unsupported {directive} param: {param:?}")]
    UnsupportedDirectiveParam {
        subject: String,
        directive: String,
        param: String,
    },

    /// A single-valued directive carried a comma separated list
    #[error("{subject}: {directive} takes a single value, got {value:?}")]
    TooManyDirectiveValues {
        subject: String,
        directive: String,
        value: String,
    },

    /// The primary directive value is not valid at this scope
    #[error("{subject}: unsupported {directive} value: {value:?}")]
    UnsupportedDirectiveValue {
        subject: String,
        directive: String,
        value: String,
    },

    /// A type opted in explicitly but can never be compared
    #[error("type {0} requests deepequal generation but is not comparable")]
    IneligibleTarget(String),

    /// Invalid generator configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// A reachable member or element shape outside the supported set
    #[error("hit an unsupported type {shape} for {context}, from {type_name}")]
    UnsupportedShape {
        shape: String,
        context: String,
        type_name: String,
    },

    /// A hand-written comparison method exists but is malformed
    #[error("type {type_name}: invalid {method} signature, {reason}")]
    InvalidSignature {
        type_name: String,
        method: String,
        reason: String,
    },

    /// A type expression names something the universe does not contain
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// A type expression could not be parsed
    #[error("invalid type expression {expr:?}: {reason}")]
    InvalidTypeExpr { expr: String, reason: String },

    /// Two declarations share a qualified name
    #[error("duplicate declaration of type {0}")]
    DuplicateType(String),

    /// Malformed declaration document
    #[error("declaration error: {0}")]
    Declaration(String),
}

impl GenError {
    /// Returns the class this error belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            GenError::DuplicateDirective { .. }
            | GenError::UnsupportedDirectiveParam { .. }
            | GenError::TooManyDirectiveValues { .. }
            | GenError::UnsupportedDirectiveValue { .. }
            | GenError::IneligibleTarget(_)
            | GenError::Config(_) => ErrorCategory::Configuration,
            GenError::UnsupportedShape { .. } => ErrorCategory::StructuralCoverage,
            GenError::InvalidSignature { .. } => ErrorCategory::SignatureMismatch,
            GenError::UnknownType(_)
            | GenError::InvalidTypeExpr { .. }
            | GenError::DuplicateType(_)
            | GenError::Declaration(_) => ErrorCategory::Input,
        }
    }

    /// Returns the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 2,
            ErrorCategory::StructuralCoverage => 3,
            ErrorCategory::SignatureMismatch => 4,
            ErrorCategory::Input => 5,
        }
    }

    /// Shorthand for [`GenError::UnsupportedShape`]
    pub fn unsupported_shape(
        shape: impl std::fmt::Display,
        context: impl std::fmt::Display,
        type_name: impl std::fmt::Display,
    ) -> Self {
        GenError::UnsupportedShape {
            shape: shape.to_string(),
            context: context.to_string(),
            type_name: type_name.to_string(),
        }
    }
}

impl From<serde_json::Error> for GenError {
    fn from(err: serde_json::Error) -> Self {
        GenError::Declaration(err.to_string())
    }
}

impl From<toml::de::Error> for GenError {
    fn from(err: toml::de::Error) -> Self {
        GenError::Config(err.to_string())
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;

#[cfg(test)]
#[path = "error/error_parameterized_tests.rs"]
mod error_parameterized_tests;
