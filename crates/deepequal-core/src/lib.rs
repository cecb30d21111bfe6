//! deepequal-core - Type universe, declarations, errors and configuration
//!
//! This crate provides the foundational types shared by the generator and
//! its driver:
//! - [`Universe`] of type nodes ([`Type`], [`Member`], [`Signature`])
//! - [`DeclarationFile`] for loading a universe from the driver's JSON input
//! - [`GenError`] for error handling
//! - [`Config`] / [`GeneratorConfig`] for generator configuration

mod config;
mod decl;
mod error;
pub mod type_expr;
mod universe;

pub use config::{Config, GeneratorConfig, LoggingConfig, UnorderedMatching};
pub use decl::{DeclKind, DeclarationFile, MemberDecl, MethodDecl, PackageDecl, TypeDecl};
pub use error::{ErrorCategory, GenError, GenResult};
pub use universe::{
    Kind, Member, Name, Package, Shape, Signature, Type, TypeId, Universe, package_name_from_path,
};

/// Log levels for the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    /// Level selected by a `-v` count on top of a base level
    pub fn raised_by(self, verbosity: u8) -> Self {
        let levels = [
            LogLevel::Off,
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        let base = levels.iter().position(|l| *l == self).unwrap_or(3);
        let raised = (base + verbosity as usize).min(levels.len() - 1);
        levels[raised]
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Config, GenError, GenResult, GeneratorConfig, Kind, LogLevel, Member, Name, Shape,
        Signature, Type, TypeId, Universe,
    };
}
