//! Generator configuration types

use crate::error::{GenError, GenResult};
use crate::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How unordered-array comparison matches elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnorderedMatching {
    /// Each right element may satisfy at most one left element
    #[default]
    Multiset,
    /// Any right element satisfies a left element; duplicates are not consumed
    AnyMatch,
}

/// Configuration file contents (`deepequal.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings that shape the generated files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Output file name without the `.go` extension
    #[serde(default = "default_output_file_base")]
    pub output_file_base: String,

    /// Build tag excluded by the `// +build !<tag>` header line
    #[serde(default = "default_build_tag")]
    pub build_tag: String,

    /// License text prepended to each generated file
    #[serde(default)]
    pub boilerplate: Option<PathBuf>,

    /// Root that vendored source paths are expanded against
    #[serde(default)]
    pub output_base: Option<String>,

    /// Overrides the package path every file is written to
    #[serde(default)]
    pub gen_package_path: Option<String>,

    /// Only packages rooted under these dirs are considered (empty: all)
    #[serde(default)]
    pub bounding_dirs: Vec<String>,

    #[serde(default)]
    pub unordered_matching: UnorderedMatching,
}

fn default_output_file_base() -> String {
    "deepequal_generated".to_string()
}

fn default_build_tag() -> String {
    "ignore_autogenerated".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_file_base: default_output_file_base(),
            build_tag: default_build_tag(),
            boilerplate: None,
            output_base: None,
            gen_package_path: None,
            bounding_dirs: Vec::new(),
            unordered_matching: UnorderedMatching::default(),
        }
    }
}

impl GeneratorConfig {
    /// Bounding dirs with trailing slashes stripped
    pub fn normalized_bounding_dirs(&self) -> Vec<String> {
        self.bounding_dirs
            .iter()
            .map(|d| d.trim_end_matches('/').to_string())
            .collect()
    }

    /// Whether a package path lies under one of the bounding dirs
    pub fn is_bounded(&self, package_path: &str) -> bool {
        let dirs = self.normalized_bounding_dirs();
        dirs.is_empty()
            || dirs.iter().any(|dir| {
                package_path == dir
                    || package_path
                        .strip_prefix(dir.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            })
    }

    /// Validate the configuration
    pub fn validate(&self) -> GenResult<()> {
        if self.output_file_base.is_empty() {
            return Err(GenError::Config("output_file_base cannot be empty".into()));
        }
        if self.output_file_base.contains('/') {
            return Err(GenError::Config(format!(
                "output_file_base must be a file name, got {:?}",
                self.output_file_base
            )));
        }
        if self.build_tag.is_empty() || self.build_tag.contains(char::is_whitespace) {
            return Err(GenError::Config(format!(
                "build_tag must be a single word, got {:?}",
                self.build_tag
            )));
        }
        if self.bounding_dirs.iter().any(|d| d.trim_end_matches('/').is_empty()) {
            return Err(GenError::Config("bounding dir cannot be empty".into()));
        }
        Ok(())
    }
}

/// Logging section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    /// Parsed log level
    pub fn log_level(&self) -> GenResult<LogLevel> {
        self.level
            .parse()
            .map_err(|_| GenError::Config(format!("unknown log level {:?}", self.level)))
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> GenResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| GenError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> GenResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = toml::from_str(content)?;
        config.generator.validate()?;
        config.logging.log_level()?;
        Ok(config)
    }
}
