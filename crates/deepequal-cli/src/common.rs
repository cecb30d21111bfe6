//! Loading shared by the subcommands

use crate::Verbosity;
use anyhow::{Context, Result};
use deepequal_core::{Config, DeclarationFile, Universe};
use deepequal_logging::ReloadHandle;
use std::path::Path;
use tracing::{debug, warn};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "deepequal.toml";

/// Load the config file, falling back to defaults when there is none
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.is_file() {
                debug!(path = DEFAULT_CONFIG_FILE, "using config from working directory");
                Config::from_file(default)
                    .with_context(|| format!("Failed to load config: {DEFAULT_CONFIG_FILE}"))
            } else {
                Ok(Config::default())
            }
        }
    }
}

/// Apply the configured level, adjusted by command line flags
pub fn apply_log_level(config: &Config, verbosity: Verbosity) -> Result<()> {
    let level = verbosity.level(config.logging.log_level()?);
    if let Err(err) = ReloadHandle::global().reload_level(level) {
        warn!("{err}");
    }
    Ok(())
}

/// Read a declaration file into a type universe
pub fn load_universe(input: &Path) -> Result<Universe> {
    let file = DeclarationFile::from_file(input)
        .with_context(|| format!("Failed to load declarations: {}", input.display()))?;
    let universe = file
        .into_universe()
        .with_context(|| format!("Invalid declarations in {}", input.display()))?;
    debug!(types = universe.len(), packages = universe.packages().len(), "loaded universe");
    Ok(universe)
}
