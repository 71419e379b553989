// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::cli::CliArgs;
use crate::config::model::{FileConfig, WatchdogConfig};
use crate::errors::Result;

/// Read and deserialize a config file.
///
/// This only performs TOML deserialization; merging with the command line
/// and validation happen in [`WatchdogConfig::resolve`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<FileConfig> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config: FileConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Build the run configuration from parsed arguments.
///
/// This is the recommended entry point for the binary:
///
/// - Reads the `--config` file, if one was given.
/// - Lets command-line values override it.
/// - Fills in defaults and validates the result.
pub fn load_and_resolve(cli: &CliArgs) -> Result<WatchdogConfig> {
    let file = match &cli.config {
        Some(path) => Some(load_from_path(path)?),
        None => None,
    };
    WatchdogConfig::resolve(cli, file)
}
