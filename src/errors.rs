// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchdogError {
    /// Enumeration of the watch root produced no directories.
    #[error("no folders to watch under {0:?}")]
    NoFolders(PathBuf),

    /// Enumeration of the watch root hit a filesystem error and was aborted.
    #[error("failed to enumerate folders at {path:?}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("notification source error: {0}")]
    Notify(#[from] notify::Error),

    #[error("invalid glob pattern '{pattern}'")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("usage error: {0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("failed to start command '{program}'")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command '{program}' failed: {status}")]
    CommandFailed { program: String, status: ExitStatus },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WatchdogError {
    /// Whether this error stems from how the binary was invoked rather than
    /// from something that went wrong while running.
    pub fn is_usage(&self) -> bool {
        matches!(self, WatchdogError::Usage(_))
    }
}

pub type Result<T> = std::result::Result<T, WatchdogError>;
