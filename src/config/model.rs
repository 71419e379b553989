// src/config/model.rs

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::errors::{Result, WatchdogError};
use crate::watch::MatchPattern;

/// Settings as read from an optional TOML file.
///
/// ```toml
/// path = "src"
/// wait = "1s"
/// match = "*.rs"
/// command = ["cargo", "test"]
/// ```
///
/// Every key is optional; anything given on the command line wins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub path: Option<PathBuf>,
    pub wait: Option<String>,
    #[serde(rename = "match")]
    pub pattern: Option<String>,
    #[serde(default)]
    pub command: Vec<String>,
}

/// The program to run once changes settle, with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Build from an argv-style list (`program` first).
    pub fn from_argv(argv: Vec<String>) -> Result<Self> {
        let mut parts = argv.into_iter();
        match parts.next() {
            Some(program) if !program.trim().is_empty() => Ok(Self {
                program,
                args: parts.collect(),
            }),
            Some(_) => Err(WatchdogError::Usage("command name is empty".to_string())),
            None => Err(WatchdogError::Usage("missing command".to_string())),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Fully resolved settings for one `watchdog` run.
///
/// Built once at startup and handed to the trigger and executor; nothing
/// reads the command line after this point.
#[derive(Debug, Clone)]
pub struct WatchdogConfig {
    /// Directory to watch, always absolute.
    pub root: PathBuf,
    /// Quiet period after the last qualifying change before the command runs.
    pub wait: Duration,
    /// Changed paths must match this to count.
    pub pattern: MatchPattern,
    pub command: CommandSpec,
}

impl WatchdogConfig {
    pub const DEFAULT_ROOT: &'static str = ".";
    pub const DEFAULT_WAIT: Duration = Duration::from_millis(500);
}
