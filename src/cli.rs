// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `watchdog`.
///
/// `--path`, `--wait` and `--match` are optional here so that a config file
/// can fill them in; built-in defaults are applied during config resolution.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "watchdog",
    version,
    about = "Run a command whenever files under a directory change.",
    override_usage = "watchdog [OPTIONS] <COMMAND>...",
    long_about = None
)]
pub struct CliArgs {
    /// Path to watch for changes [default: .]
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Duration to wait after changes before executing the command
    /// (e.g. 500ms, 2s, 1m30s) [default: 500ms]
    #[arg(short, long, value_name = "DURATION")]
    pub wait: Option<String>,

    /// Changed files must match this glob pattern [default: *]
    #[arg(short = 'm', long = "match", value_name = "GLOB")]
    pub pattern: Option<String>,

    /// TOML file supplying defaults for the options above and the command.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WATCHDOG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Command to execute, followed by its arguments.
    #[arg(value_name = "COMMAND", trailing_var_arg = true)]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_then_command() {
        let args = CliArgs::try_parse_from([
            "watchdog", "-p", "src", "-w", "1s", "-m", "*.rs", "cargo", "build",
        ])
        .expect("valid arguments");

        assert_eq!(args.path, Some(PathBuf::from("src")));
        assert_eq!(args.wait.as_deref(), Some("1s"));
        assert_eq!(args.pattern.as_deref(), Some("*.rs"));
        assert_eq!(args.command, vec!["cargo", "build"]);
    }

    #[test]
    fn long_flags_and_log_level() {
        let args = CliArgs::try_parse_from([
            "watchdog",
            "--path",
            ".",
            "--wait",
            "250ms",
            "--match",
            "*.go",
            "--log-level",
            "debug",
            "make",
        ])
        .expect("valid arguments");

        assert_eq!(args.log_level, Some(LogLevel::Debug));
        assert_eq!(args.command, vec!["make"]);
    }

    #[test]
    fn hyphenated_arguments_after_the_command_belong_to_it() {
        let args = CliArgs::try_parse_from(["watchdog", "-w", "2s", "make", "-j4", "--keep-going"])
            .expect("valid arguments");
        assert_eq!(args.command, vec!["make", "-j4", "--keep-going"]);
    }

    #[test]
    fn command_may_be_omitted_at_parse_time() {
        let args = CliArgs::try_parse_from(["watchdog"]).expect("valid arguments");
        assert!(args.command.is_empty());
        assert!(args.path.is_none());
    }
}
