// src/config/validate.rs

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::CliArgs;
use crate::config::model::{CommandSpec, FileConfig, WatchdogConfig};
use crate::errors::{Result, WatchdogError};
use crate::watch::MatchPattern;

impl WatchdogConfig {
    /// Merge command-line arguments over an optional config file and
    /// validate the result.
    ///
    /// Per field the command line wins, then the file, then the built-in
    /// default. The root is made absolute. Fails on a missing command, an
    /// unparsable wait duration or a malformed glob.
    pub fn resolve(cli: &CliArgs, file: Option<FileConfig>) -> Result<Self> {
        let file = file.unwrap_or_default();

        let argv = if cli.command.is_empty() {
            file.command
        } else {
            cli.command.clone()
        };
        let command = CommandSpec::from_argv(argv)?;

        let root = cli
            .path
            .clone()
            .or(file.path)
            .unwrap_or_else(|| PathBuf::from(WatchdogConfig::DEFAULT_ROOT));
        // Events arrive with absolute paths; matching needs the same form.
        let root = std::path::absolute(&root).map_err(|e| {
            WatchdogError::Config(format!("invalid path '{}': {e}", root.display()))
        })?;

        let wait = match cli.wait.as_deref().or(file.wait.as_deref()) {
            Some(s) => parse_duration(s).map_err(|e| {
                WatchdogError::Config(format!("invalid wait duration '{s}': {e}"))
            })?,
            None => WatchdogConfig::DEFAULT_WAIT,
        };

        let pattern = cli
            .pattern
            .as_deref()
            .or(file.pattern.as_deref())
            .unwrap_or(MatchPattern::MATCH_ALL);
        let pattern = MatchPattern::new(pattern)?;

        Ok(Self {
            root,
            wait,
            pattern,
            command,
        })
    }
}

/// Parse a duration like `"500ms"`, `"2s"`, `"1.5s"` or `"1m30s"`.
///
/// Units: `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`. A bare `0` is accepted;
/// any other number needs a unit.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total = Duration::ZERO;
    let mut rest = s;
    while !rest.is_empty() {
        // Boundary between the number and its unit.
        let num_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(|| "duration missing unit suffix".to_string())?;
        let (num_part, tail) = rest.split_at(num_end);
        if num_part.is_empty() {
            return Err(format!("expected a number before '{tail}'"));
        }
        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_end);

        let nanos_per_unit: u128 = match unit {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60 * 1_000_000_000,
            "h" => 3600 * 1_000_000_000,
            other => {
                return Err(format!(
                    "unsupported duration unit '{other}'; expected ns, us, ms, s, m, or h"
                ));
            }
        };

        total = total
            .checked_add(scaled(num_part, nanos_per_unit)?)
            .ok_or_else(|| "duration overflow".to_string())?;
        rest = next;
    }

    Ok(total)
}

/// `number * nanos_per_unit` for a decimal `number`, exactly.
fn scaled(number: &str, nanos_per_unit: u128) -> std::result::Result<Duration, String> {
    let invalid = || format!("invalid duration number '{number}'");

    let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    if frac_part.contains('.') {
        return Err(invalid());
    }

    let whole: u128 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| invalid())?
    };
    let mut nanos = whole.checked_mul(nanos_per_unit).ok_or_else(invalid)?;

    // Digits beyond nanosecond precision cannot contribute.
    let frac_digits = &frac_part[..frac_part.len().min(18)];
    if !frac_digits.is_empty() {
        let frac: u128 = frac_digits.parse().map_err(|_| invalid())?;
        nanos += frac * nanos_per_unit / 10u128.pow(frac_digits.len() as u32);
    }

    let secs = u64::try_from(nanos / 1_000_000_000).map_err(|_| invalid())?;
    Ok(Duration::new(secs, (nanos % 1_000_000_000) as u32))
}
