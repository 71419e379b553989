// src/exec/command.rs

use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::config::CommandSpec;
use crate::errors::{Result, WatchdogError};

/// Run `spec` and wait for it to exit.
///
/// stdin, stdout and stderr are inherited, so the command talks to the
/// terminal directly. Failing to start and exiting unsuccessfully are both
/// errors.
pub async fn run_command(spec: &CommandSpec) -> Result<()> {
    info!(cmd = %spec, "executing command");

    let mut child = Command::new(&spec.program)
        .args(&spec.args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| WatchdogError::CommandSpawn {
            program: spec.program.clone(),
            source,
        })?;

    let status = child.wait().await?;
    debug!(cmd = %spec, exit_code = ?status.code(), "command exited");

    if !status.success() {
        return Err(WatchdogError::CommandFailed {
            program: spec.program.clone(),
            status,
        });
    }
    Ok(())
}
