// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod trigger;
pub mod watch;

use std::future::Future;

use tracing::{error, info, warn};

use crate::config::WatchdogConfig;
use crate::errors::Result;
use crate::exec::ProcessExecutor;
use crate::trigger::{DebounceTrigger, StopReason};
use crate::watch::{Interest, NotificationSource, NotifySource};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the notification source, watching the root directory
/// - the debounce trigger consuming its flat event stream
/// - the process executor running the configured command
/// - Ctrl-C handling
///
/// Returns once the source fails or Ctrl-C is received; a failing command or
/// a root that cannot be watched is an error.
pub async fn run(config: WatchdogConfig) -> Result<()> {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            // Without a signal handler, only the source can end the run.
            std::future::pending::<()>().await;
        }
    };

    match run_until(config, ctrl_c).await? {
        StopReason::SourceError(err) => info!(error = %err, "stopped after notification error"),
        StopReason::SourceClosed => info!("notification source closed; stopped"),
        StopReason::Interrupted => info!("interrupted; stopped"),
    }
    Ok(())
}

/// Like [`run`], but stops with [`StopReason::Interrupted`] once `shutdown`
/// completes instead of waiting for Ctrl-C.
pub async fn run_until<F>(config: WatchdogConfig, shutdown: F) -> Result<StopReason>
where
    F: Future<Output = ()>,
{
    let (mut source, streams) = NotifySource::new()?;

    let executor = ProcessExecutor::new(config.command.clone());
    let trigger = DebounceTrigger::from_config(&config, executor);

    source.watch(&config.root, Interest::all()).map_err(|err| {
        error!(path = %config.root.display(), error = %err, "failed to watch path");
        err
    })?;
    info!(path = %config.root.display(), cmd = %config.command, "watching for changes");

    let outcome = tokio::select! {
        outcome = trigger.run(streams) => outcome,
        () = shutdown => Ok(StopReason::Interrupted),
    };

    source.close()?;
    outcome
}
