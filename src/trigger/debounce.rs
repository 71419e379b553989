// src/trigger/debounce.rs

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, error, info};

use crate::config::WatchdogConfig;
use crate::errors::Result;
use crate::exec::CommandExecutor;
use crate::trigger::pending::PendingTrigger;
use crate::watch::path_utils::match_target;
use crate::watch::{ChangeEvent, MatchPattern, SourceStreams};

/// Why the command runner stopped without an error of its own.
#[derive(Debug)]
pub enum StopReason {
    /// The notification source reported a delivery error.
    SourceError(notify::Error),
    /// The notification source went away.
    SourceClosed,
    /// The user pressed Ctrl-C.
    Interrupted,
}

/// Collapses bursts of changes into single command runs.
///
/// A change qualifies when it is not attribute-only and its path, taken
/// relative to `root`, matches the pattern. Each qualifying change
/// (re)arms the deadline; when it passes, the executor runs to completion
/// before the next event is looked at.
pub struct DebounceTrigger<E: CommandExecutor> {
    root: PathBuf,
    pattern: MatchPattern,
    pending: PendingTrigger,
    executor: E,
}

impl<E: CommandExecutor> fmt::Debug for DebounceTrigger<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebounceTrigger")
            .field("root", &self.root)
            .field("pattern", &self.pattern)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl<E: CommandExecutor> DebounceTrigger<E> {
    pub fn new(
        root: impl Into<PathBuf>,
        wait: Duration,
        pattern: MatchPattern,
        executor: E,
    ) -> Self {
        Self {
            root: root.into(),
            pattern,
            pending: PendingTrigger::new(wait),
            executor,
        }
    }

    pub fn from_config(config: &WatchdogConfig, executor: E) -> Self {
        Self::new(
            config.root.clone(),
            config.wait,
            config.pattern.clone(),
            executor,
        )
    }

    /// Whether `event` should (re)arm the trigger.
    pub fn qualifies(&self, event: &ChangeEvent) -> bool {
        if event.is_attribute() {
            return false;
        }
        let target = match_target(&self.root, &event.path);
        self.pattern.matches(&target)
    }

    /// Consume `streams` until the source fails or closes.
    ///
    /// An executor failure ends the loop with that error.
    pub async fn run(mut self, mut streams: SourceStreams) -> Result<StopReason> {
        info!(
            root = %self.root.display(),
            pattern = %self.pattern,
            wait = ?self.pending.wait(),
            "debounce trigger started"
        );

        // Re-armed on every qualifying change; only polled while armed.
        let timer = sleep(Duration::ZERO);
        tokio::pin!(timer);

        loop {
            tokio::select! {
                () = &mut timer, if self.pending.is_armed() => {
                    if self.pending.fire_if_due(Instant::now()) {
                        info!("changes settled; running command");
                        self.executor.execute().await?;
                    }
                }
                event = streams.events.recv() => match event {
                    Some(event) => {
                        if self.qualifies(&event) {
                            let deadline = self.pending.arm(Instant::now());
                            timer.as_mut().reset(deadline);
                            debug!(?event, "qualifying change; trigger armed");
                        } else {
                            debug!(?event, "ignoring change");
                        }
                    }
                    None => {
                        debug!("notification event stream closed");
                        return Ok(StopReason::SourceClosed);
                    }
                },
                Some(err) = streams.errors.recv() => {
                    error!(error = %err, "notification source error; stopping");
                    return Ok(StopReason::SourceError(err));
                }
            }
        }
    }
}
