use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::time::Instant;
use watchdog::errors::{Result, WatchdogError};
use watchdog::exec::CommandExecutor;

/// A fake executor that:
/// - records the instant of every execution
/// - optionally fails, to exercise the fatal-command path.
#[derive(Debug, Clone, Default)]
pub struct FakeExecutor {
    fired: Arc<Mutex<Vec<Instant>>>,
    fail: bool,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// An executor whose every run fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Instants at which the executor ran, in order.
    pub fn fired(&self) -> Vec<Instant> {
        self.fired.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.fired.lock().unwrap().len()
    }
}

impl CommandExecutor for FakeExecutor {
    fn execute(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let fired = Arc::clone(&self.fired);
        let fail = self.fail;

        Box::pin(async move {
            fired.lock().unwrap().push(Instant::now());
            if fail {
                return Err(WatchdogError::Other(anyhow::anyhow!("fake command failed")));
            }
            Ok(())
        })
    }
}
