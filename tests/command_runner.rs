// tests/command_runner.rs
//
// The top-level runner over the real notification backend, with the watch
// root given relative to the working directory the way `-p .` is.
#![cfg(unix)]

mod common;
use crate::common::{init_tracing, with_timeout, FakeExecutor};

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::{Builder, TempDir};
use tokio::time::{sleep, Duration};

use watchdog::cli::CliArgs;
use watchdog::config::WatchdogConfig;
use watchdog::run_until;
use watchdog::trigger::{DebounceTrigger, StopReason};
use watchdog::watch::{Interest, NotificationSource, NotifySource};

type TestResult = Result<(), Box<dyn Error>>;

/// A visible directory under the current working directory, returned with
/// its relative path.
fn relative_tree() -> Result<(TempDir, PathBuf), Box<dyn Error>> {
    let dir = Builder::new().prefix("watchdog-rel-").tempdir_in(".")?;
    let name = dir.path().file_name().ok_or("temp dir has no name")?;
    let rel = Path::new(".").join(name);
    Ok((dir, rel))
}

fn config(argv: &[&str]) -> Result<WatchdogConfig, Box<dyn Error>> {
    let mut full = vec!["watchdog"];
    full.extend_from_slice(argv);
    Ok(WatchdogConfig::resolve(&CliArgs::try_parse_from(full)?, None)?)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn relative_root_with_default_pattern_fires() -> TestResult {
    init_tracing();

    let (dir, rel) = relative_tree()?;
    let rel = rel.to_string_lossy().into_owned();
    let config = config(&["-p", &rel, "-w", "50ms", "true"])?;

    let (mut source, streams) = NotifySource::new()?;
    source.watch(&config.root, Interest::all())?;

    let executor = FakeExecutor::new();
    let trigger = DebounceTrigger::from_config(&config, executor.clone());
    let task = tokio::spawn(trigger.run(streams));

    fs::write(dir.path().join("a.txt"), b"hello")?;

    with_timeout(async {
        while executor.count() == 0 {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await;

    source.close()?;
    task.abort();
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn runs_the_command_then_stops_on_shutdown() -> TestResult {
    init_tracing();

    let (dir, rel) = relative_tree()?;
    let rel = rel.to_string_lossy().into_owned();
    let out = Builder::new().prefix("watchdog-out-").tempdir()?;
    let marker = out.path().join("ran");
    let script = format!("touch '{}'", marker.display());

    let config = config(&["-p", &rel, "-w", "50ms", "sh", "-c", &script])?;

    let changed = dir.path().join("main.rs");
    let shutdown = async {
        sleep(Duration::from_millis(200)).await;
        fs::write(&changed, b"fn main() {}\n").expect("write watched file");
        while !marker.exists() {
            sleep(Duration::from_millis(10)).await;
        }
    };

    let reason = with_timeout(run_until(config, shutdown)).await?;

    assert!(matches!(reason, StopReason::Interrupted));
    assert!(marker.exists());
    Ok(())
}
