// src/exec/backend.rs

//! Pluggable command executor.
//!
//! The debounce trigger talks to a `CommandExecutor` instead of spawning
//! processes itself, which keeps its timing logic testable without real
//! commands.

use std::future::Future;
use std::pin::Pin;

use crate::config::CommandSpec;
use crate::errors::Result;

use super::command::run_command;

/// Runs the configured command when the trigger fires.
///
/// `execute` is awaited before the trigger looks at new events, so a slow
/// command delays (but does not drop) events that arrive meanwhile.
pub trait CommandExecutor: Send {
    fn execute(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Executor that spawns the configured command as a child process.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    command: CommandSpec,
}

impl ProcessExecutor {
    pub fn new(command: CommandSpec) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &CommandSpec {
        &self.command
    }
}

impl CommandExecutor for ProcessExecutor {
    fn execute(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(run_command(&self.command))
    }
}
