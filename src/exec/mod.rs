// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command`] runs a [`CommandSpec`](crate::config::CommandSpec) to
//!   completion with the parent's standard streams.
//! - [`backend`] provides the `CommandExecutor` trait the debounce trigger
//!   fires through, and the `ProcessExecutor` used in production. Tests swap
//!   in a fake that only records when it was fired.

pub mod backend;
pub mod command;

pub use backend::{CommandExecutor, ProcessExecutor};
pub use command::run_command;
