// src/config/mod.rs

//! Run configuration: command-line arguments merged over an optional TOML
//! file, validated into a [`WatchdogConfig`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_resolve, load_from_path};
pub use model::{CommandSpec, FileConfig, WatchdogConfig};
pub use validate::parse_duration;
