// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Compiling the `--match` glob.
//! - Enumerating the directories of a tree (hidden subtrees excluded).
//! - Wrapping the platform's `notify` watcher as a per-directory
//!   notification source with interest masks.
//! - The recursive watcher that keeps the set of watched directories in step
//!   with a growing tree and fans changes out onto `files` / `folders`.
//!
//! It does **not** decide when commands run; see [`crate::trigger`].

pub mod event;
pub mod path_utils;
pub mod patterns;
pub mod recursive;
pub mod source;
pub mod subfolders;

pub use event::{ChangeEvent, ChangeKind, Interest};
pub use patterns::MatchPattern;
pub use recursive::{RecursiveWatcher, FILES_CAPACITY, FOLDER_INTEREST};
pub use source::{NotificationSource, NotifySource, SourceSink, SourceStreams};
pub use subfolders::subfolders;
