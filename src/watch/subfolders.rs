// src/watch/subfolders.rs

//! Enumerate the directories of a tree, skipping hidden subtrees.

use std::path::{Path, PathBuf};

use crate::errors::{Result, WatchdogError};
use crate::fs::{EntryKind, FileSystem};

/// Return `root` and every directory below it, depth-first in pre-order.
///
/// A directory whose name starts with `.` is skipped together with
/// everything beneath it. `.` and `..` have no file name as far as
/// [`Path::file_name`] is concerned, so a root given as `.` is kept.
///
/// Only directories are collected and symlinks are not followed. Any
/// filesystem error aborts the whole enumeration.
pub fn subfolders(fs: &dyn FileSystem, root: &Path) -> Result<Vec<PathBuf>> {
    let mut folders = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(path) = stack.pop() {
        let kind = fs.lstat(&path).map_err(|source| WatchdogError::Traversal {
            path: path.clone(),
            source,
        })?;
        if kind != EntryKind::Directory || is_hidden(&path) {
            continue;
        }

        let children = fs.read_dir(&path).map_err(|source| WatchdogError::Traversal {
            path: path.clone(),
            source,
        })?;
        folders.push(path);

        // Reversed so the smallest name is popped (and visited) first.
        stack.extend(children.into_iter().rev());
    }

    Ok(folders)
}

/// Whether the final component of `path` is a dot-prefixed name.
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
