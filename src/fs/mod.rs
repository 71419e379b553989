// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub mod mock;

/// What a path points at, as far as the watcher cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
    Other,
}

impl EntryKind {
    pub fn is_dir(self) -> bool {
        self == EntryKind::Directory
    }
}

impl From<fs::FileType> for EntryKind {
    fn from(ft: fs::FileType) -> Self {
        if ft.is_dir() {
            EntryKind::Directory
        } else if ft.is_file() {
            EntryKind::File
        } else if ft.is_symlink() {
            EntryKind::Symlink
        } else {
            EntryKind::Other
        }
    }
}

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    /// Kind of the entry at `path`, following symlinks.
    fn stat(&self, path: &Path) -> io::Result<EntryKind>;

    /// Kind of the entry at `path`, without following symlinks.
    fn lstat(&self, path: &Path) -> io::Result<EntryKind>;

    /// Return the entries of a directory as full paths, sorted by name.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        Ok(fs::metadata(path)?.file_type().into())
    }

    fn lstat(&self, path: &Path) -> io::Result<EntryKind> {
        Ok(fs::symlink_metadata(path)?.file_type().into())
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            entries.push(entry?.path());
        }
        entries.sort();
        Ok(entries)
    }
}
