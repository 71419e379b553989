// src/fs/mock.rs

use std::collections::{BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{EntryKind, FileSystem};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File,
    Dir(BTreeSet<String>), // child names
    Symlink(PathBuf),
    /// Any access to this path fails with the given error kind.
    Broken(io::ErrorKind),
}

/// In-memory filesystem for tests.
///
/// Cloning shares the underlying tree, so a test can keep a handle and mutate
/// the tree while a watcher holds another clone.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut entries = self.lock();
        Self::ensure_dir_entry(&mut entries, path.as_ref());
    }

    pub fn add_file(&self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), MockEntry::File);
    }

    pub fn add_symlink(&self, path: impl AsRef<Path>, target: impl Into<PathBuf>) {
        self.insert(path.as_ref(), MockEntry::Symlink(target.into()));
    }

    /// Make every access to `path` fail with `kind`.
    pub fn fail(&self, path: impl AsRef<Path>, kind: io::ErrorKind) {
        self.insert(path.as_ref(), MockEntry::Broken(kind));
    }

    /// Drop `path` (and the link from its parent). Children are left dangling,
    /// which is enough to simulate an entry vanishing between event and stat.
    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut entries = self.lock();
        entries.remove(path);
        if let (Some(parent), Some(name)) = (path.parent(), file_name(path)) {
            if let Some(MockEntry::Dir(children)) = entries.get_mut(parent) {
                children.remove(&name);
            }
        }
    }

    fn insert(&self, path: &Path, entry: MockEntry) {
        let mut entries = self.lock();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir_entry(&mut entries, parent);
                Self::link_child(&mut entries, parent, path);
            }
        }
        entries.insert(path.to_path_buf(), entry);
    }

    fn ensure_dir_entry(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        if entries.contains_key(path) {
            return;
        }
        entries.insert(path.to_path_buf(), MockEntry::Dir(BTreeSet::new()));
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && parent != path {
                Self::ensure_dir_entry(entries, parent);
                Self::link_child(entries, parent, path);
            }
        }
    }

    fn link_child(entries: &mut HashMap<PathBuf, MockEntry>, parent: &Path, child: &Path) {
        if let (Some(MockEntry::Dir(children)), Some(name)) =
            (entries.get_mut(parent), file_name(child))
        {
            children.insert(name);
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, MockEntry>> {
        // A panic while holding the lock only happens inside a failing test.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lookup(&self, path: &Path) -> io::Result<MockEntry> {
        match self.lock().get(path) {
            Some(MockEntry::Broken(kind)) => Err(io::Error::new(
                *kind,
                format!("mock failure for {}", path.display()),
            )),
            Some(entry) => Ok(entry.clone()),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file or directory: {}", path.display()),
            )),
        }
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

impl FileSystem for MockFileSystem {
    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        let mut current = path.to_path_buf();
        // Bounded so a symlink cycle ends in an error instead of a hang.
        for _ in 0..40 {
            match self.lookup(&current)? {
                MockEntry::Symlink(target) => current = target,
                entry => return Ok(kind_of(&entry)),
            }
        }
        Err(io::Error::other(format!(
            "too many levels of symbolic links: {}",
            path.display()
        )))
    }

    fn lstat(&self, path: &Path) -> io::Result<EntryKind> {
        self.lookup(path).map(|entry| kind_of(&entry))
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        match self.lookup(path)? {
            MockEntry::Dir(children) => Ok(children.iter().map(|name| path.join(name)).collect()),
            _ => Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("not a directory: {}", path.display()),
            )),
        }
    }
}

fn kind_of(entry: &MockEntry) -> EntryKind {
    match entry {
        MockEntry::File => EntryKind::File,
        MockEntry::Dir(_) => EntryKind::Directory,
        MockEntry::Symlink(_) => EntryKind::Symlink,
        MockEntry::Broken(_) => EntryKind::Other,
    }
}
