use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{Builder, TempDir};

/// Builder for real directory trees in a temporary directory.
///
/// The directory gets a visible name; tempfile's default `.tmp` prefix would
/// make the root itself hidden.
///
/// ```ignore
/// let tree = TreeBuilder::new().dir("a/visible").dir("a/.hidden/b").file("a/x.txt");
/// ```
pub struct TreeBuilder {
    dir: TempDir,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            dir: Builder::new()
                .prefix("watchdog-test-")
                .tempdir()
                .expect("create temp dir"),
        }
    }

    /// Create `rel` (and its parents) as directories.
    pub fn dir(self, rel: &str) -> Self {
        fs::create_dir_all(self.dir.path().join(rel)).expect("create dir");
        self
    }

    /// Create an empty file at `rel`, creating parent directories.
    pub fn file(self, rel: &str) -> Self {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&path, b"").expect("write file");
        self
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
