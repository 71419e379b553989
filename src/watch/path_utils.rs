// src/watch/path_utils.rs

//! Turning event paths into the strings glob patterns are matched against.

use std::path::{Component, Path};

/// Path of `path` relative to `root`, with forward slashes.
///
/// Event paths are built by joining the registered directory with the entry
/// name, so a plain `strip_prefix` covers the common case. When `root` was
/// given in a different form (say `./src` vs `src`) both sides are
/// normalized lexically and compared again. Returns `None` if `path` does not
/// live under `root`.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    if let Ok(rel) = path.strip_prefix(root) {
        return Some(slashed(rel));
    }

    let root = normalized(root);
    let path = normalized(path);
    Path::new(&path)
        .strip_prefix(Path::new(&root))
        .ok()
        .map(slashed)
}

/// The string a match pattern is checked against: relative to `root` when
/// possible, otherwise the path as reported.
pub fn match_target(root: &Path, path: &Path) -> String {
    relative_str(root, path).unwrap_or_else(|| slashed(path))
}

fn slashed(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Drop `.` components so `./a/b` and `a/b` compare equal.
fn normalized(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.join("/").replace("//", "/")
}
