mod common;
use crate::common::builders::TreeBuilder;
use crate::common::init_tracing;

use std::error::Error;
use std::io;
use std::path::PathBuf;

use watchdog::errors::WatchdogError;
use watchdog::fs::mock::MockFileSystem;
use watchdog::fs::RealFileSystem;
use watchdog::watch::subfolders;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn hidden_subtrees_are_skipped() -> TestResult {
    init_tracing();

    // A, A/.hidden, A/.hidden/B, A/visible
    let tree = TreeBuilder::new().dir("A/.hidden/B").dir("A/visible");
    let root = tree.join("A");

    let folders = subfolders(&RealFileSystem, &root)?;

    assert_eq!(folders, vec![root.clone(), root.join("visible")]);
    Ok(())
}

#[test]
fn depth_first_pre_order_by_name() -> TestResult {
    let tree = TreeBuilder::new()
        .dir("b/y")
        .dir("a/z")
        .dir("a/x")
        .file("a/x/file.txt")
        .file("top.txt");
    let root = tree.root().to_path_buf();

    let folders = subfolders(&RealFileSystem, &root)?;

    assert_eq!(
        folders,
        vec![
            root.clone(),
            root.join("a"),
            root.join("a/x"),
            root.join("a/z"),
            root.join("b"),
            root.join("b/y"),
        ]
    );
    Ok(())
}

#[test]
fn hidden_root_yields_nothing() -> TestResult {
    let tree = TreeBuilder::new().dir(".cache/inner");

    let folders = subfolders(&RealFileSystem, &tree.join(".cache"))?;

    assert!(folders.is_empty());
    Ok(())
}

#[test]
fn file_root_yields_nothing() -> TestResult {
    let tree = TreeBuilder::new().file("plain.txt");

    let folders = subfolders(&RealFileSystem, &tree.join("plain.txt"))?;

    assert!(folders.is_empty());
    Ok(())
}

#[test]
fn missing_root_is_a_traversal_error() {
    let tree = TreeBuilder::new();
    let missing = tree.join("does-not-exist");

    match subfolders(&RealFileSystem, &missing) {
        Err(WatchdogError::Traversal { path, source }) => {
            assert_eq!(path, missing);
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("expected traversal error, got {other:?}"),
    }
}

#[test]
fn dot_root_is_kept() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_dir("./src");
    fs.add_dir("./.git/objects");

    let folders = subfolders(&fs, &PathBuf::from("."))?;

    assert_eq!(folders, vec![PathBuf::from("."), PathBuf::from("./src")]);
    Ok(())
}

#[test]
fn error_anywhere_aborts_enumeration() {
    let fs = MockFileSystem::new();
    fs.add_dir("/w/ok/deeper");
    fs.fail("/w/ok/locked", io::ErrorKind::PermissionDenied);

    match subfolders(&fs, &PathBuf::from("/w")) {
        Err(WatchdogError::Traversal { path, source }) => {
            assert_eq!(path, PathBuf::from("/w/ok/locked"));
            assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
        }
        other => panic!("expected traversal error, got {other:?}"),
    }
}

#[test]
fn errors_inside_hidden_subtrees_are_never_reached() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_dir("/w/src");
    fs.fail("/w/.git/locked", io::ErrorKind::PermissionDenied);

    let folders = subfolders(&fs, &PathBuf::from("/w"))?;

    assert_eq!(folders, vec![PathBuf::from("/w"), PathBuf::from("/w/src")]);
    Ok(())
}

#[test]
fn symlinked_directories_are_not_followed() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_dir("/w/real/inner");
    fs.add_symlink("/w/link", "/w/real");

    let folders = subfolders(&fs, &PathBuf::from("/w"))?;

    assert_eq!(
        folders,
        vec![
            PathBuf::from("/w"),
            PathBuf::from("/w/real"),
            PathBuf::from("/w/real/inner"),
        ]
    );
    Ok(())
}
