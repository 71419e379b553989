use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use watchdog::fs::mock::MockFileSystem;
use watchdog::watch::subfolders;

// Short names from a tiny alphabet so generated trees share prefixes and
// a fair share of them start with a dot.
fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-c]{1,2}",
        1 => "\\.[a-c]{1,2}",
    ]
}

fn tree_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    proptest::collection::vec(proptest::collection::vec(name_strategy(), 1..4), 0..12)
}

fn has_hidden_component(root: &Path, path: &Path) -> bool {
    path.strip_prefix(root)
        .map(|rel| {
            rel.components()
                .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
        })
        .unwrap_or(false)
}

proptest! {
    #[test]
    fn returns_exactly_the_visible_directories(paths in tree_strategy()) {
        let root = PathBuf::from("/w");
        let fs = MockFileSystem::new();
        fs.add_dir(&root);

        let mut all_dirs = BTreeSet::new();
        all_dirs.insert(root.clone());
        for components in &paths {
            let mut dir = root.clone();
            for name in components {
                dir.push(name);
                all_dirs.insert(dir.clone());
            }
            fs.add_dir(&dir);
            fs.add_file(dir.join("file.txt"));
        }

        let folders = subfolders(&fs, &root).expect("mock tree is readable");

        let expected: BTreeSet<PathBuf> = all_dirs
            .into_iter()
            .filter(|dir| !has_hidden_component(&root, dir))
            .collect();
        let got: BTreeSet<PathBuf> = folders.iter().cloned().collect();

        prop_assert_eq!(got, expected);
        // No directory is reported twice.
        prop_assert_eq!(folders.len(), expected_len(&folders));
        // Pre-order: every parent is listed before its children.
        for (i, folder) in folders.iter().enumerate() {
            if folder != &root {
                let parent = folder.parent().expect("below root");
                let parent_pos = folders.iter().position(|f| f == parent);
                prop_assert!(matches!(parent_pos, Some(p) if p < i));
            }
        }
    }
}

fn expected_len(folders: &[PathBuf]) -> usize {
    folders.iter().collect::<BTreeSet<_>>().len()
}
