//! Interface locator for batch mode
//!
//! Maps requested interface names to the `.go` files declaring them, either by
//! scanning a directory tree or by listing every interface of one file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use futures::future::join_all;
use indexmap::IndexMap;
use tracing::{debug, error, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::{MOCK_DIR_MARKER, PARENT_SEARCH_DEPTH};
use crate::error::MockError;
use crate::mocker::Mocker;

/// Interface name -> file declaring it, in request order
pub type InterfaceTable = IndexMap<String, PathBuf>;

/// `path` with a `.go` extension, appended when missing
pub fn resolve_go_path(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "go") {
        path.to_path_buf()
    } else {
        let mut with_ext = path.as_os_str().to_owned();
        with_ext.push(".go");
        PathBuf::from(with_ext)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

fn go_files(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|ext| ext.to_str()) == Some("go"))
        .map(|e| e.into_path())
}

/// First `.go` file under `root` declaring the interface `name`
///
/// Files are visited in sorted order and the search stops at the first match.
/// Unreadable files are skipped.
pub fn find_interface_file(mocker: &Mocker, root: &Path, name: &str) -> Option<PathBuf> {
    go_files(root).find(|path| match std::fs::read_to_string(path) {
        Ok(source) => mocker.declares(&source, name),
        Err(e) => {
            debug!("Skipping unreadable file {}: {}", path.display(), e);
            false
        }
    })
}

/// Search the tree under `root` for each name concurrently
///
/// Names that aren't declared anywhere are left out of the table.
pub async fn locate_interfaces(
    mocker: Arc<Mocker>,
    root: &Path,
    names: &[String],
) -> InterfaceTable {
    let found: Arc<Mutex<HashMap<String, PathBuf>>> = Arc::new(Mutex::new(HashMap::new()));

    let tasks = names.iter().map(|name| {
        let mocker = Arc::clone(&mocker);
        let found = Arc::clone(&found);
        let root = root.to_path_buf();
        let name = name.clone();

        tokio::task::spawn_blocking(move || {
            let Some(path) = find_interface_file(&mocker, &root, &name) else {
                warn!("Interface {} not found under {}", name, root.display());
                return;
            };
            debug!("Found interface {} in {}", name, path.display());

            match found.lock() {
                Ok(mut table) => {
                    table.entry(name).or_insert(path);
                }
                Err(e) => error!("Interface table lock poisoned: {}", e),
            }
        })
    });

    for result in join_all(tasks).await {
        if let Err(e) = result {
            error!("Interface search task failed: {}", e);
        }
    }

    let mut found = match found.lock() {
        Ok(table) => table.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };

    names
        .iter()
        .filter_map(|name| found.remove_entry(name))
        .collect()
}

/// Every interface declared in the file at `path`
pub fn interfaces_at(mocker: &Mocker, path: &Path) -> Result<InterfaceTable, MockError> {
    let source = std::fs::read_to_string(path).map_err(|e| MockError::io(path, e))?;

    Ok(mocker
        .interface_names(&source)
        .into_iter()
        .map(|name| (name, path.to_path_buf()))
        .collect())
}

fn first_mock_dir(root: &Path, max_depth: usize) -> Option<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(|e| e.ok())
        .find(|e| {
            e.file_type().is_dir()
                && e.file_name()
                    .to_str()
                    .is_some_and(|name| name.contains(MOCK_DIR_MARKER))
        })
        .map(|e| e.into_path())
}

/// Directory generated mocks go to
///
/// The first directory whose name contains "mock" under `root`, then under the
/// parent of `root`, falling back to `root` itself.
pub fn find_mock_dir(root: &Path) -> PathBuf {
    if let Some(dir) = first_mock_dir(root, usize::MAX) {
        return dir;
    }

    first_mock_dir(&parent_dir(root), PARENT_SEARCH_DEPTH).unwrap_or_else(|| root.to_path_buf())
}

/// Parent of `root`, also for relative roots such as `.` whose lexical parent is empty
fn parent_dir(root: &Path) -> PathBuf {
    match root.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => root.join(".."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[rstest]
    #[case("store/store.go", "store/store.go")]
    #[case("store/store", "store/store.go")]
    #[case("reader.v1", "reader.v1.go")]
    fn resolve_go_path_appends_extension(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(resolve_go_path(Path::new(path)), PathBuf::from(expected));
    }

    #[test]
    fn find_interface_file_returns_first_match_in_sorted_order() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "b/reader.go", "type Reader interface {\n\tRead() error\n}\n");
        write(temp.path(), "a/reader.go", "type Reader interface {\n\tRead() error\n}\n");
        write(temp.path(), "a/other.txt", "type Reader interface {}\n");

        let result = find_interface_file(&Mocker::default(), temp.path(), "Reader");
        assert_eq!(result, Some(temp.path().join("a/reader.go")));
    }

    #[test]
    fn find_interface_file_skips_hidden_dirs_and_comments() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), ".git/reader.go", "type Reader interface {\n}\n");
        write(temp.path(), "doc.go", "// type Reader interface {\n");

        let result = find_interface_file(&Mocker::default(), temp.path(), "Reader");
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn locate_interfaces_keeps_request_order_and_drops_missing() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "io/reader.go", "type Reader interface {\n\tRead() error\n}\n");
        write(temp.path(), "io/writer.go", "type Writer interface {\n\tWrite() error\n}\n");

        let names = vec![
            "Writer".to_string(),
            "Missing".to_string(),
            "Reader".to_string(),
        ];
        let result = locate_interfaces(Arc::new(Mocker::default()), temp.path(), &names).await;

        let entries: Vec<(&str, PathBuf)> = result
            .iter()
            .map(|(name, path)| (name.as_str(), path.clone()))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("Writer", temp.path().join("io/writer.go")),
                ("Reader", temp.path().join("io/reader.go")),
            ]
        );
    }

    #[test]
    fn interfaces_at_lists_every_interface_of_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("io.go");
        fs::write(
            &path,
            "type Reader interface {\n\tRead() error\n}\n\ntype Writer interface {\n\tWrite() error\n}\n",
        )
        .unwrap();

        let result = interfaces_at(&Mocker::default(), &path).unwrap();
        assert_eq!(result.keys().collect::<Vec<_>>(), vec!["Reader", "Writer"]);
        assert!(result.values().all(|p| p == &path));
    }

    #[test]
    fn interfaces_at_reports_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let error = interfaces_at(&Mocker::default(), &temp.path().join("missing.go")).unwrap_err();
        assert!(matches!(error, MockError::Io { .. }));
    }

    #[rstest]
    #[case(".", "./..")]
    #[case("project", "project/..")]
    #[case("work/project", "work")]
    #[case("/srv/project", "/srv")]
    fn parent_dir_handles_relative_roots(#[case] root: &str, #[case] expected: &str) {
        assert_eq!(parent_dir(Path::new(root)), PathBuf::from(expected));
    }

    #[test]
    fn find_mock_dir_prefers_dir_under_root() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("project");
        fs::create_dir_all(root.join("internal/mocks")).unwrap();
        fs::create_dir_all(root.join(".mock")).unwrap();

        assert_eq!(find_mock_dir(&root), root.join("internal/mocks"));
    }

    #[test]
    fn find_mock_dir_searches_parent_then_falls_back_to_root() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("project");
        fs::create_dir_all(&root).unwrap();
        assert_eq!(find_mock_dir(&root), root);

        fs::create_dir_all(temp.path().join("testing/mock")).unwrap();
        assert_eq!(find_mock_dir(&root), temp.path().join("testing/mock"));
    }
}
