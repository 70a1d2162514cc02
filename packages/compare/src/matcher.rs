//! Common-file resolution between two snapshot directories.

use std::collections::BTreeSet;
use std::path::Path;

use walkdir::WalkDir;

/// Compute the set of filenames present in both directories, restricted to
/// one filename extension.
///
/// Files are intersected by base filename only, not path: files at
/// different relative paths but identical names are treated as the same
/// logical file. Same-named files in different subdirectories therefore
/// collide.
///
/// An empty set is a normal outcome, not a failure.
#[must_use]
pub fn common_files(dir_a: &Path, dir_b: &Path, extension: &str) -> BTreeSet<String> {
    let files_a = files_with_extension(dir_a, extension);
    let files_b = files_with_extension(dir_b, extension);

    files_a.intersection(&files_b).cloned().collect()
}

/// Recursively enumerate regular files with the given extension, by base
/// filename.
fn files_with_extension(dir: &Path, extension: &str) -> BTreeSet<String> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext == extension)
        })
        .filter_map(|entry| entry.file_name().to_str().map(ToString::to_string))
        .collect()
}

/// Locate a file by base name under a directory, in deterministic walk
/// order.
pub(crate) fn find_file(dir: &Path, name: &str) -> Option<std::path::PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .find(|entry| entry.file_type().is_file() && entry.file_name().to_str() == Some(name))
        .map(walkdir::DirEntry::into_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn populate(dir: &Path, files: &[&str]) {
        for file in files {
            let path = dir.join(file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, "content").unwrap();
        }
    }

    #[test]
    fn test_common_files_matches_by_name_only() {
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        populate(dir_a.path(), &["a/x.py", "b/y.py"]);
        populate(dir_b.path(), &["c/x.py"]);

        let common = common_files(dir_a.path(), dir_b.path(), "py");

        assert_eq!(common, BTreeSet::from(["x.py".to_string()]));
    }

    #[test]
    fn test_common_files_empty_on_no_overlap() {
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        populate(dir_a.path(), &["one.py"]);
        populate(dir_b.path(), &["two.py"]);

        let common = common_files(dir_a.path(), dir_b.path(), "py");

        assert!(common.is_empty());
    }

    #[test]
    fn test_common_files_ignores_other_extensions() {
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        populate(dir_a.path(), &["shared.py", "shared.txt", "notes.md"]);
        populate(dir_b.path(), &["shared.py", "shared.txt", "notes.md"]);

        let common = common_files(dir_a.path(), dir_b.path(), "py");

        assert_eq!(common, BTreeSet::from(["shared.py".to_string()]));
    }

    #[test]
    fn test_find_file_locates_nested_entry() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path(), &["src/nested/target.py"]);

        let found = find_file(dir.path(), "target.py").unwrap();

        assert!(found.ends_with("src/nested/target.py"));
        assert!(find_file(dir.path(), "missing.py").is_none());
    }
}
