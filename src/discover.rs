//! Source file discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::DiscoverError;

/// Collect every non-directory entry under `root` whose name ends in
/// `.<extension>`.
///
/// Traversal is recursive and in lexical order. Nothing is skipped: vendored
/// trees, hidden directories and test files are all returned. Symlinks are
/// listed but never descended into. Any entry that cannot be read aborts the
/// walk.
pub fn collect_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>, DiscoverError> {
    let suffix = format!(".{extension}");
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| DiscoverError::Walk {
            root: root.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        if entry.file_name().to_string_lossy().ends_with(&suffix) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_files_recursive() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("pkg").join("inner");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join("main.go"), "package main\n").unwrap();
        std::fs::write(nested.join("util.go"), "package inner\n").unwrap();
        std::fs::write(nested.join("README.md"), "# inner\n").unwrap();

        let files = collect_files(temp.path(), "go").unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.extension().unwrap() == "go"));
    }

    #[test]
    fn test_collect_files_lexical_order() {
        let temp = TempDir::new().unwrap();
        for name in ["c.go", "a.go", "b.go"] {
            std::fs::write(temp.path().join(name), "package x\n").unwrap();
        }

        let files = collect_files(temp.path(), "go").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.go", "b.go", "c.go"]);
    }

    #[test]
    fn test_collect_files_keeps_vendor_and_tests() {
        let temp = TempDir::new().unwrap();
        let vendor = temp.path().join("vendor").join("lib");
        std::fs::create_dir_all(&vendor).unwrap();
        std::fs::write(vendor.join("lib.go"), "package lib\n").unwrap();
        std::fs::write(temp.path().join("main_test.go"), "package main\n").unwrap();

        let files = collect_files(temp.path(), "go").unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_collect_files_single_file_root() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("only.go");
        std::fs::write(&file, "package only\n").unwrap();

        let files = collect_files(&file, "go").unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_collect_files_bare_suffix_name() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".go"), "package hidden\n").unwrap();
        std::fs::write(temp.path().join("notgo"), "package x\n").unwrap();

        let files = collect_files(temp.path(), "go").unwrap();
        assert_eq!(files, vec![temp.path().join(".go")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_files_lists_symlinks() {
        let temp = TempDir::new().unwrap();
        let real = temp.path().join("real");
        std::fs::create_dir(&real).unwrap();
        std::fs::write(real.join("impl.go"), "package real\n").unwrap();
        std::os::unix::fs::symlink(real.join("impl.go"), temp.path().join("link.go")).unwrap();
        std::os::unix::fs::symlink(&real, temp.path().join("linked_dir")).unwrap();

        let files = collect_files(temp.path(), "go").unwrap();
        assert_eq!(
            files,
            vec![temp.path().join("link.go"), real.join("impl.go")]
        );
    }

    #[test]
    fn test_collect_files_missing_root() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");

        let err = collect_files(&missing, "go").unwrap_err();
        assert!(err.to_string().contains("does-not-exist"));
    }
}
