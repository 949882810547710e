/// File handling utilities
///
/// This module provides input discovery in the working directory and reading
/// of legacy latin-1 encoded exports.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use walkdir::WalkDir;

use crate::core::patterns::glob_to_regex;
use crate::error::ReportError;

/// Find the input file in a directory.
///
/// Patterns are tried in order and the first pattern that matches anything
/// wins, even when a later pattern would match a different file. Within one
/// pattern candidates are taken in filename order.
///
/// # Arguments
///
/// * `dir` - Directory to scan (not recursively)
/// * `patterns` - Filename globs supporting `*` and `?`
///
/// # Returns
///
/// Path of the first matching regular file
pub fn locate_input<S: AsRef<str>>(dir: &Path, patterns: &[S]) -> Result<PathBuf, ReportError> {
    let file_names: Vec<(String, PathBuf)> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            (
                entry.file_name().to_string_lossy().to_string(),
                entry.path().to_path_buf(),
            )
        })
        .collect();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let matcher = glob_to_regex(pattern)?;

        if let Some((_, path)) = file_names.iter().find(|(name, _)| matcher.is_match(name)) {
            debug!("Pattern {} matched {}", pattern, path.display());
            return Ok(path.clone());
        }
        debug!("Pattern {} matched nothing in {}", pattern, dir.display());
    }

    Err(ReportError::InputNotFound {
        dir: dir.to_path_buf(),
        patterns: patterns.iter().map(|p| p.as_ref().to_string()).collect(),
    })
}

/// Read a file as ISO-8859-1 text.
///
/// Every byte maps to the code point of the same value, so decoding itself
/// cannot fail.
pub fn read_latin1(file_path: &Path) -> Result<String> {
    let bytes = fs::read(file_path)
        .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

    Ok(encoding_rs::mem::decode_latin1(&bytes).into_owned())
}

/// Display name of a path: its file name when it has one
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::patterns::INPUT_PATTERNS;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "Perpetrator,Date,Country\n").unwrap();
    }

    #[test]
    fn test_locate_prefers_earlier_pattern() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "rand_terrorism_2009.csv");
        touch(dir.path(), "rdwti.csv");

        let found = locate_input(dir.path(), INPUT_PATTERNS).unwrap();
        assert_eq!(found, dir.path().join("rdwti.csv"));
    }

    #[test]
    fn test_locate_first_match_within_pattern() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "terrorism-incidents-b.csv");
        touch(dir.path(), "terrorism-incidents-a.csv");

        let found = locate_input(dir.path(), INPUT_PATTERNS).unwrap();
        assert_eq!(found, dir.path().join("terrorism-incidents-a.csv"));
    }

    #[test]
    fn test_locate_ignores_directories_and_other_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("rdwti.csv")).unwrap();
        touch(dir.path(), "notes.csv");

        let err = locate_input(dir.path(), INPUT_PATTERNS).unwrap_err();
        match err {
            ReportError::InputNotFound { patterns, .. } => assert_eq!(patterns.len(), 4),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_locate_does_not_recurse() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("nested"), "rdwti.csv");

        assert!(locate_input(dir.path(), INPUT_PATTERNS).is_err());
    }

    #[test]
    fn test_read_latin1() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin.csv");
        fs::write(&path, b"Country\nC\xf4te d'Ivoire\n").unwrap();

        let content = read_latin1(&path).unwrap();
        assert_eq!(content, "Country\nC\u{f4}te d'Ivoire\n");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/tmp/x/rdwti.csv")), "rdwti.csv");
    }
}
