//! # File Collector Module
//!
//! Enumerates candidate files: either by walking the root directory or by
//! normalizing an explicit list passed on the command line. Directory pruning
//! here is a traversal shortcut only; the authoritative exclusion decision is
//! made by the filters at selection time.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Candidate enumeration over one root directory.
pub struct FileCollector {
  root: PathBuf,
  skipped_dirs: Vec<String>,
}

impl FileCollector {
  pub fn new(root: PathBuf, skipped_dirs: Vec<String>) -> Self {
    Self { root, skipped_dirs }
  }

  /// Walks the root recursively and returns every regular file found.
  ///
  /// Directories whose name contains a skipped substring are pruned without
  /// descending; symlinks are not followed. Unreadable directories are
  /// reported to stderr and skipped rather than aborting the walk.
  pub fn walk_root(&self) -> Result<Vec<PathBuf>> {
    debug!("Scanning directory: {}", self.root.display());
    let start_time = Instant::now();

    let files: Vec<PathBuf> = WalkDir::new(&self.root)
      .follow_links(false)
      .into_iter()
      .filter_entry(|entry| !self.prune_directory(entry))
      .filter_map(|entry| match entry {
        Ok(entry) => Some(entry),
        Err(e) => {
          eprintln!("Error walking {}: {}", self.root.display(), e);
          None
        }
      })
      .filter(|entry| entry.file_type().is_file())
      .map(|entry| entry.path().to_path_buf())
      .collect();

    debug!(
      "Found {} files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );

    Ok(files)
  }

  /// Resolves an explicit candidate list against the root.
  ///
  /// Relative paths are interpreted relative to the root, mirroring how the
  /// walked paths are produced. Existence is not verified here: an unreadable
  /// candidate surfaces as a failing file at check time.
  pub fn normalize_explicit(&self, files: &[String]) -> Vec<PathBuf> {
    files
      .iter()
      .map(|file| {
        let path = PathBuf::from(file);
        if path.is_absolute() { path } else { self.root.join(path) }
      })
      .collect()
  }

  /// Whether a directory entry should be pruned during the walk.
  ///
  /// Never prunes the root itself, even when the root's own name would match
  /// a skip substring.
  fn prune_directory(&self, entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() || entry.path() == self.root {
      return false;
    }

    let name = entry.file_name().to_string_lossy();
    self.skipped_dirs.iter().any(|substring| name.contains(substring.as_str()))
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;

  #[test]
  fn test_walk_prunes_skipped_directories() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();

    fs::create_dir_all(root.join("pkg")).expect("mkdir");
    fs::create_dir_all(root.join("vendor/dep")).expect("mkdir");
    fs::write(root.join("pkg/file.go"), "package pkg\n").expect("write");
    fs::write(root.join("vendor/dep/file.go"), "package dep\n").expect("write");

    let collector = FileCollector::new(root.to_path_buf(), vec!["vendor".to_string()]);
    let files = collector.walk_root().expect("walk");

    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("pkg/file.go"));
  }

  #[test]
  fn test_walk_does_not_prune_root() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().join("vendored");
    fs::create_dir_all(&root).expect("mkdir");
    fs::write(root.join("file.go"), "package main\n").expect("write");

    let collector = FileCollector::new(root, vec!["vendor".to_string()]);
    let files = collector.walk_root().expect("walk");

    assert_eq!(files.len(), 1);
  }

  #[test]
  fn test_normalize_explicit_joins_relative_paths() {
    let collector = FileCollector::new(PathBuf::from("/repo"), Vec::new());
    let files = collector.normalize_explicit(&["pkg/file.go".to_string(), "/abs/other.go".to_string()]);

    assert_eq!(files[0], PathBuf::from("/repo/pkg/file.go"));
    assert_eq!(files[1], PathBuf::from("/abs/other.go"));
  }
}
