//! # Diff Module
//!
//! Renders the difference between a failing file's observed header window and
//! the reference template it was compared with. Diffs go to stderr (behind
//! `--show-diff`) or are appended to a consolidated file (`--save-diff`), so
//! the stdout contract stays untouched.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use similar::{ChangeTag, TextDiff};

/// Manages diff rendering for nonconforming headers.
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,

  /// Path of the consolidated diff file, if any
  pub save_diff_path: Option<PathBuf>,

  /// Serializes appends from parallel checker workers
  write_lock: Mutex<()>,
}

impl DiffManager {
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
      write_lock: Mutex::new(()),
    }
  }

  /// Truncates any stale diff file from a previous run.
  pub fn init(&self) -> Result<()> {
    if let Some(ref path) = self.save_diff_path {
      std::fs::write(path, "").with_context(|| format!("Failed to create diff file {}", path.display()))?;
    }
    Ok(())
  }

  /// Whether any diff output is requested at all.
  pub fn is_active(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Renders the observed-vs-expected header diff for one failing file.
  ///
  /// `observed` is the file's transformed header window, `expected` the
  /// reference template text; insertions therefore read as "what the header
  /// is missing".
  pub fn display_diff(&self, path: &Path, observed: &str, expected: &str) -> Result<()> {
    let diff = TextDiff::from_lines(observed, expected);

    let mut rendered = format!("Header diff for {}:\n", path.display());
    for change in diff.iter_all_changes() {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };
      rendered.push_str(sign);
      rendered.push_str(change.value());
      if !change.value().ends_with('\n') {
        rendered.push('\n');
      }
    }
    rendered.push('\n');

    let _guard = self.write_lock.lock().expect("mutex poisoned");

    if self.show_diff {
      eprint!("{rendered}");
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file {}", diff_path.display()))?;
      file
        .write_all(rendered.as_bytes())
        .with_context(|| format!("Failed to write diff file {}", diff_path.display()))?;
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_inactive_by_default() {
    let manager = DiffManager::new(false, None);
    assert!(!manager.is_active());
  }

  #[test]
  fn test_saved_diff_accumulates_files() {
    let temp = tempfile::tempdir().expect("tempdir");
    let diff_path = temp.path().join("changes.diff");

    let manager = DiffManager::new(false, Some(diff_path.clone()));
    manager.init().expect("init");
    assert!(manager.is_active());

    manager
      .display_diff(Path::new("a.go"), "// Copyright 2016 Acme", "// Copyright YEAR Acme")
      .expect("diff a");
    manager
      .display_diff(Path::new("b.go"), "", "// Copyright YEAR Acme")
      .expect("diff b");

    let content = std::fs::read_to_string(&diff_path).expect("read diff");
    assert!(content.contains("Header diff for a.go:"));
    assert!(content.contains("Header diff for b.go:"));
    assert!(content.contains("-// Copyright 2016 Acme"));
    assert!(content.contains("+// Copyright YEAR Acme"));
  }

  #[test]
  fn test_init_truncates_previous_run() {
    let temp = tempfile::tempdir().expect("tempdir");
    let diff_path = temp.path().join("changes.diff");
    std::fs::write(&diff_path, "stale content").expect("seed");

    let manager = DiffManager::new(false, Some(diff_path.clone()));
    manager.init().expect("init");

    let content = std::fs::read_to_string(&diff_path).expect("read diff");
    assert!(content.is_empty());
  }
}
