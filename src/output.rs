//! # Output Module
//!
//! Centralizes user-facing output. The stdout contract: nothing on success,
//! a count line plus the sorted failing paths on failure. Everything else
//! (summaries, diagnostics) goes to stderr.

use std::path::{Path, PathBuf};

use owo_colors::{OwoColorize, Stream};

use crate::logging::is_verbose;
use crate::report::RunSummary;

/// Prints the nonconforming set: a count line followed by each failing path
/// in sorted order, one per line.
///
/// Paths are displayed relative to the root; sorting applies to the displayed
/// form so the report is deterministic regardless of check order.
pub fn print_nonconforming(paths: &[PathBuf], root: Option<&Path>) {
  if paths.is_empty() {
    return;
  }

  let mut displayed: Vec<String> = paths.iter().map(|path| make_relative_path(path, root)).collect();
  displayed.sort();

  println!(
    "{} files have incorrect boilerplate headers:",
    displayed.len().if_supports_color(Stream::Stdout, |count| count.red())
  );
  for path in &displayed {
    println!("{path}");
  }
}

/// Prints the run summary to stderr in verbose mode.
pub fn print_summary(summary: &RunSummary) {
  if !is_verbose() {
    return;
  }

  eprintln!(
    "Checked {} files in {}ms: {} conforming, {} nonconforming",
    summary.total_files, summary.duration_ms, summary.conforming, summary.nonconforming
  );
}

/// Converts a path to a display string relative to the given root.
pub fn make_relative_path(path: &Path, root: Option<&Path>) -> String {
  let Some(root) = root else {
    return path.display().to_string();
  };

  if let Ok(stripped) = path.strip_prefix(root) {
    return stripped.display().to_string();
  }

  pathdiff::diff_paths(path, root)
    .map(|relative| relative.display().to_string())
    .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_make_relative_path_strips_root() {
    let path = Path::new("/repo/pkg/file.go");
    assert_eq!(make_relative_path(path, Some(Path::new("/repo"))), "pkg/file.go");
  }

  #[test]
  fn test_make_relative_path_without_root() {
    let path = Path::new("/repo/pkg/file.go");
    assert_eq!(make_relative_path(path, None), "/repo/pkg/file.go");
  }

  #[test]
  fn test_make_relative_path_outside_root() {
    let path = Path::new("/elsewhere/file.go");
    assert_eq!(
      make_relative_path(path, Some(Path::new("/repo"))),
      "../elsewhere/file.go"
    );
  }
}
