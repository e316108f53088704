//! # File Filter Module
//!
//! Filters that decide which files become check candidates: the fixed
//! skipped-directory substrings and the requirement that a reference template
//! exists for the file's type. Filtering happens once, at selection time, so
//! the checker itself never sees a file it cannot resolve.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::store::TypeKey;
use crate::verbose_log;

/// Directory-name substrings that are always excluded from traversal:
/// dependency trees, generated output, and version-control metadata.
pub const DEFAULT_SKIPPED_DIRS: [&str; 7] = [
  "Godeps",
  "third_party",
  "_gopath",
  "_output",
  ".git",
  "vendor",
  "__init__.py",
];

/// Result of a file filtering decision.
pub struct FilterResult {
  /// Whether the file should be checked
  pub should_process: bool,
  /// Reason why the file is excluded (if any)
  pub reason: Option<String>,
}

impl FilterResult {
  /// The file passes this filter.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// The file is excluded, with a reason for diagnostics.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_process: false,
      reason: Some(reason.into()),
    }
  }
}

/// Trait for components that filter candidate files.
pub trait FileFilter: Send + Sync {
  /// Decides whether a file should be checked.
  fn should_process(&self, path: &Path) -> Result<FilterResult>;
}

/// Excludes files whose root-relative path contains any skipped substring.
pub struct SkipSubstringFilter {
  root: PathBuf,
  substrings: Vec<String>,
}

impl SkipSubstringFilter {
  pub fn new(root: PathBuf, substrings: Vec<String>) -> Self {
    Self { root, substrings }
  }
}

impl FileFilter for SkipSubstringFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    // The skip list applies to the path relative to the root, never to the
    // root's own location on disk.
    let relative = path.strip_prefix(&self.root).unwrap_or(path);
    let haystack = relative.to_string_lossy();

    for substring in &self.substrings {
      if haystack.contains(substring.as_str()) {
        verbose_log!("Skipping: {} (path contains `{}`)", path.display(), substring);
        return Ok(FilterResult::skip(format!("Path contains `{substring}`")));
      }
    }

    Ok(FilterResult::process())
  }
}

/// Excludes files whose resolved type key has no reference template.
///
/// This is a silent exclusion, not a failure: a file type the template
/// directory says nothing about is simply not governed.
pub struct TemplateKeyFilter {
  known_keys: HashSet<String>,
}

impl TemplateKeyFilter {
  pub fn new(known_keys: HashSet<String>) -> Self {
    Self { known_keys }
  }
}

impl FileFilter for TemplateKeyFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    let key = TypeKey::for_path(path);
    if self.known_keys.contains(key.as_str()) {
      Ok(FilterResult::process())
    } else {
      Ok(FilterResult::skip(format!("No reference template for {key}")))
    }
  }
}

/// Filter that combines multiple filters; the first exclusion wins.
pub struct CompositeFilter {
  filters: Vec<Box<dyn FileFilter>>,
}

impl CompositeFilter {
  pub fn new(filters: Vec<Box<dyn FileFilter>>) -> Self {
    Self { filters }
  }
}

impl FileFilter for CompositeFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    for filter in &self.filters {
      let result = filter.should_process(path)?;
      if !result.should_process {
        return Ok(result);
      }
    }
    Ok(FilterResult::process())
  }
}

/// Builds the standard candidate filter: skip substrings first, then the
/// template-key requirement.
pub fn create_default_filter(root: PathBuf, skipped_dirs: Vec<String>, known_keys: HashSet<String>) -> CompositeFilter {
  CompositeFilter::new(vec![
    Box::new(SkipSubstringFilter::new(root, skipped_dirs)),
    Box::new(TemplateKeyFilter::new(known_keys)),
  ])
}

#[cfg(test)]
mod tests {
  use super::*;

  fn skip_filter(substrings: &[&str]) -> SkipSubstringFilter {
    SkipSubstringFilter::new(
      PathBuf::from("/repo"),
      substrings.iter().map(|s| (*s).to_string()).collect(),
    )
  }

  #[test]
  fn test_skip_substring_filter_excludes_vendor() {
    let filter = skip_filter(&["vendor"]);

    let result = filter.should_process(Path::new("/repo/vendor/pkg/file.go")).unwrap();
    assert!(!result.should_process);
    assert!(result.reason.is_some());

    let result = filter.should_process(Path::new("/repo/pkg/file.go")).unwrap();
    assert!(result.should_process);
  }

  #[test]
  fn test_skip_substring_matches_anywhere_in_relative_path() {
    let filter = skip_filter(&["_output"]);

    let result = filter.should_process(Path::new("/repo/build/_output/gen.go")).unwrap();
    assert!(!result.should_process);
  }

  #[test]
  fn test_skip_substring_ignores_root_prefix() {
    // A repository that happens to live under a `vendor` directory is fine
    let filter = SkipSubstringFilter::new(PathBuf::from("/home/vendor/repo"), vec!["vendor".to_string()]);

    let result = filter.should_process(Path::new("/home/vendor/repo/pkg/file.go")).unwrap();
    assert!(result.should_process);
  }

  #[test]
  fn test_template_key_filter() {
    let mut keys = HashSet::new();
    keys.insert("go".to_string());
    keys.insert("Makefile".to_string());
    let filter = TemplateKeyFilter::new(keys);

    assert!(filter.should_process(Path::new("pkg/main.go")).unwrap().should_process);
    assert!(filter.should_process(Path::new("build/Makefile")).unwrap().should_process);

    let result = filter.should_process(Path::new("data.xyz")).unwrap();
    assert!(!result.should_process);
  }

  #[test]
  fn test_composite_filter_first_exclusion_wins() {
    let mut keys = HashSet::new();
    keys.insert("go".to_string());
    let composite = create_default_filter(PathBuf::from("/repo"), vec!["vendor".to_string()], keys);

    let result = composite.should_process(Path::new("/repo/vendor/main.go")).unwrap();
    assert!(!result.should_process);
    assert_eq!(result.reason.as_deref(), Some("Path contains `vendor`"));

    assert!(
      composite
        .should_process(Path::new("/repo/cmd/main.go"))
        .unwrap()
        .should_process
    );
    assert!(
      !composite
        .should_process(Path::new("/repo/readme.xyz"))
        .unwrap()
        .should_process
    );
  }
}
