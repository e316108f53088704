//! # Checker Module
//!
//! Orchestrates a compliance run: fixes the candidate set, fans the per-file
//! header checks out over rayon, and aggregates the nonconforming set.
//!
//! The module is organized into submodules:
//! - [`matcher`] - the pure pass/fail decision pipeline
//! - [`preamble`] - type-specific preamble stripping strategies
//! - [`file_collector`] - root traversal and explicit-list normalization
//!
//! Per-file checks are independent of each other; the only shared state is
//! the read-only [`ReferenceStore`] and the report sink. The final
//! nonconforming list is sorted, so the outcome is deterministic regardless
//! of worker scheduling.

mod file_collector;
pub mod matcher;
pub mod preamble;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use anyhow::Result;
pub use file_collector::FileCollector;
pub use matcher::{DEFAULT_ACCEPTED_YEARS, Matcher, Mismatch, Verdict, YEAR_PLACEHOLDER};
pub use preamble::PreambleStyle;
use rayon::prelude::*;
use tracing::{debug, error, trace};

use crate::diff::DiffManager;
use crate::file_filter::{CompositeFilter, DEFAULT_SKIPPED_DIRS, FileFilter, create_default_filter};
use crate::report::{FileReport, FileStatus};
use crate::store::{ReferenceStore, TypeKey};
use crate::verbose_log;

/// Configuration for creating a [`Checker`].
pub struct CheckerConfig {
  pub store: ReferenceStore,
  pub root: PathBuf,

  /// Directory-name substrings excluded from the candidate set
  pub skipped_dirs: Vec<String>,

  /// Closed set of calendar years the matcher neutralizes to `YEAR`
  pub accepted_years: Vec<String>,

  /// Optional diff rendering for nonconforming headers
  pub diff_manager: Option<DiffManager>,
}

impl CheckerConfig {
  /// Creates a config with the built-in skip list and accepted years.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// CheckerConfig {
  ///     accepted_years: vec!["2024".to_string()],
  ///     ..CheckerConfig::new(store, root)
  /// }
  /// ```
  pub fn new(store: ReferenceStore, root: PathBuf) -> Self {
    Self {
      store,
      root,
      skipped_dirs: DEFAULT_SKIPPED_DIRS.iter().map(|dir| (*dir).to_string()).collect(),
      accepted_years: DEFAULT_ACCEPTED_YEARS.iter().map(|year| (*year).to_string()).collect(),
      diff_manager: None,
    }
  }
}

/// Runs header checks over a fixed candidate set.
pub struct Checker {
  store: ReferenceStore,
  matcher: Matcher,
  root: PathBuf,
  file_filter: CompositeFilter,
  collector: FileCollector,
  diff_manager: DiffManager,

  /// Collected per-file records, available after [`run`](Self::run) for
  /// report generation
  pub file_reports: Mutex<Vec<FileReport>>,
}

impl Checker {
  /// Files handed to one rayon task at a time, to amortize scheduling
  /// overhead.
  const BATCH_SIZE: usize = 8;

  /// Creates a checker from the given configuration.
  ///
  /// # Errors
  ///
  /// Returns an error when the accepted-years set is empty or does not
  /// compile into a pattern.
  pub fn new(config: CheckerConfig) -> Result<Self> {
    let matcher = Matcher::new(&config.accepted_years)?;
    let known_keys = config.store.keys().map(str::to_owned).collect();
    let file_filter = create_default_filter(config.root.clone(), config.skipped_dirs.clone(), known_keys);
    let collector = FileCollector::new(config.root.clone(), config.skipped_dirs);
    let diff_manager = config.diff_manager.unwrap_or_else(|| DiffManager::new(false, None));

    Ok(Self {
      store: config.store,
      matcher,
      root: config.root,
      file_filter,
      collector,
      diff_manager,
      file_reports: Mutex::new(Vec::new()),
    })
  }

  /// Fixes the candidate set for this run.
  ///
  /// With an empty `explicit` list the root is walked recursively; otherwise
  /// the explicit paths are normalized against the root and traversal is
  /// skipped. Either way the skip-substring and template-key filters apply,
  /// symlinks are dropped, and the result is sorted and deduplicated.
  pub fn collect_candidates(&self, explicit: &[String]) -> Result<Vec<PathBuf>> {
    let all_files = if explicit.is_empty() {
      self.collector.walk_root()?
    } else {
      self.collector.normalize_explicit(explicit)
    };

    let mut candidates = Vec::with_capacity(all_files.len());
    for path in all_files {
      if let Ok(metadata) = fs::symlink_metadata(&path)
        && metadata.file_type().is_symlink()
      {
        trace!("Skipping: {} (symlink)", path.display());
        continue;
      }

      let result = self.file_filter.should_process(&path)?;
      if !result.should_process {
        trace!(
          "Skipping: {} ({})",
          path.display(),
          result.reason.as_deref().unwrap_or("unknown reason")
        );
        continue;
      }

      candidates.push(path);
    }

    candidates.sort();
    candidates.dedup();

    debug!("Selected {} candidate files", candidates.len());
    Ok(candidates)
  }

  /// Checks every candidate and returns the sorted nonconforming set.
  ///
  /// Per-file records accumulate in [`file_reports`](Self::file_reports);
  /// nothing is printed here, so callers control the output contract.
  pub fn run(&self, candidates: Vec<PathBuf>) -> Vec<PathBuf> {
    if candidates.is_empty() {
      debug!("No files to check");
      return Vec::new();
    }

    let candidate_count = candidates.len();
    let process_start = Instant::now();

    let batches: Vec<Vec<PathBuf>> = candidates.chunks(Self::BATCH_SIZE).map(<[PathBuf]>::to_vec).collect();
    debug!(
      "Checking {} files in {} batches (batch size: {})",
      candidate_count,
      batches.len(),
      Self::BATCH_SIZE
    );

    let batch_reports: Vec<Vec<FileReport>> = batches
      .into_par_iter()
      .map(|batch| batch.iter().map(|path| self.check_file(path)).collect())
      .collect();

    let mut nonconforming = Vec::new();
    let mut reports = Vec::with_capacity(candidate_count);
    for batch in batch_reports {
      for report in batch {
        if report.status.is_failure() {
          nonconforming.push(report.path.clone());
        }
        reports.push(report);
      }
    }
    nonconforming.sort();

    debug!(
      "Checked {} files in {}ms",
      candidate_count,
      process_start.elapsed().as_millis()
    );

    self.file_reports.lock().expect("mutex poisoned").extend(reports);

    nonconforming
  }

  /// Checks one candidate file.
  fn check_file(&self, path: &Path) -> FileReport {
    let key = TypeKey::for_path(path);

    let Some(reference) = self.store.lookup(&key) else {
      // Selection guarantees a template exists; reaching this branch means
      // the candidate set was built against a different store.
      error!(
        "No reference template for {} ({}); treating as nonconforming",
        path.display(),
        key
      );
      return FileReport::new(
        path.to_path_buf(),
        FileStatus::MissingTemplate,
        Some(format!("no reference template for {key}")),
      );
    };

    let content = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(e) => {
        debug!("Failed to read {}: {}", path.display(), e);
        return FileReport::new(path.to_path_buf(), FileStatus::Unreadable, Some(e.to_string()));
      }
    };

    match self.matcher.evaluate(&content, &key, reference) {
      Verdict::Pass => FileReport::new(path.to_path_buf(), FileStatus::Conforming, None),
      Verdict::Fail(mismatch) => {
        verbose_log!("Nonconforming: {} ({})", path.display(), mismatch);

        if self.diff_manager.is_active() {
          let observed = self.matcher.observed_window(&content, &key, reference.line_count());
          if let Err(e) = self
            .diff_manager
            .display_diff(path, &observed.join("\n"), &reference.lines().join("\n"))
          {
            eprintln!("Warning: Failed to render diff for {}: {}", path.display(), e);
          }
        }

        FileReport::new(path.to_path_buf(), FileStatus::Nonconforming, Some(mismatch.to_string()))
      }
    }
  }
}
