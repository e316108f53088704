//! # Report Module
//!
//! Per-file check records and the optional machine-readable JSON report.
//! The printed stdout contract never depends on this module; the JSON report
//! is a supplementary artifact for CI dashboards.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

/// Outcome of checking one candidate file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
  /// The header matches the reference template.
  Conforming,
  /// The header comparison failed.
  Nonconforming,
  /// The file could not be read; counts as nonconforming.
  Unreadable,
  /// No template was found at check time. Selection prevents this by
  /// construction, so seeing it means an implementation defect; counts as
  /// nonconforming rather than silently passing.
  MissingTemplate,
}

impl FileStatus {
  /// Whether this status contributes to the nonconforming set.
  pub const fn is_failure(self) -> bool {
    !matches!(self, Self::Conforming)
  }
}

/// Record of one checked file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  pub status: FileStatus,
  /// Diagnostic detail (mismatch reason, I/O error), when available
  #[serde(skip_serializing_if = "Option::is_none")]
  pub detail: Option<String>,
}

impl FileReport {
  pub const fn new(path: PathBuf, status: FileStatus, detail: Option<String>) -> Self {
    Self { path, status, detail }
  }
}

/// Serialize paths as display strings rather than platform byte sequences.
mod path_serialization {
  use serde::Serializer;

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }
}

/// Aggregate figures for one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
  pub total_files: usize,
  pub conforming: usize,
  pub nonconforming: usize,
  pub duration_ms: u64,
  pub generated_at: String,
}

impl RunSummary {
  pub fn from_reports(reports: &[FileReport], elapsed: Duration) -> Self {
    let nonconforming = reports.iter().filter(|report| report.status.is_failure()).count();
    Self {
      total_files: reports.len(),
      conforming: reports.len() - nonconforming,
      nonconforming,
      duration_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
      generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    }
  }
}

/// Writes the JSON report document.
pub struct ReportGenerator<'a> {
  output_path: &'a std::path::Path,
}

impl<'a> ReportGenerator<'a> {
  pub const fn new(output_path: &'a std::path::Path) -> Self {
    Self { output_path }
  }

  /// Serializes the summary and per-file records, sorted by path for a
  /// deterministic artifact.
  pub fn generate(&self, files: &[FileReport], summary: &RunSummary) -> Result<()> {
    #[derive(Serialize)]
    struct Document<'d> {
      summary: &'d RunSummary,
      files: Vec<&'d FileReport>,
    }

    let mut sorted: Vec<&FileReport> = files.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    let document = Document {
      summary,
      files: sorted,
    };

    let content = serde_json::to_string_pretty(&document).with_context(|| "Failed to serialize report")?;
    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write report to {}", self.output_path.display()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_reports() -> Vec<FileReport> {
    vec![
      FileReport::new(PathBuf::from("b.go"), FileStatus::Nonconforming, Some("line 1".to_string())),
      FileReport::new(PathBuf::from("a.go"), FileStatus::Conforming, None),
      FileReport::new(PathBuf::from("c.sh"), FileStatus::Unreadable, None),
    ]
  }

  #[test]
  fn test_summary_counts_failures() {
    let summary = RunSummary::from_reports(&sample_reports(), Duration::from_millis(12));
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.conforming, 1);
    assert_eq!(summary.nonconforming, 2);
    assert_eq!(summary.duration_ms, 12);
  }

  #[test]
  fn test_missing_template_is_a_failure() {
    assert!(FileStatus::MissingTemplate.is_failure());
    assert!(FileStatus::Unreadable.is_failure());
    assert!(!FileStatus::Conforming.is_failure());
  }

  #[test]
  fn test_json_report_is_sorted_by_path() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = temp.path().join("report.json");

    let reports = sample_reports();
    let summary = RunSummary::from_reports(&reports, Duration::from_millis(1));
    ReportGenerator::new(&output).generate(&reports, &summary).expect("generate");

    let content = std::fs::read_to_string(&output).expect("read report");
    let a = content.find("a.go").expect("a.go present");
    let b = content.find("b.go").expect("b.go present");
    let c = content.find("c.sh").expect("c.sh present");
    assert!(a < b && b < c);
    assert!(content.contains("\"nonconforming\": 2"));
  }
}
