//! Edge cases around configuration, reports, and diff output.

mod common;

use common::{GO_CONFORMING, boilercheck, setup_templates, write_file};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_file_accepted_years() {
  let temp = tempdir().expect("tempdir");
  let root = temp.path();
  setup_templates(root);

  write_file(root, ".boilercheck.toml", "accepted-years = [\"2024\"]\n");
  write_file(
    root,
    "modern.go",
    "// Copyright 2024 Acme\n// Licensed under the Apache License, Version 2.0\npackage main\n",
  );

  boilercheck(root)
    .assert()
    .success()
    .stdout(predicate::str::is_empty());

  // --no-config restores the built-in year set, which rejects 2024
  boilercheck(root).arg("--no-config").assert().failure().code(1);
}

#[test]
fn test_config_file_extra_skipped_dirs() {
  let temp = tempdir().expect("tempdir");
  let root = temp.path();
  setup_templates(root);

  write_file(root, ".boilercheck.toml", "skipped-dirs = [\"generated\"]\n");
  write_file(root, "generated/api.go", "package api\n");
  write_file(root, "pkg/good.go", GO_CONFORMING);

  boilercheck(root)
    .assert()
    .success()
    .stdout(predicate::str::is_empty());
}

#[test]
fn test_invalid_config_is_fatal() {
  let temp = tempdir().expect("tempdir");
  let root = temp.path();
  setup_templates(root);

  write_file(root, ".boilercheck.toml", "accepted-years = [\"twenty\"]\n");
  write_file(root, "pkg/good.go", GO_CONFORMING);

  boilercheck(root).assert().failure();
}

#[test]
fn test_skip_flag_extends_builtin_set() {
  let temp = tempdir().expect("tempdir");
  let root = temp.path();
  setup_templates(root);

  write_file(root, "experiments/bad.go", "package experiments\n");

  boilercheck(root).assert().failure().code(1);

  boilercheck(root)
    .args(["--skip", "experiments"])
    .assert()
    .success()
    .stdout(predicate::str::is_empty());
}

#[test]
fn test_json_report_is_written() {
  let temp = tempdir().expect("tempdir");
  let root = temp.path();
  setup_templates(root);

  write_file(root, "pkg/bad.go", "package pkg\n");
  write_file(root, "pkg/good.go", GO_CONFORMING);

  let report_path = root.join("report.json");
  boilercheck(root)
    .arg("--report-json")
    .arg(&report_path)
    .assert()
    .failure()
    .code(1);

  let content = std::fs::read_to_string(&report_path).expect("report written");
  let document: serde_json::Value = serde_json::from_str(&content).expect("valid json");

  assert_eq!(document["summary"]["total_files"], 2);
  assert_eq!(document["summary"]["nonconforming"], 1);

  let files = document["files"].as_array().expect("files array");
  assert_eq!(files.len(), 2);
  assert_eq!(files[0]["status"], "nonconforming");
  assert_eq!(files[1]["status"], "conforming");
}

#[test]
fn test_saved_diff_describes_failing_header() {
  let temp = tempdir().expect("tempdir");
  let root = temp.path();
  setup_templates(root);

  write_file(root, "pkg/bad.go", "// wrong line\npackage pkg\n");

  let diff_path = root.join("headers.diff");
  boilercheck(root)
    .arg("--save-diff")
    .arg(&diff_path)
    .assert()
    .failure()
    .code(1);

  let diff = std::fs::read_to_string(&diff_path).expect("diff written");
  assert!(diff.contains("Header diff for"));
  assert!(diff.contains("bad.go"));
  assert!(diff.contains("+// Copyright YEAR Acme"));
  assert!(diff.contains("-// wrong line"));
}

#[test]
fn test_show_diff_goes_to_stderr_not_stdout() {
  let temp = tempdir().expect("tempdir");
  let root = temp.path();
  setup_templates(root);

  write_file(root, "pkg/bad.go", "package pkg\n");

  let assert = boilercheck(root).arg("--show-diff").assert().failure().code(1);

  let output = assert.get_output();
  let stdout = String::from_utf8_lossy(&output.stdout);
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(stdout, "1 files have incorrect boilerplate headers:\npkg/bad.go\n");
  assert!(stderr.contains("Header diff for"));
}

#[test]
fn test_non_utf8_candidate_counts_as_nonconforming() {
  let temp = tempdir().expect("tempdir");
  let root = temp.path();
  setup_templates(root);

  std::fs::create_dir_all(root.join("pkg")).expect("mkdir");
  std::fs::write(root.join("pkg/binary.go"), [0xff, 0xfe, 0x00, 0x42]).expect("write");

  let assert = boilercheck(root).assert().failure().code(1);
  let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
  assert_eq!(stdout, "1 files have incorrect boilerplate headers:\npkg/binary.go\n");
}

#[test]
fn test_verbose_summary_on_stderr() {
  let temp = tempdir().expect("tempdir");
  let root = temp.path();
  setup_templates(root);

  write_file(root, "pkg/good.go", GO_CONFORMING);

  let assert = boilercheck(root).arg("-v").assert().success();

  let output = assert.get_output();
  let stdout = String::from_utf8_lossy(&output.stdout);
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert!(stdout.is_empty());
  assert!(stderr.contains("1 conforming"));
}
