#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;

/// Reference template for Go files, with the year placeholder.
pub const GO_TEMPLATE: &str = "// Copyright YEAR Acme\n// Licensed under the Apache License, Version 2.0\n";

/// Reference template for Python files.
pub const PY_TEMPLATE: &str = "# Copyright YEAR Acme\n# Licensed under the Apache License, Version 2.0\n";

/// A Go header that conforms to [`GO_TEMPLATE`] once the year is normalized.
pub const GO_CONFORMING: &str =
  "// Copyright 2017 Acme\n// Licensed under the Apache License, Version 2.0\n\npackage main\n";

/// A Python header that conforms to [`PY_TEMPLATE`].
pub const PY_CONFORMING: &str = "# Copyright 2018 Acme\n# Licensed under the Apache License, Version 2.0\n\nx = 1\n";

/// Writes a file under `root`, creating parent directories as needed.
pub fn write_file(root: &Path, relative: &str, content: &str) {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).expect("create parent directories");
  }
  fs::write(&path, content).expect("write fixture file");
}

/// Creates the default template directory with Go and Python templates.
pub fn setup_templates(root: &Path) -> PathBuf {
  write_file(root, "hack/boilerplate/boilerplate.go.txt", GO_TEMPLATE);
  write_file(root, "hack/boilerplate/boilerplate.py.txt", PY_TEMPLATE);
  root.join("hack/boilerplate")
}

/// Builds a boilercheck command pointed at the given root.
pub fn boilercheck(root: &Path) -> Command {
  let mut cmd = Command::cargo_bin("boilercheck").expect("boilercheck binary");
  cmd.arg("--rootdir").arg(root);
  cmd
}
