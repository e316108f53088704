//! # Tree Printing Module
//!
//! Renders the candidate set as a directory tree, for `--plan-tree` mode.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A directory or file node; files carry no children.
#[derive(Debug, Default)]
struct Node {
  children: BTreeMap<String, Node>,
  is_file: bool,
}

impl Node {
  /// Inserts a path, creating intermediate directories as needed.
  fn add(&mut self, path: &Path) {
    let mut node = self;
    let components: Vec<String> = path
      .components()
      .map(|component| component.as_os_str().to_string_lossy().into_owned())
      .collect();

    for (index, component) in components.iter().enumerate() {
      node = node.children.entry(component.clone()).or_default();
      if index == components.len() - 1 {
        node.is_file = true;
      }
    }
  }

  fn render_into(&self, prefix: &str, lines: &mut Vec<String>) {
    let last_index = self.children.len().saturating_sub(1);

    for (index, (name, child)) in self.children.iter().enumerate() {
      let is_last = index == last_index;
      let connector = if is_last { "└── " } else { "├── " };
      lines.push(format!("{prefix}{connector}{name}"));

      if !child.children.is_empty() {
        let child_prefix = if is_last {
          format!("{prefix}    ")
        } else {
          format!("{prefix}│   ")
        };
        child.render_into(&child_prefix, lines);
      }
    }
  }

  fn directory_count(&self) -> usize {
    self
      .children
      .values()
      .map(|child| {
        let own = usize::from(!child.children.is_empty() || !child.is_file);
        own + child.directory_count()
      })
      .sum()
  }
}

/// Renders a list of file paths as a tree rooted at `base_path`.
///
/// Paths under the base are shown relative to it; the summary line counts
/// directories and files separately.
pub fn print_tree(files: &[PathBuf], base_path: Option<&Path>) -> String {
  if files.is_empty() {
    return "(no files)\n".to_string();
  }

  let mut root = Node::default();
  for file in files {
    let relative = base_path
      .and_then(|base| file.strip_prefix(base).ok())
      .unwrap_or(file.as_path());
    root.add(relative);
  }

  let mut lines = vec![match base_path {
    Some(base) => base.display().to_string(),
    None => ".".to_string(),
  }];
  root.render_into("", &mut lines);

  let dir_count = root.directory_count();
  lines.push(String::new());
  lines.push(format!(
    "{} {}, {} {}",
    dir_count,
    if dir_count == 1 { "directory" } else { "directories" },
    files.len(),
    if files.len() == 1 { "file" } else { "files" }
  ));

  lines.join("\n")
}
