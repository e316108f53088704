//! # Reference Store Module
//!
//! This module loads and exposes the mapping from a file-type key to its
//! expected boilerplate header. Templates live in a single directory as
//! `boilerplate.<key>.txt` files, where `<key>` is either a file extension
//! (`boilerplate.go.txt`) or an exact basename for extensionless files
//! (`boilerplate.Makefile.txt`).
//!
//! The store is built once at startup and never mutated afterwards, so it can
//! be read concurrently by any number of checker workers.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use boilercheck::store::{ReferenceStore, TypeKey};
//!
//! # fn main() -> anyhow::Result<()> {
//! let store = ReferenceStore::load(Path::new("hack/boilerplate"))?;
//!
//! let key = TypeKey::for_path(Path::new("pkg/server/server.go"));
//! if let Some(reference) = store.lookup(&key) {
//!   println!("expecting {} header lines", reference.line_count());
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::verbose_log;

/// Glob pattern selecting reference template files inside the template
/// directory.
const TEMPLATE_GLOB: &str = "boilerplate.*.txt";

/// The lookup discriminator selecting which reference template applies to a
/// file.
///
/// Files with an extension are keyed by the lowercased extension (everything
/// after the last dot); extensionless files are keyed by their exact
/// basename.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKey {
  /// Lowercased file extension without the leading dot (e.g. `go`, `py`).
  Extension(String),
  /// Exact basename of an extensionless file (e.g. `Makefile`).
  Basename(String),
}

impl TypeKey {
  /// Resolves the type key for a candidate file path.
  ///
  /// The extension, when present and non-empty, wins; otherwise the exact
  /// basename is used. Resolution is deterministic and does not touch the
  /// filesystem.
  pub fn for_path(path: &Path) -> Self {
    match path.extension().and_then(|ext| ext.to_str()).filter(|ext| !ext.is_empty()) {
      Some(ext) => Self::Extension(ext.to_lowercase()),
      None => Self::Basename(
        path
          .file_name()
          .map(|name| name.to_string_lossy().into_owned())
          .unwrap_or_default(),
      ),
    }
  }

  /// The raw key string used for store lookups.
  pub fn as_str(&self) -> &str {
    match self {
      Self::Extension(key) | Self::Basename(key) => key,
    }
  }
}

impl fmt::Display for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Extension(key) => write!(f, "extension `{key}`"),
      Self::Basename(key) => write!(f, "basename `{key}`"),
    }
  }
}

/// An expected boilerplate header: an ordered sequence of lines with the
/// trailing line terminators stripped. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTemplate {
  lines: Vec<String>,
}

impl ReferenceTemplate {
  /// Builds a template from raw file text.
  ///
  /// Interior empty lines are preserved; the final line terminator is not
  /// represented (a trailing newline does not produce an empty last line).
  pub fn from_text(text: &str) -> Self {
    Self {
      lines: text.lines().map(str::to_owned).collect(),
    }
  }

  /// The expected header lines, in order.
  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  /// Number of lines a conforming file must start with.
  pub fn line_count(&self) -> usize {
    self.lines.len()
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }
}

/// Read-only mapping from type key to reference template.
#[derive(Debug, Default)]
pub struct ReferenceStore {
  templates: HashMap<String, ReferenceTemplate>,
}

impl ReferenceStore {
  /// Loads every `boilerplate.<key>.txt` file from the template directory.
  ///
  /// # Errors
  ///
  /// Any declared template that cannot be read is fatal: there is no
  /// meaningful partial result for a compliance gate, so the caller must
  /// abort before checking anything.
  pub fn load(template_dir: &Path) -> Result<Self> {
    let pattern = template_dir.join(TEMPLATE_GLOB);
    let pattern = pattern
      .to_str()
      .with_context(|| format!("Template directory path is not valid UTF-8: {}", template_dir.display()))?;

    let mut templates = HashMap::new();
    let entries =
      glob::glob(pattern).with_context(|| format!("Invalid template pattern for {}", template_dir.display()))?;

    for entry in entries {
      let path = entry.with_context(|| format!("Failed to scan template directory {}", template_dir.display()))?;
      let Some(key) = template_key(&path) else {
        continue;
      };

      let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read boilerplate template {}", path.display()))?;

      verbose_log!("Loaded reference template `{}` from {}", key, path.display());
      templates.insert(key, ReferenceTemplate::from_text(&text));
    }

    Ok(Self { templates })
  }

  /// Exact-key retrieval; `None` means no template governs this type.
  pub fn lookup(&self, key: &TypeKey) -> Option<&ReferenceTemplate> {
    self.templates.get(key.as_str())
  }

  pub fn contains(&self, key: &TypeKey) -> bool {
    self.templates.contains_key(key.as_str())
  }

  /// The set of known template keys, used to fix the candidate set before any
  /// checks run.
  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.templates.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.templates.len()
  }

  pub fn is_empty(&self) -> bool {
    self.templates.is_empty()
  }
}

/// Extracts the `<key>` token from a `boilerplate.<key>.txt` file name.
///
/// The key is the segment between the first and second dot, kept verbatim;
/// basename templates such as `boilerplate.Makefile.txt` are matched exactly.
fn template_key(path: &Path) -> Option<String> {
  let name = path.file_name()?.to_str()?;
  name.split('.').nth(1).map(str::to_owned)
}
