//! # Preamble Stripping Module
//!
//! Some file types legitimately carry lines before their boilerplate header:
//! Go sources may open with build constraints, scripts with a shebang. Those
//! preambles must be removed before the header comparison.
//!
//! Each strategy is a pure prefix transformation over the content string: it
//! either returns a suffix slice with the preamble removed, or the input
//! unchanged when the exact pattern is not present at the very start. Nothing
//! is ever stripped past the first non-preamble line, and a strategy applies
//! at most once.

use crate::store::TypeKey;

/// Line prefixes that mark a Go build constraint.
const BUILD_CONSTRAINT_MARKERS: [&str; 2] = ["// +build", "//go:build"];

/// Preamble handling selected by a candidate's type key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreambleStyle {
  /// Build-constraint block followed by exactly one blank line (Go).
  BuildConstraints,
  /// `#!` line followed by one or more blank lines (shell, Python).
  Shebang,
  /// No preamble is recognized for this type.
  None,
}

impl PreambleStyle {
  /// Maps a type key to its stripping strategy.
  pub fn for_key(key: &TypeKey) -> Self {
    match key {
      TypeKey::Extension(ext) => match ext.as_str() {
        "go" => Self::BuildConstraints,
        "sh" | "py" => Self::Shebang,
        _ => Self::None,
      },
      TypeKey::Basename(_) => Self::None,
    }
  }

  /// Applies the strategy to the start of `content`.
  ///
  /// Returns the content with the preamble removed, or `content` itself when
  /// the pattern does not match exactly.
  pub fn strip(self, content: &str) -> &str {
    match self {
      Self::BuildConstraints => strip_build_constraints(content),
      Self::Shebang => strip_shebang(content),
      Self::None => content,
    }
  }
}

fn is_build_constraint(line: &str) -> bool {
  BUILD_CONSTRAINT_MARKERS.iter().any(|marker| line.starts_with(marker))
}

/// Strips a leading run of one-or-more build-constraint lines followed by
/// exactly one blank line.
///
/// A constraint run not followed by a lone blank line leaves the content
/// untouched; only the exact pattern is ever stripped.
fn strip_build_constraints(content: &str) -> &str {
  let mut rest = content;
  let mut stripped_any = false;

  while let Some(newline) = rest.find('\n') {
    if is_build_constraint(&rest[..newline]) {
      rest = &rest[newline + 1..];
      stripped_any = true;
    } else {
      break;
    }
  }

  if !stripped_any {
    return content;
  }

  // The constraint block only counts when one blank line separates it from
  // the header.
  if let Some(newline) = rest.find('\n')
    && rest[..newline].is_empty()
  {
    return &rest[newline + 1..];
  }

  content
}

/// Strips a leading `#!` line together with the blank lines that follow it.
///
/// At least one blank line must separate the shebang from the header;
/// otherwise nothing is stripped and the shebang line itself is compared
/// against the reference (and fails).
fn strip_shebang(content: &str) -> &str {
  if !content.starts_with("#!") {
    return content;
  }

  let Some(newline) = content.find('\n') else {
    return content;
  };

  let mut rest = &content[newline + 1..];
  let mut saw_blank = false;

  while let Some(next) = rest.find('\n') {
    if rest[..next].is_empty() {
      rest = &rest[next + 1..];
      saw_blank = true;
    } else {
      break;
    }
  }

  if saw_blank { rest } else { content }
}
