//! # Matcher Module
//!
//! The decision core of the checker: given one file's content and the
//! reference template for its type, decide pass/fail through a fixed pipeline
//! of textual transformations.
//!
//! 1. Strip the type-specific preamble (see [`PreambleStyle`]).
//! 2. Split into lines and fail if the content is shorter than the reference.
//! 3. Truncate to the reference length; a longer body below the header is
//!    normal.
//! 4. Fail if any retained line still contains the literal `YEAR` placeholder.
//! 5. Rewrite accepted calendar years to `YEAR` on the first dated line only.
//! 6. Compare line-for-line against the reference.
//!
//! The pipeline is pure: no I/O, no shared state, safe to call from any
//! number of worker threads.

use std::borrow::Cow;

use anyhow::{Context, Result, bail};
use regex::Regex;
use thiserror::Error;

use super::preamble::PreambleStyle;
use crate::store::{ReferenceTemplate, TypeKey};

/// Placeholder token that reference templates carry in their dated line. A
/// real file must never contain it.
pub const YEAR_PLACEHOLDER: &str = "YEAR";

/// Calendar years accepted in real headers when no override is configured.
pub const DEFAULT_ACCEPTED_YEARS: [&str; 2] = ["2017", "2018"];

/// Why a candidate's header failed the comparison.
///
/// The minimal contract is the boolean in [`Matcher::passes`]; this enum is
/// the diagnostic surface used for verbose output and diffs. Line numbers are
/// 1-based and count from the first post-preamble line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Mismatch {
  #[error("content has {content} lines but the reference header needs {reference}")]
  TooShort { content: usize, reference: usize },

  #[error("line {line} contains the literal `YEAR` placeholder")]
  PlaceholderLeak { line: usize },

  #[error("line {line} does not match the reference header")]
  LineMismatch { line: usize },
}

/// Outcome of one header evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
  Pass,
  Fail(Mismatch),
}

impl Verdict {
  pub const fn is_pass(&self) -> bool {
    matches!(self, Self::Pass)
  }
}

/// The header comparison engine.
///
/// Holds the compiled accepted-years pattern; everything else is passed in
/// per call, so a single matcher serves all files of a run concurrently.
#[derive(Debug)]
pub struct Matcher {
  accepted_years: Regex,
}

impl Matcher {
  /// Builds a matcher that recognizes the given closed set of calendar years.
  ///
  /// # Errors
  ///
  /// Fails when the set is empty (an empty alternation would match between
  /// every character) or the assembled pattern does not compile.
  pub fn new(accepted_years: &[String]) -> Result<Self> {
    if accepted_years.is_empty() {
      bail!("At least one accepted year is required");
    }

    let alternation = accepted_years
      .iter()
      .map(|year| regex::escape(year))
      .collect::<Vec<_>>()
      .join("|");
    let accepted_years =
      Regex::new(&format!("({alternation})")).with_context(|| "Failed to compile accepted-years pattern")?;

    Ok(Self { accepted_years })
  }

  /// Evaluates one file's content against its reference template.
  pub fn evaluate(&self, content: &str, key: &TypeKey, reference: &ReferenceTemplate) -> Verdict {
    let stripped = PreambleStyle::for_key(key).strip(content);
    let lines: Vec<&str> = stripped.lines().collect();

    if reference.line_count() > lines.len() {
      return Verdict::Fail(Mismatch::TooShort {
        content: lines.len(),
        reference: reference.line_count(),
      });
    }

    // Only the header-sized window participates from here on
    let window = &lines[..reference.line_count()];

    if let Some(index) = window.iter().position(|line| line.contains(YEAR_PLACEHOLDER)) {
      return Verdict::Fail(Mismatch::PlaceholderLeak { line: index + 1 });
    }

    let mut transformed: Vec<Cow<'_, str>> = window.iter().map(|line| Cow::Borrowed(*line)).collect();
    self.neutralize_first_dated_line(&mut transformed);

    for (index, (expected, actual)) in reference.lines().iter().zip(transformed.iter()).enumerate() {
      if expected.as_str() != actual.as_ref() {
        return Verdict::Fail(Mismatch::LineMismatch { line: index + 1 });
      }
    }

    Verdict::Pass
  }

  /// The minimal pass/fail contract.
  pub fn passes(&self, content: &str, key: &TypeKey, reference: &ReferenceTemplate) -> bool {
    self.evaluate(content, key, reference).is_pass()
  }

  /// Reproduces the transformed header window a failing file was compared
  /// with, for diff rendering. Shorter-than-reference content yields a
  /// shorter window.
  pub fn observed_window(&self, content: &str, key: &TypeKey, reference_len: usize) -> Vec<String> {
    let stripped = PreambleStyle::for_key(key).strip(content);
    let mut window: Vec<Cow<'_, str>> = stripped.lines().take(reference_len).map(Cow::Borrowed).collect();
    self.neutralize_first_dated_line(&mut window);
    window.into_iter().map(Cow::into_owned).collect()
  }

  /// Rewrites accepted years to the placeholder on the first line that
  /// contains any, then stops.
  ///
  /// Exactly one line is ever rewritten; a template expecting `YEAR` on a
  /// second dated line never matches real content. Known template-authoring
  /// constraint, not subject to repair here.
  fn neutralize_first_dated_line(&self, lines: &mut [Cow<'_, str>]) {
    if let Some(index) = lines.iter().position(|line| self.accepted_years.is_match(line)) {
      let rewritten = self.accepted_years.replace_all(&lines[index], YEAR_PLACEHOLDER).into_owned();
      lines[index] = Cow::Owned(rewritten);
    }
  }
}
