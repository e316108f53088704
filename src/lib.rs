//! # boilercheck
//!
//! A tool that verifies every governed source file under a root directory
//! begins with the exact license boilerplate header for its file type.
//!
//! `boilercheck` is a pre-commit/CI gate, not a formatter: it never modifies
//! files. A file conforms when, after stripping a recognized preamble
//! (shebang, Go build constraints) and neutralizing the copyright year, its
//! leading lines are identical to the reference template for its type.
//!
//! ## Features
//!
//! * Reference templates per file type, loaded from `boilerplate.<key>.txt`
//!   files (extension keys for normal files, exact basenames for
//!   extensionless ones)
//! * Preamble-aware comparison: shebang and build-constraint blocks are
//!   stripped before matching
//! * Year normalization: a closed set of accepted years is rewritten to the
//!   `YEAR` placeholder on the first dated header line
//! * Deterministic reporting: failing paths are printed sorted, regardless of
//!   how the parallel checks complete
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use boilercheck::checker::{Checker, CheckerConfig};
//! use boilercheck::store::ReferenceStore;
//!
//! fn main() -> anyhow::Result<()> {
//!     let store = ReferenceStore::load(std::path::Path::new("hack/boilerplate"))?;
//!     let checker = Checker::new(CheckerConfig::new(store, PathBuf::from(".")))?;
//!
//!     let candidates = checker.collect_candidates(&[])?;
//!     let nonconforming = checker.run(candidates);
//!
//!     for path in &nonconforming {
//!         println!("{}", path.display());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`checker`] - candidate selection and the header-matching pipeline
//! * [`store`] - reference template loading and type-key resolution
//! * [`logging`] - logging utilities for diagnostic output
//!
//! [`checker`]: crate::checker
//! [`store`]: crate::store
//! [`logging`]: crate::logging

// Re-export modules for public API
pub mod checker;
pub mod config;
pub mod diff;
pub mod file_filter;
pub mod logging;
pub mod output;
pub mod report;
pub mod store;
pub mod tree;
