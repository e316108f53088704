//! # Logging Module
//!
//! Logging utilities for the boilercheck tool. Verbose diagnostics go to
//! stderr so that stdout stays reserved for the machine-facing check result,
//! which CI pipelines consume directly.
//!
//! ## Example
//!
//! ```rust
//! use boilercheck::logging::{ColorMode, set_verbose};
//! use boilercheck::verbose_log;
//!
//! // Enable verbose logging
//! set_verbose();
//!
//! // Set color mode to Auto (owo-colors' automatic TTY detection)
//! ColorMode::Auto.apply();
//!
//! // Log a diagnostic message (goes to stderr)
//! verbose_log!("Checking file: {}", "example.go");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};

/// Logs a message to stderr if verbose mode is enabled.
///
/// Used for detailed diagnostics that are only shown when verbose mode is
/// enabled via [`set_verbose`]. Same format string syntax as [`eprintln!`].
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}
