//! # Configuration Module
//!
//! Optional configuration for boilercheck, allowing a repository to pin its
//! template directory, accepted years, and extra skipped directories.
//!
//! Configuration can be specified in a `.boilercheck.toml` file at the root
//! or via the `BOILERCHECK_CONFIG` environment variable. CLI flags always
//! take precedence over configuration values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::verbose_log;

/// The default config file name, discovered at the root directory.
pub const DEFAULT_CONFIG_FILENAME: &str = ".boilercheck.toml";

/// Environment variable for specifying a config file path.
pub const CONFIG_ENV_VAR: &str = "BOILERCHECK_CONFIG";

/// Repository-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
  /// Directory holding `boilerplate.<key>.txt` templates, resolved relative
  /// to the root when not absolute.
  #[serde(default)]
  pub boilerplate_dir: Option<PathBuf>,

  /// Calendar years accepted in place of the `YEAR` placeholder.
  #[serde(default)]
  pub accepted_years: Vec<String>,

  /// Extra skipped directory substrings, appended to the built-in set.
  #[serde(default)]
  pub skipped_dirs: Vec<String>,
}

impl Config {
  /// Validates field contents beyond what deserialization enforces.
  pub fn validate(&self) -> Result<()> {
    for year in &self.accepted_years {
      validate_year(year)?;
    }
    Ok(())
  }
}

/// Checks that a configured year is a four-digit calendar year.
pub fn validate_year(year: &str) -> Result<()> {
  if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
    bail!("Invalid accepted year `{year}`: expected a four-digit calendar year");
  }
  Ok(())
}

/// Loads the configuration file, if one applies.
///
/// Resolution order: the explicit `--config` path, then `BOILERCHECK_CONFIG`,
/// then `.boilercheck.toml` at the root. An explicitly named file that cannot
/// be read or parsed is an error; a missing default file simply means no
/// configuration.
pub fn load_config(explicit: Option<&Path>, root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    return Ok(None);
  }

  let path = if let Some(path) = explicit {
    path.to_path_buf()
  } else if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    PathBuf::from(env_path)
  } else {
    let default_path = root.join(DEFAULT_CONFIG_FILENAME);
    if !default_path.is_file() {
      return Ok(None);
    }
    default_path
  };

  verbose_log!("Loading config from: {}", path.display());

  let content =
    std::fs::read_to_string(&path).with_context(|| format!("Failed to read config file {}", path.display()))?;
  let config: Config =
    toml::from_str(&content).with_context(|| format!("Failed to parse config file {}", path.display()))?;
  config.validate()?;

  Ok(Some(config))
}
