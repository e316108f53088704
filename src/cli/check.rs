//! # Check Command
//!
//! Implements the compliance check: build the reference store, fix the
//! candidate set, run the matcher over it, and honor the exit contract.
//! This is the default command when no subcommand is specified.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use boilercheck::checker::{Checker, CheckerConfig, DEFAULT_ACCEPTED_YEARS};
use boilercheck::config::{Config, load_config, validate_year};
use boilercheck::diff::DiffManager;
use boilercheck::file_filter::DEFAULT_SKIPPED_DIRS;
use boilercheck::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use boilercheck::output::{print_nonconforming, print_summary};
use boilercheck::report::{ReportGenerator, RunSummary};
use boilercheck::store::ReferenceStore;
use boilercheck::tree::print_tree;
use boilercheck::verbose_log;
use clap::Args;
use tracing::{debug, warn};

/// Default template directory, relative to the root.
const DEFAULT_BOILERPLATE_DIR: &str = "hack/boilerplate";

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
  /// Explicit files to check; when omitted, the root directory is walked
  /// recursively
  #[arg(required = false)]
  pub files: Vec<String>,

  /// Root directory to examine
  #[arg(long, value_name = "DIR", default_value = ".")]
  pub rootdir: PathBuf,

  /// Directory containing boilerplate.<key>.txt reference templates
  ///
  /// [default: <rootdir>/hack/boilerplate]
  #[arg(long, value_name = "DIR")]
  pub boilerplate_dir: Option<PathBuf>,

  /// Plan tree mode: show the candidate files as a tree without reading
  /// their contents
  #[arg(long, short = 't')]
  pub plan_tree: bool,

  /// Path to config file (default: .boilercheck.toml in the root directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Additional directory-name substrings to exclude (repeatable)
  #[arg(long, value_name = "SUBSTR")]
  pub skip: Vec<String>,

  /// Calendar years accepted in place of the YEAR placeholder (repeatable)
  ///
  /// [default: 2017, 2018]
  #[arg(long, value_name = "YEAR")]
  pub accept_year: Vec<String>,

  /// Show header diffs for nonconforming files on stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Save header diffs for nonconforming files to a file
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Generate a JSON report of the run and save to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors and the failing-file list
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Run the check command with the given arguments
pub fn run_check(args: CheckArgs) -> Result<()> {
  // Initialize tracing subscriber for structured diagnostics
  init_tracing(args.quiet, args.verbose);

  // Set output mode for the verbose_log! macro
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let root = args
    .rootdir
    .canonicalize()
    .with_context(|| format!("Invalid root directory: {}", args.rootdir.display()))?;
  debug!("Using root directory: {}", root.display());

  // Load configuration file if present
  let config = load_config(args.config.as_deref(), &root, args.no_config)?;
  let config = config.unwrap_or_default();

  let boilerplate_dir = resolve_boilerplate_dir(&args, &config, &root);
  let accepted_years = resolve_accepted_years(&args, &config)?;
  let skipped_dirs = resolve_skipped_dirs(&args, &config);

  let store = ReferenceStore::load(&boilerplate_dir)
    .with_context(|| format!("Failed to load boilerplate templates from {}", boilerplate_dir.display()))?;
  if store.is_empty() {
    warn!(
      "No boilerplate templates found in {}; nothing will be checked",
      boilerplate_dir.display()
    );
  }
  debug!("Loaded {} reference templates", store.len());

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff.clone());
  diff_manager.init()?;

  let checker = Checker::new(CheckerConfig {
    store,
    root: root.clone(),
    skipped_dirs,
    accepted_years,
    diff_manager: Some(diff_manager),
  })?;

  let candidates = checker.collect_candidates(&args.files)?;

  // Plan-tree mode stops before any file content is read
  if args.plan_tree {
    println!("{}", print_tree(&candidates, Some(&root)));
    return Ok(());
  }

  let start_time = Instant::now();
  let nonconforming = checker.run(candidates);
  let elapsed = start_time.elapsed();

  let file_reports = std::mem::take(&mut *checker.file_reports.lock().expect("mutex poisoned"));
  let summary = RunSummary::from_reports(&file_reports, elapsed);

  // Generate JSON report if requested
  if let Some(ref output_path) = args.report_json {
    let report_generator = ReportGenerator::new(output_path);
    if let Err(e) = report_generator.generate(&file_reports, &summary) {
      eprintln!("Error generating JSON report: {}", e);
    } else {
      verbose_log!("Generated JSON report at {}", output_path.display());
    }
  }

  print_summary(&summary);

  // The entire observable contract: silence and exit 0 when everything
  // conforms; a count plus the sorted failing paths and exit 1 otherwise.
  if !nonconforming.is_empty() {
    print_nonconforming(&nonconforming, Some(&root));
    process::exit(1);
  }

  Ok(())
}

/// Template directory precedence: CLI flag, then config, then the default
/// under the root. Relative values resolve against the root.
fn resolve_boilerplate_dir(args: &CheckArgs, config: &Config, root: &std::path::Path) -> PathBuf {
  let dir = args
    .boilerplate_dir
    .clone()
    .or_else(|| config.boilerplate_dir.clone())
    .unwrap_or_else(|| PathBuf::from(DEFAULT_BOILERPLATE_DIR));

  if dir.is_absolute() { dir } else { root.join(dir) }
}

/// Accepted-years precedence: CLI flags, then config, then the built-in set.
fn resolve_accepted_years(args: &CheckArgs, config: &Config) -> Result<Vec<String>> {
  let years = if !args.accept_year.is_empty() {
    args.accept_year.clone()
  } else if !config.accepted_years.is_empty() {
    config.accepted_years.clone()
  } else {
    DEFAULT_ACCEPTED_YEARS.iter().map(|year| (*year).to_string()).collect()
  };

  for year in &years {
    validate_year(year)?;
  }
  Ok(years)
}

/// Skip list: built-ins extended by config, then by CLI flags.
fn resolve_skipped_dirs(args: &CheckArgs, config: &Config) -> Vec<String> {
  let mut skipped: Vec<String> = DEFAULT_SKIPPED_DIRS.iter().map(|dir| (*dir).to_string()).collect();
  skipped.extend(config.skipped_dirs.iter().cloned());
  skipped.extend(args.skip.iter().cloned());
  skipped
}
