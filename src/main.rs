//! # boilercheck
//!
//! A tool that verifies source files begin with the required license
//! boilerplate header.

mod cli;

use anyhow::Result;

use crate::cli::{Cli, run_check};

fn main() -> Result<()> {
  let cli = Cli::parse_args();

  run_check(cli.get_check_args())
}
