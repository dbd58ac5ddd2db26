//! # nuconsolidate CLI
//!
//! This is the binary entry point for the `nuconsolidate` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and console output.
//! - Handling top-level errors and translating them into user-friendly
//!   output and a non-zero exit status.
//!
//! The consolidation logic lives in the `lib.rs` library crate, so the binary
//! stays a thin wrapper around it.

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
