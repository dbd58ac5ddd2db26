//! CLI argument parsing and run setup

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use nuconsolidate::consolidate::{Consolidator, Options};
use nuconsolidate::output::{render_event, ColorChoice, OutputConfig};
use nuconsolidate::restore::DotnetRestore;

/// Pin the versions NU1605 downgrade errors ask for into the owning projects
#[derive(Parser, Debug)]
#[command(name = "nuconsolidate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the solution file
    #[arg(short = 's', long = "sln", value_name = "PATH")]
    solution: PathBuf,

    /// dotnet runtime identifier
    #[arg(short = 'r', long = "rid", value_name = "RID")]
    runtime_identifier: String,

    /// Project namespace regex
    #[arg(short = 'n', long = "namespaces", value_name = "REGEX")]
    namespaces: String,

    /// Program used to run the restore
    #[arg(
        long,
        value_name = "PROGRAM",
        env = "NUCONSOLIDATE_DOTNET",
        default_value = DotnetRestore::DEFAULT_PROGRAM
    )]
    dotnet: String,

    /// Show what would be changed without writing project files
    #[arg(long)]
    dry_run: bool,

    /// Colorize output
    #[arg(long, value_name = "WHEN", value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

impl Cli {
    /// Run the consolidation described by the arguments
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::new(self.color);

        if !self.solution.is_file() {
            anyhow::bail!("Solution file not found: {}", self.solution.display());
        }

        let options = Options {
            solution: self.solution.clone(),
            runtime_identifier: self.runtime_identifier,
            namespace_pattern: self.namespaces,
            dry_run: self.dry_run,
        };

        let consolidator = Consolidator::new(DotnetRestore::new(self.dotnet), options)
            .context("Invalid --namespaces pattern")?;

        consolidator
            .run(|event| println!("{}", render_event(&output, event)))
            .with_context(|| format!("Failed to consolidate {}", self.solution.display()))?;

        Ok(())
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running under tests.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
