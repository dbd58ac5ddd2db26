//! # Running the Restore
//!
//! The consolidation logic only needs the final result of a restore: its exit
//! code and every line it printed. [`Restore`] is that seam, and
//! [`DotnetRestore`] implements it by running
//! `dotnet restore "<solution>" -r <rid>`.
//!
//! Output is captured in full, with no size limit, and both streams are read
//! concurrently so a chatty restore can never block on a full pipe. The call
//! returns only once the process has exited. A process that ends without an
//! exit code (killed by a signal) is an error: its output may be truncated
//! and must not drive manifest edits.

use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};

/// Exit code and complete output of one restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreOutput {
    pub exit_code: i32,
    /// Stdout lines followed by stderr lines, without line terminators.
    pub lines: Vec<String>,
}

impl RestoreOutput {
    pub fn new(exit_code: i32, lines: Vec<String>) -> Self {
        Self { exit_code, lines }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs a restore of a solution for one runtime identifier.
pub trait Restore {
    fn restore(&self, solution: &Path, runtime_identifier: &str) -> Result<RestoreOutput>;
}

/// Restore through the `dotnet` CLI.
#[derive(Debug, Clone)]
pub struct DotnetRestore {
    program: String,
}

impl DotnetRestore {
    pub const DEFAULT_PROGRAM: &'static str = "dotnet";

    /// Use `program` instead of `dotnet` from `PATH`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for DotnetRestore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

impl Restore for DotnetRestore {
    fn restore(&self, solution: &Path, runtime_identifier: &str) -> Result<RestoreOutput> {
        debug!(
            "Running {} restore \"{}\" -r {}",
            self.program,
            solution.display(),
            runtime_identifier
        );

        let output = Command::new(&self.program)
            .arg("restore")
            .arg(solution)
            .args(["-r", runtime_identifier])
            .output()
            .map_err(|e| Error::RestoreLaunch {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        let exit_code = output.status.code().ok_or_else(|| Error::RestoreInterrupted {
            program: self.program.clone(),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let lines: Vec<String> = stdout
            .lines()
            .chain(stderr.lines())
            .map(|line| line.to_string())
            .collect();

        debug!(
            "Restore exited with {} after {} lines of output",
            exit_code,
            lines.len()
        );

        Ok(RestoreOutput::new(exit_code, lines))
    }
}
