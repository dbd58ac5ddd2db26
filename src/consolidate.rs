//! # Consolidation Run
//!
//! Drives one end-to-end run:
//!
//! 1.  **Restore**: run the restore once and wait for it to finish.
//! 2.  **Early exit**: a zero exit code means there is nothing to fix.
//! 3.  **Collect**: turn the output into a deduplicated [`ConflictSet`].
//! 4.  **Resolve**: for each owning project, find its manifest below the
//!     solution's directory.
//! 5.  **Edit**: read the manifest once, apply each package group in order,
//!     and write the result back once.
//!
//! Projects are processed one after another. The first error stops the run;
//! manifests written before it stay written.
//!
//! Progress is reported to a caller-supplied observer as [`Event`]s while
//! the run proceeds, and the run ends with a [`Summary`].

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::conflicts::ConflictSet;
use crate::diagnostic::DiagnosticParser;
use crate::error::{Error, Result};
use crate::manifest::{ManifestEdit, ManifestEditor};
use crate::project;
use crate::restore::Restore;

/// Inputs of a run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Solution file to restore.
    pub solution: PathBuf,
    /// Runtime identifier passed to restore (`-r`).
    pub runtime_identifier: String,
    /// Regex selecting the chain segment that owns a conflict.
    pub namespace_pattern: String,
    /// Compute edits without writing manifests.
    pub dry_run: bool,
}

/// Something that happened during a run, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Restore exited with code zero; nothing else follows.
    RestoreSucceeded,
    /// Restore failed; `conflicts` distinct downgrade conflicts were found.
    RestoreFailed { exit_code: i32, conflicts: usize },
    /// A conflict group was applied to a manifest in memory.
    Edited(ManifestEdit),
    /// A manifest was written back.
    ManifestWritten { path: PathBuf },
    /// All edits left a manifest as it was, so it was not written.
    ManifestUnchanged { path: PathBuf },
    /// Dry run: the manifest would have been written.
    ManifestPlanned { path: PathBuf },
}

/// Result of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Exit code of the restore.
    pub exit_code: i32,
    /// Distinct conflicts found in the restore output.
    pub conflicts: usize,
    /// Every edit applied, in order.
    pub edits: Vec<ManifestEdit>,
    /// Manifests written to disk.
    pub written: Vec<PathBuf>,
}

impl Summary {
    pub fn restore_succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs restores and consolidates the manifests they complain about.
pub struct Consolidator<R: Restore> {
    restore: R,
    parser: DiagnosticParser,
    editor: ManifestEditor,
    options: Options,
}

impl<R: Restore> Consolidator<R> {
    /// Build a consolidator; fails if the namespace pattern is not a valid regex.
    pub fn new(restore: R, options: Options) -> Result<Self> {
        Ok(Self {
            restore,
            parser: DiagnosticParser::new(&options.namespace_pattern)?,
            editor: ManifestEditor::new()?,
            options,
        })
    }

    /// Execute the run, reporting progress to `observer`.
    pub fn run<F>(&self, mut observer: F) -> Result<Summary>
    where
        F: FnMut(&Event),
    {
        let output = self
            .restore
            .restore(&self.options.solution, &self.options.runtime_identifier)?;

        let mut summary = Summary {
            exit_code: output.exit_code,
            ..Summary::default()
        };

        if output.success() {
            info!("Restore of {} succeeded", self.options.solution.display());
            observer(&Event::RestoreSucceeded);
            return Ok(summary);
        }

        let conflicts = ConflictSet::collect(&self.parser, &output.lines)?;
        summary.conflicts = conflicts.len();
        observer(&Event::RestoreFailed {
            exit_code: output.exit_code,
            conflicts: conflicts.len(),
        });

        if conflicts.is_empty() {
            warn!(
                "Restore exited with {} but reported no NU1605 downgrade conflicts",
                output.exit_code
            );
            return Ok(summary);
        }

        let root = project::solution_root(&self.options.solution);
        for (project_name, groups) in conflicts.by_project() {
            let manifest = project::find_manifest(&root, &project_name)?;
            let original = fs::read_to_string(&manifest).map_err(|source| Error::ManifestRead {
                path: manifest.clone(),
                source,
            })?;

            let (updated, edits) = self.editor.apply_all(&original, &groups)?;
            for edit in &edits {
                observer(&Event::Edited(edit.clone()));
            }
            summary.edits.extend(edits);

            if updated == original {
                observer(&Event::ManifestUnchanged { path: manifest });
            } else if self.options.dry_run {
                observer(&Event::ManifestPlanned { path: manifest });
            } else {
                write_manifest(&manifest, &updated)?;
                info!("Wrote {}", manifest.display());
                observer(&Event::ManifestWritten {
                    path: manifest.clone(),
                });
                summary.written.push(manifest);
            }
        }

        Ok(summary)
    }
}

fn write_manifest(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| Error::ManifestWrite {
        path: path.to_path_buf(),
        source,
    })
}
