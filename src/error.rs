//! # Error Handling
//!
//! This module defines the centralized error type for `nuconsolidate`. It uses
//! the `thiserror` library to describe every failure the library can report,
//! with enough context (offending line, project name or file path) for the
//! binary to print a useful message before exiting.
//!
//! ## Key Components
//!
//! - **`Error`**: All failure modes of a consolidation run:
//!   - the restore process could not be launched or was interrupted,
//!   - a `NU1605` line was recognised but could not be fully extracted,
//!   - a version string could not be parsed,
//!   - a project name did not resolve to exactly one manifest, or part of
//!     the solution tree could not be searched,
//!   - a manifest had no insertion anchor,
//!   - a manifest could not be read or written.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Ordinary diagnostic lines that are not conflicts are never errors; only a
//! line carrying the conflict marker that fails extraction is.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for nuconsolidate operations
#[derive(Error, Debug)]
pub enum Error {
    /// The restore process could not be started.
    #[error("Failed to launch restore with '{program}': {message}")]
    RestoreLaunch { program: String, message: String },

    /// The restore process ended without an exit code (killed by a signal).
    ///
    /// Its output may be truncated, so nothing is parsed or written.
    #[error("Restore with '{program}' was interrupted before it finished")]
    RestoreInterrupted { program: String },

    /// A line carried the NU1605 marker but could not be turned into a
    /// conflict record.
    ///
    /// Usually means the `--namespaces` pattern does not match any project in
    /// the chain, or the diagnostic format has changed.
    #[error("Malformed NU1605 diagnostic ({reason}): {line}")]
    MalformedDiagnostic { line: String, reason: String },

    /// A version string was not 2 to 4 dot-separated numbers.
    #[error("Invalid package version: '{version}'")]
    InvalidVersion { version: String },

    /// A project name resolved to zero or several manifest files.
    #[error("Expected exactly one manifest for project '{project}' under {}, found {}{}", root.display(), found.len(), format_candidates(found))]
    ProjectResolution {
        project: String,
        root: PathBuf,
        /// Every candidate that matched the project name
        found: Vec<PathBuf>,
    },

    /// Part of the solution tree could not be searched, so a manifest there
    /// may have been missed.
    #[error("Cannot search '{}' for the manifest of project '{project}': {source}", path.display())]
    ManifestSearch {
        project: String,
        path: PathBuf,
        source: walkdir::Error,
    },

    /// A new reference had to be inserted but the manifest has no
    /// `<ItemGroup>` followed by a `<PackageReference`.
    #[error("Cannot add package '{package}' to project '{project}': no <ItemGroup> with a <PackageReference> to insert into")]
    ManifestAnchorMissing { project: String, package: String },

    /// Reading a manifest failed.
    #[error("Failed to read manifest '{}': {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing a manifest failed.
    #[error("Failed to write manifest '{}': {source}", path.display())]
    ManifestWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

fn format_candidates(found: &[PathBuf]) -> String {
    if found.is_empty() {
        return String::new();
    }
    let list: Vec<String> = found.iter().map(|p| p.display().to_string()).collect();
    format!(": {}", list.join(", "))
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
