//! # Project Manifest Lookup
//!
//! Resolves a project name taken from a conflict chain to its manifest file
//! by searching the solution's directory tree for `<project>.csproj` (or the
//! F# / VB equivalents).
//!
//! Exactly one file must match. Zero matches or several matches are reported
//! as [`Error::ProjectResolution`] listing every candidate; the lookup never
//! guesses between them. A directory that cannot be read fails the lookup
//! with [`Error::ManifestSearch`] rather than being skipped.

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};

/// Manifest extensions recognised as project files.
pub const MANIFEST_EXTENSIONS: &[&str] = &["csproj", "fsproj", "vbproj"];

// Build output and tool state that never holds a source project.
const SKIP_DIRS: &[&str] = &[
    "bin",          // Build output
    "obj",          // Intermediate build output and restore state
    "node_modules", // Front-end dependencies
    "packages",     // Legacy NuGet package folder
    ".git",         // Git repository data
    ".svn",         // SVN repository data
    ".hg",          // Mercurial repository data
    ".vs",          // Visual Studio
    ".idea",        // Rider
    ".vscode",      // VS Code
];

/// Find the single manifest for `project` anywhere below `root`.
pub fn find_manifest(root: &Path, project: &str) -> Result<PathBuf> {
    let candidates: Vec<String> = MANIFEST_EXTENSIONS
        .iter()
        .map(|ext| format!("{}.{}", project, ext))
        .collect();

    let entries = walkdir::WalkDir::new(root).into_iter().filter_entry(|e| {
        if e.depth() == 0 || !e.file_type().is_dir() {
            return true;
        }
        let name = e.file_name().to_str().unwrap_or("");
        !SKIP_DIRS.contains(&name)
    });

    let mut found = Vec::new();
    for entry in entries {
        // An unreadable directory could hide a second match.
        let entry = entry.map_err(|source| Error::ManifestSearch {
            project: project.to_string(),
            path: source.path().unwrap_or(root).to_path_buf(),
            source,
        })?;
        let matches = entry.file_type().is_file()
            && entry
                .file_name()
                .to_str()
                .map(|name| candidates.iter().any(|c| c == name))
                .unwrap_or(false);
        if matches {
            found.push(entry.into_path());
        }
    }
    found.sort();

    debug!(
        "Manifest lookup for '{}' under {}: {:?}",
        project,
        root.display(),
        found
    );

    if found.len() == 1 {
        return Ok(found.remove(0));
    }

    Err(Error::ProjectResolution {
        project: project.to_string(),
        root: root.to_path_buf(),
        found,
    })
}

/// Directory searched for a solution's projects: the one holding the file.
pub fn solution_root(solution: &Path) -> PathBuf {
    match solution.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
