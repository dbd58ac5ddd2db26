//! # Manifest Editing
//!
//! Applies a [`ConflictGroup`] to the text of an MSBuild project file. The
//! manifest is never parsed as XML: edits are a literal replacement of one
//! reference line or an anchored insertion of a new one, so every byte
//! outside the touched line stays exactly as it was.
//!
//! ## Edit Rules
//!
//! For a group whose lowest version is `old` and highest is `new`:
//!
//! 1. If the text contains `<PackageReference Include="P" Version="old" />`,
//!    every occurrence is replaced by the same line at `new`.
//! 2. Otherwise, if the text already contains the line at `new`, nothing
//!    changes. Re-applying an edit is therefore a no-op.
//! 3. Otherwise a line at `new` is inserted before the first
//!    `<PackageReference` that directly follows an `<ItemGroup>` opener,
//!    reusing the whitespace between the two as indentation.
//! 4. If rule 3 applies but no such anchor exists the edit fails with
//!    [`Error::ManifestAnchorMissing`].

use std::fmt;

use log::debug;
use regex::{Captures, Regex};

use crate::conflicts::ConflictGroup;
use crate::error::{Error, Result};
use crate::version::PackageVersion;

// `<ItemGroup>` (attributes allowed), whitespace, then the first `<PackageReference`.
const ANCHOR_PATTERN: &str = r"(?P<opener><ItemGroup(?:\s[^>]*)?>)(?P<indent>\s+)<PackageReference";

/// Render a reference line in the exact form the edits match on.
pub fn package_reference(package: &str, version: &PackageVersion) -> String {
    format!(
        "<PackageReference Include=\"{}\" Version=\"{}\" />",
        package, version
    )
}

/// What a single group did to a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestEdit {
    /// An existing reference was moved from `from` to `to`.
    Updated {
        project: String,
        package: String,
        from: PackageVersion,
        to: PackageVersion,
    },
    /// A new reference was inserted.
    Added {
        project: String,
        package: String,
        version: PackageVersion,
    },
    /// The manifest already references the package at `version`.
    AlreadyPinned {
        project: String,
        package: String,
        version: PackageVersion,
    },
}

impl ManifestEdit {
    pub fn project(&self) -> &str {
        match self {
            Self::Updated { project, .. }
            | Self::Added { project, .. }
            | Self::AlreadyPinned { project, .. } => project,
        }
    }

    pub fn package(&self) -> &str {
        match self {
            Self::Updated { package, .. }
            | Self::Added { package, .. }
            | Self::AlreadyPinned { package, .. } => package,
        }
    }
}

impl fmt::Display for ManifestEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Updated {
                project,
                package,
                from,
                to,
            } => write!(
                f,
                "Updated reference to package {} from v.{} to v.{} in project {}",
                package, from, to, project
            ),
            Self::Added {
                project,
                package,
                version,
            } => write!(
                f,
                "Added reference to the package {} v.{} in project {}",
                package, version, project
            ),
            Self::AlreadyPinned {
                project,
                package,
                version,
            } => write!(
                f,
                "Package {} is already pinned to v.{} in project {}",
                package, version, project
            ),
        }
    }
}

/// Applies conflict groups to manifest text.
#[derive(Debug, Clone)]
pub struct ManifestEditor {
    anchor: Regex,
}

impl ManifestEditor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            anchor: Regex::new(ANCHOR_PATTERN)?,
        })
    }

    /// Apply one group to `content`, returning the new text and the edit made.
    pub fn apply(&self, content: &str, group: &ConflictGroup) -> Result<(String, ManifestEdit)> {
        let project = group.project().to_string();
        let package = group.package().to_string();
        let old_version = group.old_version();
        let new_version = group.new_version();

        let old_reference = package_reference(&package, old_version);
        let new_reference = package_reference(&package, new_version);

        if content.contains(&old_reference) {
            debug!("Replacing '{}' with '{}'", old_reference, new_reference);
            let updated = content.replace(&old_reference, &new_reference);
            return Ok((
                updated,
                ManifestEdit::Updated {
                    project,
                    package,
                    from: old_version.clone(),
                    to: new_version.clone(),
                },
            ));
        }

        if content.contains(&new_reference) {
            debug!("'{}' already present", new_reference);
            return Ok((
                content.to_string(),
                ManifestEdit::AlreadyPinned {
                    project,
                    package,
                    version: new_version.clone(),
                },
            ));
        }

        if !self.anchor.is_match(content) {
            return Err(Error::ManifestAnchorMissing { project, package });
        }

        debug!("Inserting '{}'", new_reference);
        let updated = self
            .anchor
            .replacen(content, 1, |caps: &Captures| {
                let indent = &caps["indent"];
                format!(
                    "{}{}{}{}<PackageReference",
                    &caps["opener"], indent, new_reference, indent
                )
            })
            .into_owned();

        Ok((
            updated,
            ManifestEdit::Added {
                project,
                package,
                version: new_version.clone(),
            },
        ))
    }

    /// Apply groups in order, each to the previous group's output.
    pub fn apply_all<'a, I>(&self, content: &str, groups: I) -> Result<(String, Vec<ManifestEdit>)>
    where
        I: IntoIterator<Item = &'a ConflictGroup>,
    {
        let mut text = content.to_string();
        let mut edits = Vec::new();
        for group in groups {
            let (next, edit) = self.apply(&text, group)?;
            text = next;
            edits.push(edit);
        }
        Ok((text, edits))
    }
}
