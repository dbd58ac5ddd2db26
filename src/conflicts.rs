//! # Conflict Aggregation
//!
//! Collects every [`ConflictRecord`] found in a restore's output into a
//! [`ConflictSet`], collapsing duplicates, and groups them for editing: by
//! owning project first, then by package within each project.
//!
//! Grouping is deterministic. Projects and packages are visited in name order
//! and each [`ConflictGroup`] keeps its versions sorted ascending, so two runs
//! over the same output perform the same edits in the same order.

use std::collections::{BTreeMap, HashSet};

use log::debug;

use crate::diagnostic::{ConflictRecord, DiagnosticParser};
use crate::error::Result;
use crate::version::PackageVersion;

/// Deduplicated conflicts from one restore run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictSet {
    records: HashSet<ConflictRecord>,
}

impl ConflictSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every line and keep the conflicts.
    ///
    /// Non-conflict lines are skipped. The first malformed conflict line
    /// aborts collection, so a partial set is never returned.
    pub fn collect<I, S>(parser: &DiagnosticParser, lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for line in lines {
            if let Some(record) = parser.parse_line(line.as_ref())? {
                debug!("Found downgrade conflict: {}", record);
                set.insert(record);
            }
        }
        Ok(set)
    }

    /// Add a record, returning `false` if it was already present.
    pub fn insert(&mut self, record: ConflictRecord) -> bool {
        self.records.insert(record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, record: &ConflictRecord) -> bool {
        self.records.contains(record)
    }

    /// Group conflicts by owning project, then by package.
    pub fn by_project(&self) -> BTreeMap<String, Vec<ConflictGroup>> {
        let mut projects: BTreeMap<String, BTreeMap<String, Vec<PackageVersion>>> =
            BTreeMap::new();

        for record in &self.records {
            projects
                .entry(record.project.clone())
                .or_default()
                .entry(record.package.clone())
                .or_default()
                .push(record.version.clone());
        }

        projects
            .into_iter()
            .map(|(project, packages)| {
                let groups = packages
                    .into_iter()
                    .map(|(package, versions)| ConflictGroup::new(&project, package, versions))
                    .collect();
                (project, groups)
            })
            .collect()
    }
}

impl FromIterator<ConflictRecord> for ConflictSet {
    fn from_iter<T: IntoIterator<Item = ConflictRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Conflicts on one package within one project.
///
/// Always holds at least one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictGroup {
    project: String,
    package: String,
    /// Sorted ascending, never empty.
    versions: Vec<PackageVersion>,
}

impl ConflictGroup {
    fn new(project: &str, package: String, mut versions: Vec<PackageVersion>) -> Self {
        versions.sort();
        Self {
            project: project.to_string(),
            package,
            versions,
        }
    }

    /// Build a group from records that share one project and one package.
    ///
    /// Returns `None` for an empty slice or when the records disagree on
    /// project or package.
    pub fn from_records(records: &[ConflictRecord]) -> Option<Self> {
        let first = records.first()?;
        let consistent = records
            .iter()
            .all(|r| r.project == first.project && r.package == first.package);
        if !consistent {
            return None;
        }
        Some(Self::new(
            &first.project,
            first.package.clone(),
            records.iter().map(|r| r.version.clone()).collect(),
        ))
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn versions(&self) -> &[PackageVersion] {
        &self.versions
    }

    /// The highest version in the chain: the one to pin.
    pub fn new_version(&self) -> &PackageVersion {
        &self.versions[self.versions.len() - 1]
    }

    /// The lowest version in the chain: the one a manifest may already pin.
    pub fn old_version(&self) -> &PackageVersion {
        &self.versions[0]
    }
}
