//! # NU1605 Diagnostic Extraction
//!
//! `dotnet restore` reports a package downgrade as a single diagnostic line:
//!
//! ```text
//! C:\src\Acme.Web\Acme.Web.csproj : error NU1605:  Acme.Web -> Acme.Core -> Serilog (>= 2.12.0) [C:\src\Acme.sln]
//! ```
//!
//! The part after the marker is the conflict chain: the path from the
//! referencing project down to the package whose minimum version was not
//! satisfied. [`DiagnosticParser`] turns such a line into a
//! [`ConflictRecord`] naming the project that should pin the package, the
//! package, and the version the chain requires.
//!
//! ## Matching Rules
//!
//! - Lines without the `error NU1605:` marker are not conflicts and yield
//!   `Ok(None)`. This is the common case and is never an error.
//! - Restore prints a summary line ahead of the chains, e.g.
//!   `... : error NU1605: Detected package downgrade: Foo from 9.0.0 to 8.0.0. ...`.
//!   A marker line is only a chain line when the chain follows the marker
//!   after two spaces or contains a ` -> ` separator; anything else yields
//!   `Ok(None)`.
//! - Once a chain line is recognised, every extraction step must succeed. A chain
//!   with no segment accepted by the namespace pattern, no `Name (>= x.y.z)`
//!   constraint, or an unparseable version yields
//!   [`Error::MalformedDiagnostic`] carrying the offending line.
//! - The owning project is the rightmost chain segment accepted by the
//!   namespace pattern, i.e. the project closest to the package. Segments may
//!   carry a resolved version (`ProjB 1.0.0`); the version is not part of the
//!   project name.
//! - The trailing ` [<solution>]` suffix MSBuild appends is not part of the
//!   chain.

use std::fmt;

use log::debug;
use regex::Regex;

use crate::error::{Error, Result};
use crate::version::PackageVersion;

/// The literal marker every downgrade diagnostic carries.
pub const NU1605_MARKER: &str = "error NU1605:";

/// Separator between chain segments.
pub const CHAIN_SEPARATOR: &str = " -> ";

// `<path> : error NU1605:  <chain> [<solution>]`, for both `C:\...` and POSIX paths.
const LINE_PATTERN: &str = r"(?P<path>(?:[A-Za-z]:)?[^:]+?) : error NU1605:\s*(?P<chain>[^\[]*)";

// `<Name> (>= <Version>)`
const CONSTRAINT_PATTERN: &str = r"(?P<package>[A-Za-z0-9_.\-]+) \(>= (?P<version>[0-9][0-9.]*)\)";

/// One downgrade conflict: `project` must pin `package` at `version` or higher.
///
/// Equality and hashing cover all three fields, so identical conflicts
/// reported on several lines collapse to a single record in a set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConflictRecord {
    pub project: String,
    pub package: String,
    pub version: PackageVersion,
}

impl ConflictRecord {
    pub fn new(
        project: impl Into<String>,
        package: impl Into<String>,
        version: PackageVersion,
    ) -> Self {
        Self {
            project: project.into(),
            package: package.into(),
            version,
        }
    }
}

impl fmt::Display for ConflictRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} (>= {})", self.project, self.package, self.version)
    }
}

/// Parses restore output lines into conflict records.
#[derive(Debug, Clone)]
pub struct DiagnosticParser {
    namespaces: Regex,
    line: Regex,
    constraint: Regex,
}

impl DiagnosticParser {
    /// Create a parser whose owning projects are the chain segments matched
    /// by `namespace_pattern`.
    ///
    /// The pattern is unanchored: `Acme\.` accepts `Acme.Web` and
    /// `Tools.Acme.Cli`. Anchor it explicitly when that is too loose.
    pub fn new(namespace_pattern: &str) -> Result<Self> {
        Ok(Self {
            namespaces: Regex::new(namespace_pattern)?,
            line: Regex::new(LINE_PATTERN)?,
            constraint: Regex::new(CONSTRAINT_PATTERN)?,
        })
    }

    /// Extract the conflict reported on `line`, if any.
    pub fn parse_line(&self, line: &str) -> Result<Option<ConflictRecord>> {
        let Some(at) = line.find(NU1605_MARKER) else {
            return Ok(None);
        };
        let message = &line[at + NU1605_MARKER.len()..];
        if !message.starts_with("  ") && !message.contains(CHAIN_SEPARATOR) {
            debug!("Skipping NU1605 summary line: {}", line);
            return Ok(None);
        }

        let malformed = |reason: &str| Error::MalformedDiagnostic {
            line: line.to_string(),
            reason: reason.to_string(),
        };

        let captures = self
            .line
            .captures(line)
            .ok_or_else(|| malformed("expected '<project path> : error NU1605: <chain>'"))?;
        let chain = captures["chain"].trim();
        if chain.is_empty() {
            return Err(malformed("empty conflict chain"));
        }

        let project = self.owning_project(chain).ok_or_else(|| {
            malformed(&format!(
                "no chain segment matches namespace pattern '{}'",
                self.namespaces.as_str()
            ))
        })?;

        let constraint = self
            .constraint
            .captures(chain)
            .ok_or_else(|| malformed("no '<package> (>= <version>)' constraint in chain"))?;
        let version = PackageVersion::parse(&constraint["version"])
            .map_err(|e| malformed(&e.to_string()))?;

        Ok(Some(ConflictRecord::new(
            project,
            &constraint["package"],
            version,
        )))
    }

    fn owning_project<'a>(&self, chain: &'a str) -> Option<&'a str> {
        chain
            .rsplit(CHAIN_SEPARATOR)
            .map(str::trim)
            .find(|segment| self.namespaces.is_match(segment))
            .and_then(|segment| segment.split_whitespace().next())
    }
}
