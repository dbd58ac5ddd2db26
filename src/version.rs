//! # Package Versions
//!
//! NuGet reports package versions in diagnostics as dotted numeric strings
//! such as `4.3.0` or `1.0.0.2`. This module parses them into a
//! [`PackageVersion`] that orders the way the four-part
//! `major.minor.build.revision` scheme does.
//!
//! ## Ordering
//!
//! Missing trailing components compare as zero, so `1.9.9` sorts below
//! `1.9.9.9` and `2.0.0.0` sorts above both. Two versions that only differ by
//! spelled-out zeros (`1.0` and `1.0.0`) are ordered by component count so
//! that ordering stays consistent with equality.
//!
//! ## Rendering
//!
//! `Display` writes back exactly the components that were parsed, normalised
//! as plain integers (`01.2` becomes `1.2`). Manifest edits use this text, so
//! a version seen as `9.0.0` in a diagnostic is written as `9.0.0`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Minimum number of dotted components (major.minor).
pub const MIN_COMPONENTS: usize = 2;

/// Maximum number of dotted components (major.minor.build.revision).
pub const MAX_COMPONENTS: usize = 4;

/// A dotted numeric package version with two to four components.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageVersion {
    parts: Vec<u32>,
}

impl PackageVersion {
    /// Parse a version string such as `"4.3.0"`.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidVersion {
            version: text.to_string(),
        };

        let parts = text
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                part.parse::<u32>().map_err(|_| invalid())
            })
            .collect::<Result<Vec<u32>>>()?;

        if !(MIN_COMPONENTS..=MAX_COMPONENTS).contains(&parts.len()) {
            return Err(invalid());
        }

        Ok(Self { parts })
    }

    /// Component at `index`, zero when it was not written.
    pub fn component(&self, index: usize) -> u32 {
        self.parts.get(index).copied().unwrap_or(0)
    }

    pub fn major(&self) -> u32 {
        self.component(0)
    }

    pub fn minor(&self) -> u32 {
        self.component(1)
    }

    pub fn build(&self) -> u32 {
        self.component(2)
    }

    pub fn revision(&self) -> u32 {
        self.component(3)
    }

    fn padded(&self) -> [u32; MAX_COMPONENTS] {
        [self.major(), self.minor(), self.build(), self.revision()]
    }
}

impl Ord for PackageVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.padded()
            .cmp(&other.padded())
            .then_with(|| self.parts.len().cmp(&other.parts.len()))
    }
}

impl PartialOrd for PackageVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for PackageVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}
