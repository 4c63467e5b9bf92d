//! Archive filename parsing.
//!
//! Accepted shape (trailing part of the path):
//!
//! ```text
//! <anything>/<group>/<name>-<version>.tar.xz
//!            ^^^^^^^ [0-9]+.[0-9]+
//!                           ^^^^^^^^^ [0-9]+.[0-9]+.[0-9]+
//! ```

use std::path::Path;

use regex::Regex;

use crate::error::CatalogError;
use crate::types::{ArchiveRecord, ParseOutcome};

/// File extension shared by every archive in the catalog.
pub const ARCHIVE_EXTENSION: &str = ".tar.xz";

const ARCHIVE_PATTERN: &str = r"/(?P<name>(?P<group>[0-9]+\.[0-9]+)/[^/]+-(?P<version>[0-9]+\.[0-9]+\.[0-9]+)\.tar\.xz)$";

/// Compiled matcher for archive paths. Pure: no I/O, no state.
#[derive(Debug, Clone)]
pub struct VersionParser {
    pattern: Regex,
}

impl VersionParser {
    pub fn new() -> Result<Self, CatalogError> {
        Ok(Self {
            pattern: Regex::new(ARCHIVE_PATTERN)?,
        })
    }

    /// Parse a filesystem path into an [`ArchiveRecord`].
    ///
    /// Windows separators are normalised to `/` before matching.
    pub fn parse(&self, path: &Path) -> ParseOutcome {
        let normalized = path.to_string_lossy().replace('\\', "/");
        self.parse_str(&normalized)
    }

    /// Parse an already `/`-separated path string.
    pub fn parse_str(&self, path: &str) -> ParseOutcome {
        let Some(caps) = self.pattern.captures(path) else {
            return ParseOutcome::NotMatched;
        };
        match (caps.name("group"), caps.name("version"), caps.name("name")) {
            (Some(group), Some(version), Some(name)) => ParseOutcome::Matched(ArchiveRecord {
                group_key: group.as_str().to_string(),
                version: version.as_str().to_string(),
                canonical_name: name.as_str().to_string(),
            }),
            _ => ParseOutcome::NotMatched,
        }
    }
}
