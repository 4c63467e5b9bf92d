//! Domain types for the release catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ArchiveRecord
// ---------------------------------------------------------------------------

/// Parsed identity of one archive file.
///
/// `canonical_name` is always `<group_key>/<basename>` and doubles as the
/// copy destination inside the data tree and the link target in the index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArchiveRecord {
    pub group_key: String,
    pub version: String,
    pub canonical_name: String,
}

impl fmt::Display for ArchiveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.canonical_name.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// ParseOutcome
// ---------------------------------------------------------------------------

/// Result of running a path through [`crate::VersionParser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The path ends in `<group>/<name>-<version>.tar.xz`.
    Matched(ArchiveRecord),
    /// The path does not follow the naming convention.
    NotMatched,
}

impl ParseOutcome {
    pub fn matched(self) -> Option<ArchiveRecord> {
        match self {
            ParseOutcome::Matched(record) => Some(record),
            ParseOutcome::NotMatched => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, ParseOutcome::Matched(_))
    }
}
