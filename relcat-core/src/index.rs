//! In-memory release index: group key → (version → canonical name).
//!
//! Rebuilt from scratch every run from a full rescan of the data tree and
//! discarded after rendering. Nothing mutates an index once built.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::CatalogError;
use crate::ordering::{sort_with, VersionOrder};
use crate::types::ArchiveRecord;

/// Two records claimed the same `(group_key, version)`; the later one won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    pub group_key: String,
    pub version: String,
    pub replaced: String,
    pub kept: String,
}

/// One bullet of the rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub version: String,
    pub name: String,
}

/// One section of the rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexGroup {
    pub key: String,
    pub entries: Vec<IndexEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseIndex {
    groups: BTreeMap<String, BTreeMap<String, String>>,
    duplicates: Vec<Duplicate>,
}

impl ReleaseIndex {
    /// Fold records into the index. Later duplicates overwrite earlier ones
    /// and are reported through [`ReleaseIndex::duplicates`].
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ArchiveRecord>,
    {
        let mut groups: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        let mut duplicates = Vec::new();

        for record in records {
            let versions = groups.entry(record.group_key.clone()).or_default();
            if let Some(previous) = versions.insert(record.version.clone(), record.canonical_name.clone()) {
                tracing::warn!(
                    "duplicate release {}/{}: '{}' replaced by '{}'",
                    record.group_key,
                    record.version,
                    previous,
                    record.canonical_name
                );
                duplicates.push(Duplicate {
                    group_key: record.group_key,
                    version: record.version,
                    replaced: previous,
                    kept: record.canonical_name,
                });
            }
        }

        Self { groups, duplicates }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of group keys.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of `(group_key, version)` entries.
    pub fn entry_count(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }

    pub fn get(&self, group_key: &str, version: &str) -> Option<&str> {
        self.groups
            .get(group_key)
            .and_then(|versions| versions.get(version))
            .map(String::as_str)
    }

    pub fn duplicates(&self) -> &[Duplicate] {
        &self.duplicates
    }

    /// Lay the index out as ordered sections ready for rendering.
    pub fn ordered(
        &self,
        group_order: &dyn VersionOrder,
        version_order: &dyn VersionOrder,
    ) -> Result<Vec<IndexGroup>, CatalogError> {
        let mut keys: Vec<&str> = self.groups.keys().map(String::as_str).collect();
        sort_with(&mut keys, group_order)?;

        let mut out = Vec::with_capacity(keys.len());
        for key in keys {
            let versions = &self.groups[key];
            let mut ordered: Vec<&str> = versions.keys().map(String::as_str).collect();
            sort_with(&mut ordered, version_order)?;
            out.push(IndexGroup {
                key: key.to_string(),
                entries: ordered
                    .into_iter()
                    .map(|v| IndexEntry {
                        version: v.to_string(),
                        name: versions[v].clone(),
                    })
                    .collect(),
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::{DottedNumericOrder, SemverOrder};

    fn rec(group: &str, version: &str) -> ArchiveRecord {
        ArchiveRecord {
            group_key: group.into(),
            version: version.into(),
            canonical_name: format!("{group}/python-{version}.tar.xz"),
        }
    }

    #[test]
    fn groups_versions_under_one_key() {
        let index = ReleaseIndex::build([rec("20.04", "3.10.2"), rec("20.04", "3.9.7")]);
        assert_eq!(index.group_count(), 1);
        assert_eq!(index.entry_count(), 2);

        let groups = index.ordered(&DottedNumericOrder, &SemverOrder).unwrap();
        let versions: Vec<_> = groups[0].entries.iter().map(|e| e.version.as_str()).collect();
        assert_eq!(versions, vec!["3.9.7", "3.10.2"]);
    }

    #[test]
    fn duplicate_keeps_last_and_is_reported() {
        let mut second = rec("22.04", "3.11.4");
        second.canonical_name = "22.04/cpython-3.11.4.tar.xz".into();
        let index = ReleaseIndex::build([rec("22.04", "3.11.4"), second]);

        assert_eq!(index.get("22.04", "3.11.4"), Some("22.04/cpython-3.11.4.tar.xz"));
        assert_eq!(index.duplicates().len(), 1);
        assert_eq!(index.duplicates()[0].replaced, "22.04/python-3.11.4.tar.xz");
    }

    #[test]
    fn groups_follow_numeric_order() {
        let index = ReleaseIndex::build([rec("22.04", "3.12.0"), rec("9.10", "2.7.18"), rec("18.04", "3.8.1")]);
        let keys: Vec<_> = index
            .ordered(&DottedNumericOrder, &SemverOrder)
            .unwrap()
            .into_iter()
            .map(|g| g.key)
            .collect();
        assert_eq!(keys, vec!["9.10", "18.04", "22.04"]);
    }

    #[test]
    fn empty_index_has_no_groups() {
        let index = ReleaseIndex::build(Vec::new());
        assert!(index.is_empty());
        assert!(index.ordered(&DottedNumericOrder, &SemverOrder).unwrap().is_empty());
    }
}
