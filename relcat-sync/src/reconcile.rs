//! Cache → data tree reconciliation.
//!
//! Every well-formed archive in the cache is copied to
//! `<data>/<group>/<basename>`, overwriting any previous copy. Versions that
//! are not yet tagged are collected as the run's new versions.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;

use relcat_core::VersionParser;

use crate::error::{io_err, SyncError};
use crate::scan::find_archives;

/// What a reconciliation pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Canonical names copied into the data tree.
    pub copied: Vec<String>,
    /// Cache paths that did not follow the naming convention.
    pub skipped_invalid: Vec<String>,
    /// Versions copied but already present as tags.
    pub already_tagged: BTreeSet<String>,
    /// Versions to tag once the index is committed.
    pub new_versions: BTreeSet<String>,
}

/// Copy every valid archive from `cache_root` into `data_root` and return
/// the versions absent from `existing_tags`.
///
/// A missing cache is an empty cache. Copy failures abort the pass.
pub fn reconcile(
    cache_root: &Path,
    data_root: &Path,
    existing_tags: &BTreeSet<String>,
    parser: &VersionParser,
) -> Result<ReconcileReport, SyncError> {
    let mut report = ReconcileReport::default();
    if !cache_root.exists() {
        tracing::info!("no cache at {}, nothing to reconcile", cache_root.display());
        return Ok(report);
    }

    let files = find_archives(cache_root)?;
    tracing::info!("processing {} cached file(s)", files.len());

    for file in files {
        let Some(record) = parser.parse(&file).matched() else {
            tracing::warn!("invalid file: {}", file.display());
            report.skipped_invalid.push(file.display().to_string());
            continue;
        };
        tracing::debug!("processing file: {}", file.display());

        let group_dir = data_root.join(&record.group_key);
        std::fs::create_dir_all(&group_dir).map_err(|e| io_err(&group_dir, e))?;

        let dest = data_root.join(&record.canonical_name);
        std::fs::copy(&file, &dest).map_err(|e| io_err(&dest, e))?;
        report.copied.push(record.canonical_name.clone());

        if existing_tags.contains(&record.version) {
            tracing::info!("skipping existing version: {}", record.version);
            report.already_tagged.insert(record.version);
        } else {
            report.new_versions.insert(record.version);
        }
    }

    Ok(report)
}
