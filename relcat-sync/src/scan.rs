//! Archive discovery and index rebuild from the persisted data tree.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use relcat_core::{ArchiveRecord, ReleaseIndex, VersionParser, ARCHIVE_EXTENSION};

use crate::error::SyncError;

/// Every file under `root` whose name ends in `.tar.xz`, in a stable
/// (file-name sorted, depth-first) order. Symlinks are followed, so a linked
/// archive counts as its target. A missing `root` yields nothing.
///
/// Names that are not valid UTF-8 are matched lossily and left for the
/// parser to reject.
pub fn find_archives(root: &Path) -> Result<Vec<PathBuf>, SyncError> {
    if !root.exists() {
        return Ok(Vec::new());
    }
    let mut found = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if is_dangling_link(&err) => {
                tracing::warn!("skipping dangling link: {err}");
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(ARCHIVE_EXTENSION) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

fn is_dangling_link(err: &walkdir::Error) -> bool {
    err.io_error()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

/// Parse every archive under `data_root`, warning about and skipping the
/// ones that do not follow the naming convention.
pub fn scan_records(data_root: &Path, parser: &VersionParser) -> Result<Vec<ArchiveRecord>, SyncError> {
    let files = find_archives(data_root)?;
    tracing::info!("indexing {} archive(s) under {}", files.len(), data_root.display());
    Ok(files
        .iter()
        .filter_map(|path| {
            let record = parser.parse(path).matched();
            if record.is_none() {
                tracing::warn!("invalid file: {}", path.display());
            }
            record
        })
        .collect())
}

/// Rebuild the [`ReleaseIndex`] from on-disk truth.
pub fn rebuild_index(data_root: &Path, parser: &VersionParser) -> Result<ReleaseIndex, SyncError> {
    Ok(ReleaseIndex::build(scan_records(data_root, parser)?))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }

    #[test]
    fn missing_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(find_archives(&tmp.path().join("nope")).unwrap().is_empty());
    }

    #[test]
    fn finds_nested_archives_in_sorted_order() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "b/22.04/python-3.12.0.tar.xz");
        touch(tmp.path(), "a/20.04/python-3.8.10.tar.xz");
        touch(tmp.path(), "a/notes.txt");

        let found = find_archives(tmp.path()).unwrap();
        let rel: Vec<_> = found
            .iter()
            .map(|p| p.strip_prefix(tmp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("a/20.04/python-3.8.10.tar.xz"),
                PathBuf::from("b/22.04/python-3.12.0.tar.xz"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinked_archives() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "store/python-3.12.1.tar.xz");
        fs::create_dir_all(tmp.path().join("cache/22.04")).unwrap();
        std::os::unix::fs::symlink(
            tmp.path().join("store/python-3.12.1.tar.xz"),
            tmp.path().join("cache/22.04/python-3.12.1.tar.xz"),
        )
        .unwrap();
        std::os::unix::fs::symlink(
            tmp.path().join("store/gone.tar.xz"),
            tmp.path().join("cache/22.04/python-3.12.2.tar.xz"),
        )
        .unwrap();

        let found = find_archives(&tmp.path().join("cache")).unwrap();
        assert_eq!(found, vec![tmp.path().join("cache/22.04/python-3.12.1.tar.xz")]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_names_reach_the_parser() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("22.04");
        fs::create_dir_all(&dir).unwrap();
        let name = OsStr::from_bytes(b"python-3.12.1\xff.tar.xz");
        fs::write(dir.join(name), "x").unwrap();

        let found = find_archives(tmp.path()).unwrap();
        assert_eq!(found, vec![dir.join(name)]);

        let parser = VersionParser::new().unwrap();
        assert!(scan_records(tmp.path(), &parser).unwrap().is_empty());
    }

    #[test]
    fn rebuild_skips_invalid_names() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "22.04/python-3.12.0.tar.xz");
        touch(tmp.path(), "22.04/python-latest.tar.xz");

        let parser = VersionParser::new().unwrap();
        let index = rebuild_index(tmp.path(), &parser).unwrap();
        assert_eq!(index.entry_count(), 1);
        assert_eq!(index.get("22.04", "3.12.0"), Some("22.04/python-3.12.0.tar.xz"));
    }
}
