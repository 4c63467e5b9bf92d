//! Atomic document writer.
//!
//! 1. Compare the rendered content with what is on disk → skip if identical.
//! 2. Write to `<path>.relcat.tmp`.
//! 3. Rename to the final path (atomic on POSIX).

use std::path::{Path, PathBuf};

use crate::error::{io_err, SyncError};

/// Outcome of an individual file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped because the on-disk content already matches.
    Unchanged { path: PathBuf },
}

/// Atomically replace `path` with `content` unless it already holds it.
pub fn atomic_write(path: &Path, content: &str) -> Result<WriteResult, SyncError> {
    let tmp = PathBuf::from(format!("{}.relcat.tmp", path.display()));
    atomic_write_with_tmp(path, content, &tmp)
}

fn atomic_write_with_tmp(path: &Path, content: &str, tmp: &Path) -> Result<WriteResult, SyncError> {
    match std::fs::read(path) {
        Ok(existing) if existing == content.as_bytes() => {
            tracing::debug!("unchanged: {}", path.display());
            return Ok(WriteResult::Unchanged {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(io_err(path, e)),
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}
