//! Error types for relcat-sync.

use std::path::PathBuf;

use thiserror::Error;

use relcat_core::CatalogError;
use relcat_renderer::RenderError;

/// All errors that can arise from a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the rendering engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Parser construction or version ordering failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// A git command exited unsuccessfully or could not be spawned.
    #[error("git {command} failed: {message}")]
    Git { command: String, message: String },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
