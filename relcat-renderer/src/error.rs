//! Error types for relcat-renderer.

use thiserror::Error;

use relcat_core::CatalogError;

/// All errors that can arise while rendering the index document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// JSON serialization error (building tera context).
    #[error("context serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A group key or version could not be ordered.
    #[error("ordering error: {0}")]
    Ordering(#[from] CatalogError),
}
