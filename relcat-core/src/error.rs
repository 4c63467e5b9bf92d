//! Error types for relcat-core.

use thiserror::Error;

/// All errors that can arise from parsing and ordering catalog entries.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The archive filename pattern failed to compile.
    #[error("invalid archive pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A comparator could not interpret a version or group key.
    #[error("cannot order '{value}': {reason}")]
    InvalidVersion { value: String, reason: String },
}

pub(crate) fn invalid_version(value: &str, reason: impl ToString) -> CatalogError {
    CatalogError::InvalidVersion {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
