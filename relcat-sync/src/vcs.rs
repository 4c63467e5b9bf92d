//! Version-control seam.
//!
//! The coordinator only sequences these primitives; [`crate::GitCli`] is the
//! production implementation.

use std::collections::BTreeSet;

use crate::error::SyncError;

pub trait Vcs {
    /// Make the working tree a checkout of `branch`, tracking `remote` when given.
    fn prepare(&mut self, branch: &str, remote: Option<&str>) -> Result<(), SyncError>;

    /// Set the commit author for this checkout.
    fn configure_identity(&mut self, name: &str, email: &str) -> Result<(), SyncError>;

    /// Every tag name present in the repository.
    fn list_tags(&self) -> Result<BTreeSet<String>, SyncError>;

    /// Stage additions, modifications and deletions.
    fn stage_all(&mut self) -> Result<(), SyncError>;

    /// `true` when nothing differs from `HEAD`, staged or not.
    fn is_clean(&self) -> Result<bool, SyncError>;

    fn commit(&mut self, message: &str) -> Result<(), SyncError>;

    fn push_branch(&mut self, branch: &str, force: bool) -> Result<(), SyncError>;

    /// `true` when the remote copy of `branch` points at `HEAD`, or when
    /// there is no commit to publish yet.
    fn is_published(&self, branch: &str) -> Result<bool, SyncError>;

    /// Create a lightweight tag at `HEAD`. Fails if the tag already exists.
    fn create_tag(&mut self, name: &str) -> Result<(), SyncError>;

    fn push_tags(&mut self) -> Result<(), SyncError>;
}
