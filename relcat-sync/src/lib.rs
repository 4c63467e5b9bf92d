//! # relcat-sync
//!
//! Cache reconciliation, index rebuild and the commit/tag/push protocol.
//!
//! Build a [`RunConfig`], hand it to a [`SyncCoordinator`] together with a
//! [`Vcs`] implementation (normally [`GitCli`]) and call
//! [`SyncCoordinator::run`].

pub mod config;
pub mod coordinator;
pub mod error;
pub mod git;
pub mod reconcile;
pub mod scan;
pub mod vcs;
pub mod writer;

pub use config::{BotIdentity, RunConfig};
pub use coordinator::{RunOutcome, RunReport, RunState, SyncCoordinator};
pub use error::SyncError;
pub use git::GitCli;
pub use reconcile::{reconcile, ReconcileReport};
pub use vcs::Vcs;
pub use writer::WriteResult;
