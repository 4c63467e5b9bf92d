//! End-to-end sync run as an explicit state machine.
//!
//! ```text
//! Init → Prepared → Reconciled → Indexed → Committed | CleanNoop → Tagged → Done
//!   └──────────────── any error ────────────────────────────────────→ Failed
//! ```
//!
//! Each forward transition performs exactly one external effect group.
//! Nothing is rolled back on failure: copies are overwrites, a clean tree is
//! not committed again, and already-tagged versions are never re-tagged, so
//! the next run picks up where this one stopped.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use relcat_core::{DottedNumericOrder, SemverOrder, VersionOrder, VersionParser};
use relcat_renderer::IndexRenderer;

use crate::config::RunConfig;
use crate::error::SyncError;
use crate::reconcile::{reconcile, ReconcileReport};
use crate::scan::rebuild_index;
use crate::vcs::Vcs;
use crate::writer::{atomic_write, WriteResult};

// ---------------------------------------------------------------------------
// States and outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Init,
    Prepared,
    Reconciled,
    Indexed,
    Committed,
    CleanNoop,
    Tagged,
    Done,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Init => "init",
            RunState::Prepared => "prepared",
            RunState::Reconciled => "reconciled",
            RunState::Indexed => "indexed",
            RunState::Committed => "committed",
            RunState::CleanNoop => "clean-noop",
            RunState::Tagged => "tagged",
            RunState::Done => "done",
            RunState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Summary of a run, filled in as the state machine advances.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub dry_run: bool,
    pub final_state: RunState,
    /// States visited, in order, starting with `Init`.
    pub transitions: Vec<RunState>,
    pub reconcile: ReconcileReport,
    pub index_written: bool,
    pub committed: bool,
    pub pushed_branch: bool,
    pub created_tags: Vec<String>,
    pub pushed_tags: bool,
    pub duration_ms: i64,
}

impl RunReport {
    fn new(dry_run: bool) -> Self {
        Self {
            started_at: Utc::now(),
            dry_run,
            final_state: RunState::Init,
            transitions: vec![RunState::Init],
            reconcile: ReconcileReport::default(),
            index_written: false,
            committed: false,
            pushed_branch: false,
            created_tags: Vec::new(),
            pushed_tags: false,
            duration_ms: 0,
        }
    }
}

/// Result of [`SyncCoordinator::run`]; the caller turns it into an exit status.
#[derive(Debug)]
pub enum RunOutcome {
    Succeeded(RunReport),
    Failed {
        /// Last state reached before the failing transition.
        failed_from: RunState,
        error: SyncError,
        report: RunReport,
    },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Succeeded(_))
    }

    pub fn report(&self) -> &RunReport {
        match self {
            RunOutcome::Succeeded(report) => report,
            RunOutcome::Failed { report, .. } => report,
        }
    }

    pub fn into_result(self) -> Result<RunReport, SyncError> {
        match self {
            RunOutcome::Succeeded(report) => Ok(report),
            RunOutcome::Failed { error, .. } => Err(error),
        }
    }
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

/// Owns the working-tree handle and the run-scoped tag sets.
pub struct SyncCoordinator<V: Vcs> {
    config: RunConfig,
    vcs: V,
    parser: VersionParser,
    renderer: IndexRenderer,
    group_order: Box<dyn VersionOrder>,
    version_order: Box<dyn VersionOrder>,
    existing_tags: BTreeSet<String>,
    new_versions: BTreeSet<String>,
}

impl<V: Vcs> SyncCoordinator<V> {
    pub fn new(config: RunConfig, vcs: V) -> Result<Self, SyncError> {
        let parser = VersionParser::new()?;
        let renderer = IndexRenderer::new(config.document.clone())?;
        Ok(Self {
            config,
            vcs,
            parser,
            renderer,
            group_order: Box::new(DottedNumericOrder),
            version_order: Box::new(SemverOrder),
            existing_tags: BTreeSet::new(),
            new_versions: BTreeSet::new(),
        })
    }

    /// Replace the group-key and version orderings.
    pub fn with_orderings(
        mut self,
        group_order: Box<dyn VersionOrder>,
        version_order: Box<dyn VersionOrder>,
    ) -> Self {
        self.group_order = group_order;
        self.version_order = version_order;
        self
    }

    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    pub fn vcs_mut(&mut self) -> &mut V {
        &mut self.vcs
    }

    /// Give the checkout back, e.g. to reuse it under a different config.
    pub fn into_vcs(self) -> V {
        self.vcs
    }

    /// Drive the state machine to `Done` or `Failed`.
    pub fn run(&mut self) -> RunOutcome {
        let mut report = RunReport::new(self.config.dry_run);
        tracing::info!("releaser started");
        if self.config.dry_run {
            tracing::warn!("[dry-run] detected");
        }

        let mut state = RunState::Init;
        while state != RunState::Done {
            match self.step(state, &mut report) {
                Ok(next) => {
                    tracing::debug!("{state} → {next}");
                    report.transitions.push(next);
                    state = next;
                }
                Err(error) => {
                    tracing::error!("run failed after {state}: {error}");
                    report.transitions.push(RunState::Failed);
                    report.final_state = RunState::Failed;
                    report.duration_ms = elapsed_ms(report.started_at);
                    return RunOutcome::Failed {
                        failed_from: state,
                        error,
                        report,
                    };
                }
            }
        }

        report.final_state = RunState::Done;
        report.duration_ms = elapsed_ms(report.started_at);
        RunOutcome::Succeeded(report)
    }

    fn step(&mut self, state: RunState, report: &mut RunReport) -> Result<RunState, SyncError> {
        match state {
            RunState::Init => self.prepare(),
            RunState::Prepared => self.reconcile(report),
            RunState::Reconciled => self.index(report),
            RunState::Indexed => self.commit(report),
            RunState::Committed | RunState::CleanNoop => self.tag(report),
            RunState::Tagged => self.push_tags(report),
            RunState::Done | RunState::Failed => Ok(state),
        }
    }

    // -- Init → Prepared ----------------------------------------------------

    fn prepare(&mut self) -> Result<RunState, SyncError> {
        tracing::info!("prepare worktree");
        self.vcs
            .prepare(&self.config.branch, self.config.remote.as_deref())?;
        if self.config.is_ci {
            let identity = &self.config.identity;
            self.vcs.configure_identity(&identity.name, &identity.email)?;
        }
        Ok(RunState::Prepared)
    }

    // -- Prepared → Reconciled ----------------------------------------------

    fn reconcile(&mut self, report: &mut RunReport) -> Result<RunState, SyncError> {
        self.existing_tags = self.vcs.list_tags()?;
        tracing::info!("checking for new builds ({} existing tag(s))", self.existing_tags.len());

        let result = reconcile(
            &self.config.cache_dir(),
            &self.config.data_dir(),
            &self.existing_tags,
            &self.parser,
        )?;
        self.new_versions = result.new_versions.clone();
        report.reconcile = result;
        Ok(RunState::Reconciled)
    }

    // -- Reconciled → Indexed -----------------------------------------------

    fn index(&mut self, report: &mut RunReport) -> Result<RunState, SyncError> {
        tracing::info!("update index");
        let index = rebuild_index(&self.config.data_dir(), &self.parser)?;
        let document = self.renderer.render(
            &index,
            &*self.group_order,
            &*self.version_order,
        )?;
        let written = atomic_write(&self.config.index_path(), &document)?;
        report.index_written = matches!(written, WriteResult::Written { .. });

        self.vcs.stage_all()?;
        Ok(RunState::Indexed)
    }

    // -- Indexed → Committed | CleanNoop ------------------------------------

    fn commit(&mut self, report: &mut RunReport) -> Result<RunState, SyncError> {
        tracing::info!("update releases");
        if self.vcs.is_clean()? {
            tracing::info!("working tree clean, nothing to commit");
            // An earlier dry run or failed push can leave the commit local.
            if !self.vcs.is_published(&self.config.branch)? {
                tracing::info!("{} has unpublished commits", self.config.branch);
                self.push_branch(report)?;
            }
            return Ok(RunState::CleanNoop);
        }

        tracing::info!("committing files");
        self.vcs.commit(&self.config.commit_message)?;
        report.committed = true;

        self.push_branch(report)?;
        Ok(RunState::Committed)
    }

    fn push_branch(&mut self, report: &mut RunReport) -> Result<(), SyncError> {
        if self.config.dry_run {
            tracing::warn!("[dry-run] would push: {}", self.config.branch);
        } else {
            self.vcs.push_branch(&self.config.branch, true)?;
            report.pushed_branch = true;
        }
        Ok(())
    }

    // -- Committed | CleanNoop → Tagged -------------------------------------

    fn tag(&mut self, report: &mut RunReport) -> Result<RunState, SyncError> {
        tracing::info!("update tags");
        for version in &self.new_versions {
            tracing::info!("add tag {version}");
            self.vcs.create_tag(version)?;
            report.created_tags.push(version.clone());
        }
        Ok(RunState::Tagged)
    }

    // -- Tagged → Done ------------------------------------------------------

    fn push_tags(&mut self, report: &mut RunReport) -> Result<RunState, SyncError> {
        if self.config.dry_run {
            tracing::warn!("[dry-run] would push tags");
        } else {
            tracing::info!("push tags");
            self.vcs.push_tags()?;
            report.pushed_tags = true;
        }
        Ok(RunState::Done)
    }
}

fn elapsed_ms(started_at: DateTime<Utc>) -> i64 {
    (Utc::now() - started_at).num_milliseconds()
}
