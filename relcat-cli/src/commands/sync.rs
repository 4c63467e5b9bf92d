//! `relcat sync` — reconcile the cache, rebuild the index and publish.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::Args;
use colored::Colorize;

use relcat_sync::config::{DEFAULT_BRANCH, DEFAULT_COMMIT_MESSAGE};
use relcat_sync::{GitCli, RunConfig, RunOutcome, RunReport, SyncCoordinator};

use super::DocumentArgs;

/// Arguments for `relcat sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Workspace holding `data/` and `.cache/` (defaults to $GITHUB_WORKSPACE, then the current directory).
    #[arg(long, env = "RELCAT_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Commit and tag locally but do not push anything.
    #[arg(long, env = "DRY_RUN", value_parser = BoolishValueParser::new())]
    pub dry_run: bool,

    /// Configure the bot commit identity (set automatically on CI).
    #[arg(long, env = "CI", value_parser = BoolishValueParser::new())]
    pub ci: bool,

    /// Remote URL the data checkout tracks.
    #[arg(long, env = "RELCAT_REMOTE")]
    pub remote: Option<String>,

    /// Branch holding published releases.
    #[arg(long, env = "RELCAT_BRANCH", default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// Commit message for catalog updates.
    #[arg(long, default_value = DEFAULT_COMMIT_MESSAGE)]
    pub message: String,

    /// Print the run report as JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub document: DocumentArgs,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let json = self.json;
        let config = self.into_config()?;
        let data_dir = config.data_dir();

        let mut coordinator = SyncCoordinator::new(config, GitCli::new(data_dir))
            .context("failed to set up sync")?;

        match coordinator.run() {
            RunOutcome::Succeeded(report) => {
                print_report(&report, json)?;
                Ok(())
            }
            RunOutcome::Failed {
                failed_from,
                error,
                report,
            } => {
                if json {
                    print_report(&report, json)?;
                }
                Err(anyhow::Error::new(error).context(format!("sync failed after {failed_from}")))
            }
        }
    }

    fn into_config(self) -> Result<RunConfig> {
        let workspace = match self.workspace {
            Some(path) => path,
            None => match std::env::var_os("GITHUB_WORKSPACE") {
                Some(path) => PathBuf::from(path),
                None => std::env::current_dir().context("could not determine current directory")?,
            },
        };

        Ok(RunConfig {
            workspace,
            dry_run: self.dry_run,
            is_ci: self.ci,
            remote: self.remote,
            branch: self.branch,
            commit_message: self.message,
            document: self.document.into(),
            ..RunConfig::default()
        })
    }
}

fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let prefix = if report.dry_run {
        format!("{} ", "[dry-run]".yellow())
    } else {
        String::new()
    };

    let reconcile = &report.reconcile;
    println!(
        "{prefix}{} {} copied, {} invalid, {} already tagged",
        "✓".green(),
        reconcile.copied.len(),
        reconcile.skipped_invalid.len(),
        reconcile.already_tagged.len(),
    );

    if report.committed {
        let pushed = if report.pushed_branch { "pushed" } else { "not pushed" };
        println!("  ✎  committed ({pushed})");
    } else {
        println!("  ·  working tree clean, nothing committed");
    }

    if report.created_tags.is_empty() {
        println!("  ·  no new versions");
    } else {
        for tag in &report.created_tags {
            println!("  +  tag {}", tag.blue());
        }
    }
    Ok(())
}
