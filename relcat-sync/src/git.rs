//! [`Vcs`] implementation backed by the `git` command-line client.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::{io_err, SyncError};
use crate::vcs::Vcs;

const REMOTE: &str = "origin";

/// Git checkout driven through `git` subprocesses.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_path: PathBuf,
}

impl GitCli {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Checks if the directory is a git repository.
    pub fn is_git_repo(&self) -> bool {
        self.repo_path.join(".git").exists()
    }

    /// Checks if `HEAD` points at a commit.
    pub fn has_commits(&self) -> bool {
        self.ref_exists("HEAD")
    }

    fn ref_exists(&self, reference: &str) -> bool {
        self.run_git(&["rev-parse", "--verify", "--quiet", reference])
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn init_or_clone(&self, remote: Option<&str>) -> Result<(), SyncError> {
        match remote {
            Some(url) => {
                if let Some(parent) = self.repo_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
                }
                tracing::info!("cloning {url} into {}", self.repo_path.display());
                let output = Command::new("git")
                    .args(["clone", "--quiet", url])
                    .arg(&self.repo_path)
                    .output()
                    .map_err(|e| spawn_err("clone", e))?;
                check("clone", output).map(drop)
            }
            None => {
                std::fs::create_dir_all(&self.repo_path).map_err(|e| io_err(&self.repo_path, e))?;
                tracing::info!("initialising repository at {}", self.repo_path.display());
                self.git(&["init", "--quiet"]).map(drop)
            }
        }
    }

    fn set_remote(&self, url: &str) -> Result<(), SyncError> {
        let remote_exists = self
            .run_git(&["remote", "get-url", REMOTE])
            .map(|output| output.status.success())
            .unwrap_or(false);
        if remote_exists {
            self.git(&["remote", "set-url", REMOTE, url]).map(drop)
        } else {
            self.git(&["remote", "add", REMOTE, url]).map(drop)
        }
    }

    fn checkout_branch(&self, branch: &str, remote: Option<&str>) -> Result<(), SyncError> {
        let remote_ref = format!("refs/remotes/{REMOTE}/{branch}");
        let local_ref = format!("refs/heads/{branch}");

        if remote.is_some() && self.ref_exists(&remote_ref) {
            let start = format!("{REMOTE}/{branch}");
            self.git(&["checkout", "--quiet", "-f", "-B", branch, &start])?;
        } else if self.ref_exists(&local_ref) {
            self.git(&["checkout", "--quiet", "-f", branch])?;
        } else if !self.has_commits() {
            // Unborn HEAD (fresh init or empty clone): just name the branch.
            self.git(&["symbolic-ref", "HEAD", &local_ref])?;
        } else {
            self.git(&["checkout", "--quiet", "--orphan", branch])?;
            self.git(&["rm", "-r", "-f", "--quiet", "--ignore-unmatch", "."])?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Private helpers
    // ------------------------------------------------------------------------

    /// Runs a git command in the repository directory.
    fn run_git(&self, args: &[&str]) -> Result<Output, SyncError> {
        Command::new("git")
            .current_dir(&self.repo_path)
            .args(args)
            .output()
            .map_err(|e| spawn_err(args.first().copied().unwrap_or("git"), e))
    }

    /// Runs a git command and returns its stdout, failing on non-zero exit.
    fn git(&self, args: &[&str]) -> Result<String, SyncError> {
        let output = self.run_git(args)?;
        check(args.first().copied().unwrap_or("git"), output)
    }
}

impl Vcs for GitCli {
    fn prepare(&mut self, branch: &str, remote: Option<&str>) -> Result<(), SyncError> {
        if !self.is_git_repo() {
            self.init_or_clone(remote)?;
        }
        if let Some(url) = remote {
            self.set_remote(url)?;
            self.git(&["fetch", "--quiet", "--tags", REMOTE])?;
        }
        self.checkout_branch(branch, remote)
    }

    fn configure_identity(&mut self, name: &str, email: &str) -> Result<(), SyncError> {
        self.git(&["config", "user.name", name])?;
        self.git(&["config", "user.email", email])?;
        Ok(())
    }

    fn list_tags(&self) -> Result<BTreeSet<String>, SyncError> {
        let stdout = self.git(&["tag", "--list"])?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn stage_all(&mut self) -> Result<(), SyncError> {
        self.git(&["add", "--all", "."]).map(drop)
    }

    fn is_clean(&self) -> Result<bool, SyncError> {
        let stdout = self.git(&["status", "--porcelain"])?;
        Ok(stdout.trim().is_empty())
    }

    fn commit(&mut self, message: &str) -> Result<(), SyncError> {
        self.git(&["commit", "--quiet", "-m", message]).map(drop)
    }

    fn push_branch(&mut self, branch: &str, force: bool) -> Result<(), SyncError> {
        let mut args = vec!["push", "--quiet"];
        if force {
            args.push("--force");
        }
        args.extend([REMOTE, branch]);
        self.git(&args).map(drop)
    }

    fn is_published(&self, branch: &str) -> Result<bool, SyncError> {
        if !self.has_commits() {
            return Ok(true);
        }
        // Pushing to a configured remote refreshes the tracking ref as well.
        let remote_ref = format!("refs/remotes/{REMOTE}/{branch}");
        if !self.ref_exists(&remote_ref) {
            return Ok(false);
        }
        let head = self.git(&["rev-parse", "HEAD"])?;
        let published = self.git(&["rev-parse", &remote_ref])?;
        Ok(head.trim() == published.trim())
    }

    fn create_tag(&mut self, name: &str) -> Result<(), SyncError> {
        self.git(&["tag", name]).map(drop)
    }

    fn push_tags(&mut self) -> Result<(), SyncError> {
        self.git(&["push", "--quiet", REMOTE, "--tags"]).map(drop)
    }
}

fn spawn_err(command: &str, source: std::io::Error) -> SyncError {
    SyncError::Git {
        command: command.to_string(),
        message: source.to_string(),
    }
}

fn check(command: &str, output: Output) -> Result<String, SyncError> {
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        Err(SyncError::Git {
            command: command.to_string(),
            message: format_git_error(&output),
        })
    }
}

/// Formats a git error with both stdout and stderr for better debugging.
fn format_git_error(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();

    match (stderr.is_empty(), stdout.is_empty()) {
        (true, true) => format!(
            "command failed with exit code {}",
            output.status.code().unwrap_or(-1)
        ),
        (true, false) => stdout,
        (false, true) => stderr,
        (false, false) => format!("{stderr}\n{stdout}"),
    }
}
