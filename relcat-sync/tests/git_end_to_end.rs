//! Full runs against the real `git` binary and a temporary bare remote.

use std::fs;
use std::path::Path;
use std::process::Command;

use relcat_sync::{GitCli, RunConfig, RunState, SyncCoordinator};
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .expect("spawn git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

fn cache_archive(ws: &Path, rel: &str) {
    let path = ws.join(".cache").join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, format!("archive {rel}")).unwrap();
}

fn bare_remote(root: &Path) -> String {
    let remote = root.join("remote.git");
    fs::create_dir_all(&remote).unwrap();
    git(&remote, &["init", "--bare", "--quiet"]);
    remote.to_string_lossy().into_owned()
}

fn config(ws: &Path, remote: Option<String>, dry_run: bool) -> RunConfig {
    let mut config = RunConfig::new(ws);
    config.remote = remote;
    config.dry_run = dry_run;
    config.is_ci = true;
    config
}

fn run(config: RunConfig) -> relcat_sync::RunReport {
    let data = config.data_dir();
    SyncCoordinator::new(config, GitCli::new(data))
        .expect("coordinator")
        .run()
        .into_result()
        .expect("run succeeds")
}

#[test]
fn publishes_once_and_reruns_cleanly() {
    let root = TempDir::new().unwrap();
    let ws = root.path().join("ws");
    let remote = bare_remote(root.path());
    cache_archive(&ws, "22.04/python-3.12.1.tar.xz");
    cache_archive(&ws, "20.04/python-3.10.4.tar.xz");

    let first = run(config(&ws, Some(remote.clone()), false));
    assert!(first.committed && first.pushed_branch && first.pushed_tags);
    assert_eq!(first.created_tags, vec!["3.10.4", "3.12.1"]);

    let remote_path = Path::new(&remote);
    assert_eq!(git(remote_path, &["rev-list", "--count", "release"]).trim(), "1");
    assert_eq!(git(remote_path, &["tag", "--list"]), "3.10.4\n3.12.1\n");

    let readme = git(remote_path, &["show", "release:README.md"]);
    assert!(readme.contains("* [3.12.1](22.04/python-3.12.1.tar.xz)"));

    let second = run(config(&ws, Some(remote.clone()), false));
    assert!(!second.committed);
    assert!(second.created_tags.is_empty());
    assert!(second.transitions.contains(&RunState::CleanNoop));
    assert_eq!(git(remote_path, &["rev-list", "--count", "release"]).trim(), "1");
}

#[test]
fn new_archive_on_rerun_adds_one_commit_and_one_tag() {
    let root = TempDir::new().unwrap();
    let ws = root.path().join("ws");
    let remote = bare_remote(root.path());
    cache_archive(&ws, "22.04/python-3.12.1.tar.xz");
    run(config(&ws, Some(remote.clone()), false));

    cache_archive(&ws, "22.04/python-3.12.2.tar.xz");
    let report = run(config(&ws, Some(remote.clone()), false));

    assert_eq!(report.created_tags, vec!["3.12.2"]);
    let remote_path = Path::new(&remote);
    assert_eq!(git(remote_path, &["rev-list", "--count", "release"]).trim(), "2");
    assert_eq!(git(remote_path, &["tag", "--list"]), "3.12.1\n3.12.2\n");
}

#[test]
fn dry_run_keeps_everything_local() {
    let root = TempDir::new().unwrap();
    let ws = root.path().join("ws");
    cache_archive(&ws, "20.04/python-3.9.18.tar.xz");

    let report = run(config(&ws, None, true));
    assert!(report.committed);
    assert!(!report.pushed_branch && !report.pushed_tags);

    let data = ws.join("data");
    assert_eq!(git(&data, &["tag", "--list"]), "3.9.18\n");
    assert_eq!(git(&data, &["status", "--porcelain"]), "");
    assert!(data.join("20.04/python-3.9.18.tar.xz").exists());
}

#[test]
fn real_run_after_dry_run_publishes_the_release_branch() {
    let root = TempDir::new().unwrap();
    let ws = root.path().join("ws");
    let remote = bare_remote(root.path());
    cache_archive(&ws, "22.04/python-3.12.1.tar.xz");

    let dry = run(config(&ws, Some(remote.clone()), true));
    assert!(dry.committed && !dry.pushed_branch);

    let real = run(config(&ws, Some(remote.clone()), false));
    assert!(real.transitions.contains(&RunState::CleanNoop));
    assert!(real.pushed_branch && real.pushed_tags);

    let remote_path = Path::new(&remote);
    assert_eq!(git(remote_path, &["rev-list", "--count", "release"]).trim(), "1");
    assert_eq!(git(remote_path, &["tag", "--list"]), "3.12.1\n");
    git(remote_path, &["merge-base", "--is-ancestor", "3.12.1", "release"]);

    let again = run(config(&ws, Some(remote), false));
    assert!(!again.pushed_branch, "branch already published");
}
