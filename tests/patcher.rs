//! Git coupling: repo probe, snapshot commit, check-then-apply patching.

use std::path::Path;
use std::process::Command;

use plangate::vcs::{apply_patch, is_git_repo, snapshot_commit};

fn git(ws: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args([
            "-c",
            "user.name=test",
            "-c",
            "user.email=test@example.invalid",
        ])
        .args(args)
        .current_dir(ws)
        .output()
        .unwrap();
    assert!(status.status.success(), "git {args:?} failed");
}

fn init_repo(ws: &Path) {
    git(ws, &["init", "-q"]);
    std::fs::write(ws.join("f.txt"), "old\n").unwrap();
    git(ws, &["add", "-A"]);
    git(ws, &["commit", "-q", "-m", "base"]);
}

const GOOD_PATCH: &str = "--- a/f.txt\n+++ b/f.txt\n@@ -1 +1 @@\n-old\n+new\n";
const BAD_PATCH: &str = "--- a/f.txt\n+++ b/f.txt\n@@ -1 +1 @@\n-missing\n+new\n";

#[test]
fn detects_git_repos() {
    let td = tempfile::tempdir().unwrap();
    assert!(!is_git_repo(td.path()));
    init_repo(td.path());
    assert!(is_git_repo(td.path()));
}

#[test]
fn applies_a_clean_patch() {
    let td = tempfile::tempdir().unwrap();
    init_repo(td.path());
    assert!(apply_patch(td.path(), GOOD_PATCH).unwrap());
    assert_eq!(
        std::fs::read_to_string(td.path().join("f.txt")).unwrap(),
        "new\n"
    );
}

#[test]
fn failed_check_leaves_the_tree_untouched() {
    let td = tempfile::tempdir().unwrap();
    init_repo(td.path());
    assert!(!apply_patch(td.path(), BAD_PATCH).unwrap());
    assert_eq!(
        std::fs::read_to_string(td.path().join("f.txt")).unwrap(),
        "old\n"
    );
}

#[test]
fn snapshot_commit_returns_head_sha() {
    let td = tempfile::tempdir().unwrap();
    init_repo(td.path());
    // Need identity for the snapshot commit itself.
    git(td.path(), &["config", "user.name", "test"]);
    git(td.path(), &["config", "user.email", "test@example.invalid"]);
    std::fs::write(td.path().join("g.txt"), "dirty\n").unwrap();

    let sha = snapshot_commit(td.path(), "pre run").unwrap();
    assert_eq!(sha.len(), 40);

    // Nothing left unstaged after the snapshot.
    let out = Command::new("git")
        .args(["status", "--porcelain"])
        .current_dir(td.path())
        .output()
        .unwrap();
    assert!(out.stdout.is_empty());
}

#[test]
fn snapshot_failure_is_none_not_an_error() {
    let td = tempfile::tempdir().unwrap();
    // Not a repo: add/commit fail, the caller just gets None.
    assert!(snapshot_commit(td.path(), "pre run").is_none());
}
