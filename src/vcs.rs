//! Version-control coupling.
//!
//! The engine treats git as an opaque external tool with three operations:
//! "is this a repo", "stage everything and commit", and "check/apply a
//! patch". Results are booleans or text; no library binding.

use std::io::Write;
use std::path::Path;

use crate::proc::run_cmd;
use crate::types::{Error, ErrorKind, Result};

fn git(args: &[&str], cwd: &Path) -> Result<crate::proc::ProcOutput> {
    let argv: Vec<String> = std::iter::once("git")
        .chain(args.iter().copied())
        .map(str::to_string)
        .collect();
    run_cmd(&argv, Some(cwd), None, None)
}

/// True when `path` is inside a git work tree.
pub fn is_git_repo(path: &Path) -> bool {
    git(&["rev-parse", "--is-inside-work-tree"], path)
        .map(|o| o.code == 0)
        .unwrap_or(false)
}

/// Stage everything and commit with `message`; returns the new HEAD sha.
/// Best-effort: any failing step yields `None`, never an error.
pub fn snapshot_commit(path: &Path, message: &str) -> Option<String> {
    let add = git(&["add", "-A"], path).ok()?;
    if add.code != 0 {
        return None;
    }
    let commit = git(&["commit", "-m", message], path).ok()?;
    if commit.code != 0 {
        return None;
    }
    let head = git(&["rev-parse", "HEAD"], path).ok()?;
    (head.code == 0).then(|| head.stdout.trim().to_string())
}

/// Apply `patch_text` to the working tree, check-then-apply.
///
/// The patch is staged in a transient file, dry-run checked with
/// `git apply --check`, and only applied when the check passes. A failing
/// check returns `Ok(false)` without mutating the tree. The transient file is
/// removed on every path (RAII).
pub fn apply_patch(workspace: &Path, patch_text: &str) -> Result<bool> {
    let mut tmp = tempfile::Builder::new()
        .suffix(".patch")
        .tempfile()
        .map_err(|e| Error::new(ErrorKind::Io, format!("patch tempfile: {e}")))?;
    tmp.write_all(patch_text.as_bytes())
        .map_err(|e| Error::new(ErrorKind::Io, format!("patch tempfile: {e}")))?;
    tmp.flush()
        .map_err(|e| Error::new(ErrorKind::Io, format!("patch tempfile: {e}")))?;

    let tmp_path = tmp.path().to_string_lossy().into_owned();
    let check = git(&["apply", "--check", &tmp_path], workspace)?;
    if check.code != 0 {
        return Ok(false);
    }
    let apply = git(&["apply", &tmp_path], workspace)?;
    Ok(apply.code == 0)
}
