//! The plan verifier: Plan × Policy × environment facts → violations.
//!
//! Pure and accumulating — every violation for every action is reported in
//! one pass so a human can fix several issues at once. An empty result means
//! the plan is accepted. Nothing here touches the tree beyond the jail's
//! path-resolution checks.

use std::path::Path;

use crate::policy::Policy;
use crate::proc::{has_shell_operator, normalize_cmd};
use crate::types::{Action, Plan, SafePath};

/// Verify `plan` against `policy` for the given workspace.
/// `has_git` is the caller's answer to "is this workspace under version
/// control" (see [`crate::vcs::is_git_repo`]).
pub fn verify_plan(plan: &Plan, workspace: &Path, policy: &Policy, has_git: bool) -> Vec<String> {
    let mut errs: Vec<String> = Vec::new();
    if plan.actions.is_empty() {
        errs.push("plan contains no actions".to_string());
    }
    if plan.actions.len() > policy.max_actions {
        errs.push(format!(
            "too many actions: {} > {}",
            plan.actions.len(),
            policy.max_actions
        ));
    }

    for (i, a) in plan.actions.iter().enumerate() {
        match a {
            Action::Create { file, .. } | Action::Edit { file, .. } | Action::Delete { file, .. } => {
                if file.is_empty() {
                    errs.push(format!("[{i}] missing file"));
                    continue;
                }
                if file.split('/').any(|seg| seg == "..") {
                    errs.push(format!("[{i}] '..' in path forbidden: {file}"));
                    continue;
                }
                if let Err(e) = SafePath::from_rooted(workspace, file) {
                    errs.push(format!("[{i}] invalid path: {e}"));
                }
                if let Action::Edit { content, patch, .. } = a {
                    if content.is_none() && patch.is_none() {
                        errs.push(format!("[{i}] edit requires content or patch"));
                    }
                    if patch.is_some() && policy.enforce_git_for_patches && !has_git {
                        errs.push(format!(
                            "[{i}] patch requires a git repo (enforce_git_for_patches=true)"
                        ));
                    }
                }
            }
            Action::Run { cmd, .. } => {
                let argv = normalize_cmd(cmd);
                let Some(first) = argv.first() else {
                    errs.push(format!("[{i}] run without cmd"));
                    continue;
                };
                if has_shell_operator(&argv) {
                    errs.push(format!(
                        "[{i}] pipes/redirections/shell operators forbidden"
                    ));
                }
                let base = Path::new(first)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| first.clone());
                if policy.disallow_commands.contains(&base) {
                    errs.push(format!("[{i}] command explicitly forbidden: {base}"));
                }
                if !policy.allow_commands.contains(&base) {
                    errs.push(format!("[{i}] command not allowed: {base}"));
                }
                if argv.iter().any(|t| t == "sudo") {
                    errs.push(format!("[{i}] 'sudo' forbidden"));
                }
            }
        }
    }
    errs
}
