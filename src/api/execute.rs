//! Execute stage: snapshot-before, hook-around, stop-on-first-error.
//!
//! Per-action failures are values, not unwound control flow: each dispatch
//! arm returns `Result<(), Error>` and the loop aggregates them into the
//! run-level report. The first failure stops the run; already-applied actions
//! are not rolled back — plans are ordered and often causally dependent, and
//! continuing past a failure risks applying later steps against an
//! inconsistent tree.

use std::time::{Duration, Instant};

use serde_json::json;

use crate::constants::{HOOK_TIMEOUT_SECS, POST_ACTION_EVENT, PRE_ACTION_EVENT, RUN_TIMEOUT_SECS};
use crate::fs::{move_to_trash, trash_path};
use crate::hooks::run_hooks;
use crate::logging::AuditLog;
use crate::proc::run_cmd;
use crate::types::{ensure_parent, Action, Error, ExecutionReport, Plan, Result, SafePath};
use crate::vcs;

use super::{approval, Executor};

pub(crate) fn run(api: &Executor, plan: &Plan) -> Result<ExecutionReport> {
    let t0 = Instant::now();
    let run_id = approval::approved_code(api)?
        .ok_or_else(|| Error::approval("no approved plan; run preview and approve first"))?;
    let ws = api.workspace();
    let audit = AuditLog::for_run(ws, &run_id);
    let hook_timeout = Duration::from_secs(HOOK_TIMEOUT_SECS);

    let mut msgs: Vec<String> = Vec::new();
    let mut success = true;

    log::info!("execute: starting run {run_id}");

    // Full snapshot before any mutation. Best-effort: a failed snapshot is a
    // message, not a stop.
    if vcs::is_git_repo(ws) {
        let sha = vcs::snapshot_commit(ws, &format!("plangate pre: {run_id}"));
        msgs.push(format!(
            "git snapshot: {}",
            sha.as_deref().unwrap_or("failed")
        ));
    }

    for a in &plan.actions {
        let payload = json!({"action": a, "run_id": run_id});

        let pre = run_hooks(ws, PRE_ACTION_EVENT, &payload, hook_timeout);
        msgs.extend(pre.messages);
        let step = if pre.allowed {
            dispatch(api, a, &run_id, &mut msgs)
        } else {
            Err(Error::action("action blocked by pre_action hook"))
        };

        if let Err(e) = step {
            msgs.push(format!(
                "ERROR {} {}: {}",
                a.kind(),
                a.file().unwrap_or("-"),
                e
            ));
            success = false;
            break;
        }

        // Post hooks are observational: a denial here cannot undo an action
        // that already happened, so it is surfaced and nothing more.
        let post = run_hooks(ws, POST_ACTION_EVENT, &payload, hook_timeout);
        msgs.extend(post.messages);
        if !post.allowed {
            msgs.push(format!(
                "[hook:{POST_ACTION_EVENT}] denied (action already applied)"
            ));
        }
    }

    for m in &msgs {
        audit.append("step", json!({"msg": m}))?;
    }
    if success {
        audit.append("done", json!({}))?;
        approval::clear_marker(api);
        log::info!("execute: run {run_id} completed");
    } else {
        audit.append("failed", json!({}))?;
        log::warn!("execute: run {run_id} failed");
    }

    Ok(ExecutionReport {
        success,
        messages: msgs,
        run_id,
        duration_ms: u64::try_from(t0.elapsed().as_millis()).unwrap_or(u64::MAX),
    })
}

fn dispatch(api: &Executor, a: &Action, run_id: &str, msgs: &mut Vec<String>) -> Result<()> {
    let ws = api.workspace();
    match a {
        Action::Create { file, content, .. } => {
            let target = SafePath::from_rooted(ws, file)?.as_path();
            ensure_parent(&target)?;
            std::fs::write(&target, content.as_deref().unwrap_or(""))?;
            msgs.push(format!("CREATE {file}"));
            Ok(())
        }
        Action::Delete { file, .. } => {
            let sp = SafePath::from_rooted(ws, file)?;
            let target = sp.as_path();
            if target.is_file() {
                let dest = trash_path(ws, run_id, sp.rel());
                move_to_trash(&target, &dest)?;
                msgs.push(format!("DELETE {file} -> trash"));
            } else {
                msgs.push(format!("DELETE {file} (skip: not a file)"));
            }
            Ok(())
        }
        Action::Edit {
            file,
            content,
            patch,
            ..
        } => {
            let target = SafePath::from_rooted(ws, file)?.as_path();
            match content {
                Some(text) => {
                    ensure_parent(&target)?;
                    std::fs::write(&target, text)?;
                    msgs.push(format!("EDIT {file} (content)"));
                    Ok(())
                }
                None => {
                    if api.policy().enforce_git_for_patches && !vcs::is_git_repo(ws) {
                        return Err(Error::action("patch edit without a git repo is forbidden"));
                    }
                    if !vcs::apply_patch(ws, patch.as_deref().unwrap_or(""))? {
                        return Err(Error::action("git apply failed"));
                    }
                    msgs.push(format!("EDIT {file} (patch)"));
                    Ok(())
                }
            }
        }
        Action::Run { cmd, .. } => {
            let out = run_cmd(
                cmd,
                Some(ws),
                None,
                Some(Duration::from_secs(RUN_TIMEOUT_SECS)),
            )?;
            msgs.push(format!("RUN {} -> code={}", cmd.join(" "), out.code));
            if !out.stdout.trim().is_empty() {
                msgs.push(format!("STDOUT:\n{}", out.stdout.trim()));
            }
            if !out.stderr.trim().is_empty() {
                msgs.push(format!("STDERR:\n{}", out.stderr.trim()));
            }
            if out.code != 0 {
                return Err(Error::action(format!("command exit {}", out.code)));
            }
            Ok(())
        }
    }
}
