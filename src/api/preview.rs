//! Preview stage: per-action reviewable items, no tree mutation.

use similar::TextDiff;

use crate::types::{Action, Plan, Preview, PreviewItem, Result, SafePath};

use super::{approval, Executor};

// Cap on how much of an existing file is diffed for review.
const MAX_DIFF_BYTES: usize = 1024 * 1024;

pub(crate) fn run(api: &Executor, plan: &Plan) -> Result<Preview> {
    let ws = api.workspace();
    let mut items: Vec<PreviewItem> = Vec::new();

    for a in &plan.actions {
        match a {
            Action::Create { file, content, .. } => {
                SafePath::from_rooted(ws, file)?;
                let after = content.as_deref().unwrap_or("");
                items.push(PreviewItem {
                    kind: "create",
                    relpath: Some(file.clone()),
                    summary: format!("Create file ({} lines)", after.lines().count()),
                    diff: Some(unified_diff("", after, file)),
                    cmd: None,
                });
            }
            Action::Delete { file, .. } => {
                let target = SafePath::from_rooted(ws, file)?.as_path();
                let exists = target.exists();
                let size = target
                    .is_file()
                    .then(|| std::fs::metadata(&target).map(|m| m.len()).unwrap_or(0))
                    .unwrap_or(0);
                items.push(PreviewItem {
                    kind: "delete",
                    relpath: Some(file.clone()),
                    summary: format!("Delete file (exists={exists}, bytes={size})"),
                    diff: None,
                    cmd: None,
                });
            }
            Action::Edit {
                file,
                content,
                patch,
                ..
            } => {
                let target = SafePath::from_rooted(ws, file)?.as_path();
                match content {
                    Some(after) => {
                        // A not-yet-existing target diffs from empty.
                        let before = read_text_limited(&target, MAX_DIFF_BYTES);
                        items.push(PreviewItem {
                            kind: "edit",
                            relpath: Some(file.clone()),
                            summary: format!("Edit file via content ({} lines)", after.lines().count()),
                            diff: Some(unified_diff(&before, after, file)),
                            cmd: None,
                        });
                    }
                    None => {
                        items.push(PreviewItem {
                            kind: "edit",
                            relpath: Some(file.clone()),
                            summary: "Edit via patch".to_string(),
                            diff: patch.clone(),
                            cmd: None,
                        });
                    }
                }
            }
            Action::Run { cmd, .. } => {
                items.push(PreviewItem {
                    kind: "run",
                    relpath: None,
                    summary: "Run command".to_string(),
                    diff: None,
                    cmd: Some(cmd.clone()),
                });
            }
        }
    }

    // Always regenerate: a second preview implicitly invalidates the old code.
    let code = approval::new_code();
    approval::save_code(api, &code)?;
    log::info!("preview: {} item(s), code minted", items.len());
    Ok(Preview { items, code })
}

fn unified_diff(before: &str, after: &str, file: &str) -> String {
    TextDiff::from_lines(before, after)
        .unified_diff()
        .header(&format!("a/{file}"), &format!("b/{file}"))
        .to_string()
}

fn read_text_limited(path: &std::path::Path, max_bytes: usize) -> String {
    match std::fs::read(path) {
        Ok(mut bytes) => {
            bytes.truncate(max_bytes);
            if bytes.starts_with(b"\x00") {
                return String::new();
            }
            String::from_utf8_lossy(&bytes).into_owned()
        }
        Err(_) => String::new(),
    }
}
