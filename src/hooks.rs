//! External policy hooks: the engine's sole user-pluggable extension point.
//!
//! Hooks are executables (selected by file mode, not extension) under
//! `.plangate/hooks/<event>/`, run in sorted name order with the JSON payload
//! on stdin. Exit code is the verdict: non-zero denies. Denials accumulate —
//! a hook after a denial still runs, so all output is collected. A missing
//! event directory trivially allows; hooks are strictly opt-in.

use std::path::Path;
use std::time::Duration;

use serde_json::Value;

use crate::constants::HOOKS_DIR;
use crate::proc::run_cmd;

/// Aggregated verdict of one hook event.
#[derive(Clone, Debug)]
pub struct HookOutcome {
    pub allowed: bool,
    pub messages: Vec<String>,
}

impl HookOutcome {
    fn allow() -> Self {
        Self {
            allowed: true,
            messages: Vec::new(),
        }
    }
}

/// Run every hook registered for `event`, feeding each the serialized
/// `payload`. A hook that times out is killed and counted as a denial.
/// A hook that cannot be invoked at all is a denial plus an error message —
/// hooks never silently pass on an internal error.
pub fn run_hooks(workspace: &Path, event: &str, payload: &Value, timeout: Duration) -> HookOutcome {
    let base = workspace.join(HOOKS_DIR).join(event);
    if !base.is_dir() {
        return HookOutcome::allow();
    }

    let mut names: Vec<String> = match std::fs::read_dir(&base) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect(),
        // The directory exists but cannot be listed: fail closed. Hooks
        // never silently pass on an internal error.
        Err(e) => {
            return HookOutcome {
                allowed: false,
                messages: vec![format!("[hook:{event}] ERROR {e}")],
            }
        }
    };
    names.sort();

    let payload_text = payload.to_string();
    let mut out = HookOutcome::allow();
    for name in names {
        let path = base.join(&name);
        if !is_executable(&path) {
            continue;
        }
        let argv = vec![path.to_string_lossy().into_owned()];
        match run_cmd(&argv, None, Some(&payload_text), Some(timeout)) {
            Ok(res) => {
                let stdout = res.stdout.trim();
                if !stdout.is_empty() {
                    out.messages.push(format!("[hook:{event}:{name}] {stdout}"));
                }
                let stderr = res.stderr.trim();
                if !stderr.is_empty() {
                    out.messages
                        .push(format!("[hook:{event}:{name}:stderr] {stderr}"));
                }
                if res.code != 0 {
                    out.allowed = false;
                }
            }
            Err(e) => {
                out.messages.push(format!("[hook:{event}:{name}] ERROR {e}"));
                out.allowed = false;
            }
        }
    }
    out
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o100 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
