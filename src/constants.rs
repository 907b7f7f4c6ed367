//! Shared crate-wide constants for plangate.
//!
//! Centralizes the on-disk workspace layout and default timeouts.
//! Everything here is relative to the workspace root.

/// Directory under the workspace root that holds all engine state.
pub const APP_DIR: &str = ".plangate";

/// Plain-text file holding the one-time approval code minted by `preview()`.
pub const APPROVAL_CODE_FILE: &str = ".plangate/approval_code.txt";

/// Persisted plan for the Drafted stage.
pub const PLAN_FILE: &str = ".plangate/plan.json";

/// Approved-marker record `{"approved_code": "..."}`; its presence gates `execute()`.
pub const STATE_FILE: &str = ".plangate/state.json";

/// Per-run audit logs, one `<run_id>.jsonl` file each.
pub const LOG_DIR: &str = ".plangate/logs";

/// Run-scoped holding area for deleted files, `<run_id>/<relpath>`.
pub const TRASH_DIR: &str = ".plangate/trash";

/// Per-session transcripts, one `<session_id>.jsonl` file each.
pub const SESSIONS_DIR: &str = ".plangate/sessions";

/// Hook executables live under `<HOOKS_DIR>/<event>/`.
pub const HOOKS_DIR: &str = ".plangate/hooks";

/// Hook event fired immediately before each action; a denial vetoes the action.
pub const PRE_ACTION_EVENT: &str = "pre_action";

/// Hook event fired immediately after each action; observational only.
pub const POST_ACTION_EVENT: &str = "post_action";

/// Upper bound for a `run` action's subprocess, in seconds.
pub const RUN_TIMEOUT_SECS: u64 = 1800;

/// Upper bound for a single hook invocation, in seconds.
pub const HOOK_TIMEOUT_SECS: u64 = 5;

/// Exit code reported for a forcibly terminated (timed out) subprocess.
pub const TIMEOUT_EXIT_CODE: i32 = 124;
