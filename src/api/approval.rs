//! Approval-code lifecycle: minted at preview, consumed at approve, carried
//! as the run identifier, cleared when a run completes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{APPROVAL_CODE_FILE, STATE_FILE};
use crate::types::{ensure_parent, Error, Result};

use super::Executor;

/// Persisted approved marker; its presence is the sole gate for `execute()`.
#[derive(Serialize, Deserialize)]
struct State {
    approved_code: String,
}

/// A short one-time token. Random, lowercase, file- and shell-safe.
pub(crate) fn new_code() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// Persist `code`, overwriting (and invalidating) any previous code.
pub(crate) fn save_code(api: &Executor, code: &str) -> Result<()> {
    let path = api.workspace().join(APPROVAL_CODE_FILE);
    ensure_parent(&path)?;
    std::fs::write(&path, format!("{code}\n"))?;
    Ok(())
}

pub(crate) fn approve(api: &Executor, code: &str) -> Result<()> {
    let path = api.workspace().join(APPROVAL_CODE_FILE);
    if !path.exists() {
        return Err(Error::approval("no preview code minted; run preview first"));
    }
    let expected = std::fs::read_to_string(&path)?;
    if code.trim() != expected.trim() {
        return Err(Error::approval("presented code does not match"));
    }

    let state = State {
        approved_code: code.trim().to_string(),
    };
    let state_path = api.workspace().join(STATE_FILE);
    ensure_parent(&state_path)?;
    let text = serde_json::to_string_pretty(&state)
        .map_err(|e| Error::new(crate::types::ErrorKind::Io, e.to_string()))?;
    std::fs::write(&state_path, text)?;
    Ok(())
}

/// The approved code, when an approved marker exists.
pub(crate) fn approved_code(api: &Executor) -> Result<Option<String>> {
    let path = api.workspace().join(STATE_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(&path)?;
    let state: State = serde_json::from_str(&text)
        .map_err(|e| Error::approval(format!("unreadable approved marker: {e}")))?;
    Ok(Some(state.approved_code))
}

/// Remove the approved marker so a stale approval cannot be replayed.
pub(crate) fn clear_marker(api: &Executor) {
    let _ = std::fs::remove_file(api.workspace().join(STATE_FILE));
}
