//! Per-session transcript: same record shape and append discipline as the
//! run audit log, keyed by a session identifier instead of an approval code.

use std::path::{Path, PathBuf};

use serde_json::Value;
use uuid::Uuid;

use crate::constants::SESSIONS_DIR;
use crate::types::Result;

#[derive(Clone, Debug)]
pub struct Transcript {
    session_id: String,
    path: PathBuf,
}

impl Transcript {
    /// Open (or create) the transcript for `session_id`, minting a fresh
    /// short identifier when none is given.
    pub fn new(workspace: &Path, session_id: Option<String>) -> Self {
        let session_id = session_id
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string()[..10].to_string());
        let path = workspace
            .join(SESSIONS_DIR)
            .join(format!("{session_id}.jsonl"));
        Self { session_id, path }
    }

    pub fn write(&self, event: &str, payload: Value) -> Result<()> {
        super::audit::append_record(&self.path, event, &payload)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
