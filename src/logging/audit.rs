//! Append-only per-run audit log.
//!
//! One `{ts, event, payload}` JSON record per line, written to
//! `.plangate/logs/<run_id>.jsonl`. Write-only: records are never mutated and
//! the engine never reads them back — consumption is an external concern.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::constants::LOG_DIR;
use crate::types::{ensure_parent, Result};

#[derive(Serialize)]
struct AuditRecord<'a> {
    ts: i64,
    event: &'a str,
    payload: &'a Value,
}

/// Handle to one run's audit log file.
#[derive(Clone, Debug)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    /// Log keyed by the run identifier (the approved code).
    pub fn for_run(workspace: &Path, run_id: &str) -> Self {
        Self {
            path: workspace.join(LOG_DIR).join(format!("{run_id}.jsonl")),
        }
    }

    /// Append one record. Creates the log directory and file on first use.
    pub fn append(&self, event: &str, payload: Value) -> Result<()> {
        append_record(&self.path, event, &payload)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub(crate) fn append_record(path: &Path, event: &str, payload: &Value) -> Result<()> {
    ensure_parent(path)?;
    let rec = AuditRecord {
        ts: OffsetDateTime::now_utc().unix_timestamp(),
        event,
        payload,
    };
    let mut f = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let mut line = serde_json::to_string(&rec).unwrap_or_else(|_| "{}".to_string());
    line.push('\n');
    f.write_all(line.as_bytes())?;
    Ok(())
}
