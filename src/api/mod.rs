//! The executor facade: preview → approval → execute.

use std::path::{Path, PathBuf};

use crate::constants::PLAN_FILE;
use crate::policy::Policy;
use crate::types::{ensure_parent, Error, ErrorKind, ExecutionReport, Plan, Preview, Result};

mod approval;
mod execute;
mod preview;

/// Drives one workspace through the plan lifecycle:
/// Drafted → Previewed → Approved → Executing → Completed | Failed.
///
/// The executor exclusively owns the approval-code file and the approved
/// marker; nothing else writes them.
pub struct Executor {
    workspace: PathBuf,
    policy: Policy,
}

impl Executor {
    /// Bind to a workspace root. The root must exist; it is canonicalized so
    /// every downstream jail check sees the same base.
    pub fn new(workspace: &Path, policy: Policy) -> Result<Self> {
        let workspace = workspace
            .canonicalize()
            .map_err(|e| Error::new(ErrorKind::Io, format!("workspace root: {e}")))?;
        Ok(Self { workspace, policy })
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Compute reviewable items for every action without touching the tree,
    /// and mint a fresh one-time approval code. Any previously minted code is
    /// overwritten and thereby invalidated.
    pub fn preview(&self, plan: &Plan) -> Result<Preview> {
        preview::run(self, plan)
    }

    /// Consume a presented approval code. On an exact (trimmed) match against
    /// the persisted code, records the approved marker that gates `execute`.
    pub fn approve(&self, code: &str) -> Result<()> {
        approval::approve(self, code)
    }

    /// Perform the approved plan step by step: snapshot-before, hook-around,
    /// stop-on-first-error. Returns `ApprovalMismatch` when no approved
    /// marker exists; action failures are reported in the `ExecutionReport`,
    /// not as an `Err`.
    pub fn execute(&self, plan: &Plan) -> Result<ExecutionReport> {
        execute::run(self, plan)
    }

    /// Persist the drafted plan at its well-known workspace location.
    pub fn save_plan(&self, plan: &Plan) -> Result<()> {
        let path = self.workspace.join(PLAN_FILE);
        ensure_parent(&path)?;
        let text = serde_json::to_string_pretty(plan)
            .map_err(|e| Error::new(ErrorKind::Io, format!("serialize plan: {e}")))?;
        std::fs::write(&path, text)?;
        Ok(())
    }

    /// Load the drafted plan, re-validating the action shapes on the way in.
    pub fn load_plan(&self) -> Result<Plan> {
        let path = self.workspace.join(PLAN_FILE);
        let text = std::fs::read_to_string(&path)?;
        serde_json::from_str(&text)
            .map_err(|e| Error::new(ErrorKind::InvalidAction, format!("plan file: {e}")))
    }
}
