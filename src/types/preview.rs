/// One human-reviewable row per action, produced by `preview()`.
///
/// Ephemeral: exists only for review before approval, never persisted.
#[derive(Clone, Debug)]
pub struct PreviewItem {
    /// Action type tag (`create`, `edit`, `delete`, `run`).
    pub kind: &'static str,
    /// Workspace-relative path, for file-touching actions.
    pub relpath: Option<String>,
    /// Short human summary of the pending operation.
    pub summary: String,
    /// Unified diff (or raw patch text) when the action has one.
    pub diff: Option<String>,
    /// Literal argument vector, for run actions.
    pub cmd: Option<Vec<String>>,
}

/// Result of a `preview()` call: the reviewable items plus the freshly minted
/// one-time approval code that was persisted to the workspace.
#[derive(Clone, Debug)]
pub struct Preview {
    pub items: Vec<PreviewItem>,
    pub code: String,
}
