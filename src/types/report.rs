/// Outcome of `execute()` for one approved run.
#[derive(Clone, Debug, Default)]
pub struct ExecutionReport {
    /// True when every action applied; false on the first fatal action error.
    pub success: bool,
    /// Ordered message stream: snapshot note, per-action outcomes, hook
    /// output, captured stdout/stderr, and the terminal error if any.
    pub messages: Vec<String>,
    /// The approved code that identified this run (trash paths, hook
    /// payloads, audit log).
    pub run_id: String,
    pub duration_ms: u64,
}
