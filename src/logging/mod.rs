//! Append-only event journals: per-run audit log and per-session transcript.

pub mod audit;
pub mod transcript;

pub use audit::AuditLog;
pub use transcript::Transcript;
