//! Error types used across plangate.
use thiserror::Error;

/// High-level error categories for engine operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A path escaped (or tried to escape) the workspace jail.
    #[error("path violation")]
    PathViolation,
    /// Underlying filesystem or process error.
    #[error("io error")]
    Io,
    /// Presented approval code missing or not matching the minted one.
    #[error("approval mismatch")]
    ApprovalMismatch,
    /// A single action's dispatch failed; halts the run.
    #[error("action failure")]
    ActionFailure,
    /// A hook's own invocation failed (distinct from a policy denial).
    #[error("hook failure")]
    HookFailure,
    /// Planner output did not satisfy the action schema.
    #[error("invalid action")]
    InvalidAction,
}

/// Structured error with a kind and human message.
#[derive(Debug, Error)]
#[error("{kind:?}: {msg}")]
pub struct Error {
    pub kind: ErrorKind,
    pub msg: String,
}

impl Error {
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
        }
    }

    pub fn path(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::PathViolation, msg)
    }

    pub fn action(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::ActionFailure, msg)
    }

    pub fn approval(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::ApprovalMismatch, msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorKind::Io, e.to_string())
    }
}

/// Convenient alias for results returning a `types::Error`.
pub type Result<T> = std::result::Result<T, Error>;
