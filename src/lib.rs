#![forbid(unsafe_code)]
//! plangate: policy-gated validation and execution of machine-generated
//! change plans.
//!
//! An external planner proposes a [`types::Plan`] — an ordered list of
//! create/edit/delete/run actions. This crate gates and applies it:
//! - every file path is confined to the workspace root ([`types::SafePath`]);
//! - [`policy::verify_plan`] checks the whole plan against a [`policy::Policy`]
//!   before anything touches disk;
//! - [`api::Executor`] previews the plan, mints a one-time approval code, and
//!   only executes once that code has been presented back;
//! - external hook executables run around every action and can veto it;
//! - deletes move files to a run-scoped trash, a git snapshot precedes any
//!   mutation, and every run appends to an audit journal.
//!
//! Execution is single-threaded and strictly sequential: one action in
//! flight, stop on the first failure, no rollback of applied actions.

pub mod api;
pub mod constants;
pub mod fs;
pub mod hooks;
pub mod logging;
pub mod policy;
pub mod proc;
pub mod types;
pub mod vcs;

pub use api::*;
