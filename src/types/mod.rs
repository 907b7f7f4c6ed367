//! Data-only types shared across the engine.

pub mod errors;
pub mod plan;
pub mod preview;
pub mod report;
pub mod safepath;

pub use errors::{Error, ErrorKind, Result};
pub use plan::{Action, Plan};
pub use preview::{Preview, PreviewItem};
pub use report::ExecutionReport;
pub use safepath::{ensure_parent, SafePath};
