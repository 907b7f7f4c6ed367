//! Policy value and the stateless plan verifier.

pub mod config;
pub mod verifier;

pub use config::Policy;
pub use verifier::verify_plan;
