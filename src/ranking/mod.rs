//! The ranking pass: gather inputs per patient, classify, and order.

pub mod orchestrator;
pub mod types;

pub use orchestrator::*;
pub use types::*;
