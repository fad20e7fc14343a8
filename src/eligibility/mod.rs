//! Hospital-at-Home eligibility classification.
//!
//! Pure and synchronous: one patient record plus one narrative assessment in,
//! one verdict out. No I/O, no logging, no state between calls.

pub mod classify;
pub mod rules;

pub use classify::*;
pub use rules::*;
