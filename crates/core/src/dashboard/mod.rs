//! Dashboard summary types.
//!
//! Aggregate business metrics computed fresh on every request.

pub mod types;

pub use types::*;
