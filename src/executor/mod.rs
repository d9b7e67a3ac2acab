//! Checklist execution
//!
//! Sequential runner: authenticate once, then check each endpoint.

mod runner;

pub use runner::CheckRunner;
