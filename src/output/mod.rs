//! Output module
//!
//! Human-readable and JSON rendering of a run.

mod formatter;
mod reporter;

pub use formatter::{OutputFormat, ResultFormatter};
pub use reporter::Reporter;
