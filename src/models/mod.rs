//! Data models for the endpoint checker
//!
//! Endpoint descriptors, the login credential, and check results.

mod check_result;
mod endpoint;

pub use check_result::{CheckOutcome, CheckResult, RunSummary};
pub use endpoint::{Credential, Endpoint, HttpMethod};
