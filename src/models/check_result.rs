//! Check result models
//!
//! Per-endpoint outcomes and the run summary.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use super::endpoint::Endpoint;

/// Outcome of checking a single endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum CheckOutcome {
    /// Status in [200, 300)
    Passed { status: u16 },
    /// Any other status
    Failed { status: u16 },
    /// Request could not be completed
    Errored { message: String },
}

impl CheckOutcome {
    /// Classify a response status
    pub fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            CheckOutcome::Passed { status }
        } else {
            CheckOutcome::Failed { status }
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, CheckOutcome::Passed { .. })
    }

    pub fn symbol(&self) -> &'static str {
        if self.is_pass() {
            "✓"
        } else {
            "✗"
        }
    }
}

/// Result of one endpoint check
#[derive(Clone, Debug, Serialize)]
pub struct CheckResult {
    pub endpoint: Endpoint,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
    pub duration_ms: u64,
}

impl CheckResult {
    pub fn new(endpoint: Endpoint, outcome: CheckOutcome, duration_ms: u64) -> Self {
        Self {
            endpoint,
            outcome,
            duration_ms,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.outcome.is_pass()
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.outcome.symbol(), self.endpoint)?;
        match &self.outcome {
            CheckOutcome::Passed { status } | CheckOutcome::Failed { status } => {
                write!(f, " -> {status}")?
            }
            CheckOutcome::Errored { message } => write!(f, " -> {message}")?,
        }
        write!(f, " [{}ms]", self.duration_ms)
    }
}

/// Summary of one checklist run
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub base_url: String,
    pub started_at: DateTime<Utc>,
    pub authenticated: bool,
    pub passed: usize,
    pub failed: usize,
    pub total_duration_ms: u64,
    pub results: Vec<CheckResult>,
}

impl RunSummary {
    pub fn new(
        base_url: impl Into<String>,
        started_at: DateTime<Utc>,
        authenticated: bool,
        results: Vec<CheckResult>,
    ) -> Self {
        let passed = results.iter().filter(|r| r.is_pass()).count();
        let failed = results.len() - passed;
        let total_duration_ms = results.iter().map(|r| r.duration_ms).sum();

        Self {
            base_url: base_url.into(),
            started_at,
            authenticated,
            passed,
            failed,
            total_duration_ms,
            results,
        }
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn is_all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Process exit code: 0 iff nothing failed
    pub fn exit_code(&self) -> i32 {
        if self.is_all_passed() {
            0
        } else {
            1
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RESULTS: {} PASSED | {} FAILED", self.passed, self.failed)
    }
}
