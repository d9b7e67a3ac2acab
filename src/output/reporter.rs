//! Run reporter
//!
//! Streams the human-readable report while a run progresses. In JSON mode
//! everything is held back until [`Reporter::finish`] prints the summary.

use std::io::{self, Write};

use super::formatter::{OutputFormat, ResultFormatter};
use crate::auth::AuthError;
use crate::models::{CheckResult, Credential, RunSummary};

const BANNER_TITLE: &str = "API ENDPOINT SMOKE TEST";

pub struct Reporter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn text(&mut self, line: impl AsRef<str>) -> io::Result<()> {
        if self.format == OutputFormat::Text {
            writeln!(self.out, "{}", line.as_ref())?;
        }
        Ok(())
    }

    pub fn banner(&mut self) -> io::Result<()> {
        self.text(format!("\n{}", ResultFormatter::double_rule()))?;
        self.text(BANNER_TITLE)?;
        self.text(format!("{}\n", ResultFormatter::double_rule()))
    }

    fn phase(&mut self, number: u8, name: &str) -> io::Result<()> {
        self.text(format!("[PHASE {number}] {name}"))?;
        self.text(ResultFormatter::single_rule())
    }

    pub fn auth_phase(&mut self) -> io::Result<()> {
        self.phase(1, "AUTHENTICATION")
    }

    /// Endpoint lines start after a blank line
    pub fn checks_phase(&mut self) -> io::Result<()> {
        self.phase(2, "ENDPOINT TESTS")?;
        self.text("")
    }

    pub fn auth_succeeded(&mut self, credential: &Credential) -> io::Result<()> {
        self.text(format!(
            "{}\n",
            ResultFormatter::format_auth_success(credential)
        ))
    }

    pub fn auth_failed(&mut self, error: &AuthError) -> io::Result<()> {
        let line = match error {
            AuthError::Rejected(status) => ResultFormatter::format_auth_rejected(*status),
            other => ResultFormatter::format_auth_error(&other.to_string()),
        };
        self.text(format!("{line}\n"))
    }

    pub fn check(&mut self, result: &CheckResult) -> io::Result<()> {
        self.text(ResultFormatter::format_check(result))
    }

    /// Summary block, or the JSON document in JSON mode
    pub fn finish(&mut self, summary: &RunSummary) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                self.text(format!("\n{}", ResultFormatter::single_rule()))?;
                self.text(format!("\n{}", ResultFormatter::format_summary(summary)))?;
                self.text(format!("{}\n", ResultFormatter::double_rule()))?;
            }
            OutputFormat::Json => {
                writeln!(self.out, "{}", ResultFormatter::format_json(summary))?;
            }
        }
        self.out.flush()
    }
}
