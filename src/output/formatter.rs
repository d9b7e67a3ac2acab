//! Line formatting for the run report
//!
//! Pure string builders; [`super::Reporter`] decides where they go.

use crate::models::{CheckOutcome, CheckResult, Credential, Endpoint, RunSummary};

/// Width of banner and separator rules
const RULE_WIDTH: usize = 80;

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "table" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

pub struct ResultFormatter;

impl ResultFormatter {
    pub fn double_rule() -> String {
        "=".repeat(RULE_WIDTH)
    }

    pub fn single_rule() -> String {
        "-".repeat(RULE_WIDTH)
    }

    /// Line(s) for one check; transport errors add an exception line
    pub fn format_check(result: &CheckResult) -> String {
        let endpoint = &result.endpoint;
        let columns = format!(
            "{:6} {:30} {}",
            endpoint.method, endpoint.path, endpoint.description
        );

        match &result.outcome {
            CheckOutcome::Passed { status } => format!("✓ {status} OK    {columns}"),
            CheckOutcome::Failed { status } => format!("✗ {status} ERROR  {columns}"),
            CheckOutcome::Errored { message } => {
                format!("✗ ERROR  {columns}\n        Exception: {message}")
            }
        }
    }

    pub fn format_auth_success(credential: &Credential) -> String {
        format!(
            "✓ Authentication successful (Token: {}...)",
            credential.preview().unwrap_or_default()
        )
    }

    pub fn format_auth_rejected(status: u16) -> String {
        format!("✗ Login failed: {status}")
    }

    pub fn format_auth_error(message: &str) -> String {
        format!("✗ Auth error: {message}")
    }

    pub fn format_summary(summary: &RunSummary) -> String {
        summary.to_string()
    }

    pub fn format_json(summary: &RunSummary) -> String {
        serde_json::to_string_pretty(summary).unwrap_or_default()
    }

    /// Table printed by `list`
    pub fn format_endpoint_table(endpoints: &[Endpoint]) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "  {:6} {:30} {:9} {}\n",
            "METHOD", "PATH", "AUTH", "DESCRIPTION"
        ));
        output.push_str(&format!("  {}\n", Self::single_rule()));
        for endpoint in endpoints {
            let auth = if endpoint.protected { "bearer" } else { "-" };
            output.push_str(&format!(
                "  {:6} {:30} {:9} {}\n",
                endpoint.method, endpoint.path, auth, endpoint.description
            ));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn result(index: usize, outcome: CheckOutcome) -> CheckResult {
        CheckResult::new(Endpoint::all()[index], outcome, 3)
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("TEXT"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_str("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("csv"), None);
    }

    #[test]
    fn test_pass_line() {
        let line = ResultFormatter::format_check(&result(0, CheckOutcome::from_status(200)));
        assert_eq!(
            line,
            format!("✓ 200 OK    GET    {:30} Get authors list", "/authors")
        );
    }

    #[test]
    fn test_fail_line() {
        let line = ResultFormatter::format_check(&result(3, CheckOutcome::from_status(401)));
        assert!(line.starts_with("✗ 401 ERROR  GET    /logs "));
        assert!(line.ends_with("Get activity logs"));
    }

    #[test]
    fn test_error_line_has_exception() {
        let outcome = CheckOutcome::Errored {
            message: "Timeout after 5 seconds".to_string(),
        };
        let text = ResultFormatter::format_check(&result(2, outcome));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("✗ ERROR  GET    /tags "));
        assert_eq!(lines[1], "        Exception: Timeout after 5 seconds");
    }

    #[test]
    fn test_auth_lines() {
        let credential = Credential::bearer("abcdefghijklmnopqrstuvwxyz");
        assert_eq!(
            ResultFormatter::format_auth_success(&credential),
            "✓ Authentication successful (Token: abcdefghijklmnopqrst...)"
        );
        assert_eq!(
            ResultFormatter::format_auth_rejected(401),
            "✗ Login failed: 401"
        );
    }

    #[test]
    fn test_json_summary() {
        let summary = RunSummary::new(
            "http://localhost:8000/api",
            Utc::now(),
            true,
            vec![result(0, CheckOutcome::from_status(200))],
        );
        let json: serde_json::Value =
            serde_json::from_str(&ResultFormatter::format_json(&summary)).unwrap();

        assert_eq!(json["passed"], 1);
        assert_eq!(json["failed"], 0);
        assert_eq!(json["results"][0]["endpoint"]["path"], "/authors");
    }

    #[test]
    fn test_endpoint_table() {
        let table = ResultFormatter::format_endpoint_table(Endpoint::all());
        assert_eq!(table.lines().count(), 2 + 7);
        assert!(table.contains("/latest-articles"));
    }
}
