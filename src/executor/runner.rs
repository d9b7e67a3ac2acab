//! Checklist runner
//!
//! Logs in once, then requests every endpoint of the table in order. Neither a
//! failed login nor a failed endpoint stops the run.

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::json;
use std::fmt;
use std::io::Write;
use tracing::{debug, info, warn};

use crate::auth::{AuthError, Authenticator};
use crate::config::CheckerConfig;
use crate::http::{HttpClient, HttpRequest};
use crate::models::{CheckOutcome, CheckResult, Credential, Endpoint, RunSummary};
use crate::output::Reporter;
use crate::utils::Timer;

/// Run lifecycle. Transitions only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunPhase {
    Init,
    Authenticating,
    Testing,
    Done,
}

impl RunPhase {
    /// Following phase; `Done` is terminal
    pub fn next(self) -> Self {
        match self {
            RunPhase::Init => RunPhase::Authenticating,
            RunPhase::Authenticating => RunPhase::Testing,
            RunPhase::Testing | RunPhase::Done => RunPhase::Done,
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Init => "INIT",
            RunPhase::Authenticating => "AUTHENTICATING",
            RunPhase::Testing => "TESTING",
            RunPhase::Done => "DONE",
        };
        f.write_str(name)
    }
}

/// Sequential checklist runner
pub struct CheckRunner {
    config: CheckerConfig,
    client: HttpClient,
    endpoints: &'static [Endpoint],
    phase: RunPhase,
}

impl CheckRunner {
    /// Create a runner for the reference endpoint table
    pub fn new(config: CheckerConfig) -> Result<Self> {
        let client = HttpClient::with_timeout(config.timeout_secs)
            .context("Failed to create HTTP client")?
            .base_url(&config.base_url);

        Ok(Self {
            config,
            client,
            endpoints: Endpoint::all(),
            phase: RunPhase::Init,
        })
    }

    /// Check a different table
    #[cfg(test)]
    pub fn with_endpoints(mut self, endpoints: &'static [Endpoint]) -> Self {
        self.endpoints = endpoints;
        self
    }

    #[cfg(test)]
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    fn advance(&mut self) {
        let next = self.phase.next();
        debug!("Run phase {} -> {}", self.phase, next);
        self.phase = next;
    }

    /// Single login call
    pub async fn authenticate(&self) -> Result<Credential, AuthError> {
        Authenticator::new(&self.client, &self.config).login().await
    }

    /// Check one endpoint; the credential is attached only if it is protected
    pub async fn check_endpoint(&self, endpoint: &Endpoint, credential: &Credential) -> CheckResult {
        let mut request =
            HttpRequest::new(endpoint.method, endpoint.path).headers(credential.headers_for(endpoint));
        if endpoint.method.has_body() {
            request = request.json(&json!({}));
        }

        let timer = Timer::start(endpoint.to_string());
        let outcome = match self.client.send(request).await {
            Ok(response) => {
                let outcome = CheckOutcome::from_status(response.status_code);
                if !outcome.is_pass() {
                    warn!("{} returned {}", endpoint, response.status_code);
                }
                outcome
            }
            Err(e) => {
                warn!("{} failed: {}", endpoint, e);
                CheckOutcome::Errored {
                    message: e.to_string(),
                }
            }
        };

        CheckResult::new(*endpoint, outcome, timer.elapsed_ms())
    }

    /// Run the whole checklist, reporting as it goes
    pub async fn run<W: Write>(mut self, reporter: &mut Reporter<W>) -> Result<RunSummary> {
        let started_at = Utc::now();
        let timer = Timer::start("checklist run");
        info!(
            "Checking {} endpoints at {}",
            self.endpoints.len(),
            self.config.base_url
        );

        reporter.banner().context("Failed to write report")?;

        self.advance();
        reporter.auth_phase().context("Failed to write report")?;
        let credential = match self.authenticate().await {
            Ok(credential) => {
                reporter
                    .auth_succeeded(&credential)
                    .context("Failed to write report")?;
                credential
            }
            Err(e) => {
                warn!("Login failed, continuing unauthenticated: {}", e);
                reporter.auth_failed(&e).context("Failed to write report")?;
                Credential::none()
            }
        };

        self.advance();
        reporter.checks_phase().context("Failed to write report")?;
        let mut results = Vec::with_capacity(self.endpoints.len());
        for endpoint in self.endpoints {
            let result = self.check_endpoint(endpoint, &credential).await;
            debug!("{}", result);
            reporter.check(&result).context("Failed to write report")?;
            results.push(result);
        }

        self.advance();
        let summary = RunSummary::new(
            &self.config.base_url,
            started_at,
            credential.is_present(),
            results,
        );
        reporter.finish(&summary).context("Failed to write report")?;

        info!(
            "Run completed in {}ms: {} passed, {} failed of {}",
            timer.stop().as_millis(),
            summary.passed,
            summary.failed,
            summary.total()
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpMethod;
    use crate::output::OutputFormat;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_login(server: &MockServer, template: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(template)
            .mount(server)
            .await;
    }

    async fn mount_all_ok(server: &MockServer) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(server)
            .await;
    }

    fn config_for(base_url: impl Into<String>, timeout_secs: u64) -> CheckerConfig {
        CheckerConfig::default()
            .with_base_url(base_url)
            .with_timeout(timeout_secs)
    }

    async fn run_against(config: CheckerConfig) -> (RunSummary, String) {
        let mut reporter = Reporter::new(Vec::new(), OutputFormat::Text);
        let summary = CheckRunner::new(config)
            .unwrap()
            .run(&mut reporter)
            .await
            .unwrap();
        (summary, String::from_utf8(reporter.into_inner()).unwrap())
    }

    /// Authorization header of every received request to `p`
    async fn auth_headers_for(server: &MockServer, p: &str) -> Vec<Option<String>> {
        server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.url.path() == p)
            .map(|r| {
                r.headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            })
            .collect()
    }

    #[test]
    fn test_phase_order() {
        assert_eq!(RunPhase::Init.next(), RunPhase::Authenticating);
        assert_eq!(RunPhase::Authenticating.next(), RunPhase::Testing);
        assert_eq!(RunPhase::Testing.next(), RunPhase::Done);
        assert_eq!(RunPhase::Done.next(), RunPhase::Done);
        assert_eq!(RunPhase::Testing.to_string(), "TESTING");
    }

    #[test]
    fn test_new_runner_starts_in_init() {
        let runner = CheckRunner::new(CheckerConfig::default()).unwrap();
        assert_eq!(runner.phase(), RunPhase::Init);
    }

    #[tokio::test]
    async fn test_expired_token_scenario() {
        let server = MockServer::start().await;
        mount_login(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"token": "abc123def456ghi789jkl"})),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/logs"))
            .respond_with(ResponseTemplate::new(401))
            .with_priority(1)
            .mount(&server)
            .await;
        mount_all_ok(&server).await;

        let (summary, text) = run_against(config_for(server.uri(), 5)).await;

        assert!(summary.authenticated);
        assert_eq!(summary.passed, 6);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.exit_code(), 1);
        assert!(text.contains(&format!("✓ 200 OK    GET    {:30} Get authors list", "/authors")));
        assert!(text.contains("✗ 401 ERROR  GET    /logs"));
        assert!(text.contains("✓ Authentication successful (Token: abc123def456ghi789jk...)"));
        assert!(text.contains("RESULTS: 6 PASSED | 1 FAILED"));
    }

    #[tokio::test]
    async fn test_bearer_only_on_protected_endpoints() {
        let server = MockServer::start().await;
        mount_login(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"token": "abc123"})),
        )
        .await;
        mount_all_ok(&server).await;

        let (summary, _) = run_against(config_for(server.uri(), 5)).await;
        assert_eq!(summary.exit_code(), 0);

        for endpoint in Endpoint::all() {
            let headers = auth_headers_for(&server, endpoint.path).await;
            assert_eq!(headers.len(), 1, "{} requested once", endpoint.path);
            if endpoint.protected {
                assert_eq!(headers[0].as_deref(), Some("Bearer abc123"));
            } else {
                assert_eq!(headers[0], None);
            }
        }
    }

    #[tokio::test]
    async fn test_failed_login_sends_no_credentials() {
        let server = MockServer::start().await;
        mount_login(&server, ResponseTemplate::new(500)).await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer abc123"))
            .respond_with(ResponseTemplate::new(200))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tags"))
            .respond_with(ResponseTemplate::new(401))
            .with_priority(2)
            .mount(&server)
            .await;
        mount_all_ok(&server).await;

        let (summary, text) = run_against(config_for(server.uri(), 5)).await;

        assert!(!summary.authenticated);
        assert_eq!(summary.total(), 7);
        assert_eq!(summary.passed + summary.failed, 7);
        assert_eq!(summary.failed, 1);
        assert!(text.contains("✗ Login failed: 500"));

        let requests = server.received_requests().await.unwrap();
        assert!(requests
            .iter()
            .all(|r| r.headers.get("authorization").is_none()));
    }

    #[tokio::test]
    async fn test_login_without_token_is_unauthenticated() {
        let server = MockServer::start().await;
        mount_login(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})),
        )
        .await;
        mount_all_ok(&server).await;

        let (summary, text) = run_against(config_for(server.uri(), 5)).await;

        assert!(!summary.authenticated);
        assert_eq!(summary.passed, 7);
        assert!(text.contains("✗ Auth error: login response has no token field"));
    }

    #[tokio::test]
    async fn test_timeout_fails_only_that_endpoint() {
        let server = MockServer::start().await;
        mount_login(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"token": "abc123"})),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/categories"))
            .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(3)))
            .with_priority(1)
            .mount(&server)
            .await;
        mount_all_ok(&server).await;

        let (summary, text) = run_against(config_for(server.uri(), 1)).await;

        assert_eq!(summary.passed, 6);
        assert_eq!(summary.failed, 1);
        let slow = &summary.results[1];
        assert_eq!(slow.endpoint.path, "/categories");
        assert!(matches!(slow.outcome, CheckOutcome::Errored { .. }));
        assert!(text.contains("Exception: Timeout after 1 seconds"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_completes_all_checks() {
        let (summary, text) = run_against(config_for("http://127.0.0.1:1", 2)).await;

        assert!(!summary.authenticated);
        assert_eq!(summary.passed, 0);
        assert_eq!(summary.failed, 7);
        assert_eq!(summary.exit_code(), 1);
        assert!(summary
            .results
            .iter()
            .all(|r| matches!(r.outcome, CheckOutcome::Errored { .. })));
        assert!(text.contains("✗ Auth error:"));
        assert!(text.contains("RESULTS: 0 PASSED | 7 FAILED"));
    }

    #[tokio::test]
    async fn test_write_methods_send_empty_json() {
        static WRITE_TABLE: &[Endpoint] = &[
            Endpoint {
                method: HttpMethod::Post,
                path: "/articles",
                description: "Create article",
                protected: true,
            },
            Endpoint {
                method: HttpMethod::Put,
                path: "/articles/1",
                description: "Update article",
                protected: true,
            },
        ];

        let server = MockServer::start().await;
        mount_login(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"token": "abc123"})),
        )
        .await;
        Mock::given(method("POST"))
            .and(path("/articles"))
            .and(header("authorization", "Bearer abc123"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/articles/1"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut reporter = Reporter::new(Vec::new(), OutputFormat::Json);
        let summary = CheckRunner::new(config_for(server.uri(), 5))
            .unwrap()
            .with_endpoints(WRITE_TABLE)
            .run(&mut reporter)
            .await
            .unwrap();

        assert_eq!(summary.passed, 2);
        assert_eq!(summary.exit_code(), 0);
    }

    #[tokio::test]
    async fn test_classification_is_repeatable() {
        let server = MockServer::start().await;
        mount_login(&server, ResponseTemplate::new(401)).await;
        Mock::given(method("GET"))
            .and(path("/articles"))
            .respond_with(ResponseTemplate::new(401))
            .with_priority(1)
            .mount(&server)
            .await;
        mount_all_ok(&server).await;

        let (first, _) = run_against(config_for(server.uri(), 5)).await;
        let (second, _) = run_against(config_for(server.uri(), 5)).await;

        let outcomes = |s: &RunSummary| -> Vec<CheckOutcome> {
            s.results.iter().map(|r| r.outcome.clone()).collect()
        };
        assert_eq!(outcomes(&first), outcomes(&second));
    }
}
