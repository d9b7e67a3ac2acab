//! Configuration module
//!
//! The checker's settings come from built-in defaults, an optional config
//! file, `API_SMOKE_*` environment variables and CLI flags, in that order.

pub mod env;
mod file;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub use env::EnvConfig;
pub use file::ConfigFile;

/// Settings for one checklist run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,

    /// Login path, relative to the base URL
    pub login_path: String,

    /// Login email
    pub email: String,

    /// Login password
    pub password: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            login_path: "/login".to_string(),
            email: "final@test.com".to_string(),
            password: "Pass123".to_string(),
            timeout_secs: 5,
        }
    }
}

impl CheckerConfig {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Apply environment overrides
    pub fn merge_env(mut self, env: &EnvConfig) -> Self {
        if let Some(url) = &env.base_url {
            self.base_url = url.clone();
        }
        if let Some(path) = &env.login_path {
            self.login_path = path.clone();
        }
        if let Some(email) = &env.email {
            self.email = email.clone();
        }
        if let Some(password) = &env.password {
            self.password = password.clone();
        }
        if let Some(timeout) = env.timeout {
            self.timeout_secs = timeout;
        }
        self
    }

    /// Check that the settings can drive a run
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            anyhow::bail!(
                "Invalid base URL '{}': must start with http:// or https://",
                self.base_url
            );
        }
        if !self.login_path.starts_with('/') {
            anyhow::bail!("Invalid login path '{}': must start with '/'", self.login_path);
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("Timeout must be at least 1 second");
        }
        Ok(())
    }
}
