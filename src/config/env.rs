//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "API_SMOKE";

/// Overrides read from `API_SMOKE_*` variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Base URL from API_SMOKE_BASE_URL
    pub base_url: Option<String>,
    /// Login path from API_SMOKE_LOGIN_PATH
    pub login_path: Option<String>,
    /// Email from API_SMOKE_EMAIL
    pub email: Option<String>,
    /// Password from API_SMOKE_PASSWORD
    pub password: Option<String>,
    /// Timeout from API_SMOKE_TIMEOUT
    pub timeout: Option<u64>,
    /// Config file from API_SMOKE_CONFIG
    pub config_file: Option<String>,
    /// Output format from API_SMOKE_FORMAT
    pub format: Option<String>,
    /// Verbose from API_SMOKE_VERBOSE
    pub verbose: Option<bool>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            base_url: get_env("BASE_URL"),
            login_path: get_env("LOGIN_PATH"),
            email: get_env("EMAIL"),
            password: get_env("PASSWORD"),
            timeout: get_env_parse("TIMEOUT"),
            config_file: get_env("CONFIG"),
            format: get_env("FORMAT"),
            verbose: get_env_bool("VERBOSE"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.base_url.is_some()
            || self.login_path.is_some()
            || self.email.is_some()
            || self.password.is_some()
            || self.timeout.is_some()
            || self.config_file.is_some()
            || self.format.is_some()
            || self.verbose.is_some()
    }

    /// Print current environment configuration
    pub fn print_summary(&self) {
        let password = self.password.as_ref().map(|_| "********");
        println!("Environment Configuration:");
        println!("  {}_BASE_URL:    {:?}", ENV_PREFIX, self.base_url);
        println!("  {}_LOGIN_PATH:  {:?}", ENV_PREFIX, self.login_path);
        println!("  {}_EMAIL:       {:?}", ENV_PREFIX, self.email);
        println!("  {}_PASSWORD:    {:?}", ENV_PREFIX, password);
        println!("  {}_TIMEOUT:     {:?}", ENV_PREFIX, self.timeout);
        println!("  {}_CONFIG:      {:?}", ENV_PREFIX, self.config_file);
        println!("  {}_FORMAT:      {:?}", ENV_PREFIX, self.format);
        println!("  {}_VERBOSE:     {:?}", ENV_PREFIX, self.verbose);
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.parse().ok())
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "enabled"
        )
    })
}

/// Print all API_SMOKE environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_BASE_URL     Base URL of the API (e.g. http://localhost:8000/api)");
    println!("  {ENV_PREFIX}_LOGIN_PATH   Login path relative to the base URL");
    println!("  {ENV_PREFIX}_EMAIL        Login email");
    println!("  {ENV_PREFIX}_PASSWORD     Login password");
    println!("  {ENV_PREFIX}_TIMEOUT      Per-request timeout in seconds");
    println!("  {ENV_PREFIX}_CONFIG       Path to configuration file");
    println!("  {ENV_PREFIX}_FORMAT       Output format (text, json)");
    println!("  {ENV_PREFIX}_VERBOSE      Enable debug logging (true/false)");
    println!();
    println!("Example:");
    println!("  export {ENV_PREFIX}_BASE_URL=https://staging.example.com/api");
    println!("  api-smoke run");
}
